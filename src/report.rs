// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Failure paths. Nothing in here returns.
//!
//! The abort path writes a fixed two-line diagnostic to stderr and then
//! aborts. Tooling scrapes that format, so it must not change:
//!
//! ```text
//! *** assertion failed at src/account.rs:42
//! balance > 0
//! ```
//!
//! The abort path does not allocate and never panics: stderr is unbuffered,
//! the arguments are all `&'static str` or integers, and write errors are
//! ignored because there is nowhere left to report them.

use std::io::{self, Write};

use crate::policy::Policy;
use crate::violation::{Clause, ContractViolation, Site};

/// Write the abort diagnostic for `site` and `message` to `out`.
pub fn write_diagnostic<W: Write + ?Sized>(out: &mut W, site: Site, message: &str) -> io::Result<()> {
    write!(
        out,
        "*** assertion failed at {}:{}\n{}\n",
        site.file, site.line, message
    )?;
    out.flush()
}

/// Report a failed check on stderr and abort the process.
#[cold]
#[inline(never)]
pub fn abort(clause: Clause, site: Site, message: &str) -> ! {
    trace(clause, site, message);
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let _ = write_diagnostic(&mut out, site, message);
    std::process::abort()
}

/// Raise a [`ContractViolation`] panic carrying `message`.
///
/// When the crate is built with `panic = "abort"` the panic could never be
/// caught, so this falls back to [`abort`].
#[cold]
#[inline(never)]
pub fn raise(clause: Clause, site: Site, message: &'static str) -> ! {
    if cfg!(panic = "unwind") {
        trace(clause, site, message);
        std::panic::panic_any(ContractViolation::new(clause, site, message))
    } else {
        abort(clause, site, message)
    }
}

/// The failure path of the active policy.
///
/// Only reachable from enabled checks, so `Policy::Off` cannot get here; it is
/// treated like `Abort` should it ever be called directly.
#[cold]
#[inline(never)]
pub fn violated(clause: Clause, site: Site, message: &'static str) -> ! {
    match Policy::ACTIVE {
        Policy::Throw => raise(clause, site, message),
        Policy::Abort | Policy::Off => abort(clause, site, message),
    }
}

#[cfg(feature = "tracing")]
fn trace(clause: Clause, site: Site, message: &str) {
    tracing::error!(
        target: "contractum",
        clause = clause.as_str(),
        file = site.file,
        line = site.line,
        condition = message,
        "contract violated"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
fn trace(_clause: Clause, _site: Site, _message: &str) {}
