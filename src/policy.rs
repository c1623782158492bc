// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Which of the three dispatch behaviors this build compiled to.
//!
//! The decision is made once, from the flags `contractum` itself is compiled
//! with. Nothing here is consulted at runtime by the checks: the macros in
//! [`crate::macros`] are selected by the same `cfg` predicates, and
//! [`Policy::ACTIVE`] exists so that callers (and tests) can see the choice.
//!
//! | `disabled` / no `debug_assertions` | `exceptions` | `panic = "unwind"` | Policy  |
//! |------------------------------------|--------------|--------------------|---------|
//! | yes                                | any          | any                | `Off`   |
//! | no                                 | yes          | yes                | `Throw` |
//! | no                                 | yes          | no                 | `Abort` |
//! | no                                 | no           | any                | `Abort` |

use std::fmt;

/// Compiled behavior of a contract check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Policy {
    /// Checks expand to nothing; conditions are never evaluated.
    Off,
    /// A failed check prints a diagnostic and aborts the process.
    Abort,
    /// A failed check panics with a [`ContractViolation`](crate::ContractViolation) payload.
    Throw,
}

impl Policy {
    /// The policy selected for this build.
    pub const ACTIVE: Policy = Policy::resolve(
        cfg!(any(feature = "disabled", not(debug_assertions))),
        cfg!(feature = "exceptions"),
        cfg!(panic = "unwind"),
    );

    /// Resolve a policy from the checking flag, the exception-mode flag and
    /// whether the target can unwind.
    ///
    /// The result depends on the arguments alone; there is no state carried
    /// over from any earlier configuration.
    pub const fn resolve(disabled: bool, exceptions: bool, unwind: bool) -> Policy {
        if disabled {
            Policy::Off
        } else if exceptions && unwind {
            Policy::Throw
        } else {
            Policy::Abort
        }
    }

    /// Whether checks evaluate their conditions under this policy.
    pub const fn is_checking(self) -> bool {
        !matches!(self, Policy::Off)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Policy::Off => "off",
            Policy::Abort => "abort",
            Policy::Throw => "throw",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
