// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Panic expectations for test code.
//!
//! [`expect_panic!`](crate::expect_panic!) runs a fragment and checks that it
//! panics with a payload of a given kind. Rust has no exception hierarchy, so
//! "kind" is whatever a [`PanicKind`] implementation accepts: by default an
//! exact downcast to the implementing type, or a hand-written is-a relation.
//!
//! ```ignore
//! struct Timeout;
//! struct NetworkError;
//!
//! impl PanicKind for Timeout {}
//!
//! // A Timeout is a NetworkError
//! impl PanicKind for NetworkError {
//!     fn matches(payload: &(dyn Any + Send)) -> bool {
//!         payload.is::<NetworkError>() || payload.is::<Timeout>()
//!     }
//! }
//!
//! expect_panic!(std::panic::panic_any(Timeout), NetworkError);
//! ```
//!
//! The first expectation wraps the installed panic hook so that a panic the
//! running expectation accepts prints nothing. Panics of any other kind, and
//! panics on other threads, still reach the previous hook.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::violation::ContractViolation;

/// A class of panic payloads that `expect_panic!` can wait for.
pub trait PanicKind: Any {
    /// Whether `payload` is of this kind.
    fn matches(payload: &(dyn Any + Send)) -> bool
    where
        Self: Sized,
    {
        payload.is::<Self>()
    }
}

impl PanicKind for ContractViolation {}

impl PanicKind for String {}

impl PanicKind for &'static str {}

/// Any textual panic, whatever its payload type.
///
/// `panic!` with a message known at compile time carries a `&'static str`;
/// since Rust 1.79 that includes format strings whose arguments are all
/// constants, so `panic!("boom {}", 1)` is one too. Messages formatted from
/// runtime values, and most std panics (out-of-bounds index, `unwrap` on
/// `None`, ...), carry a `String`. Match on this kind rather than on either
/// type.
#[derive(Debug, Clone, Copy)]
pub struct Message;

impl PanicKind for Message {
    fn matches(payload: &(dyn Any + Send)) -> bool {
        payload.is::<String>() || payload.is::<&'static str>()
    }
}

/// Every payload. The kind all others derive from.
#[derive(Debug, Clone, Copy)]
pub struct AnyPanic;

impl PanicKind for AnyPanic {
    fn matches(_payload: &(dyn Any + Send)) -> bool {
        true
    }
}

/// Text of a panic payload, if it has any.
pub fn message_of(payload: &(dyn Any + Send)) -> Option<&str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        Some(s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        Some(s.as_str())
    } else {
        payload
            .downcast_ref::<ContractViolation>()
            .map(ContractViolation::message)
    }
}

type Matcher = fn(&(dyn Any + Send)) -> bool;

thread_local! {
    /// What the innermost expectation running on this thread accepts.
    static EXPECTED: Cell<Option<Matcher>> = const { Cell::new(None) };
}

/// Wrap the current hook once, skipping it for expected panics.
fn quiet_expected_panics() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let expected = EXPECTED.with(Cell::get);
            if !expected.map_or(false, |matches| matches(info.payload())) {
                previous(info);
            }
        }));
    });
}

/// Run `code` once and classify the result.
///
/// `Ok(())` when it panicked with a payload of kind `K`. Otherwise the
/// matching failure message: `none` when nothing panicked, `other` for a
/// payload of another kind. The payload is dropped either way.
#[doc(hidden)]
pub fn outcome<K: PanicKind, F: FnOnce()>(
    code: F,
    none: &'static str,
    other: &'static str,
) -> Result<(), &'static str> {
    quiet_expected_panics();
    let outer = EXPECTED.with(|expected| expected.replace(Some(K::matches as Matcher)));
    let result = panic::catch_unwind(AssertUnwindSafe(code));
    EXPECTED.with(|expected| expected.set(outer));
    match result {
        Ok(()) => Err(none),
        Err(payload) if K::matches(&*payload) => Ok(()),
        Err(_) => Err(other),
    }
}

/// Check that `code` panics with a payload of kind `K`.
///
/// `code` runs exactly once when checks are enabled, and not at all when they
/// are disabled, so nothing may depend on its side effects. A missing panic
/// or a payload of another kind fails through the active policy with
/// `no panic was raised (expected: K)` or
/// `an unexpected panic was raised (expected: K)`.
///
/// `code` runs inside a closure: `return` and `?` leave the closure, not the
/// enclosing function.
///
/// Only available with `panic = "unwind"`; with `panic = "abort"` and checks
/// enabled, using it is a compile error.
///
/// ```
/// use contractum::{expect_panic, Message};
///
/// let v: Vec<i32> = Vec::new();
/// expect_panic!(v[2], Message);
/// ```
#[cfg(all(
    not(any(feature = "disabled", not(debug_assertions))),
    panic = "unwind"
))]
#[macro_export]
macro_rules! expect_panic {
    ($code:expr, $kind:ty $(,)?) => {
        if let ::core::result::Result::Err(message) = $crate::expect::outcome::<$kind, _>(
            || {
                let _ = $code;
            },
            concat!("no panic was raised (expected: ", stringify!($kind), ")"),
            concat!(
                "an unexpected panic was raised (expected: ",
                stringify!($kind),
                ")"
            ),
        ) {
            $crate::report::violated(
                $crate::Clause::Expectation,
                $crate::Site::new(file!(), line!(), column!()),
                message,
            )
        }
    };
}

#[cfg(all(
    not(any(feature = "disabled", not(debug_assertions))),
    not(panic = "unwind")
))]
#[macro_export]
macro_rules! expect_panic {
    ($code:expr, $kind:ty $(,)?) => {
        compile_error!("expect_panic! needs panic = \"unwind\": panics cannot be caught under panic = \"abort\"")
    };
}

#[cfg(any(feature = "disabled", not(debug_assertions)))]
#[macro_export]
macro_rules! expect_panic {
    ($code:expr, $kind:ty $(,)?) => {
        ()
    };
}
