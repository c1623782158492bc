// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Contract constructs.
//!
//! Every construct routes through `__dispatch!`, which has exactly one
//! definition per build. The two definitions are selected by complementary
//! `cfg` predicates, so switching flags rebuilds every construct from the
//! current configuration and nothing of a previous one survives:
//!
//! - checking disabled (`disabled` feature, or no `debug_assertions`): the
//!   condition tokens are dropped. They are not evaluated and not even
//!   type-checked, which lets conditions mention bindings that only exist
//!   under [`if_debug!`].
//! - checking enabled: the condition is evaluated once; on `false` the failure
//!   path of [`Policy::ACTIVE`](crate::Policy::ACTIVE) runs
//!   ([`report::violated`](crate::report::violated)).
//!
//! Because a disabled build drops the condition, a local that is read only
//! inside conditions goes unused there and rustc warns about it. Compute such
//! values inside the condition, or declare them under [`if_debug!`].
//!
//! The three behaviors are also available under fixed names that ignore the
//! flags: [`check_noop!`], [`check_abort!`] and [`check_throw!`].

// ============================================================================
// DISPATCH
// ============================================================================

#[cfg(any(feature = "disabled", not(debug_assertions)))]
#[doc(hidden)]
#[macro_export]
macro_rules! __dispatch {
    ($clause:ident, $cond:expr, $text:expr) => {
        ()
    };
}

#[cfg(not(any(feature = "disabled", not(debug_assertions))))]
#[doc(hidden)]
#[macro_export]
macro_rules! __dispatch {
    ($clause:ident, $cond:expr, $text:expr) => {
        if !($cond) {
            $crate::report::violated(
                $crate::Clause::$clause,
                $crate::Site::new(file!(), line!(), column!()),
                $text,
            )
        }
    };
}

// ============================================================================
// CONTRACT CHECKS
// ============================================================================

/// Precondition: something that must hold for the function to behave.
///
/// ```
/// fn withdraw(balance: &mut i64, amount: i64) {
///     contractum::requires!(amount > 0);
///     contractum::requires!(*balance >= amount);
///     *balance -= amount;
/// }
///
/// let mut balance = 10;
/// withdraw(&mut balance, 4);
/// assert_eq!(balance, 6);
/// ```
#[macro_export]
macro_rules! requires {
    (@text $text:expr, $cond:expr $(,)?) => {
        $crate::__dispatch!(Precondition, $cond, $text)
    };
    ($cond:expr $(,)?) => {
        $crate::__dispatch!(Precondition, $cond, stringify!($cond))
    };
}

/// Postcondition: something the function guarantees on exit.
///
/// Pair it with [`if_debug!`] to compare against a value captured on entry:
///
/// ```
/// fn deposit(balance: &mut i64, amount: i64) {
///     contractum::if_debug! { let before = *balance; }
///     *balance += amount;
///     contractum::ensures!(*balance == before + amount);
/// }
///
/// let mut balance = 1;
/// deposit(&mut balance, 2);
/// assert_eq!(balance, 3);
/// ```
#[macro_export]
macro_rules! ensures {
    (@text $text:expr, $cond:expr $(,)?) => {
        $crate::__dispatch!(Postcondition, $cond, $text)
    };
    ($cond:expr $(,)?) => {
        $crate::__dispatch!(Postcondition, $cond, stringify!($cond))
    };
}

/// Plain assertion, dispatched like the other checks.
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        $crate::__dispatch!(Assertion, $cond, stringify!($cond))
    };
}

/// Class invariant: asserts that `value` reports itself consistent through
/// [`Invariant::is_valid`](crate::Invariant::is_valid).
///
/// Nothing else about `value` is examined. Typical use is
/// `invariant!(self)` at the end of every mutating method.
#[macro_export]
macro_rules! invariant {
    ($value:expr $(,)?) => {
        $crate::__dispatch!(
            Invariant,
            $crate::invariant::holds(&$value),
            concat!(stringify!($value), ".is_valid()")
        )
    };
}

// ============================================================================
// CONDITIONAL CODE
// ============================================================================

/// Pick one of two alternatives depending on whether checks are enabled.
///
/// Expression form: `if_else_debug!(on, off)`. Statement/item form:
/// `if_else_debug!({ on.. } else { off.. })`, where the chosen tokens are
/// spliced in place so bindings and items stay visible afterwards.
///
/// ```
/// let mode = contractum::if_else_debug!("checked", "unchecked");
/// assert!(mode == "checked" || mode == "unchecked");
/// ```
#[cfg(not(any(feature = "disabled", not(debug_assertions))))]
#[macro_export]
macro_rules! if_else_debug {
    ({ $($on:tt)* } else { $($off:tt)* }) => {
        $($on)*
    };
    ($on:expr, $off:expr $(,)?) => {
        $on
    };
}

#[cfg(any(feature = "disabled", not(debug_assertions)))]
#[macro_export]
macro_rules! if_else_debug {
    ({ $($on:tt)* } else { $($off:tt)* }) => {
        $($off)*
    };
    ($on:expr, $off:expr $(,)?) => {
        $off
    };
}

/// Code that only exists while checks are enabled.
///
/// Works for statements and items. Whatever it declares disappears entirely
/// when checking is disabled, so only contract checks may refer to it.
#[macro_export]
macro_rules! if_debug {
    ($($code:tt)*) => {
        $crate::if_else_debug! { { $($code)* } else {} }
    };
}

/// Code that only exists while checks are disabled.
#[macro_export]
macro_rules! if_not_debug {
    ($($code:tt)*) => {
        $crate::if_else_debug! { {} else { $($code)* } }
    };
}

// ============================================================================
// FIXED-POLICY FORMS
// ============================================================================

/// A check that never runs, whatever the build flags. The condition is
/// dropped unevaluated.
#[macro_export]
macro_rules! check_noop {
    ($cond:expr $(,)?) => {
        ()
    };
}

/// A check that reports on stderr and aborts the process when `cond` is
/// false, whatever the build flags.
#[macro_export]
macro_rules! check_abort {
    ($cond:expr $(,)?) => {
        if !($cond) {
            $crate::report::abort(
                $crate::Clause::Assertion,
                $crate::Site::new(file!(), line!(), column!()),
                stringify!($cond),
            )
        }
    };
}

/// A check that raises a [`ContractViolation`](crate::ContractViolation)
/// panic when `cond` is false, whatever the build flags. Aborts instead when
/// built with `panic = "abort"`.
#[macro_export]
macro_rules! check_throw {
    ($cond:expr $(,)?) => {
        if !($cond) {
            $crate::report::raise(
                $crate::Clause::Assertion,
                $crate::Site::new(file!(), line!(), column!()),
                stringify!($cond),
            )
        }
    };
}
