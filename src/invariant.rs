// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The self-consistency capability checked by [`invariant!`](crate::invariant!).

use std::rc::Rc;
use std::sync::Arc;

/// A type that can report whether its internal state is consistent.
///
/// `is_valid` must not mutate anything the surrounding contracts depend on.
/// The contract machinery trusts the answer completely and inspects nothing
/// else about the value.
///
/// # Example
///
/// ```
/// use contractum::Invariant;
///
/// struct Range { lo: u32, hi: u32 }
///
/// impl Invariant for Range {
///     fn is_valid(&self) -> bool {
///         self.lo <= self.hi
///     }
/// }
///
/// let r = Range { lo: 1, hi: 4 };
/// contractum::invariant!(r);
/// ```
pub trait Invariant {
    fn is_valid(&self) -> bool;
}

impl<T: Invariant + ?Sized> Invariant for &T {
    #[inline]
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }
}

impl<T: Invariant + ?Sized> Invariant for &mut T {
    #[inline]
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }
}

impl<T: Invariant + ?Sized> Invariant for Box<T> {
    #[inline]
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }
}

impl<T: Invariant + ?Sized> Invariant for Rc<T> {
    #[inline]
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }
}

impl<T: Invariant + ?Sized> Invariant for Arc<T> {
    #[inline]
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }
}

/// Ask `value` for its self-consistency report.
///
/// Used by `invariant!` so the query always resolves to the trait method,
/// never to an inherent method of the same name.
#[doc(hidden)]
#[inline]
pub fn holds<T: Invariant + ?Sized>(value: &T) -> bool {
    value.is_valid()
}
