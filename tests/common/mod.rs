//! Shared test utilities and fixtures.

#![allow(dead_code)]

use contractum::{ensures, if_debug, invariant, requires, ContractViolation, Invariant, Policy};

// Re-export canonical test utilities from contractum::testing
pub use contractum::testing::catch_violation;

// ============================================================================
// POLICY-AWARE RUNNERS
// ============================================================================

/// Run a fragment that violates a contract and check it fails the way the
/// compiled policy says.
///
/// - Throw: returns the raised violation.
/// - Off: asserts nothing was raised, returns `None`.
/// - Abort: `f` is not run (it would end the test process; the probe tests
///   cover that path), returns `None`.
pub fn violation_under_policy<F: FnOnce()>(f: F) -> Option<ContractViolation> {
    match Policy::ACTIVE {
        Policy::Throw => Some(catch_violation(f).expect("expected a contract violation")),
        Policy::Off => {
            assert!(catch_violation(f).is_none(), "disabled build raised a violation");
            None
        }
        Policy::Abort => None,
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// A stack with a fixed capacity, checked by hand-written contract macros.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Invariant for Stack<T> {
    fn is_valid(&self) -> bool {
        self.items.len() <= self.capacity
    }
}

impl<T> Stack<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        requires!(capacity > 0);
        Stack {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn push(&mut self, item: T) {
        requires!(self.items.len() < self.capacity);
        if_debug! { let before = self.items.len(); }
        self.items.push(item);
        ensures!(self.items.len() == before + 1);
        invariant!(self);
    }

    pub fn pop(&mut self) -> Option<T> {
        requires!(!self.items.is_empty());
        let item = self.items.pop();
        invariant!(self);
        item
    }

    /// Push past capacity without any check, leaving the stack invalid.
    pub fn overfill(&mut self, item: T) {
        self.items.push(item);
    }
}
