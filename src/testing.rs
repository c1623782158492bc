// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests and the probe.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::panic::{self, AssertUnwindSafe};

use crate::{ContractViolation, Invariant};

/// Run `f` and return the [`ContractViolation`] it raised, if any.
///
/// Panics with other payloads are resumed.
pub fn catch_violation<F: FnOnce()>(f: F) -> Option<ContractViolation> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => None,
        Err(payload) => match payload.downcast::<ContractViolation>() {
            Ok(violation) => Some(*violation),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

/// A toy account ledger: the balance must equal the sum of its entries and
/// never go negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<i64>,
    balance: i64,
}

impl Ledger {
    pub fn new(opening: i64) -> Self {
        Ledger {
            entries: vec![opening],
            balance: opening,
        }
    }

    /// A ledger whose cached balance disagrees with its entries.
    pub fn corrupted() -> Self {
        Ledger {
            entries: vec![10],
            balance: 99,
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn entries(&self) -> &[i64] {
        &self.entries
    }

    pub fn deposit(&mut self, amount: i64) {
        crate::requires!(amount > 0);
        crate::if_debug! { let before = self.balance; }
        self.entries.push(amount);
        self.balance += amount;
        crate::ensures!(self.balance == before + amount);
        crate::invariant!(self);
    }

    pub fn withdraw(&mut self, amount: i64) {
        crate::requires!(amount > 0);
        crate::requires!(self.balance >= amount);
        self.entries.push(-amount);
        self.balance -= amount;
        crate::invariant!(self);
    }
}

impl Invariant for Ledger {
    fn is_valid(&self) -> bool {
        self.balance >= 0 && self.entries.iter().sum::<i64>() == self.balance
    }
}
