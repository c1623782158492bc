// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The scenarios behind each subcommand.
//!
//! Integration tests locate the check lines in this file to verify the line
//! numbers in diagnostics, so keep each check on a line of its own.

use std::cell::Cell;
use std::io::Write;

use contractum::testing::Ledger;
use contractum::{expect_panic, Message};

use crate::cli::{Outcome, Via};

pub fn account(balance: i64, via: Via) {
    tracing::info!(balance, ?via, "checking account balance");
    match via {
        Via::Active => contractum::requires!(balance > 0),
        Via::Abort => contractum::check_abort!(balance > 0),
        Via::Throw => contractum::check_throw!(balance > 0),
        Via::Noop => contractum::check_noop!(balance > 0),
    }
    println!("balance {} accepted", balance);
}

pub fn invariant(corrupt: bool) {
    let ledger = if corrupt {
        Ledger::corrupted()
    } else {
        Ledger::new(10)
    };
    tracing::info!(balance = ledger.balance(), "checking ledger");
    contractum::invariant!(ledger);
    println!("ledger consistent");
}

pub fn expect(outcome: Outcome) {
    tracing::info!(?outcome, "expecting a message panic");
    match outcome {
        Outcome::None => expect_panic!(checksum(&[1, 2, 3]), Message),
        Outcome::Match => expect_panic!(checksum(&[]), Message),
        Outcome::Other => expect_panic!(std::panic::panic_any(7_u32), Message),
    }
    println!("expectation met");
}

/// Sum of the bytes; panics on empty input.
#[allow(dead_code)] // only called from expect_panic!, which is empty when disabled
fn checksum(bytes: &[u8]) -> u32 {
    assert!(!bytes.is_empty(), "checksum of nothing");
    bytes.iter().map(|&b| u32::from(b)).sum()
}

pub fn reconfigure() {
    let evaluations = Cell::new(0_u32);
    let failing = || {
        evaluations.set(evaluations.get() + 1);
        false
    };

    contractum::check_noop!(failing());
    println!("after noop: {} evaluations", evaluations.get());
    let _ = std::io::stdout().flush();

    contractum::check_abort!(failing());
    println!("unreachable: {} evaluations", evaluations.get());
}
