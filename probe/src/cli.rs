// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for contractum-probe.
//!
//! Each subcommand runs one contract scenario in this process, so a parent
//! (usually an integration test) can watch how the process ends: normally,
//! with a caught violation, or through the abort path.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "contractum-probe",
    about = "Run contract scenarios and report how they end",
    version
)]
pub struct Cli {
    /// Catch a raised ContractViolation and print it as JSON (exit code 2)
    #[arg(long, global = true)]
    pub catch: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Precondition `balance > 0` on an account balance
    Account {
        /// Balance to check
        #[arg(long, allow_hyphen_values = true)]
        balance: i64,

        /// Which construct performs the check
        #[arg(long, value_enum, default_value = "active")]
        via: Via,
    },

    /// Invariant check on a ledger
    Invariant {
        /// Use a ledger whose balance disagrees with its entries
        #[arg(long)]
        corrupt: bool,
    },

    /// Panic expectation with a chosen outcome
    Expect {
        #[arg(long, value_enum)]
        outcome: Outcome,
    },

    /// Failing check through check_noop!, then through check_abort!
    Reconfigure,

    /// Print the compiled policy as JSON
    Policy,
}

/// Construct used by the `account` scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Via {
    /// `requires!`, following the build flags
    Active,
    /// `check_abort!`
    Abort,
    /// `check_throw!`
    Throw,
    /// `check_noop!`
    Noop,
}

/// What the fragment given to `expect_panic!` does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    /// Returns normally
    None,
    /// Panics with a message, the expected kind
    Match,
    /// Panics with a non-text payload
    Other,
}
