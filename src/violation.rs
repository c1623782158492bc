// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The failure record and the exception-mode error kind.

use std::fmt;

/// Which construct a failed check came from.
///
/// Purely informational: every clause goes through the same failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Clause {
    Precondition,
    Postcondition,
    Invariant,
    Assertion,
    /// `expect_panic!` saw no panic, or a panic of the wrong kind.
    Expectation,
}

impl Clause {
    pub const fn as_str(self) -> &'static str {
        match self {
            Clause::Precondition => "precondition",
            Clause::Postcondition => "postcondition",
            Clause::Invariant => "invariant",
            Clause::Assertion => "assertion",
            Clause::Expectation => "expectation",
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source location of a check, captured with `file!()`, `line!()` and `column!()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Site {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Site {
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Site { file, line, column }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A contract check failed while exception mode was active.
///
/// Raised as a panic payload, so it unwinds like any other panic and can be
/// recovered with [`std::panic::catch_unwind`] and
/// `payload.downcast::<ContractViolation>()`. Its message is the literal
/// source text of the failed condition.
///
/// # Example
///
/// ```ignore
/// let payload = std::panic::catch_unwind(|| withdraw(&mut account, 500)).unwrap_err();
/// let violation = payload.downcast::<ContractViolation>().unwrap();
/// assert_eq!(violation.message(), "self.balance >= amount");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("{condition}")]
pub struct ContractViolation {
    clause: Clause,
    site: Site,
    condition: &'static str,
}

impl ContractViolation {
    pub const fn new(clause: Clause, site: Site, condition: &'static str) -> Self {
        ContractViolation {
            clause,
            site,
            condition,
        }
    }

    /// The failed condition, exactly as written at the call site.
    pub const fn message(&self) -> &'static str {
        self.condition
    }

    pub const fn clause(&self) -> Clause {
        self.clause
    }

    pub const fn site(&self) -> Site {
        self.site
    }
}
