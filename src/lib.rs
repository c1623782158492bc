// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Design-by-contract assertions that compile away.
//!
//! Annotate a function with what it requires on entry, what it ensures on
//! exit, and the invariants its types maintain. Whether those checks exist at
//! all is decided when `contractum` is compiled:
//!
//! | Build                                      | Failed check                              |
//! |--------------------------------------------|-------------------------------------------|
//! | `disabled` feature, or release build       | nothing: the check is not even compiled   |
//! | debug build                                | diagnostic on stderr, `process::abort()`  |
//! | debug build + `exceptions`, unwinding      | panic with a [`ContractViolation`] payload|
//!
//! # Architecture
//!
//! ```text
//! requires! ensures! check! invariant! expect_panic!
//!        │
//!        ▼
//! ┌──────────────┐  cfg-selected,  ┌─────────────────┐
//! │ __dispatch!  │ one per build   │ policy::Policy  │
//! └──────┬───────┘ ◀────────────── │ (ACTIVE)        │
//!        │ false                   └─────────────────┘
//!        ▼
//! ┌──────────────────────────────┐
//! │ report::violated             │──▶ report::abort  (stderr + abort)
//! │                              │──▶ report::raise  (ContractViolation panic)
//! └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use contractum::{contract, ensures, invariant, requires, Invariant};
//!
//! struct Account { balance: i64 }
//!
//! impl Invariant for Account {
//!     fn is_valid(&self) -> bool { self.balance >= 0 }
//! }
//!
//! impl Account {
//!     #[contract]
//!     #[requires(amount > 0 && amount <= self.balance)]
//!     #[ensures(self.balance == old(self.balance) - amount)]
//!     #[invariant]
//!     fn withdraw(&mut self, amount: i64) {
//!         self.balance -= amount;
//!     }
//! }
//! ```
//!
//! Conditions must not have side effects the program relies on: in a
//! disabled build they are never evaluated.

extern crate self as contractum;

#[macro_use]
mod macros;

pub mod expect;
pub mod invariant;
pub mod policy;
pub mod report;
pub mod testing;
mod violation;

pub use expect::{message_of, AnyPanic, Message, PanicKind};
pub use invariant::Invariant;
pub use policy::Policy;
pub use violation::{Clause, ContractViolation, Site};

#[cfg(feature = "macros")]
pub use contractum_macros::contract;
