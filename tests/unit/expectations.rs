//! `expect_panic!` and panic kinds.

// The fixtures are only reached through expect_panic!, which is empty when disabled.
#![cfg_attr(any(feature = "disabled", not(debug_assertions)), allow(dead_code))]

use std::any::Any;
use std::panic;

use super::common::violation_under_policy;
use contractum::{expect_panic, message_of, AnyPanic, Clause, ContractViolation, Message, PanicKind};

/// Base kind: any storage failure.
#[derive(Debug)]
struct StorageError;

/// A `DiskFull` is a `StorageError`.
#[derive(Debug)]
struct DiskFull;

impl PanicKind for DiskFull {}

impl PanicKind for StorageError {
    fn matches(payload: &(dyn Any + Send)) -> bool {
        payload.is::<StorageError>() || payload.is::<DiskFull>()
    }
}

fn write_block(free: usize) {
    if free == 0 {
        panic::panic_any(DiskFull);
    }
}

#[test]
fn test_expect_exact_kind() {
    expect_panic!(write_block(0), DiskFull);
}

#[test]
fn test_expect_base_kind_accepts_derived() {
    expect_panic!(write_block(0), StorageError);
    expect_panic!(write_block(0), AnyPanic);
}

#[test]
fn test_expect_std_panics_as_messages() {
    contractum::if_debug! {
        let empty: Vec<u8> = Vec::new();
    }
    expect_panic!(empty[1], Message);
    expect_panic!(None::<u8>.unwrap(), Message);
    expect_panic!("x".parse::<u8>().unwrap(), String);
}

#[test]
fn test_expect_contract_violation() {
    expect_panic!(contractum::check_throw!(2 + 2 == 5), ContractViolation);
}

#[test]
fn test_missing_panic_fails_expectation() {
    if let Some(violation) = violation_under_policy(|| expect_panic!(write_block(8), DiskFull)) {
        assert_eq!(violation.clause(), Clause::Expectation);
        assert_eq!(violation.message(), "no panic was raised (expected: DiskFull)");
    }
}

#[test]
fn test_base_payload_does_not_match_derived_kind() {
    if let Some(violation) =
        violation_under_policy(|| expect_panic!(panic::panic_any(StorageError), DiskFull))
    {
        assert_eq!(
            violation.message(),
            "an unexpected panic was raised (expected: DiskFull)"
        );
    }
}

#[test]
fn test_message_of_payloads() {
    let payload = panic::catch_unwind(|| contractum::check_throw!(1 == 0)).unwrap_err();
    assert_eq!(message_of(&*payload), Some("1 == 0"));
    let payload = panic::catch_unwind(|| panic::panic_any(DiskFull)).unwrap_err();
    assert_eq!(message_of(&*payload), None);
}
