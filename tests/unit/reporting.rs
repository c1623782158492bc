//! Failure records and the abort diagnostic.

use contractum::report::write_diagnostic;
use contractum::{Clause, ContractViolation, Policy, Site};

#[test]
fn test_diagnostic_names_location_then_condition() {
    let mut out = Vec::new();
    write_diagnostic(&mut out, Site::new("src/account.rs", 42, 13), "balance > 0").unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "*** assertion failed at src/account.rs:42\nbalance > 0\n"
    );
}

#[test]
fn test_diagnostic_omits_column() {
    let mut a = Vec::new();
    let mut b = Vec::new();
    write_diagnostic(&mut a, Site::new("lib.rs", 7, 1), "x").unwrap();
    write_diagnostic(&mut b, Site::new("lib.rs", 7, 80), "x").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_violation_accessors() {
    let site = Site::new("src/ledger.rs", 10, 5);
    let violation = ContractViolation::new(Clause::Postcondition, site, "self.balance >= 0");
    assert_eq!(violation.clause(), Clause::Postcondition);
    assert_eq!(violation.site(), site);
    assert_eq!(violation.site().to_string(), "src/ledger.rs:10");
    assert_eq!(violation.message(), "self.balance >= 0");

    let error: &dyn std::error::Error = &violation;
    assert_eq!(error.to_string(), "self.balance >= 0");
    assert!(error.source().is_none());
}

#[test]
fn test_active_policy_follows_features() {
    let disabled = cfg!(any(feature = "disabled", not(debug_assertions)));
    let expected = if disabled {
        Policy::Off
    } else if cfg!(feature = "exceptions") {
        Policy::Throw
    } else {
        Policy::Abort
    };
    assert_eq!(Policy::ACTIVE, expected);
}

#[test]
fn test_clause_names() {
    let names: Vec<String> = [
        Clause::Precondition,
        Clause::Postcondition,
        Clause::Invariant,
        Clause::Assertion,
        Clause::Expectation,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(
        names,
        ["precondition", "postcondition", "invariant", "assertion", "expectation"]
    );
}
