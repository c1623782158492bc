//! `#[contract]` from outside the crate.

use super::common::violation_under_policy;
use contractum::{contract, Clause, Invariant};

#[derive(Debug, Clone, PartialEq)]
struct Vault {
    coins: Vec<u64>,
    cap: usize,
}

impl Invariant for Vault {
    fn is_valid(&self) -> bool {
        self.coins.len() <= self.cap
    }
}

impl Vault {
    fn new(cap: usize) -> Self {
        Vault {
            coins: Vec::new(),
            cap,
        }
    }

    #[contract]
    #[requires(coin > 0)]
    #[ensures(self.coins.len() == old(self.coins.len()) + 1)]
    #[ensures(ret == self.total())]
    #[invariant]
    fn store(&mut self, coin: u64) -> u64 {
        self.coins.push(coin);
        self.total()
    }

    /// Stores the coin twice, breaking its own postcondition.
    #[contract]
    #[ensures(self.coins.len() == old(self.coins.len()) + 1)]
    fn store_doubled(&mut self, coin: u64) {
        self.coins.push(coin);
        self.coins.push(coin);
    }

    #[contract]
    #[ensures(ret.is_some() == !old(self.coins.is_empty()))]
    #[ensures(self.coins.len() + usize::from(ret.is_some()) == old(self.coins.len()))]
    fn take_largest(&mut self) -> Option<u64> {
        let (index, _) = self.coins.iter().enumerate().max_by_key(|&(_, c)| *c)?;
        Some(self.coins.swap_remove(index))
    }

    #[contract]
    #[ensures(ret.len() <= old(self.coins.len()))]
    fn above(&self, floor: u64) -> Vec<u64> {
        self.coins.iter().copied().filter(|&c| c > floor).collect()
    }

    #[contract]
    #[ensures(true)]
    fn odd_coins(&self) -> impl Iterator<Item = u64> {
        self.coins.clone().into_iter().filter(|c| c % 2 == 1)
    }

    #[contract]
    #[invariant]
    fn into_coins(self) -> Vec<u64> {
        self.coins
    }

    fn total(&self) -> u64 {
        self.coins.iter().sum()
    }
}

#[contract]
#[requires(!digits.is_empty())]
#[ensures(ret.as_ref().map_or(true, |&n| n <= 9_999))]
fn parse_pin(digits: &str) -> Result<u32, String> {
    if digits.len() > 4 {
        return Err(format!("pin too long: {}", digits.len()));
    }
    let pin = digits.parse::<u32>().map_err(|e| e.to_string())?;
    Ok(pin)
}

#[contract]
#[requires(n < 20)]
#[ensures(ret >= 1)]
fn factorial(n: u64) -> u64 {
    (1..=n).product()
}

#[test]
fn test_contract_methods_behave_normally() {
    let mut vault = Vault::new(3);
    assert_eq!(vault.store(5), 5);
    assert_eq!(vault.store(7), 12);
    assert_eq!(vault.above(5), [7]);
    assert_eq!(vault.odd_coins().count(), 2);
    assert_eq!(vault.take_largest(), Some(7));
    assert_eq!(vault.clone().into_coins(), [5]);
    assert_eq!(Vault::new(1).take_largest(), None);
}

#[test]
fn test_contract_keeps_early_return_and_question_mark() {
    assert_eq!(parse_pin("0420"), Ok(420));
    assert_eq!(parse_pin("12345"), Err("pin too long: 5".to_string()));
    assert!(parse_pin("12a").is_err());
}

#[test]
fn test_contract_free_function() {
    assert_eq!(factorial(0), 1);
    assert_eq!(factorial(5), 120);
}

#[test]
fn test_contract_precondition_failure() {
    let mut vault = Vault::new(2);
    if let Some(violation) = violation_under_policy(|| {
        vault.store(0);
    }) {
        assert_eq!(violation.clause(), Clause::Precondition);
        assert_eq!(violation.message(), "coin > 0");
    }
}

#[test]
fn test_contract_invariant_failure_on_exit() {
    let mut vault = Vault::new(1);
    vault.store(1);
    if let Some(violation) = violation_under_policy(|| {
        vault.store(2);
    }) {
        assert_eq!(violation.clause(), Clause::Invariant);
        assert_eq!(violation.message(), "self.is_valid()");
    }
}

#[test]
fn test_contract_invariant_checked_on_entry_for_owned_self() {
    let broken = Vault {
        coins: vec![1, 2],
        cap: 1,
    };
    if let Some(violation) = violation_under_policy(|| {
        broken.into_coins();
    }) {
        assert_eq!(violation.clause(), Clause::Invariant);
    }
}

#[test]
fn test_contract_string_precondition() {
    if let Some(violation) = violation_under_policy(|| {
        let _ = parse_pin("");
    }) {
        assert_eq!(violation.message(), "!digits.is_empty()");
    }
}

#[test]
fn test_contract_postcondition_reported_as_written() {
    let mut vault = Vault::new(4);
    if let Some(violation) = violation_under_policy(|| vault.store_doubled(3)) {
        assert_eq!(violation.clause(), Clause::Postcondition);
        assert_eq!(
            violation.message(),
            "self.coins.len() == old(self.coins.len()) + 1"
        );
    }
}
