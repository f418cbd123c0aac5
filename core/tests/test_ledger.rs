//! Tests for the CityLedger model
//!
//! CRITICAL: all motif amounts are i64; division truncates toward zero.

use diffusion_simulator_core::{CityLedger, INITIAL_BALANCE, PORTION_DIVISOR};
use std::collections::HashMap;

fn countries(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn portions(entries: &[(&str, i64)]) -> HashMap<String, i64> {
    entries
        .iter()
        .map(|(name, amount)| (name.to_string(), *amount))
        .collect()
}

#[test]
fn test_ledger_new() {
    let ledger = CityLedger::new("France", &countries(&["France", "Spain"]));

    assert_eq!(ledger.home_country(), "France");
    assert_eq!(ledger.balance("France"), 1_000_000);
    assert_eq!(ledger.balance("Spain"), 0);
    assert_eq!(INITIAL_BALANCE, 1_000_000);
    assert_eq!(PORTION_DIVISOR, 1000);
}

#[test]
fn test_representative_portions_full_balance() {
    let ledger = CityLedger::new("France", &countries(&["France", "Spain"]));

    let p = ledger.representative_portions();
    assert_eq!(p["France"], 1000); // 1_000_000 / 1000
    assert_eq!(p["Spain"], 0);
}

#[test]
fn test_representative_portions_sub_divisor_balance() {
    let mut ledger = CityLedger::new("France", &countries(&["France", "Spain"]));
    ledger.credit(&portions(&[("Spain", 999)]));

    // 999 coins are below the divisor; nothing is sent.
    assert_eq!(ledger.representative_portions()["Spain"], 0);
}

#[test]
fn test_credit_and_debit_roundtrip() {
    let mut ledger = CityLedger::new("France", &countries(&["France", "Spain"]));

    ledger.credit(&portions(&[("France", 5000), ("Spain", 3000)]));
    assert_eq!(ledger.balance("France"), 1_005_000);
    assert_eq!(ledger.balance("Spain"), 3000);

    ledger.debit(&portions(&[("France", 5000), ("Spain", 3000)]));
    assert_eq!(ledger.balance("France"), 1_000_000);
    assert_eq!(ledger.balance("Spain"), 0);
}

#[test]
fn test_debit_below_zero_is_allowed() {
    let mut ledger = CityLedger::new("France", &countries(&["France", "Spain"]));

    ledger.debit(&portions(&[("Spain", 2500)]));
    assert_eq!(ledger.balance("Spain"), -2500);
}

#[test]
fn test_truncation_toward_zero_on_negative_balance() {
    let mut ledger = CityLedger::new("France", &countries(&["France", "Spain"]));

    ledger.debit(&portions(&[("Spain", 1)]));
    assert_eq!(ledger.representative_portions()["Spain"], 0); // -1 / 1000

    ledger.debit(&portions(&[("Spain", 1998)]));
    assert_eq!(ledger.balance("Spain"), -1999);
    assert_eq!(ledger.representative_portions()["Spain"], -1); // not -2
}

#[test]
fn test_is_complete_requires_strictly_positive() {
    let mut ledger = CityLedger::new("France", &countries(&["France", "Spain"]));
    assert!(!ledger.is_complete()); // Spain at 0

    ledger.credit(&portions(&[("Spain", 1)]));
    assert!(ledger.is_complete()); // one coin is enough

    ledger.debit(&portions(&[("Spain", 2)]));
    assert!(!ledger.is_complete()); // negative balance
}

#[test]
fn test_key_set_is_fixed_after_construction() {
    let mut ledger = CityLedger::new("France", &countries(&["France"]));

    ledger.credit(&portions(&[("Atlantis", 1000)]));
    ledger.debit(&portions(&[("Lemuria", 1000)]));

    assert_eq!(ledger.balances().len(), 1);
    assert!(ledger.is_complete()); // unknown motifs never count against it
}
