//! Code that exists only in checking or only in non-checking builds.

use contractum::{ensures, if_debug, if_else_debug, if_not_debug, Policy};

if_debug! {
    /// Only compiled while checks are enabled, so only checks may call it.
    fn is_sorted(values: &[u32]) -> bool {
        values.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

fn insert_sorted(values: &mut Vec<u32>, value: u32) {
    let at = values.partition_point(|&v| v < value);
    values.insert(at, value);
    ensures!(is_sorted(values));
}

#[test]
fn test_debug_only_helper_used_by_ensures() {
    let mut values = Vec::new();
    for v in [5, 1, 4, 1, 3] {
        insert_sorted(&mut values, v);
    }
    assert_eq!(values, [1, 1, 3, 4, 5]);
}

#[test]
fn test_exactly_one_branch_runs() {
    let mut log = Vec::new();
    if_debug! { log.push("debug"); }
    if_not_debug! { log.push("release"); }
    if_else_debug! {
        { log.push("on"); } else { log.push("off"); }
    }
    let expected = if Policy::ACTIVE.is_checking() {
        ["debug", "on"]
    } else {
        ["release", "off"]
    };
    assert_eq!(log, expected);
}

#[test]
fn test_bindings_survive_the_block() {
    if_else_debug! {
        { let mode = "checked"; } else { let mode = "unchecked"; }
    }
    let expected = if Policy::ACTIVE.is_checking() { "checked" } else { "unchecked" };
    assert_eq!(mode, expected);
}

#[test]
fn test_expression_form() {
    let budget: u32 = if_else_debug!(10, 1_000);
    assert_eq!(budget == 10, Policy::ACTIVE.is_checking());
}
