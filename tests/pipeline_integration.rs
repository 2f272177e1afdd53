//! Integration tests for the Sluice pipeline engine.

use std::sync::Arc;

use sluice::element::Transform;
use sluice::error::Error;
use sluice::memory::{BoundedResource, HeapResource};
use sluice::ops::{add, even, greater_than, mul, odd};
use sluice::pipeline;
use sluice::stage::StageKind;

/// Test the full scenario: filter odd, add 1 then 2, take 3, multiply by 10.
#[test]
fn test_end_to_end_scenario() {
    let data: Vec<i64> = (1..=10).collect();

    let output = pipeline(HeapResource::new(), &data)
        .filter(odd())
        .map_all(vec![Arc::new(add(1)), Arc::new(add(2))])
        .take(3)
        .map(mul(10))
        .collect()
        .unwrap();

    assert_eq!(output, vec![40, 60, 80]);
}

/// Test that a zero-stage pipeline copies the source verbatim.
#[test]
fn test_identity_copy() {
    let data = vec![3i64, 1, 4, 1, 5, 9, 2, 6];
    let output = pipeline(HeapResource::new(), &data).collect().unwrap();
    assert_eq!(output, data);
}

/// Test pipelines over a non-Copy element type.
#[test]
fn test_string_elements() {
    let data: Vec<String> = ["alpha", "beta", "gamma", "delta"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let output = pipeline(HeapResource::new(), &data)
        .filter(|s: &String| s.len() == 5)
        .map(|s: String| s.to_uppercase())
        .collect()
        .unwrap();

    assert_eq!(output, vec!["ALPHA".to_string(), "GAMMA".to_string(), "DELTA".to_string()]);
}

/// Test that stage order is semantically significant.
#[test]
fn test_filter_take_vs_take_filter() {
    let data = vec![1i64, 2, 3, 4, 5];

    let filtered_then_taken = pipeline(HeapResource::new(), &data)
        .filter(odd())
        .take(2)
        .collect()
        .unwrap();
    let taken_then_filtered = pipeline(HeapResource::new(), &data)
        .take(2)
        .filter(odd())
        .collect()
        .unwrap();

    assert_eq!(filtered_then_taken, vec![1, 3]);
    assert_eq!(taken_then_filtered, vec![1]);
}

/// Test a take stage sandwiched between maps with a second take after it.
#[test]
fn test_take_between_maps() {
    let data: Vec<i64> = (1..=100).collect();

    let output = pipeline(HeapResource::new(), &data)
        .take(5)
        .map(mul(2))
        .take(3)
        .collect()
        .unwrap();

    // The second take exhausts first: it admits 3 of the 5 elements the
    // first take would allow, then ends the traversal.
    assert_eq!(output, vec![2, 4, 6]);
}

/// Test combining comparison predicates with arithmetic transforms.
#[test]
fn test_mixed_operators() {
    let data: Vec<i64> = (1..=20).collect();

    let output = pipeline(HeapResource::new(), &data)
        .filter(even())
        .filter(greater_than(8))
        .map(add(-10))
        .collect()
        .unwrap();

    assert_eq!(output, vec![0, 2, 4, 6, 8, 10]);
}

/// Test that a large source truncated by take stays within a small budget.
#[test]
fn test_take_keeps_output_within_budget() {
    let data: Vec<i64> = (1..=100_000).collect();

    // 800 KB of source; the output never grows past the initial hint.
    let output = pipeline(BoundedResource::new(128), &data)
        .take(10)
        .collect()
        .unwrap();

    assert_eq!(output, (1..=10).collect::<Vec<i64>>());
}

/// Test that the verbatim-copy fast path honors the budget.
#[test]
fn test_budget_error_on_identity_copy() {
    let data: Vec<i64> = (1..=100_000).collect();

    let result = pipeline(BoundedResource::new(1024), &data).collect();
    assert!(matches!(result, Err(Error::BudgetExhausted { .. })));
}

/// Test that an error from the resource reports both sides of the denial.
#[test]
fn test_budget_error_is_descriptive() {
    let data = vec![0u8; 64];

    let err = pipeline(BoundedResource::new(16), &data)
        .collect()
        .unwrap_err();
    match err {
        Error::BudgetExhausted { requested, budget } => {
            assert_eq!(requested, 64);
            assert_eq!(budget, 16);
        }
        other => panic!("expected BudgetExhausted, got {other:?}"),
    }
}

/// Test that one pipeline value supports repeated, independent evaluations.
#[test]
fn test_repeat_evaluation_is_independent() {
    let data: Vec<i64> = (1..=10).collect();
    let p = pipeline(HeapResource::new(), &data).filter(odd()).take(3);

    for _ in 0..3 {
        // Fresh take counters every call.
        assert_eq!(p.collect().unwrap(), vec![1, 3, 5]);
    }
}

/// Test that deriving pipelines shares the resource and leaves bases usable.
#[test]
fn test_derived_pipelines_are_independent() {
    let data: Vec<i64> = (1..=6).collect();
    let resource = HeapResource::new();

    let base = pipeline(resource, &data).map(mul(10));
    let evens_only = base.filter(|x: &i64| (x / 10) % 2 == 0);
    let first_two = base.take(2);

    assert_eq!(base.collect().unwrap(), vec![10, 20, 30, 40, 50, 60]);
    assert_eq!(evens_only.collect().unwrap(), vec![20, 40, 60]);
    assert_eq!(first_two.collect().unwrap(), vec![10, 20]);
}

/// Test stage introspection across a mixed chain.
#[test]
fn test_stage_kinds() {
    let data = vec![1i64];
    let p = pipeline(HeapResource::new(), &data)
        .filter(odd())
        .map(add(1))
        .take(1)
        .map_all(vec![Arc::new(mul(2i64)) as Arc<dyn Transform<i64>>]);

    let kinds: Vec<StageKind> = p.stages().iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec![StageKind::Filter, StageKind::Map, StageKind::Take, StageKind::Map]
    );
}

/// Test a pipeline built entirely from closures.
#[test]
fn test_closure_only_pipeline() {
    let data: Vec<u32> = (0..50).collect();

    let output = pipeline(HeapResource::new(), &data)
        .map(|x: u32| x * x)
        .filter(|x: &u32| x % 3 == 1)
        .take(4)
        .collect()
        .unwrap();

    // Squares congruent to 1 mod 3: 1, 4, 16, 25.
    assert_eq!(output, vec![1, 4, 16, 25]);
}
