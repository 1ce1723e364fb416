//! Iterator-specific tests for `occurrences()`.
//!
//! These cover Rust iterator behavior beyond the conformance cases:
//! laziness, early termination, error propagation and std combinators.

use jiff::civil::{date, Date, Weekday};
use nextdate::{ErrorKind, Rule, SentinelPolicy};

// 2024-01-01 is a Monday.
const START: Date = date(2024, 1, 1);

// =============================================================================
// Laziness
// =============================================================================

#[test]
fn occurrences_is_lazy() {
    // The sequence is unbounded; creating and stepping it once must not hang.
    let rule = Rule::parse("d 1").unwrap();
    let first: Vec<_> = rule
        .occurrences(START, START)
        .take(1)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(first, vec![date(2024, 1, 2)]);
}

#[test]
fn occurrences_take_while() {
    let rule = Rule::parse("d 1").unwrap();
    let cutoff = date(2024, 1, 5);

    let results: Vec<Date> = rule
        .occurrences(START, START)
        .take_while(|r| matches!(r, Ok(d) if *d < cutoff))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(results, vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)]);
}

#[test]
fn occurrences_find() {
    // first month end that lands on a Friday
    let rule = Rule::parse("m -1").unwrap();
    let friday = rule
        .occurrences(START, START)
        .find(|r| matches!(r, Ok(d) if d.weekday() == Weekday::Friday))
        .unwrap()
        .unwrap();
    assert_eq!(friday, date(2024, 5, 31));
}

// =============================================================================
// Combinators
// =============================================================================

#[test]
fn occurrences_map_to_days() {
    let rule = Rule::parse("m 1,15").unwrap();
    let days: Vec<i8> = rule
        .occurrences(START, START)
        .take(4)
        .map(|r| r.map(|d| d.day()))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(days, vec![15, 1, 15, 1]);
}

#[test]
fn occurrences_skip() {
    let rule = Rule::parse("w 6,7").unwrap();
    let results: Vec<Date> = rule
        .occurrences(START, START)
        .skip(2)
        .take(2)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(results, vec![date(2024, 1, 13), date(2024, 1, 14)]);
}

#[test]
fn occurrences_for_loop_with_break() {
    let rule = Rule::parse("w 1,3,5").unwrap();
    let mut seen = Vec::new();
    for result in rule.occurrences(START, START) {
        let d = result.unwrap();
        if d.month() > 1 || d.day() > 10 {
            break;
        }
        seen.push(d.day());
    }
    assert_eq!(seen, vec![3, 5, 8, 10]);
}

// =============================================================================
// Sequence shape
// =============================================================================

#[test]
fn occurrences_match_next_n() {
    let rule = Rule::parse("m 31").unwrap();
    let iterated: Vec<Date> = rule
        .occurrences(START, START)
        .take(6)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(iterated, rule.next_n(START, START, 6).unwrap());
    assert_eq!(
        iterated,
        vec![
            date(2024, 1, 31),
            date(2024, 3, 31),
            date(2024, 5, 31),
            date(2024, 7, 31),
            date(2024, 8, 31),
            date(2024, 10, 31),
        ]
    );
}

#[test]
fn occurrences_follow_leap_years() {
    let rule = Rule::parse("y").unwrap();
    let anchor = date(2024, 2, 29);
    let results: Vec<Date> = rule
        .occurrences(anchor, anchor)
        .take(3)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        results,
        vec![date(2028, 2, 29), date(2032, 2, 29), date(2036, 2, 29)]
    );
}

#[test]
fn occurrences_from_future_anchor() {
    let rule = Rule::parse("d 10").unwrap();
    let anchor = date(2024, 3, 1);
    let results: Vec<Date> = rule
        .occurrences(START, anchor)
        .take(2)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(results, vec![date(2024, 3, 11), date(2024, 3, 21)]);
}

#[test]
fn next_n_zero_is_empty() {
    let rule = Rule::parse("d 1").unwrap();
    assert!(rule.next_n(START, START, 0).unwrap().is_empty());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn occurrences_error_is_yielded_once() {
    let rule = Rule::parse("m 31 4,6,9,11").unwrap();
    let results: Vec<_> = rule.occurrences(START, START).take(5).collect();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].as_ref().unwrap_err().kind(),
        ErrorKind::Unsatisfiable
    );
}

#[test]
fn next_n_propagates_errors() {
    let rule = Rule::parse("m 30 2").unwrap();
    let err = rule.next_n(START, START, 3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsatisfiable);
}

#[test]
fn anchored_sentinels_drift_with_each_step() {
    // Each step re-anchors on the previous result, so under the anchored
    // policy `-1` resolves against the month just reached.
    let rule = Rule::parse("m -1").unwrap();
    let d = date(2024, 4, 30);
    let results: Vec<Date> = nextdate::eval::occurrences(&rule, d, d, SentinelPolicy::Anchored)
        .take(3)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        results,
        vec![date(2024, 5, 30), date(2024, 5, 31), date(2024, 7, 31)]
    );
}
