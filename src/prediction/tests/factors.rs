use crate::prediction::engine::factors::{seasonal_factor, waitlist_factor};

#[test]
fn waitlist_factor_steps_at_documented_boundaries() {
    assert_eq!(waitlist_factor(0), 1.0);
    assert_eq!(waitlist_factor(1), 0.9);
    assert_eq!(waitlist_factor(5), 0.9);
    assert_eq!(waitlist_factor(6), 0.7);
    assert_eq!(waitlist_factor(10), 0.7);
    assert_eq!(waitlist_factor(11), 0.5);
    assert_eq!(waitlist_factor(20), 0.5);
    assert_eq!(waitlist_factor(21), 0.3);
    assert_eq!(waitlist_factor(50), 0.3);
    assert_eq!(waitlist_factor(51), 0.1);
    assert_eq!(waitlist_factor(500), 0.1);
}

#[test]
fn waitlist_factor_never_increases_with_position() {
    let mut previous = waitlist_factor(0);
    for position in 1..=200 {
        let factor = waitlist_factor(position);
        assert!(
            factor <= previous,
            "factor rose from {previous} to {factor} at position {position}"
        );
        previous = factor;
    }
}

#[test]
fn seasonal_factor_matches_demand_table() {
    let expected = [
        (1, 0.7),
        (2, 1.0),
        (3, 1.0),
        (4, 0.8),
        (5, 0.8),
        (6, 0.9),
        (7, 0.9),
        (8, 0.9),
        (9, 1.0),
        (10, 0.8),
        (11, 0.8),
        (12, 0.7),
    ];

    for (month, factor) in expected {
        assert_eq!(seasonal_factor(month), factor, "month {month}");
    }
}
