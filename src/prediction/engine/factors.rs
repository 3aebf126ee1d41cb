//! Fixed multiplier tables applied on top of the historical base rate.
//!
//! Both tables are ordered breakpoint lookups so recalibrating a step means
//! editing one row, not restructuring a conditional chain.

/// Inclusive upper bounds on the waitlist position, scanned in order.
/// Positions past the last breakpoint take [`DEEP_WAITLIST_FACTOR`].
const WAITLIST_STEPS: [(u32, f64); 5] = [
    (0, 1.0),
    (5, 0.9),
    (10, 0.7),
    (20, 0.5),
    (50, 0.3),
];

const DEEP_WAITLIST_FACTOR: f64 = 0.1;

/// Confidence multiplier for a waitlist position; non-increasing in the
/// position, 1.0 when the ticket is not waitlisted at all.
pub(crate) fn waitlist_factor(position: u32) -> f64 {
    WAITLIST_STEPS
        .iter()
        .find(|(bound, _)| position <= *bound)
        .map(|(_, factor)| *factor)
        .unwrap_or(DEEP_WAITLIST_FACTOR)
}

/// Demand multiplier per calendar month, January first. Peak travel months
/// push the factor down.
const SEASONAL_FACTORS: [f64; 12] = [
    0.7, // January: holiday season
    1.0, // February
    1.0, // March
    0.8, // April: peak
    0.8, // May: peak
    0.9, // June: summer
    0.9, // July: summer
    0.9, // August: summer
    1.0, // September
    0.8, // October: peak
    0.8, // November: peak
    0.7, // December: holiday season
];

/// Seasonal multiplier for a 1-based month.
pub(crate) fn seasonal_factor(month: u32) -> f64 {
    debug_assert!((1..=12).contains(&month));
    SEASONAL_FACTORS[(month as usize).saturating_sub(1).min(11)]
}
