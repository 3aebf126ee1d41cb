use crate::prediction::engine::{BookingAdvice, ProbabilityBand};

#[test]
fn band_thresholds_are_inclusive_lower_bounds() {
    assert_eq!(ProbabilityBand::from_percent(100.0), ProbabilityBand::VeryHigh);
    assert_eq!(ProbabilityBand::from_percent(80.0), ProbabilityBand::VeryHigh);
    assert_eq!(ProbabilityBand::from_percent(79.999), ProbabilityBand::High);
    assert_eq!(ProbabilityBand::from_percent(60.0), ProbabilityBand::High);
    assert_eq!(ProbabilityBand::from_percent(59.999), ProbabilityBand::Moderate);
    assert_eq!(ProbabilityBand::from_percent(40.0), ProbabilityBand::Moderate);
    assert_eq!(ProbabilityBand::from_percent(20.0), ProbabilityBand::Low);
    assert_eq!(ProbabilityBand::from_percent(19.999), ProbabilityBand::VeryLow);
    assert_eq!(ProbabilityBand::from_percent(0.0), ProbabilityBand::VeryLow);
}

#[test]
fn band_labels_match_presentation_strings() {
    assert_eq!(ProbabilityBand::VeryHigh.label(), "Very High");
    assert_eq!(ProbabilityBand::High.label(), "High");
    assert_eq!(ProbabilityBand::Moderate.label(), "Moderate");
    assert_eq!(ProbabilityBand::Low.label(), "Low");
    assert_eq!(ProbabilityBand::VeryLow.label(), "Very Low");
}

#[test]
fn advice_cut_points_sit_offset_from_band_thresholds() {
    assert_eq!(
        BookingAdvice::from_percent(70.0),
        BookingAdvice::BookWithConfidence
    );
    assert_eq!(
        BookingAdvice::from_percent(69.999),
        BookingAdvice::ConsiderBooking
    );
    assert_eq!(
        BookingAdvice::from_percent(50.0),
        BookingAdvice::ConsiderBooking
    );
    assert_eq!(
        BookingAdvice::from_percent(49.999),
        BookingAdvice::BookWithCaution
    );
    assert_eq!(
        BookingAdvice::from_percent(30.0),
        BookingAdvice::BookWithCaution
    );
    assert_eq!(
        BookingAdvice::from_percent(29.999),
        BookingAdvice::NotRecommended
    );
}

#[test]
fn advice_messages_are_traveler_facing() {
    assert_eq!(
        BookingAdvice::BookWithConfidence.message(),
        "Book with confidence. High chance of confirmation."
    );
    assert_eq!(
        BookingAdvice::ConsiderBooking.message(),
        "Consider booking. Moderate chance of confirmation."
    );
    assert_eq!(
        BookingAdvice::BookWithCaution.message(),
        "Book with caution. Consider alternative options."
    );
    assert_eq!(
        BookingAdvice::NotRecommended.message(),
        "Not recommended. Very low chance of confirmation."
    );
}
