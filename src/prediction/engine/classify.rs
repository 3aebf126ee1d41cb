use serde::{Deserialize, Serialize};

/// Qualitative band for a confirmation percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbabilityBand {
    VeryHigh,
    High,
    Moderate,
    Low,
    VeryLow,
}

impl ProbabilityBand {
    /// Thresholds are inclusive lower bounds checked from the top down.
    pub fn from_percent(percentage: f64) -> Self {
        const BANDS: [(f64, ProbabilityBand); 4] = [
            (80.0, ProbabilityBand::VeryHigh),
            (60.0, ProbabilityBand::High),
            (40.0, ProbabilityBand::Moderate),
            (20.0, ProbabilityBand::Low),
        ];

        BANDS
            .iter()
            .find(|(floor, _)| percentage >= *floor)
            .map(|(_, band)| *band)
            .unwrap_or(ProbabilityBand::VeryLow)
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProbabilityBand::VeryHigh => "Very High",
            ProbabilityBand::High => "High",
            ProbabilityBand::Moderate => "Moderate",
            ProbabilityBand::Low => "Low",
            ProbabilityBand::VeryLow => "Very Low",
        }
    }
}

/// Booking guidance derived from the same percentage on a coarser scale.
/// The 70/50/30 cut points sit deliberately offset from the band thresholds;
/// the two classifications answer different questions and are not unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingAdvice {
    BookWithConfidence,
    ConsiderBooking,
    BookWithCaution,
    NotRecommended,
}

impl BookingAdvice {
    /// Same top-down, inclusive evaluation as [`ProbabilityBand::from_percent`].
    pub fn from_percent(percentage: f64) -> Self {
        const CUTS: [(f64, BookingAdvice); 3] = [
            (70.0, BookingAdvice::BookWithConfidence),
            (50.0, BookingAdvice::ConsiderBooking),
            (30.0, BookingAdvice::BookWithCaution),
        ];

        CUTS.iter()
            .find(|(floor, _)| percentage >= *floor)
            .map(|(_, advice)| *advice)
            .unwrap_or(BookingAdvice::NotRecommended)
    }

    pub const fn message(self) -> &'static str {
        match self {
            BookingAdvice::BookWithConfidence => {
                "Book with confidence. High chance of confirmation."
            }
            BookingAdvice::ConsiderBooking => {
                "Consider booking. Moderate chance of confirmation."
            }
            BookingAdvice::BookWithCaution => {
                "Book with caution. Consider alternative options."
            }
            BookingAdvice::NotRecommended => {
                "Not recommended. Very low chance of confirmation."
            }
        }
    }
}
