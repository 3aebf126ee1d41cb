use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for trains as printed on tickets (e.g. "12301").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainNumber(pub String);

impl fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reserved coach classes the prediction engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelClass {
    FirstAc,
    SecondAc,
    ThirdAc,
    Sleeper,
}

impl TravelClass {
    pub const fn label(self) -> &'static str {
        match self {
            TravelClass::FirstAc => "1AC",
            TravelClass::SecondAc => "2AC",
            TravelClass::ThirdAc => "3AC",
            TravelClass::Sleeper => "Sleeper",
        }
    }
}

impl FromStr for TravelClass {
    type Err = UnknownTravelClass;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1AC" => Ok(TravelClass::FirstAc),
            "2AC" => Ok(TravelClass::SecondAc),
            "3AC" => Ok(TravelClass::ThirdAc),
            "Sleeper" => Ok(TravelClass::Sleeper),
            other => Err(UnknownTravelClass(other.to_string())),
        }
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised at the intake boundary; the engine itself only sees valid classes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel class '{0}' (expected 1AC, 2AC, 3AC, or Sleeper)")]
pub struct UnknownTravelClass(pub String);

/// Immutable description of the journey a prediction is requested for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyQuery {
    pub train: TrainNumber,
    pub journey_date: NaiveDate,
    pub class: TravelClass,
    /// Position on the waitlist; zero means the ticket is already confirmed.
    pub waitlist_position: u32,
}

/// Observed confirmed/total-waitlisted ratio, kept within [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ConfirmationRate(f64);

impl ConfirmationRate {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Ratio for one journey record. Journeys that never had a waitlist carry
    /// no signal, so a zero denominator yields `None` rather than a zero rate.
    pub fn from_counts(confirmed: u32, total_waitlisted: u32) -> Option<Self> {
        if total_waitlisted == 0 {
            return None;
        }
        Some(Self::new(f64::from(confirmed) / f64::from(total_waitlisted)))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// A recorded rate of exactly zero is indistinguishable from a train that
    /// never clears its waitlist, so the weighting rule treats it as absent
    /// and falls back to the broader signal.
    pub fn is_informative(self) -> bool {
        self.0 > 0.0
    }
}
