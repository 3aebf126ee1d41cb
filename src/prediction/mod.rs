//! Waitlist confirmation probability: domain types, history provider
//! contract, the estimation engine, and the service facade the binary and
//! HTTP surface are built on.
//!
//! The engine is a pure function of its inputs plus two fixed lookup tables;
//! everything stateful (booking history, search audit trail) reaches it
//! through injected traits so it can be exercised with deterministic stubs.

pub mod archive;
pub mod domain;
pub mod engine;
pub mod history;
pub mod router;
pub mod searches;
pub mod service;

#[cfg(test)]
mod tests;

pub use archive::{ArchiveError, BookingArchive, BookingRecord};
pub use domain::{ConfirmationRate, JourneyQuery, TrainNumber, TravelClass, UnknownTravelClass};
pub use engine::{
    BookingAdvice, Estimate, EstimatorConfig, ProbabilityBand, ProbabilityEstimator, RateBasis,
};
pub use history::{ConfirmationHistoryProvider, HistoryError};
pub use router::prediction_router;
pub use searches::{InMemorySearchLog, SearchLogError, SearchLogger, SearchRecord, SearchStats};
pub use service::{Prediction, PredictionService};
