use chrono::NaiveDate;

use super::domain::{ConfirmationRate, TrainNumber, TravelClass};

/// Read-side contract the estimator depends on, injected so the engine can be
/// exercised against deterministic stubs.
///
/// `day_of_week` uses the 1 = Sunday … 7 = Saturday convention and `month` is
/// 1 = January … 12 = December. `Ok(None)` means no matching data exists;
/// `Err` means the backing store itself failed. The estimator folds both into
/// its no-data path, but callers are expected to log the two differently.
pub trait ConfirmationHistoryProvider: Send + Sync {
    /// Average confirmation rate over records matching the train, the exact
    /// journey date, and the class.
    fn specific_date_rate(
        &self,
        train: &TrainNumber,
        journey_date: NaiveDate,
        class: TravelClass,
    ) -> Result<Option<ConfirmationRate>, HistoryError>;

    /// Average rate over historically similar dates: same weekday and month,
    /// across all years.
    fn similar_date_rate(
        &self,
        train: &TrainNumber,
        class: TravelClass,
        day_of_week: u32,
        month: u32,
    ) -> Result<Option<ConfirmationRate>, HistoryError>;
}

/// Error enumeration for history lookups.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}
