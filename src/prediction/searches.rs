use std::sync::Mutex;

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{TrainNumber, TravelClass};

/// Audit entry for one served prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRecord {
    pub train: TrainNumber,
    pub journey_date: NaiveDate,
    pub class: TravelClass,
    pub waitlist_position: u32,
    pub percentage: f64,
}

/// Aggregate usage view over the recorded searches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchStats {
    pub total_searches: usize,
    /// Mean percentage across searches; absent until a search is recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_probability: Option<f64>,
}

/// Outbound audit-trail hook. Implementations must never make the prediction
/// path fail; the service degrades to a warning when recording errors out.
pub trait SearchLogger: Send + Sync {
    fn record(&self, search: SearchRecord) -> Result<(), SearchLogError>;
    fn summary(&self) -> Result<SearchStats, SearchLogError>;
}

/// Error enumeration for search-log operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchLogError {
    #[error("search log unavailable: {0}")]
    Unavailable(String),
}

/// Mutex-guarded log used by the service binary and tests.
#[derive(Debug, Default)]
pub struct InMemorySearchLog {
    entries: Mutex<Vec<SearchRecord>>,
}

impl InMemorySearchLog {
    pub fn entries(&self) -> Vec<SearchRecord> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl SearchLogger for InMemorySearchLog {
    fn record(&self, search: SearchRecord) -> Result<(), SearchLogError> {
        self.entries
            .lock()
            .map_err(|_| SearchLogError::Unavailable("search log poisoned".to_string()))?
            .push(search);
        Ok(())
    }

    fn summary(&self) -> Result<SearchStats, SearchLogError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| SearchLogError::Unavailable("search log poisoned".to_string()))?;

        let total_searches = entries.len();
        let average_probability = if total_searches == 0 {
            None
        } else {
            let sum: f64 = entries.iter().map(|search| search.percentage).sum();
            Some(sum / total_searches as f64)
        };

        Ok(SearchStats {
            total_searches,
            average_probability,
        })
    }
}
