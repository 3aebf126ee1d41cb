use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::prediction::archive::{BookingArchive, BookingRecord};
use crate::prediction::domain::{ConfirmationRate, JourneyQuery, TrainNumber, TravelClass};
use crate::prediction::engine::{EstimatorConfig, ProbabilityEstimator};
use crate::prediction::history::{ConfirmationHistoryProvider, HistoryError};
use crate::prediction::searches::{
    InMemorySearchLog, SearchLogError, SearchLogger, SearchRecord, SearchStats,
};
use crate::prediction::service::PredictionService;

pub(super) const TRAIN: &str = "12301";

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn query(journey_date: NaiveDate, waitlist_position: u32) -> JourneyQuery {
    JourneyQuery {
        train: TrainNumber(TRAIN.to_string()),
        journey_date,
        class: TravelClass::ThirdAc,
        waitlist_position,
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Provider answering every lookup with the same pair of rates.
pub(super) struct FixedRates {
    pub(super) specific: Option<f64>,
    pub(super) historical: Option<f64>,
}

impl ConfirmationHistoryProvider for FixedRates {
    fn specific_date_rate(
        &self,
        _train: &TrainNumber,
        _journey_date: NaiveDate,
        _class: TravelClass,
    ) -> Result<Option<ConfirmationRate>, HistoryError> {
        Ok(self.specific.map(ConfirmationRate::new))
    }

    fn similar_date_rate(
        &self,
        _train: &TrainNumber,
        _class: TravelClass,
        _day_of_week: u32,
        _month: u32,
    ) -> Result<Option<ConfirmationRate>, HistoryError> {
        Ok(self.historical.map(ConfirmationRate::new))
    }
}

/// Provider simulating a store outage on every call.
pub(super) struct UnavailableHistory;

impl ConfirmationHistoryProvider for UnavailableHistory {
    fn specific_date_rate(
        &self,
        _train: &TrainNumber,
        _journey_date: NaiveDate,
        _class: TravelClass,
    ) -> Result<Option<ConfirmationRate>, HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }

    fn similar_date_rate(
        &self,
        _train: &TrainNumber,
        _class: TravelClass,
        _day_of_week: u32,
        _month: u32,
    ) -> Result<Option<ConfirmationRate>, HistoryError> {
        Err(HistoryError::Unavailable("database offline".to_string()))
    }
}

/// Provider recording the (day_of_week, month) arguments it is asked about.
#[derive(Default)]
pub(super) struct CapturingHistory {
    pub(super) similar_calls: Mutex<Vec<(u32, u32)>>,
}

impl ConfirmationHistoryProvider for CapturingHistory {
    fn specific_date_rate(
        &self,
        _train: &TrainNumber,
        _journey_date: NaiveDate,
        _class: TravelClass,
    ) -> Result<Option<ConfirmationRate>, HistoryError> {
        Ok(None)
    }

    fn similar_date_rate(
        &self,
        _train: &TrainNumber,
        _class: TravelClass,
        day_of_week: u32,
        month: u32,
    ) -> Result<Option<ConfirmationRate>, HistoryError> {
        self.similar_calls
            .lock()
            .expect("capture mutex poisoned")
            .push((day_of_week, month));
        Ok(None)
    }
}

/// Logger rejecting every write, for exercising the fail-soft path.
pub(super) struct RejectingLog;

impl SearchLogger for RejectingLog {
    fn record(&self, _search: SearchRecord) -> Result<(), SearchLogError> {
        Err(SearchLogError::Unavailable("log offline".to_string()))
    }

    fn summary(&self) -> Result<SearchStats, SearchLogError> {
        Err(SearchLogError::Unavailable("log offline".to_string()))
    }
}

pub(super) fn estimator(
    specific: Option<f64>,
    historical: Option<f64>,
) -> ProbabilityEstimator<FixedRates> {
    ProbabilityEstimator::new(
        Arc::new(FixedRates {
            specific,
            historical,
        }),
        EstimatorConfig::default(),
    )
}

pub(super) fn record(
    journey_date: NaiveDate,
    total_waitlisted: u32,
    confirmed: u32,
) -> BookingRecord {
    BookingRecord {
        train: TrainNumber(TRAIN.to_string()),
        journey_date,
        class: TravelClass::ThirdAc,
        total_waitlisted,
        confirmed,
    }
}

pub(super) fn build_service(
    specific: Option<f64>,
    historical: Option<f64>,
) -> (
    PredictionService<FixedRates, InMemorySearchLog>,
    Arc<InMemorySearchLog>,
) {
    let searches = Arc::new(InMemorySearchLog::default());
    let service = PredictionService::new(
        Arc::new(FixedRates {
            specific,
            historical,
        }),
        searches.clone(),
        EstimatorConfig::default(),
    );
    (service, searches)
}

pub(super) fn archive_service() -> (
    PredictionService<BookingArchive, InMemorySearchLog>,
    Arc<InMemorySearchLog>,
) {
    let searches = Arc::new(InMemorySearchLog::default());
    let service = PredictionService::new(
        Arc::new(BookingArchive::default()),
        searches.clone(),
        EstimatorConfig::default(),
    );
    (service, searches)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
