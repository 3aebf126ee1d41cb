use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{JourneyQuery, TrainNumber, TravelClass};
use super::engine::RateBasis;
use super::history::ConfirmationHistoryProvider;
use super::searches::SearchLogger;
use super::service::{Prediction, PredictionService};

/// External date convention used by the booking sites this service fronts.
const JOURNEY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Router builder exposing HTTP endpoints for predictions and usage stats.
pub fn prediction_router<P, L>(service: Arc<PredictionService<P, L>>) -> Router
where
    P: ConfirmationHistoryProvider + 'static,
    L: SearchLogger + 'static,
{
    Router::new()
        .route("/api/v1/waitlist/predictions", post(predict_handler::<P, L>))
        .route(
            "/api/v1/waitlist/searches/summary",
            get(summary_handler::<P, L>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictionRequest {
    pub(crate) train_no: String,
    /// DD-MM-YYYY, e.g. "15-01-2024".
    pub(crate) journey_date: String,
    pub(crate) class_type: String,
    pub(crate) waitlist_number: u32,
}

impl PredictionRequest {
    /// Caller-side validation boundary: everything past here is a well-formed
    /// query the engine can trust.
    fn into_query(self) -> Result<JourneyQuery, String> {
        let journey_date = NaiveDate::parse_from_str(&self.journey_date, JOURNEY_DATE_FORMAT)
            .map_err(|_| {
                format!(
                    "invalid journey date '{}': use DD-MM-YYYY (e.g. 15-01-2024)",
                    self.journey_date
                )
            })?;

        let class = TravelClass::from_str(&self.class_type).map_err(|err| err.to_string())?;

        Ok(JourneyQuery {
            train: TrainNumber(self.train_no),
            journey_date,
            class,
            waitlist_position: self.waitlist_number,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictionResponse {
    pub(crate) train_no: String,
    pub(crate) journey_date: String,
    pub(crate) class_type: &'static str,
    pub(crate) waitlist_number: u32,
    pub(crate) probability: f64,
    pub(crate) category: &'static str,
    pub(crate) recommendation: &'static str,
    pub(crate) basis: RateBasis,
    pub(crate) degraded: bool,
}

impl From<Prediction> for PredictionResponse {
    fn from(prediction: Prediction) -> Self {
        let Prediction { query, estimate } = prediction;
        Self {
            train_no: query.train.0,
            journey_date: query.journey_date.format(JOURNEY_DATE_FORMAT).to_string(),
            class_type: query.class.label(),
            waitlist_number: query.waitlist_position,
            probability: round_percent(estimate.percentage),
            category: estimate.band.label(),
            recommendation: estimate.advice.message(),
            basis: estimate.basis,
            degraded: estimate.degraded,
        }
    }
}

/// Two decimal places, matching how probabilities are presented to travelers.
fn round_percent(percentage: f64) -> f64 {
    (percentage * 100.0).round() / 100.0
}

pub(crate) async fn predict_handler<P, L>(
    State(service): State<Arc<PredictionService<P, L>>>,
    axum::Json(request): axum::Json<PredictionRequest>,
) -> Response
where
    P: ConfirmationHistoryProvider + 'static,
    L: SearchLogger + 'static,
{
    let query = match request.into_query() {
        Ok(query) => query,
        Err(reason) => {
            let payload = json!({ "error": reason });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    let prediction = service.predict(query);
    let response = PredictionResponse::from(prediction);
    (StatusCode::OK, axum::Json(response)).into_response()
}

pub(crate) async fn summary_handler<P, L>(
    State(service): State<Arc<PredictionService<P, L>>>,
) -> Response
where
    P: ConfirmationHistoryProvider + 'static,
    L: SearchLogger + 'static,
{
    match service.usage_stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
