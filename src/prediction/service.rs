use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::domain::JourneyQuery;
use super::engine::{Estimate, EstimatorConfig, ProbabilityEstimator};
use super::history::ConfirmationHistoryProvider;
use super::searches::{SearchLogError, SearchLogger, SearchRecord, SearchStats};

/// Facade composing the estimator with the search audit trail.
pub struct PredictionService<P, L> {
    estimator: ProbabilityEstimator<P>,
    searches: Arc<L>,
}

impl<P, L> PredictionService<P, L>
where
    P: ConfirmationHistoryProvider + 'static,
    L: SearchLogger + 'static,
{
    pub fn new(history: Arc<P>, searches: Arc<L>, config: EstimatorConfig) -> Self {
        Self {
            estimator: ProbabilityEstimator::new(history, config),
            searches,
        }
    }

    /// Run one estimation and record it in the audit trail.
    ///
    /// The prediction itself cannot fail. A degraded history source and an
    /// unwritable log are both reported here through the logging layer only;
    /// the estimator collapses them into its no-data path, so this is where
    /// an outage stays distinguishable from genuinely absent data.
    pub fn predict(&self, query: JourneyQuery) -> Prediction {
        let estimate = self.estimator.estimate(&query);

        if estimate.degraded {
            warn!(
                train = %query.train,
                class = %query.class,
                "history lookups failed; estimate fell back to defaults"
            );
        }

        let record = SearchRecord {
            train: query.train.clone(),
            journey_date: query.journey_date,
            class: query.class,
            waitlist_position: query.waitlist_position,
            percentage: estimate.percentage,
        };
        if let Err(err) = self.searches.record(record) {
            warn!(%err, "failed to record search history");
        }

        Prediction { query, estimate }
    }

    pub fn usage_stats(&self) -> Result<SearchStats, SearchLogError> {
        self.searches.summary()
    }
}

/// A served prediction echoing the query it answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub query: JourneyQuery,
    pub estimate: Estimate,
}
