mod classify;
pub(crate) mod factors;

pub use classify::{BookingAdvice, ProbabilityBand};

use std::sync::Arc;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::domain::{ConfirmationRate, JourneyQuery};
use super::history::ConfirmationHistoryProvider;
use factors::{seasonal_factor, waitlist_factor};

/// Weights and fallback prior for combining the two historical rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Weight on the exact-date rate when one exists.
    pub specific_weight: f64,
    /// Weight on the similar-date trend blended alongside it.
    pub historical_weight: f64,
    /// Base rate assumed when no historical signal of either kind exists.
    pub default_prior: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            specific_weight: 0.7,
            historical_weight: 0.3,
            default_prior: 0.3,
        }
    }
}

/// Which historical signal the base rate was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    /// Exact-date data blended with the similar-date trend.
    SpecificBlend,
    /// No exact-date data; the similar-date trend stands alone.
    SimilarDatesOnly,
    /// Neither signal available; the fixed prior was used.
    DefaultPrior,
}

impl RateBasis {
    pub const fn describe(self) -> &'static str {
        match self {
            RateBasis::SpecificBlend => "exact-date data blended with the similar-date trend",
            RateBasis::SimilarDatesOnly => "similar-date trend only",
            RateBasis::DefaultPrior => "default prior (no historical data)",
        }
    }
}

/// One estimation result, with the intermediate terms kept so callers can
/// audit how the percentage was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    /// Confirmation probability in [0.0, 100.0].
    pub percentage: f64,
    pub band: ProbabilityBand,
    pub advice: BookingAdvice,
    pub basis: RateBasis,
    pub base_rate: f64,
    pub waitlist_factor: f64,
    pub seasonal_factor: f64,
    /// Set when a history lookup failed and was treated as "no data". The
    /// estimator stays silent about it; the caller owns the logging.
    pub degraded: bool,
}

/// Stateless estimator combining history lookups with the fixed factor
/// tables. Every invocation is independent; the only shared piece is the
/// injected provider.
pub struct ProbabilityEstimator<P> {
    history: Arc<P>,
    config: EstimatorConfig,
}

impl<P> ProbabilityEstimator<P>
where
    P: ConfirmationHistoryProvider,
{
    pub fn new(history: Arc<P>, config: EstimatorConfig) -> Self {
        Self { history, config }
    }

    /// Estimate the confirmation probability for `query`.
    ///
    /// Never fails: lookup errors fold into the no-data path so the caller
    /// always receives a percentage in [0.0, 100.0].
    pub fn estimate(&self, query: &JourneyQuery) -> Estimate {
        let mut degraded = false;

        let specific = self
            .history
            .specific_date_rate(&query.train, query.journey_date, query.class)
            .unwrap_or_else(|_| {
                degraded = true;
                None
            });

        let day_of_week = query.journey_date.weekday().number_from_sunday();
        let month = query.journey_date.month();

        let historical = self
            .history
            .similar_date_rate(&query.train, query.class, day_of_week, month)
            .unwrap_or_else(|_| {
                degraded = true;
                None
            });

        let (base_rate, basis) = self.base_rate(specific, historical);
        let waitlist = waitlist_factor(query.waitlist_position);
        let seasonal = seasonal_factor(month);
        let percentage = (base_rate * waitlist * seasonal).clamp(0.0, 1.0) * 100.0;

        Estimate {
            percentage,
            band: ProbabilityBand::from_percent(percentage),
            advice: BookingAdvice::from_percent(percentage),
            basis,
            base_rate,
            waitlist_factor: waitlist,
            seasonal_factor: seasonal,
            degraded,
        }
    }

    /// Weighted blend favoring exact-date data. A recorded rate of zero is
    /// treated the same as missing data, so sparse histories fall back to the
    /// similar-date trend and then to the prior.
    fn base_rate(
        &self,
        specific: Option<ConfirmationRate>,
        historical: Option<ConfirmationRate>,
    ) -> (f64, RateBasis) {
        if let Some(rate) = specific.filter(|rate| rate.is_informative()) {
            let trend = historical.map(ConfirmationRate::value).unwrap_or(0.0);
            let blended =
                self.config.specific_weight * rate.value() + self.config.historical_weight * trend;
            return (blended, RateBasis::SpecificBlend);
        }

        match historical.filter(|rate| rate.is_informative()) {
            Some(rate) => (rate.value(), RateBasis::SimilarDatesOnly),
            None => (self.config.default_prior, RateBasis::DefaultPrior),
        }
    }
}
