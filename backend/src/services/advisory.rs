//! Weather, market and loan advisories

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use shared::{
    AdvisoryEngine, LoanAssessment, MarketForecast, RawFarmerProfile, RngSource, WeatherForecast,
};

use crate::error::{AppError, AppResult};

/// Runs advisories with a random source owned by the request
#[derive(Clone)]
pub struct AdvisoryService {
    engine: Arc<AdvisoryEngine>,
    seed: Option<u64>,
}

impl AdvisoryService {
    pub fn new(engine: Arc<AdvisoryEngine>, seed: Option<u64>) -> Self {
        Self { engine, seed }
    }

    /// Fresh generator for one request; a configured seed makes every request repeat
    pub fn request_rng(&self) -> RngSource<StdRng> {
        match self.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource(StdRng::from_entropy()),
        }
    }

    pub fn weather(&self, location: &str) -> WeatherForecast {
        let today = Utc::now().date_naive();
        self.engine
            .assess_weather(location, today, &mut self.request_rng())
    }

    pub fn market(&self, crop: &str) -> MarketForecast {
        self.engine.assess_market(crop, &mut self.request_rng())
    }

    /// Score an application; validation failures carry the error record
    pub fn loan(&self, raw: &RawFarmerProfile) -> AppResult<LoanAssessment> {
        let assessment = self.engine.assess_loan(raw);
        if assessment.is_error() {
            return Err(AppError::LoanRejected(Box::new(assessment)));
        }
        Ok(assessment)
    }
}
