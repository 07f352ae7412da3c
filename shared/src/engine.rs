//! The advisory engine
//!
//! One value holds the reference tables and the disease classifier. It is
//! built once at startup and shared behind an `Arc`. Simulated advisories
//! draw from the caller's random source, so no mutable state lives here.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::classifier::{DiseaseClassifier, PlaceholderClassifier, DEFAULT_CLASSIFIER_SEED};
use crate::error::{AdvisoryError, ComputationError};
use crate::features::{extract_features, ImageFeatures};
use crate::models::{
    normalize_crop, DiseaseAssessment, FarmerProfile, LoanAssessment, MarketForecast,
    WeatherDay, WeatherForecast, FORECAST_DAYS,
};
use crate::random::RandomSource;
use crate::reference::ReferenceData;
use crate::types::{decimal_from_f64, unit_score};
use crate::validation::RawFarmerProfile;

/// Range of the per-request base temperature (°C)
const BASE_TEMPERATURE: (f64, f64) = (20.0, 30.0);
/// Range of the per-request base humidity (%)
const BASE_HUMIDITY: (f64, f64) = (40.0, 80.0);
const TEMPERATURE_OFFSET: (f64, f64) = (-5.0, 5.0);
const HUMIDITY_OFFSET: (f64, f64) = (-10.0, 10.0);
const RAINFALL: (f64, f64) = (0.0, 20.0);
const WIND_SPEED: (f64, f64) = (0.0, 15.0);

/// Range of the simulated price movement
const PRICE_OFFSET: (f64, f64) = (-10.0, 15.0);
const MARKET_CONFIDENCE: (f64, f64) = (0.60, 0.90);

/// Stateless advisory functions over shared reference data
#[derive(Clone)]
pub struct AdvisoryEngine {
    reference: Arc<ReferenceData>,
    classifier: Arc<dyn DiseaseClassifier>,
}

impl std::fmt::Debug for AdvisoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisoryEngine")
            .field("diseases", &self.reference.diseases.len())
            .field("crops", &self.reference.crop_prices.len())
            .field("labels", &self.classifier.labels().len())
            .finish()
    }
}

impl Default for AdvisoryEngine {
    fn default() -> Self {
        Self::new(ReferenceData::default())
    }
}

impl AdvisoryEngine {
    /// Engine with the placeholder classifier labelled by the catalog codes
    pub fn new(reference: ReferenceData) -> Self {
        Self::with_classifier_seed(reference, DEFAULT_CLASSIFIER_SEED)
    }

    pub fn with_classifier_seed(reference: ReferenceData, seed: u64) -> Self {
        let classifier = PlaceholderClassifier::new(reference.diseases.codes(), seed);
        Self::with_classifier(reference, Arc::new(classifier))
    }

    pub fn with_classifier(reference: ReferenceData, classifier: Arc<dyn DiseaseClassifier>) -> Self {
        Self {
            reference: Arc::new(reference),
            classifier,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    // ========================================================================
    // Disease
    // ========================================================================

    /// Classify an encoded image
    pub fn assess_disease_image(
        &self,
        bytes: &[u8],
        rng: &mut dyn RandomSource,
    ) -> Result<DiseaseAssessment, AdvisoryError> {
        let features = extract_features(bytes)?;
        self.assess_disease_features(&features, rng)
    }

    /// Classify a precomputed feature vector
    pub fn assess_disease_features(
        &self,
        features: &ImageFeatures,
        rng: &mut dyn RandomSource,
    ) -> Result<DiseaseAssessment, AdvisoryError> {
        features.validate()?;

        let classification = self.classifier.classify(features, rng);
        let catalog = &self.reference.diseases;
        if !catalog.contains(&classification.label) {
            return Err(ComputationError::UnknownLabel(classification.label).into());
        }

        tracing::debug!(
            disease = %classification.label,
            confidence = classification.confidence,
            "Disease classified"
        );

        Ok(DiseaseAssessment {
            description: catalog.description(&classification.label).to_string(),
            recommendations: catalog.recommendations(&classification.label),
            confidence: unit_score(classification.confidence),
            disease: classification.label,
        })
    }

    // ========================================================================
    // Weather
    // ========================================================================

    /// Simulated seven-day forecast starting at `today`
    pub fn assess_weather(
        &self,
        location: &str,
        today: NaiveDate,
        rng: &mut dyn RandomSource,
    ) -> WeatherForecast {
        let base_temperature = rng.uniform(BASE_TEMPERATURE.0, BASE_TEMPERATURE.1);
        let base_humidity = rng.uniform(BASE_HUMIDITY.0, BASE_HUMIDITY.1);
        let measure = |name: &'static str, value: f64| {
            decimal_from_f64(value, 1).unwrap_or_else(|| {
                tracing::warn!(location, measure = name, "Non-finite weather draw replaced with zero");
                Decimal::ZERO
            })
        };

        let mut days = Vec::with_capacity(FORECAST_DAYS);
        for offset in 0..FORECAST_DAYS {
            let date = today
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(today);
            let temperature =
                base_temperature + rng.uniform(TEMPERATURE_OFFSET.0, TEMPERATURE_OFFSET.1);
            let humidity = base_humidity + rng.uniform(HUMIDITY_OFFSET.0, HUMIDITY_OFFSET.1);
            let rainfall = rng.uniform(RAINFALL.0, RAINFALL.1);
            let wind_speed = rng.uniform(WIND_SPEED.0, WIND_SPEED.1);

            days.push(WeatherDay::new(
                date,
                measure("temperature", temperature),
                measure("humidity", humidity),
                measure("rainfall", rainfall),
                measure("wind_speed", wind_speed),
            ));
        }

        let forecast = WeatherForecast::from_days(location, days);
        tracing::debug!(
            location,
            mean_temperature = %forecast.mean_temperature,
            total_rainfall = %forecast.total_rainfall,
            "Weather forecast generated"
        );
        forecast
    }

    // ========================================================================
    // Market
    // ========================================================================

    /// Price forecast, failing on non-finite simulated values
    pub fn try_assess_market(
        &self,
        crop: &str,
        rng: &mut dyn RandomSource,
    ) -> Result<MarketForecast, ComputationError> {
        let crop = normalize_crop(crop);
        let current_price = self.reference.crop_prices.base_price(&crop).round_dp(2);

        let offset = decimal_from_f64(rng.uniform(PRICE_OFFSET.0, PRICE_OFFSET.1), 2)
            .ok_or(ComputationError::NonFinite("price offset"))?;
        let forecast_price = current_price
            .checked_add(offset)
            .ok_or(ComputationError::Overflow("forecast price"))?;

        let confidence = rng.uniform(MARKET_CONFIDENCE.0, MARKET_CONFIDENCE.1);
        if !confidence.is_finite() {
            return Err(ComputationError::NonFinite("market confidence"));
        }

        Ok(MarketForecast::from_prices(
            crop,
            current_price,
            forecast_price,
            confidence,
        ))
    }

    /// Price forecast; computation failures degrade to a stable-market record
    pub fn assess_market(&self, crop: &str, rng: &mut dyn RandomSource) -> MarketForecast {
        match self.try_assess_market(crop, rng) {
            Ok(forecast) => forecast,
            Err(e) => {
                tracing::warn!(crop, error = %e, "Market forecast degraded to stable fallback");
                let crop = normalize_crop(crop);
                let base_price = self.reference.crop_prices.base_price(&crop);
                MarketForecast::stable_fallback(crop, base_price)
            }
        }
    }

    /// Base price the market advisory starts from
    pub fn base_price(&self, crop: &str) -> Decimal {
        self.reference.crop_prices.base_price(crop)
    }

    // ========================================================================
    // Loan
    // ========================================================================

    /// Validate and score a raw application
    pub fn try_assess_loan(&self, raw: &RawFarmerProfile) -> Result<LoanAssessment, AdvisoryError> {
        let profile = FarmerProfile::try_from(raw)?;
        Ok(LoanAssessment::evaluate(&profile))
    }

    /// Validate and score a raw application
    ///
    /// Never fails: invalid input yields the error record with risk level
    /// `Error`.
    pub fn assess_loan(&self, raw: &RawFarmerProfile) -> LoanAssessment {
        match self.try_assess_loan(raw) {
            Ok(assessment) => {
                tracing::debug!(
                    score = assessment.score,
                    risk = %assessment.risk_level,
                    eligible = assessment.eligible,
                    "Loan assessed"
                );
                assessment
            }
            Err(AdvisoryError::Validation(e)) => {
                tracing::info!(field = %e.field, "Loan application rejected: {}", e.message);
                LoanAssessment::error_record(e.to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Loan assessment degraded to error record");
                LoanAssessment::error_record(e.to_string())
            }
        }
    }
}
