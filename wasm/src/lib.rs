//! WebAssembly module for the AgriWise farmer dashboard
//!
//! Provides client-side computation for:
//! - Loan eligibility scoring
//! - Weather condition labels and offline forecasts
//! - Market outlook and crop prices

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use wasm_bindgen::prelude::*;

use shared::{
    decimal_from_f64, AdvisoryEngine, MarketOutlook, RawFarmerProfile, RiskLevel, RngSource,
    WeatherCondition,
};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("AgriWise dashboard module loaded"));
}

fn to_js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn loan_json(profile_json: &str) -> Result<String, String> {
    let raw: RawFarmerProfile =
        serde_json::from_str(profile_json).map_err(|e| format!("Invalid profile JSON: {}", e))?;
    let assessment = AdvisoryEngine::default().assess_loan(&raw);
    serde_json::to_string(&assessment).map_err(|e| e.to_string())
}

fn market_json(crop: &str, seed: u64) -> Result<String, String> {
    let forecast = AdvisoryEngine::default().assess_market(crop, &mut RngSource::seeded(seed));
    serde_json::to_string(&forecast).map_err(|e| e.to_string())
}

fn weather_json(location: &str, today: &str, seed: u64) -> Result<String, String> {
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date {:?}: {}", today, e))?;
    let forecast =
        AdvisoryEngine::default().assess_weather(location, today, &mut RngSource::seeded(seed));
    serde_json::to_string(&forecast).map_err(|e| e.to_string())
}

/// Score a loan application given as a flat JSON object
///
/// Invalid fields produce the error record, not an exception.
#[wasm_bindgen]
pub fn score_loan(profile_json: &str) -> Result<String, JsValue> {
    loan_json(profile_json).map_err(to_js_error)
}

/// Condition label for one day's measurements
#[wasm_bindgen]
pub fn weather_condition(temperature: f64, humidity: f64, rainfall: f64) -> String {
    let value = |v: f64| decimal_from_f64(v, 1).unwrap_or_default();
    WeatherCondition::classify(value(temperature), value(humidity), value(rainfall)).to_string()
}

/// Selling advice for a current and forecast price
#[wasm_bindgen]
pub fn market_outlook(current_price: f64, forecast_price: f64) -> String {
    let value = |v: f64| decimal_from_f64(v, 2).unwrap_or_default();
    MarketOutlook::from_prices(value(current_price), value(forecast_price))
        .message()
        .to_string()
}

/// Risk tier label for a loan score
#[wasm_bindgen]
pub fn risk_level_for_score(score: u32) -> String {
    RiskLevel::from_score(score).to_string()
}

/// Base price for a crop, using the default for unknown crops
#[wasm_bindgen]
pub fn crop_base_price(crop: &str) -> f64 {
    AdvisoryEngine::default()
        .base_price(crop)
        .to_f64()
        .unwrap_or(0.0)
}

/// Crops with a listed base price
#[wasm_bindgen]
pub fn list_crops() -> js_sys::Array {
    let engine = AdvisoryEngine::default();
    engine
        .reference()
        .crop_prices
        .crops()
        .into_iter()
        .map(JsValue::from_str)
        .collect()
}

/// Reproducible market forecast as JSON
#[wasm_bindgen]
pub fn market_forecast(crop: &str, seed: u64) -> Result<String, JsValue> {
    market_json(crop, seed).map_err(to_js_error)
}

/// Reproducible seven-day forecast as JSON; `today` is `YYYY-MM-DD`
#[wasm_bindgen]
pub fn weather_forecast(location: &str, today: &str, seed: u64) -> Result<String, JsValue> {
    weather_json(location, today, seed).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_condition() {
        assert_eq!(weather_condition(30.0, 40.0, 15.0), "Rainy");
        assert_eq!(weather_condition(30.0, 40.0, 2.0), "Sunny");
        assert_eq!(weather_condition(20.0, 80.0, 2.0), "Cloudy");
        assert_eq!(weather_condition(22.0, 60.0, 2.0), "Partly Cloudy");
    }

    #[test]
    fn test_market_outlook() {
        assert_eq!(market_outlook(50.0, 60.0), "Consider holding harvest for better prices");
        assert_eq!(market_outlook(50.0, 40.0), "Consider selling soon to avoid price drops");
        assert_eq!(
            market_outlook(50.0, 50.0),
            "Prices are stable, plan harvest based on crop readiness"
        );
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(risk_level_for_score(10), "Low");
        assert_eq!(risk_level_for_score(4), "Medium");
        assert_eq!(risk_level_for_score(3), "High");
    }

    #[test]
    fn test_crop_base_price() {
        assert_eq!(crop_base_price("Tomato"), 50.0);
        assert_eq!(crop_base_price("unknown_crop"), 30.0);
    }

    #[test]
    fn test_loan_json() {
        let json = loan_json(
            r#"{"monthly_income": 5001, "land_size": 5.1, "crop_yield": 1001,
                "credit_score": 701, "age": 30, "farming_experience": 11}"#,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 10);
        assert_eq!(value["risk_level"], "Low");

        let json = loan_json(r#"{"age": "old"}"#).unwrap();
        assert!(json.contains("\"Error\""));
        assert!(loan_json("not json").is_err());
    }

    #[test]
    fn test_seeded_forecasts_repeat() {
        assert_eq!(market_json("rice", 5).unwrap(), market_json("rice", 5).unwrap());
        assert_eq!(
            weather_json("Nairobi", "2024-05-01", 5).unwrap(),
            weather_json("Nairobi", "2024-05-01", 5).unwrap()
        );
        assert!(weather_json("Nairobi", "May 1st", 5).is_err());
    }
}
