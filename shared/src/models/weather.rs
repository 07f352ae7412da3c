//! Weather forecast records and the condition cascade

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of days in every forecast, starting today
pub const FORECAST_DAYS: usize = 7;

/// Sky condition derived from one day's measurements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeatherCondition {
    Rainy,
    Sunny,
    Cloudy,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
}

impl WeatherCondition {
    /// First matching rule wins: rain, then hot-and-dry, then humid
    pub fn classify(temperature: Decimal, humidity: Decimal, rainfall: Decimal) -> Self {
        if rainfall > Decimal::TEN {
            WeatherCondition::Rainy
        } else if temperature > Decimal::from(25) && humidity < Decimal::from(50) {
            WeatherCondition::Sunny
        } else if humidity > Decimal::from(70) {
            WeatherCondition::Cloudy
        } else {
            WeatherCondition::PartlyCloudy
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherCondition::Rainy => write!(f, "Rainy"),
            WeatherCondition::Sunny => write!(f, "Sunny"),
            WeatherCondition::Cloudy => write!(f, "Cloudy"),
            WeatherCondition::PartlyCloudy => write!(f, "Partly Cloudy"),
        }
    }
}

/// One forecast day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherDay {
    pub date: NaiveDate,
    pub temperature: Decimal,
    pub humidity: Decimal,
    /// Millimetres
    pub rainfall: Decimal,
    /// Metres per second
    pub wind_speed: Decimal,
    pub condition: WeatherCondition,
}

impl WeatherDay {
    pub fn new(
        date: NaiveDate,
        temperature: Decimal,
        humidity: Decimal,
        rainfall: Decimal,
        wind_speed: Decimal,
    ) -> Self {
        Self {
            date,
            temperature,
            humidity,
            rainfall,
            wind_speed,
            condition: WeatherCondition::classify(temperature, humidity, rainfall),
        }
    }
}

/// Farming notes triggered by forecast aggregates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FarmingAdvice {
    Irrigation,
    Flooding,
    ColdProtection,
}

impl FarmingAdvice {
    /// Each rule is evaluated independently; zero or more may apply
    pub fn evaluate(mean_temperature: Decimal, total_rainfall: Decimal) -> Vec<FarmingAdvice> {
        let mut advice = Vec::new();
        if mean_temperature > Decimal::from(25) {
            advice.push(FarmingAdvice::Irrigation);
        }
        if total_rainfall > Decimal::from(50) {
            advice.push(FarmingAdvice::Flooding);
        }
        if mean_temperature < Decimal::from(20) {
            advice.push(FarmingAdvice::ColdProtection);
        }
        advice
    }

    pub fn message(&self) -> &'static str {
        match self {
            FarmingAdvice::Irrigation => {
                "High temperatures expected - ensure adequate irrigation"
            }
            FarmingAdvice::Flooding => {
                "Heavy rainfall expected - check drainage to prevent flooding"
            }
            FarmingAdvice::ColdProtection => {
                "Cool temperatures expected - protect sensitive crops from cold"
            }
        }
    }
}

/// Weather advisory result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherForecast {
    /// Display label only
    pub location: String,
    /// Chronological, day 0 is today
    pub days: Vec<WeatherDay>,
    pub mean_temperature: Decimal,
    pub total_rainfall: Decimal,
    pub advice: Vec<String>,
}

impl WeatherForecast {
    /// Aggregate the days and attach advice
    pub fn from_days(location: impl Into<String>, days: Vec<WeatherDay>) -> Self {
        let total_rainfall: Decimal = days.iter().map(|d| d.rainfall).sum();
        let mean_temperature = if days.is_empty() {
            Decimal::ZERO
        } else {
            (days.iter().map(|d| d.temperature).sum::<Decimal>() / Decimal::from(days.len()))
                .round_dp(1)
        };

        let advice = FarmingAdvice::evaluate(mean_temperature, total_rainfall)
            .into_iter()
            .map(|a| a.message().to_string())
            .collect();

        Self {
            location: location.into(),
            days,
            mean_temperature,
            total_rainfall,
            advice,
        }
    }

    /// Days whose condition is rainy
    pub fn rainy_days(&self) -> Vec<&WeatherDay> {
        self.days
            .iter()
            .filter(|d| d.condition == WeatherCondition::Rainy)
            .collect()
    }
}
