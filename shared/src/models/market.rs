//! Crop price table and market forecast records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Base price used for crops missing from the table
pub const DEFAULT_BASE_PRICE: i64 = 30;

/// Base price for one crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropPrice {
    pub crop: String,
    pub base_price: Decimal,
}

/// Reference prices per crop (currency units per kg)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropPriceTable {
    pub prices: Vec<CropPrice>,
    #[serde(default = "default_base_price")]
    pub default_price: Decimal,
}

fn default_base_price() -> Decimal {
    Decimal::from(DEFAULT_BASE_PRICE)
}

/// Normalize a crop identifier for table lookup
pub fn normalize_crop(crop: &str) -> String {
    crop.trim().to_lowercase()
}

impl CropPriceTable {
    pub fn new(prices: Vec<CropPrice>, default_price: Decimal) -> Self {
        Self {
            prices,
            default_price,
        }
    }

    pub fn crops(&self) -> Vec<&str> {
        self.prices.iter().map(|p| p.crop.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Price for a known crop
    pub fn get(&self, crop: &str) -> Option<Decimal> {
        let key = normalize_crop(crop);
        self.prices
            .iter()
            .find(|p| p.crop == key)
            .map(|p| p.base_price)
    }

    /// Price for any crop, falling back to the table default
    pub fn base_price(&self, crop: &str) -> Decimal {
        self.get(crop).unwrap_or(self.default_price)
    }
}

impl Default for CropPriceTable {
    fn default() -> Self {
        let price = |crop: &str, base: i64| CropPrice {
            crop: crop.to_string(),
            base_price: Decimal::from(base),
        };

        Self::new(
            vec![
                price("tomato", 50),
                price("potato", 30),
                price("corn", 25),
                price("wheat", 35),
                price("rice", 40),
                price("beans", 45),
            ],
            default_base_price(),
        )
    }
}

/// Direction of the forecast relative to the current price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Up,
    Down,
}

impl PriceTrend {
    /// `Up` only when the forecast is strictly higher; equal prices are `Down`
    pub fn from_prices(current: Decimal, forecast: Decimal) -> Self {
        if forecast > current {
            PriceTrend::Up
        } else {
            PriceTrend::Down
        }
    }
}

impl std::fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceTrend::Up => write!(f, "up"),
            PriceTrend::Down => write!(f, "down"),
        }
    }
}

/// Selling advice derived from the forecast
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarketOutlook {
    /// Forecast more than 10% above current
    Hold,
    /// Forecast more than 10% below current
    SellSoon,
    Stable,
}

impl MarketOutlook {
    pub fn from_prices(current: Decimal, forecast: Decimal) -> Self {
        if forecast > current * Decimal::new(11, 1) {
            MarketOutlook::Hold
        } else if forecast < current * Decimal::new(9, 1) {
            MarketOutlook::SellSoon
        } else {
            MarketOutlook::Stable
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MarketOutlook::Hold => "Consider holding harvest for better prices",
            MarketOutlook::SellSoon => "Consider selling soon to avoid price drops",
            MarketOutlook::Stable => "Prices are stable, plan harvest based on crop readiness",
        }
    }
}

/// Market advisory result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketForecast {
    pub crop: String,
    pub current_price: Decimal,
    pub forecast_price: Decimal,
    pub trend: PriceTrend,
    /// In `[0, 1]`, two decimal places
    pub confidence: f64,
    pub outlook: MarketOutlook,
    pub recommendation: String,
}

impl MarketForecast {
    /// Assemble a record, deriving trend and advice from the two prices
    pub fn from_prices(
        crop: impl Into<String>,
        current_price: Decimal,
        forecast_price: Decimal,
        confidence: f64,
    ) -> Self {
        let outlook = MarketOutlook::from_prices(current_price, forecast_price);
        Self {
            crop: crop.into(),
            current_price,
            forecast_price,
            trend: PriceTrend::from_prices(current_price, forecast_price),
            confidence: crate::types::unit_score(confidence),
            outlook,
            recommendation: outlook.message().to_string(),
        }
    }

    /// Stable-market record served when the forecast cannot be computed
    pub fn stable_fallback(crop: impl Into<String>, base_price: Decimal) -> Self {
        Self::from_prices(crop, base_price, base_price, 0.0)
    }

    /// Forecast minus current price
    pub fn price_change(&self) -> Decimal {
        self.forecast_price - self.current_price
    }
}
