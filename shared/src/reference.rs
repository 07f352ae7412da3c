//! Static reference tables shared read-only by every request

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ReferenceError;
use crate::models::{normalize_crop, CropPriceTable, DiseaseCatalog};

/// Disease catalog plus crop price table
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceData {
    #[serde(default)]
    pub diseases: DiseaseCatalog,
    #[serde(default)]
    pub crop_prices: CropPriceTable,
}

impl ReferenceData {
    /// Parse and validate tables from JSON
    pub fn from_json(json: &str) -> Result<Self, ReferenceError> {
        let mut data: ReferenceData =
            serde_json::from_str(json).map_err(|e| ReferenceError::Parse(e.to_string()))?;
        for price in data.crop_prices.prices.iter_mut() {
            price.crop = normalize_crop(&price.crop);
        }
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<(), ReferenceError> {
        if self.diseases.is_empty() {
            return Err(ReferenceError::EmptyCatalog);
        }

        let mut codes = HashSet::new();
        for entry in self.diseases.entries() {
            let invalid = |reason: &str| ReferenceError::InvalidDisease {
                code: entry.code.clone(),
                reason: reason.to_string(),
            };
            if entry.code.trim().is_empty() {
                return Err(invalid("code is empty"));
            }
            if entry.treatments.is_empty() {
                return Err(invalid("no treatments listed"));
            }
            if !codes.insert(entry.code.as_str()) {
                return Err(invalid("duplicate code"));
            }
        }

        if self.crop_prices.default_price <= Decimal::ZERO {
            return Err(ReferenceError::InvalidCrop {
                crop: "<default>".to_string(),
                reason: "default price must be positive".to_string(),
            });
        }

        let mut crops = HashSet::new();
        for price in &self.crop_prices.prices {
            let invalid = |reason: &str| ReferenceError::InvalidCrop {
                crop: price.crop.clone(),
                reason: reason.to_string(),
            };
            if price.crop.is_empty() {
                return Err(invalid("crop name is empty"));
            }
            if price.base_price <= Decimal::ZERO {
                return Err(invalid("base price must be positive"));
            }
            if !crops.insert(price.crop.as_str()) {
                return Err(invalid("duplicate crop"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ReferenceData::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_normalizes_crops() {
        let data = ReferenceData::from_json(
            r#"{
                "diseases": [
                    {"code": "rust", "description": "Leaf rust", "treatments": ["Apply sulfur"]}
                ],
                "crop_prices": {
                    "prices": [{"crop": " Coffee ", "base_price": "120.50"}],
                    "default_price": "20"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(data.diseases.codes(), vec!["rust".to_string()]);
        assert_eq!(data.crop_prices.get("coffee"), Some(Decimal::new(12050, 2)));
        assert_eq!(data.crop_prices.base_price("tea"), Decimal::from(20));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let data = ReferenceData::from_json("{}").unwrap();
        assert_eq!(data, ReferenceData::default());
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let err = ReferenceData::from_json(
            r#"{"crop_prices": {"prices": [{"crop": "corn", "base_price": "0"}]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidCrop { .. }));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let err = ReferenceData::from_json(r#"{"diseases": []}"#).unwrap_err();
        assert_eq!(err, ReferenceError::EmptyCatalog);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            ReferenceData::from_json("not json"),
            Err(ReferenceError::Parse(_))
        ));
    }
}
