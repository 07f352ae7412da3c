//! Input validation for advisory requests
//!
//! Loan applications arrive as loosely typed JSON (numbers or numeric
//! strings from dashboard forms). Everything is checked here before any
//! scoring happens.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::models::FarmerProfile;

/// Loan application as received from a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFarmerProfile {
    #[serde(default)]
    pub monthly_income: Option<Value>,
    #[serde(default)]
    pub land_size: Option<Value>,
    #[serde(default)]
    pub crop_yield: Option<Value>,
    #[serde(default)]
    pub credit_score: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub farming_experience: Option<Value>,
}

impl TryFrom<&RawFarmerProfile> for FarmerProfile {
    type Error = ValidationError;

    fn try_from(raw: &RawFarmerProfile) -> Result<Self, Self::Error> {
        let profile = FarmerProfile {
            monthly_income: parse_numeric_field("monthly_income", raw.monthly_income.as_ref())?,
            land_size: parse_numeric_field("land_size", raw.land_size.as_ref())?,
            crop_yield: parse_numeric_field("crop_yield", raw.crop_yield.as_ref())?,
            credit_score: parse_numeric_field("credit_score", raw.credit_score.as_ref())?,
            age: parse_numeric_field("age", raw.age.as_ref())?,
            farming_experience: parse_numeric_field(
                "farming_experience",
                raw.farming_experience.as_ref(),
            )?,
        };
        validate_farmer_profile(&profile)?;
        Ok(profile)
    }
}

/// Parse a decimal from plain or scientific notation
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Clamp a finite number outside the decimal range to the nearest bound
///
/// Magnitudes below one only fail to parse when they need more than 28
/// fractional digits, so they collapse to zero.
fn saturate(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        None
    } else if value.abs() < 1.0 {
        Some(Decimal::ZERO)
    } else if value.is_sign_negative() {
        Some(Decimal::MIN)
    } else {
        Some(Decimal::MAX)
    }
}

/// Parse numeric text, saturating values too large for a decimal
fn parse_saturating(text: &str) -> Option<Decimal> {
    parse_decimal(text).or_else(|| text.trim().parse::<f64>().ok().and_then(saturate))
}

/// Read one required numeric field
pub fn parse_numeric_field(field: &str, value: Option<&Value>) -> Result<Decimal, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::new(field, "field is required")),
        Some(Value::Number(n)) => parse_saturating(&n.to_string())
            .ok_or_else(|| ValidationError::new(field, format!("{} is not representable", n))),
        Some(Value::String(s)) => parse_saturating(s)
            .ok_or_else(|| ValidationError::new(field, format!("expected a number, got {:?}", s))),
        Some(_) => Err(ValidationError::new(field, "expected a number")),
    }
}

/// Reject profiles that are numeric but meaningless
pub fn validate_farmer_profile(profile: &FarmerProfile) -> Result<(), ValidationError> {
    let fields = [
        ("monthly_income", profile.monthly_income),
        ("land_size", profile.land_size),
        ("crop_yield", profile.crop_yield),
        ("credit_score", profile.credit_score),
        ("age", profile.age),
        ("farming_experience", profile.farming_experience),
    ];

    for (field, value) in fields {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::new(field, "must not be negative"));
        }
    }
    Ok(())
}
