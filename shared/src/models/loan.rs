//! Micro-loan eligibility scoring

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Recommended amounts never exceed this ceiling
pub const MAX_LOAN_AMOUNT: i64 = 50_000;

/// Minimum score for eligibility
pub const ELIGIBILITY_THRESHOLD: u32 = 4;

/// Highest score the six factors can produce (2+2+2+2+1+1)
pub const MAX_SCORE: u32 = 10;

/// Conditions attached to the error record
pub const ERROR_CONDITIONS: &[&str] = &["Contact loan officer for details"];

/// Validated applicant profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FarmerProfile {
    pub monthly_income: Decimal,
    /// Acres
    pub land_size: Decimal,
    /// Expected yield in kg
    pub crop_yield: Decimal,
    pub credit_score: Decimal,
    pub age: Decimal,
    /// Years of farming experience
    pub farming_experience: Decimal,
}

/// Two-point factor: `> high` earns 2, `> low` earns 1
fn banded(value: Decimal, high: i64, low: i64) -> u32 {
    if value > Decimal::from(high) {
        2
    } else if value > Decimal::from(low) {
        1
    } else {
        0
    }
}

impl FarmerProfile {
    /// Additive point score; each factor contributes independently
    pub fn score(&self) -> u32 {
        let mut score = banded(self.monthly_income, 5000, 3000);
        score += banded(self.land_size, 5, 2);
        score += banded(self.farming_experience, 10, 5);
        score += banded(self.credit_score, 700, 600);
        if self.age > Decimal::from(25) && self.age < Decimal::from(60) {
            score += 1;
        }
        if self.crop_yield > Decimal::from(1000) {
            score += 1;
        }
        score
    }

    /// Three months of income, adjusted for credit, experience and land,
    /// then capped
    ///
    /// Every multiplier is at least one and the income is non-negative, so an
    /// overflowing product is already past the cap.
    pub fn recommended_amount(&self) -> Decimal {
        let cap = Decimal::from(MAX_LOAN_AMOUNT);
        let mut factors = vec![Decimal::from(3)];
        if self.credit_score > Decimal::from(700) {
            factors.push(Decimal::new(12, 1));
        }
        if self.farming_experience > Decimal::from(10) {
            factors.push(Decimal::new(11, 1));
        }
        if self.land_size > Decimal::from(5) {
            factors.push(Decimal::new(115, 2));
        }

        factors
            .into_iter()
            .try_fold(self.monthly_income, |amount, factor| amount.checked_mul(factor))
            .map_or(cap, |amount| amount.min(cap).round_dp(2))
    }
}

/// Eligibility holds from the threshold upward
pub fn is_eligible(score: u32) -> bool {
    score >= ELIGIBILITY_THRESHOLD
}

/// `score / 8`, capped below certainty at 0.95
pub fn approval_probability(score: u32) -> f64 {
    crate::types::unit_score((score as f64 / 8.0).min(0.95))
}

/// Risk tier of an assessment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Only on records produced from invalid input
    Error,
}

impl RiskLevel {
    /// Partition of the score: 6+ Low, 4-5 Medium, below 4 High
    pub fn from_score(score: u32) -> Self {
        if score >= 6 {
            RiskLevel::Low
        } else if score >= 4 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn conditions(&self) -> &'static [&'static str] {
        match self {
            RiskLevel::Low => &["Standard interest rate", "Flexible repayment terms"],
            RiskLevel::Medium => &["Slightly higher interest rate", "Collateral required"],
            RiskLevel::High => &[
                "Higher interest rate",
                "Guarantor required",
                "Shorter repayment period",
            ],
            RiskLevel::Error => ERROR_CONDITIONS,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Error => write!(f, "Error"),
        }
    }
}

/// Loan advisory result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoanAssessment {
    pub eligible: bool,
    pub probability: f64,
    pub recommended_amount: Decimal,
    pub risk_level: RiskLevel,
    pub conditions: Vec<String>,
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoanAssessment {
    /// Score a validated profile
    pub fn evaluate(profile: &FarmerProfile) -> Self {
        let score = profile.score();
        let risk_level = RiskLevel::from_score(score);

        Self {
            eligible: is_eligible(score),
            probability: approval_probability(score),
            recommended_amount: profile.recommended_amount(),
            risk_level,
            conditions: risk_level.conditions().iter().map(|c| c.to_string()).collect(),
            score,
            error: None,
        }
    }

    /// Zeroed record returned instead of an error
    pub fn error_record(reason: impl Into<String>) -> Self {
        Self {
            eligible: false,
            probability: 0.0,
            recommended_amount: Decimal::ZERO,
            risk_level: RiskLevel::Error,
            conditions: ERROR_CONDITIONS.iter().map(|c| c.to_string()).collect(),
            score: 0,
            error: Some(reason.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.risk_level == RiskLevel::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(income: i64, land: i64, yield_kg: i64, credit: i64, age: i64, exp: i64) -> FarmerProfile {
        FarmerProfile {
            monthly_income: Decimal::from(income),
            land_size: Decimal::from(land),
            crop_yield: Decimal::from(yield_kg),
            credit_score: Decimal::from(credit),
            age: Decimal::from(age),
            farming_experience: Decimal::from(exp),
        }
    }

    #[test]
    fn test_bands_use_strict_comparisons() {
        // every value sits exactly on a threshold, so nothing upgrades
        let p = profile(3000, 2, 1000, 600, 25, 5);
        assert_eq!(p.score(), 0);

        let p = profile(5000, 5, 1000, 700, 60, 10);
        assert_eq!(p.score(), 4);
    }

    #[test]
    fn test_amount_without_adjustments() {
        let p = profile(2000, 1, 0, 500, 30, 1);
        assert_eq!(p.recommended_amount(), Decimal::from(6000));
    }

    #[test]
    fn test_overflowing_product_is_capped() {
        let p = FarmerProfile {
            monthly_income: Decimal::MAX,
            ..profile(0, 0, 0, 0, 0, 0)
        };
        assert_eq!(p.recommended_amount(), Decimal::from(MAX_LOAN_AMOUNT));

        // fits after tripling, overflows on the credit multiplier
        let p = FarmerProfile {
            monthly_income: Decimal::MAX / Decimal::from(3),
            ..profile(0, 0, 0, 701, 0, 0)
        };
        assert_eq!(p.recommended_amount(), Decimal::from(MAX_LOAN_AMOUNT));
    }

    #[test]
    fn test_error_record_shape() {
        let record = LoanAssessment::error_record("Invalid age: expected a number");
        assert!(!record.eligible);
        assert_eq!(record.score, 0);
        assert_eq!(record.risk_level, RiskLevel::Error);
        assert_eq!(record.recommended_amount, Decimal::ZERO);
        assert!(record.is_error());
    }
}
