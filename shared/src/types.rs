//! Common numeric helpers used across the advisory functions

use rust_decimal::Decimal;

/// Clamp a probability-like value into `[0, 1]`; NaN becomes 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Clamp into `[0, 1]` and round to two places, the shape every
/// confidence and probability field is reported in
pub fn unit_score(value: f64) -> f64 {
    round_to(clamp_unit(value), 2)
}

/// Convert a simulated float into a rounded decimal; `None` for NaN or infinity
pub fn decimal_from_f64(value: f64, places: u32) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64_retain(value).map(|d| d.round_dp(places))
}
