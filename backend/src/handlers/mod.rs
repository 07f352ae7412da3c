//! HTTP handlers for the advisory endpoints

pub mod disease;
pub mod health;
pub mod loan;
pub mod market;
pub mod reference;
pub mod weather;

pub use disease::detect_disease;
pub use health::health_check;
pub use loan::assess_loan;
pub use market::predict_market;
pub use reference::{list_crops, list_diseases};
pub use weather::predict_weather;
