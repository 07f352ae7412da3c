//! Shared advisory engine for the AgriWise farming platform
//!
//! This crate contains the decision logic and types shared between the
//! backend, the dashboard (via WASM), and other components of the system.

pub mod classifier;
pub mod engine;
pub mod error;
pub mod features;
pub mod models;
pub mod random;
pub mod reference;
pub mod types;
pub mod validation;

pub use classifier::*;
pub use engine::*;
pub use error::*;
pub use features::*;
pub use models::*;
pub use random::*;
pub use reference::*;
pub use types::*;
pub use validation::*;
