//! Request-level services wrapping the shared advisory engine

pub mod advisory;
pub mod disease;
pub mod reference;

pub use advisory::AdvisoryService;
pub use disease::DiseaseService;
pub use reference::load_reference;
