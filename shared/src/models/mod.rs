//! Domain models for the advisory functions

mod disease;
mod loan;
mod market;
mod weather;

pub use disease::*;
pub use loan::*;
pub use market::*;
pub use weather::*;
