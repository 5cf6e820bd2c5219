//! Domain models for the drug-match system.

mod assessment;
mod disease;
mod drug;

pub use assessment::*;
pub use disease::*;
pub use drug::*;
