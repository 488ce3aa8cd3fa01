pub mod assessment;
pub mod error;
pub mod irradiation;
pub mod loan;
pub mod policy;
pub mod types;

pub use error::SolarSizingError;
pub use types::*;

/// Standard result type for all solar-sizing operations
pub type SolarSizingResult<T> = Result<T, SolarSizingError>;
