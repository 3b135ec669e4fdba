pub mod aggregation;
pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use aggregation::*;
pub use config::*;
pub use error::*;
pub use logging::*;
pub use validation::*;
