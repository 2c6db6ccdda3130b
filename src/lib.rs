pub mod analyze;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod types;

pub use analyze::analyze;
pub use error::{Result, StarcheckError};
pub use input::AnalysisInput;
pub use types::config::AnalysisConfig;
pub use types::report::{SuspicionReport, Verdict};
