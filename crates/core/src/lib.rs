pub mod config;
pub mod error;
pub mod platform;
pub mod types;

pub use config::AppConfig;
pub use error::{TriageError, TriageResult};
