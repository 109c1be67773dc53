//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ReporterConfig (validated, immutable)
//!     → WireReporter::from_config
//! ```
//!
//! # Design Decisions
//! - Wire constants (endpoint, notifier identity) live in `NotifierConfig`
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{NotifierConfig, ReporterConfig};
pub use validation::{validate_config, ValidationError};
