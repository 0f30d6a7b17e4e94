/// Database connection and table creation
pub mod database;

/// Letterhead, signatory and other fixed document text
pub mod document;

/// Daily rate tiers and the unrecognized-designation policy
pub mod rates;

/// Application configuration loading from config.toml
pub mod settings;

pub use document::DocumentConfig;
pub use rates::{RateTable, RateTier, UnrecognizedPolicy};
pub use settings::{AppConfig, TeacherConfig, load_app_configuration, load_config};
