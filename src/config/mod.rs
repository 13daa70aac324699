//! Settings for locale loading, default caching and lookups.

/// Settings file reader
mod loader;
/// Validated settings of one workspace
mod manager;
/// Settings and error types
mod types;

pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    I18nSettings,
    NAMESPACE_SEPARATOR,
    ValidationError,
};
