use super::{ConfigError, Store};

/// Section used for fields without a `section` annotation.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Read-only lookup of raw values by section and key.
pub trait ConfigSource {
    fn get_value(&self, section: &str, key: &str) -> Option<&str>;

    fn default_section(&self) -> &str {
        DEFAULT_SECTION
    }
}

/// One input of a [`Config`](super::Config) pipeline.
pub trait Layer: Send + Sync + std::fmt::Debug {
    fn load(&self) -> Result<Store, ConfigError>;
}
