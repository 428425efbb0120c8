//! Sectioned stores and the layered loader that builds them.

mod builder;
mod env;
mod error;
mod file;
mod resolve;
mod source;
mod store;

pub use builder::Config;
pub use env::EnvLayer;
pub use error::ConfigError;
pub use file::FileLayer;
pub use source::{ConfigSource, Layer, DEFAULT_SECTION};
pub use store::Store;
