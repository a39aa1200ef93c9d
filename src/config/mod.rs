//! Configuration loading and management.

mod builder;
mod env;
mod error;
mod file;
mod merge;
mod paths;
mod value;

pub use builder::ConfigBuilder;
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::ConfigError;
pub use file::{DotenvReader, KeyValueReader};
pub use merge::{merge_layers, PYTEST_DEFAULTS, PYTEST_ENVIRONMENT};
pub use paths::ResolvedPaths;
pub use value::{Config, FIXED_FIELDS};
