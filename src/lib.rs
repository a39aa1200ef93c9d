//! Environment-scoped, layered configuration for dotted component contexts.
//!
//! A context `namespace.package.module` is resolved against two `.env` files
//! under `${NAMESPACE}_FOLDER`, selected by `${NAMESPACE}_ENVIRONMENT`, and
//! cached so that every lookup of the same context shares one [`Config`].

pub mod config;
pub mod context;
pub mod registry;

pub use config::{
    Config, ConfigBuilder, ConfigError, DotenvReader, EnvSource, KeyValueReader, MapEnv,
    ProcessEnv, ResolvedPaths,
};
pub use context::ContextIdentity;
pub use registry::{resolve_config, ConfigRegistry};
