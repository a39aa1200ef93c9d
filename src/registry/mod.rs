//! Resolve-once cache of configurations keyed by context.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::{debug, info};

use crate::config::{
    merge_layers, Config, ConfigBuilder, ConfigError, DotenvReader, EnvSource, KeyValueReader,
    ProcessEnv, ResolvedPaths,
};
use crate::ContextIdentity;

/// Owns one [`Config`] per distinct context string.
///
/// The first lookup of a context resolves it; every later lookup returns the
/// same `Arc`. Failed resolutions are not stored. The lock is held while
/// resolving, so concurrent first lookups still produce a single instance.
/// First lookups of different contexts also wait on each other's file reads.
///
/// ## Example
///
/// ```no_run
/// use std::sync::Arc;
/// use halogen::ConfigRegistry;
///
/// let registry = ConfigRegistry::new();
/// let a = registry.get_or_create("dynamicalsystem.halogen.config")?;
/// let b = registry.get_or_create("dynamicalsystem.halogen.config")?;
/// assert!(Arc::ptr_eq(&a, &b));
/// # Ok::<(), halogen::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct ConfigRegistry {
    env: Box<dyn EnvSource>,
    reader: Box<dyn KeyValueReader>,
    configs: Mutex<HashMap<String, Arc<Config>>>,
}

impl ConfigRegistry {
    /// A registry reading the process environment and `.env` files.
    pub fn new() -> Self {
        Self::with_sources(ProcessEnv, DotenvReader)
    }

    pub fn with_sources(
        env: impl EnvSource + 'static,
        reader: impl KeyValueReader + 'static,
    ) -> Self {
        Self {
            env: Box::new(env),
            reader: Box::new(reader),
            configs: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached configuration for `context`, resolving it on first use.
    pub fn get_or_create(&self, context: &str) -> Result<Arc<Config>, ConfigError> {
        if context.is_empty() {
            return Err(ConfigError::MissingContext);
        }

        let mut configs = self.lock();
        if let Some(config) = configs.get(context) {
            return Ok(Arc::clone(config));
        }

        info!("Creating config instance for context: {context}");
        let config = Arc::new(self.resolve(context)?);
        debug!(
            "Config instance created with {} attributes",
            config.attribute_names().len()
        );
        debug!("Package: {}", config.package());

        configs.insert(context.to_string(), Arc::clone(&config));
        Ok(config)
    }

    fn resolve(&self, context: &str) -> Result<Config, ConfigError> {
        let identity = ContextIdentity::parse(context)?;
        info!("Initializing config with context: {context}");

        let paths = ResolvedPaths::resolve(&identity, self.env.as_ref())?;
        let attributes = merge_layers(&identity, &paths, self.reader.as_ref())?;

        let mut builder = ConfigBuilder::new(identity, paths);
        builder.load_file_values(attributes);
        Ok(builder.finalize())
    }

    pub fn contains(&self, context: &str) -> bool {
        self.lock().contains_key(context)
    }

    /// Number of cached contexts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic mid-resolution never inserts, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Config>>> {
        self.configs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves `context` against the process environment, once per process.
///
/// Backed by a lazily created [`ConfigRegistry`]; use a registry directly when
/// the environment or file reader should be injected.
pub fn resolve_config(context: &str) -> Result<Arc<Config>, ConfigError> {
    static REGISTRY: OnceLock<ConfigRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ConfigRegistry::new).get_or_create(context)
}
