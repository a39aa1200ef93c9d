//! Layered merge of the namespace and package files.
//!
//! 1. Every key of the namespace file, lowercased.
//! 2. Keys of the package file that start with `{PREFIX}_`, with the prefix
//!    stripped and the rest lowercased. These overwrite layer 1.
//! 3. In the `pytest` environment only, fixed defaults for keys still unset.

use indexmap::IndexMap;
use tracing::{debug, info};

use super::file::KeyValueReader;
use super::paths::ResolvedPaths;
use super::ConfigError;
use crate::ContextIdentity;

/// Environment name that enables [`PYTEST_DEFAULTS`].
pub const PYTEST_ENVIRONMENT: &str = "pytest";

/// Fallbacks applied in the `pytest` environment. They never override a file value.
pub const PYTEST_DEFAULTS: [(&str, &str); 4] = [
    ("log_level", "DEBUG"),
    ("log_signal_identity", "test_identity"),
    ("log_signal_target", "test_target"),
    ("log_signal_url", "https://test.signal.url"),
];

/// Loads both layers and returns the merged attributes in first-set order.
pub fn merge_layers(
    identity: &ContextIdentity,
    paths: &ResolvedPaths,
    reader: &dyn KeyValueReader,
) -> Result<IndexMap<String, String>, ConfigError> {
    let mut attributes = IndexMap::new();

    info!("Loading namespace config from: {}", paths.namespace_file.display());
    let namespace_values = reader.read(&paths.namespace_file)?;
    debug!("Found {} variables in namespace config", namespace_values.len());
    for (key, value) in namespace_values {
        let attribute = key.to_lowercase();
        debug!("Set namespace config: {attribute}");
        attributes.insert(attribute, value);
    }

    apply_package_layer(identity, paths, reader, &mut attributes)?;

    if paths.environment == PYTEST_ENVIRONMENT {
        for (key, default_value) in PYTEST_DEFAULTS {
            if !attributes.contains_key(key) {
                debug!("Set test default: {key}");
                attributes.insert(key.to_string(), default_value.to_string());
            }
        }
    }

    Ok(attributes)
}

fn apply_package_layer(
    identity: &ContextIdentity,
    paths: &ResolvedPaths,
    reader: &dyn KeyValueReader,
    attributes: &mut IndexMap<String, String>,
) -> Result<(), ConfigError> {
    debug!("Checking for package config file: {}", paths.package_file.display());
    // The reader yields nothing for a missing file, which makes this layer a no-op.
    let package_values = reader.read(&paths.package_file)?;
    if package_values.is_empty() {
        debug!("Package config file not found or empty: {}", paths.package_file.display());
        return Ok(());
    }

    info!("Loading package config from: {}", paths.package_file.display());
    debug!("Found {} variables in package config", package_values.len());

    let key_prefix = identity.key_prefix();
    for (key, value) in package_values {
        // Keys for other modules sharing this package file are dropped.
        let Some(rest) = key.strip_prefix(&key_prefix) else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        let attribute = rest.to_lowercase();
        debug!("Set package config: {attribute} from {key}");
        attributes.insert(attribute, value);
    }

    Ok(())
}
