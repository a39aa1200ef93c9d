use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use super::ConfigError;
use crate::ContextIdentity;

/// Names of the fields every [`Config`] carries besides its dynamic attributes.
pub const FIXED_FIELDS: [&str; 7] = [
    "environment",
    "data_folder",
    "namespace_file",
    "package_file",
    "namespace",
    "package",
    "prefix",
];

/// Resolved configuration for one context.
///
/// There are no mutators: a `Config` is produced once by
/// [`ConfigBuilder::finalize`](super::ConfigBuilder::finalize) and shared
/// read-only from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(super) environment: String,
    pub(super) data_folder: PathBuf,
    pub(super) namespace_file: PathBuf,
    pub(super) package_file: PathBuf,
    pub(super) identity: ContextIdentity,
    pub(super) attributes: IndexMap<String, String>,
}

impl Config {
    /// Value of `{NAMESPACE}_ENVIRONMENT` at resolution time.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    pub fn namespace_file(&self) -> &Path {
        &self.namespace_file
    }

    /// Set even when the file does not exist.
    pub fn package_file(&self) -> &Path {
        &self.package_file
    }

    pub fn namespace(&self) -> &str {
        self.identity.namespace()
    }

    pub fn package(&self) -> &str {
        self.identity.package()
    }

    pub fn prefix(&self) -> &str {
        self.identity.prefix()
    }

    pub fn identity(&self) -> &ContextIdentity {
        &self.identity
    }

    /// Looks up a dynamic attribute by its lowercased name.
    ///
    /// A file key that shares a fixed field's name (`PACKAGE`) is found here,
    /// while the typed accessor keeps the resolved value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Dynamic attributes in the order they were first set.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of dynamic attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Fixed field names followed by every other dynamic attribute name.
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = FIXED_FIELDS.to_vec();
        names.extend(
            self.attributes
                .keys()
                .map(String::as_str)
                .filter(|name| !FIXED_FIELDS.contains(name)),
        );
        names
    }

    /// Deserializes the dynamic attributes into `T`.
    ///
    /// Values stay strings, so `T` should use `String` (or `Option<String>`)
    /// fields. Unknown attributes are ignored unless `T` denies them.
    ///
    /// ## Example
    ///
    /// ```no_run
    /// use halogen::resolve_config;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Logging {
    ///     log_level: String,
    ///     log_signal_url: Option<String>,
    /// }
    ///
    /// let config = resolve_config("dynamicalsystem.halogen")?;
    /// let logging: Logging = config.extract()?;
    /// # Ok::<(), halogen::ConfigError>(())
    /// ```
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let table: toml::Table = self
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), toml::Value::String(v.clone())))
            .collect();
        toml::Value::Table(table)
            .try_into()
            .map_err(ConfigError::DeserializeError)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.namespace_file.display())
    }
}
