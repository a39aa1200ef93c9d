use indexmap::IndexMap;

use super::paths::ResolvedPaths;
use super::value::{Config, FIXED_FIELDS};
use super::ConfigError;
use crate::ContextIdentity;

/// Mutable stage of a [`Config`].
///
/// Fixed fields come from the identity and paths given to [`new`](Self::new)
/// and cannot be set again. Dynamic attributes may be overwritten freely until
/// [`finalize`](Self::finalize) freezes everything.
///
/// ## Example
///
/// ```
/// use halogen::{ConfigBuilder, ContextIdentity, ResolvedPaths};
///
/// let identity = ContextIdentity::parse("app.web")?;
/// let paths = ResolvedPaths::from_parts("/srv", &identity, "production");
///
/// let mut builder = ConfigBuilder::new(identity, paths);
/// builder.set("log_level", "INFO")?;
/// builder.set("log_level", "DEBUG")?;
/// assert!(builder.set("environment", "staging").is_err());
///
/// let config = builder.finalize();
/// assert_eq!(config.get("log_level"), Some("DEBUG"));
/// assert_eq!(config.environment(), "production");
/// # Ok::<(), halogen::ConfigError>(())
/// ```
#[derive(Debug)]
#[must_use = "builders do nothing until .finalize() is called"]
pub struct ConfigBuilder {
    identity: ContextIdentity,
    paths: ResolvedPaths,
    attributes: IndexMap<String, String>,
}

impl ConfigBuilder {
    pub fn new(identity: ContextIdentity, paths: ResolvedPaths) -> Self {
        Self {
            identity,
            paths,
            attributes: IndexMap::new(),
        }
    }

    /// Sets or overwrites a dynamic attribute.
    ///
    /// Fails with [`ConfigError::ImmutableWrite`] if `name` is a fixed field.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if FIXED_FIELDS.contains(&name.as_str()) {
            return Err(ConfigError::ImmutableWrite(name));
        }
        self.attributes.insert(name, value.into());
        Ok(())
    }

    /// Sets every entry in order; later entries win.
    pub fn extend<I, K, V>(&mut self, entries: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in entries {
            self.set(name, value)?;
        }
        Ok(())
    }

    /// Stores values read from config files as dynamic attributes.
    ///
    /// File keys live apart from the fixed fields, so a key such as `PACKAGE`
    /// is kept for [`Config::get`] and never touches [`Config::package`].
    pub(crate) fn load_file_values(&mut self, values: IndexMap<String, String>) {
        self.attributes.extend(values);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Freezes the builder into an immutable [`Config`].
    pub fn finalize(self) -> Config {
        Config {
            environment: self.paths.environment,
            data_folder: self.paths.data_folder,
            namespace_file: self.paths.namespace_file,
            package_file: self.paths.package_file,
            identity: self.identity,
            attributes: self.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::path::Path;

    fn builder(context: &str, environment: &str) -> ConfigBuilder {
        let identity = ContextIdentity::parse(context).unwrap();
        let paths = ResolvedPaths::from_parts("/r", &identity, environment);
        ConfigBuilder::new(identity, paths)
    }

    #[test]
    fn test_finalize_carries_fixed_fields() {
        let config = builder("ns.web.views", "pytest").finalize();

        assert_eq!(config.environment(), "pytest");
        assert_eq!(config.data_folder(), Path::new("/r/ns/data"));
        assert_eq!(config.namespace_file(), Path::new("/r/ns/config/ns.pytest.env"));
        assert_eq!(config.package_file(), Path::new("/r/ns/config/web.pytest.env"));
        assert_eq!(config.namespace(), "ns");
        assert_eq!(config.package(), "web");
        assert_eq!(config.prefix(), "views");
        assert!(config.is_empty());
    }

    #[test]
    fn test_fixed_fields_cannot_be_set() {
        let mut builder = builder("ns", "pytest");

        for field in FIXED_FIELDS {
            let result = builder.set(field, "x");
            assert!(matches!(result, Err(ConfigError::ImmutableWrite(name)) if name == field));
        }

        let config = builder.finalize();
        assert_eq!(config.environment(), "pytest");
        assert!(config.is_empty());
    }

    #[test]
    fn test_attributes_keep_first_set_order() {
        let mut builder = builder("ns", "production");
        builder
            .extend([("b", "1"), ("a", "2"), ("b", "3")])
            .unwrap();

        let config = builder.finalize();

        assert_eq!(config.attributes().collect::<Vec<_>>(), vec![("b", "3"), ("a", "2")]);
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_attribute_names_include_fixed_fields() {
        let mut builder = builder("ns", "pytest");
        builder.set("log_level", "DEBUG").unwrap();

        let config = builder.finalize();
        let mut names = config.attribute_names();
        names.sort_unstable();

        assert_eq!(
            names,
            vec![
                "data_folder",
                "environment",
                "log_level",
                "namespace",
                "namespace_file",
                "package",
                "package_file",
                "prefix",
            ]
        );
    }

    #[test]
    fn test_display_is_namespace_file() {
        let config = builder("ns.web", "pytest").finalize();
        assert_eq!(config.to_string(), "/r/ns/config/ns.pytest.env");
    }

    #[test]
    fn test_extract_into_struct() {
        #[derive(Debug, Deserialize)]
        struct Logging {
            log_level: String,
            log_signal_url: Option<String>,
        }

        let mut builder = builder("ns", "production");
        builder.set("log_level", "WARN").unwrap();
        builder.set("unrelated", "ignored").unwrap();

        let logging: Logging = builder.finalize().extract().unwrap();

        assert_eq!(logging.log_level, "WARN");
        assert_eq!(logging.log_signal_url, None);
    }

    #[test]
    fn test_extract_missing_field_fails() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Needs {
            database_url: String,
        }

        let result = builder("ns", "production").finalize().extract::<Needs>();

        assert!(matches!(result, Err(ConfigError::DeserializeError(_))));
    }

    #[test]
    fn test_equal_inputs_give_equal_configs() {
        let mut a = builder("ns.web", "production");
        let mut b = builder("ns.web", "production");
        a.set("k", "v").unwrap();
        b.set("k", "v").unwrap();

        assert_eq!(a.finalize(), b.finalize());
    }

    #[test]
    fn test_file_values_named_like_fixed_fields_stay_dynamic() {
        let mut builder = builder("acme.web", "production");
        let values: IndexMap<String, String> = [
            ("log_level".to_string(), "INFO".to_string()),
            ("package".to_string(), "billing-service".to_string()),
        ]
        .into_iter()
        .collect();
        builder.load_file_values(values);

        let config = builder.finalize();

        assert_eq!(config.package(), "web");
        assert_eq!(config.get("package"), Some("billing-service"));
        assert_eq!(config.get("log_level"), Some("INFO"));
        assert_eq!(
            config.attribute_names().iter().filter(|n| **n == "package").count(),
            1
        );
    }
}
