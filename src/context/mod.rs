//! Parsing of dotted configuration contexts.

use tracing::error;

use crate::ConfigError;

/// The namespace, package and module scope named by a context string.
///
/// A context is `namespace.package.module`. Missing trailing segments fall back
/// to the one before them, so `"app"` is `app.app.app` and `"app.web"` is
/// `app.web.web`.
///
/// ## Example
///
/// ```
/// use halogen::ContextIdentity;
///
/// let identity = ContextIdentity::parse("dynamicalsystem.halogen.config")?;
/// assert_eq!(identity.namespace(), "dynamicalsystem");
/// assert_eq!(identity.package(), "halogen");
/// assert_eq!(identity.prefix(), "config");
/// # Ok::<(), halogen::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextIdentity {
    namespace: String,
    package: String,
    prefix: String,
}

impl ContextIdentity {
    /// Splits `context` on `.` into one to three segments.
    ///
    /// Segments are kept as written; no case folding happens here.
    pub fn parse(context: &str) -> Result<Self, ConfigError> {
        if context.is_empty() {
            error!("No configuration context provided");
            return Err(ConfigError::MissingContext);
        }

        let segments: Vec<&str> = context.split('.').collect();
        let (namespace, package, prefix) = match segments.as_slice() {
            [namespace, package, prefix] => (*namespace, *package, *prefix),
            [namespace, package] => (*namespace, *package, *package),
            [namespace] => (*namespace, *namespace, *namespace),
            _ => {
                error!("Invalid context: {context}");
                return Err(ConfigError::InvalidContext(format!(
                    "'{context}' has {} segments, expected 1 to 3",
                    segments.len()
                )));
            }
        };

        Ok(Self {
            namespace: namespace.to_string(),
            package: package.to_string(),
            prefix: prefix.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// The module scope used to filter package-file keys.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Namespace as used in environment variable names (`{NAMESPACE}_FOLDER`).
    pub(crate) fn env_key(&self, suffix: &str) -> String {
        format!("{}_{suffix}", self.namespace.to_uppercase())
    }

    /// Key prefix that selects this module's entries in the package file.
    pub(crate) fn key_prefix(&self) -> String {
        format!("{}_", self.prefix.to_uppercase())
    }
}
