use std::collections::HashMap;

/// Read access to environment variables.
pub trait EnvSource: Send + Sync + std::fmt::Debug {
    /// Returns the value of `name`, or `None` if it is unset or blank.
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
///
/// Empty or whitespace-only values count as unset; other values are returned as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().and_then(non_blank)
    }
}

/// A fixed set of variables, independent of the process environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned().and_then(non_blank)
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_env_lookup() {
        let env = MapEnv::new().with_var("APP_FOLDER", "/srv");
        assert_eq!(env.var("APP_FOLDER").as_deref(), Some("/srv"));
        assert_eq!(env.var("APP_ENVIRONMENT"), None);
    }

    #[test]
    fn test_blank_values_are_unset_and_others_untouched() {
        let env: MapEnv = [("A", ""), ("B", "   "), ("C", " x ")].into_iter().collect();
        assert_eq!(env.var("A"), None);
        assert_eq!(env.var("B"), None);
        assert_eq!(env.var("C").as_deref(), Some(" x "));
    }
}
