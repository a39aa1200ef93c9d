use std::path::{Path, PathBuf};

use tracing::{error, info};

use super::env::EnvSource;
use super::ConfigError;
use crate::ContextIdentity;

/// File locations for one context in one environment.
///
/// ```text
/// {root}/{namespace}/config/{namespace}.{environment}.env
/// {root}/{namespace}/config/{package}.{environment}.env
/// {root}/{namespace}/data
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub root_folder: PathBuf,
    pub environment: String,
    pub namespace_file: PathBuf,
    pub package_file: PathBuf,
    pub data_folder: PathBuf,
}

impl ResolvedPaths {
    /// Reads `{NAMESPACE}_FOLDER` and `{NAMESPACE}_ENVIRONMENT` and derives the paths.
    ///
    /// The root folder is checked first, so a missing folder is reported even
    /// when the environment is missing too. No file is touched.
    pub fn resolve(identity: &ContextIdentity, env: &dyn EnvSource) -> Result<Self, ConfigError> {
        let folder_var = identity.env_key("FOLDER");
        let Some(root_folder) = env.var(&folder_var) else {
            error!("{folder_var} not set");
            return Err(ConfigError::MissingRootFolder(folder_var));
        };
        info!("Root folder: {root_folder}");

        let environment_var = identity.env_key("ENVIRONMENT");
        let Some(environment) = env.var(&environment_var) else {
            error!("{environment_var} not set");
            return Err(ConfigError::MissingEnvironment(environment_var));
        };
        info!("Environment: {environment}");

        Ok(Self::from_parts(root_folder, identity, environment))
    }

    /// Derives the paths without consulting the environment.
    pub fn from_parts(
        root_folder: impl AsRef<Path>,
        identity: &ContextIdentity,
        environment: impl Into<String>,
    ) -> Self {
        let environment = environment.into();
        let root_folder = root_folder.as_ref().to_path_buf();
        let namespace_dir = root_folder.join(identity.namespace());
        let config_dir = namespace_dir.join("config");

        Self {
            namespace_file: config_dir.join(format!("{}.{environment}.env", identity.namespace())),
            package_file: config_dir.join(format!("{}.{environment}.env", identity.package())),
            data_folder: namespace_dir.join("data"),
            root_folder,
            environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapEnv;

    fn identity(context: &str) -> ContextIdentity {
        ContextIdentity::parse(context).unwrap()
    }

    #[test]
    fn test_namespace_file_path() {
        let env = MapEnv::new()
            .with_var("NS_FOLDER", "/r")
            .with_var("NS_ENVIRONMENT", "pytest");

        let paths = ResolvedPaths::resolve(&identity("ns"), &env).unwrap();

        assert_eq!(paths.namespace_file, PathBuf::from("/r/ns/config/ns.pytest.env"));
        assert_eq!(paths.package_file, PathBuf::from("/r/ns/config/ns.pytest.env"));
        assert_eq!(paths.data_folder, PathBuf::from("/r/ns/data"));
        assert_eq!(paths.environment, "pytest");
    }

    #[test]
    fn test_package_file_uses_package_segment() {
        let paths = ResolvedPaths::from_parts("/r", &identity("ns.web.views"), "production");

        assert_eq!(paths.namespace_file, PathBuf::from("/r/ns/config/ns.production.env"));
        assert_eq!(paths.package_file, PathBuf::from("/r/ns/config/web.production.env"));
    }

    #[test]
    fn test_missing_root_folder() {
        let env = MapEnv::new().with_var("NS_ENVIRONMENT", "pytest");

        let result = ResolvedPaths::resolve(&identity("ns"), &env);

        assert!(matches!(result, Err(ConfigError::MissingRootFolder(var)) if var == "NS_FOLDER"));
    }

    #[test]
    fn test_missing_environment() {
        let env = MapEnv::new().with_var("NS_FOLDER", "/r");

        let result = ResolvedPaths::resolve(&identity("ns"), &env);

        assert!(
            matches!(result, Err(ConfigError::MissingEnvironment(var)) if var == "NS_ENVIRONMENT")
        );
    }

    #[test]
    fn test_namespace_is_uppercased_for_lookup() {
        let env = MapEnv::new()
            .with_var("MIXED_FOLDER", "/r")
            .with_var("MIXED_ENVIRONMENT", "dev");

        let paths = ResolvedPaths::resolve(&identity("Mixed.pkg"), &env).unwrap();

        assert_eq!(paths.namespace_file, PathBuf::from("/r/Mixed/config/Mixed.dev.env"));
    }
}
