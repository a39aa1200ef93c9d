use halogen::resolve_config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), halogen::ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // e.g. DYNAMICALSYSTEM_FOLDER=~/.local/share DYNAMICALSYSTEM_ENVIRONMENT=production
    let context = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "dynamicalsystem.halogen".to_string());

    let config = resolve_config(&context)?;

    println!("Namespace file: {config}");
    println!("Package file: {}", config.package_file().display());
    println!("Environment: {}", config.environment());
    println!("Data folder: {}", config.data_folder().display());
    for (name, value) in config.attributes() {
        println!("  {name} = {value}");
    }

    Ok(())
}
