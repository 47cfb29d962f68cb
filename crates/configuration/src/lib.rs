use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ServerOverrides, ServerSettings, Settings, StoreBackend, StoreSettings};

/// Environment variables recognised for compatibility with existing deployments,
/// mapped to the configuration key they set.
const LEGACY_VARIABLES: [(&str, &str); 3] = [
    ("SUPABASE_URL", "store.url"),
    ("SUPABASE_SERVICE_KEY", "store.key"),
    ("PORT", "server.port"),
];

/// Loads the application configuration from `config.toml` (if present) and the
/// process environment.
pub fn load_config() -> Result<Settings, ConfigError> {
    let vars = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect();
    load_config_from("config", vars)
}

/// Loads configuration from the named file (any format `config` supports, optional)
/// and an explicit set of environment variables.
///
/// Later sources win: built-in defaults, then the file, then `APP__SECTION__KEY`
/// variables, then `SUPABASE_URL`, `SUPABASE_SERVICE_KEY` and `PORT`.
pub fn load_config_from(
    file: &str,
    vars: config::Map<String, String>,
) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("store.table", "schools")?
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .source(Some(vars.clone())),
        );

    for (variable, key) in LEGACY_VARIABLES {
        let value = vars.get(variable).filter(|v| !v.is_empty()).cloned();
        builder = builder.set_override_option(key, value)?;
    }

    let settings = builder.build()?.try_deserialize::<Settings>()?;
    tracing::debug!(store = ?settings.store, server = ?settings.server, "Configuration loaded.");

    Ok(settings)
}
