//! Layered configuration loading
//!
//! Sources, later ones winning:
//! 1. Built-in defaults plus the plain environment variables each section reads
//! 2. `config/default.toml`, if present
//! 3. `config/{environment}.toml`, if present
//! 4. `AG__`-prefixed environment variables, e.g. `AG__RATE_LIMIT__DEFAULT_LIMIT=500`

use config::{Config, ConfigError, Environment as EnvSource, File};

use ag_shared::AppConfig;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let base = AppConfig::from_env();
    let environment = base.environment;

    Config::builder()
        .add_source(Config::try_from(&base)?)
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&environment.config_file()).required(false))
        .add_source(
            EnvSource::with_prefix("AG")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("rate_limit.free_routes")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
