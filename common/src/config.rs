use serde::de::DeserializeOwned;

/// The prefix for environment variable overrides, `MURMUR_LOG_LEVEL` sets
/// `log_level` and so on. Nested keys use `__` as the separator.
const ENV_PREFIX: &str = "MURMUR";

/// Loads a config struct from an optional config file merged with
/// environment variable overrides.
///
/// A missing config file is not an error, the struct's serde defaults fill
/// in everything that is not provided.
pub fn parse<C: DeserializeOwned>(config_file: &str) -> Result<C, ::config::ConfigError> {
    ::config::Config::builder()
        .add_source(::config::File::with_name(config_file).required(false))
        .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()
}
