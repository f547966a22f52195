mod error;
mod loader;
pub mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::{
    ENTRYPOINT_FILE, RESTRICT_BROWSER_ACCESS_ENV, apply_env_overrides, load_config, parse_config,
};
pub use types::RuntimeConfig;
pub use validation::validate_runtime_config;
