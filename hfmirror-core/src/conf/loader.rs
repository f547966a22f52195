use crate::conf::types::RuntimeConfig;
use crate::conf::validation::validate_runtime_config;
use crate::conf::ConfigError;
use std::fs;
use std::path::Path;

/// Name of the entrypoint file when a directory is given.
pub const ENTRYPOINT_FILE: &str = "hfmirror.hcl";

/// Environment toggle for the browser gate.
pub const RESTRICT_BROWSER_ACCESS_ENV: &str = "RESTRICT_BROWSER_ACCESS";

/// Load, apply environment overrides and validate.
///
/// `path` may be the config file itself or a directory containing `hfmirror.hcl`.
pub fn load_config(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    let mut cfg = parse_config(path)?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    validate_runtime_config(&cfg)?;
    Ok(cfg)
}

/// Parse without overrides or validation. Hard fails on IO and syntax only.
pub fn parse_config(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    let file = if path.is_dir() {
        path.join(ENTRYPOINT_FILE)
    } else {
        path.to_path_buf()
    };

    let raw = fs::read_to_string(&file).map_err(|e| ConfigError::read_file(&file, e))?;
    hcl::from_str(&raw).map_err(|e| ConfigError::parse(&file, e))
}

/// Environment variables win over the file. `lookup` is injected so tests
/// do not have to mutate the process environment.
pub fn apply_env_overrides<F>(cfg: &mut RuntimeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(RESTRICT_BROWSER_ACCESS_ENV) {
        let enabled = value.trim() == "true";
        tracing::debug!(
            env = RESTRICT_BROWSER_ACCESS_ENV,
            enabled,
            "browser gate toggled from environment"
        );
        cfg.browser_gate.enabled = enabled;
    }
}
