use crate::conf::types::{EncodingConfig, RuntimeConfig};
use crate::conf::ConfigError;
use crate::upstream::AllowedUpstreamSet;
use std::net::SocketAddr;

const SUPPORTED_VERSION: u32 = 1;

/// Semantic validation. The first violation wins.
pub fn validate_runtime_config(cfg: &RuntimeConfig) -> Result<(), ConfigError> {
    //-------------------------------------------------------------------------
    // Server / listener
    //-------------------------------------------------------------------------
    if cfg.server.version != SUPPORTED_VERSION {
        return Err(ConfigError::InvalidVersion {
            version: cfg.server.version,
        });
    }

    if let Some(pid_file) = &cfg.server.pid_file {
        if pid_file.as_os_str().is_empty() || pid_file.is_dir() {
            return Err(ConfigError::InvalidPidFile {
                pid_file: pid_file.clone(),
                reason: "must be a file path".to_string(),
            });
        }
    }

    if cfg.listener.addr.parse::<SocketAddr>().is_err() {
        return Err(ConfigError::InvalidListenerAddr {
            addr: cfg.listener.addr.clone(),
        });
    }

    if !matches!(cfg.public.scheme.as_str(), "http" | "https") {
        return Err(ConfigError::InvalidPublicScheme {
            scheme: cfg.public.scheme.clone(),
        });
    }

    //-------------------------------------------------------------------------
    // Upstreams
    //-------------------------------------------------------------------------
    for suffix in &cfg.allowlist.suffixes {
        if !suffix.starts_with('.') || suffix.len() < 2 {
            return Err(ConfigError::InvalidAllowlistSuffix {
                suffix: suffix.clone(),
            });
        }
    }

    let default_host = cfg.upstream.default_host.trim();
    if default_host.is_empty() {
        return Err(ConfigError::EmptyDefaultUpstream);
    }

    let allowlist = AllowedUpstreamSet::from_config(&cfg.allowlist);
    if !allowlist.is_allowed(default_host) {
        return Err(ConfigError::DefaultUpstreamNotAllowed {
            host: default_host.to_string(),
        });
    }

    if let Some(addr) = &cfg.upstream.connect_to {
        if addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidConnectTo { addr: addr.clone() });
        }
    }

    //-------------------------------------------------------------------------
    // Encoding
    //-------------------------------------------------------------------------
    match &cfg.encoding {
        EncodingConfig::PathPrefix { redirect_prefix } => {
            if redirect_prefix.is_empty() {
                return Err(ConfigError::InvalidRedirectPrefix {
                    prefix: redirect_prefix.clone(),
                    reason: "must not be empty".to_string(),
                });
            }
            if redirect_prefix.contains('/') {
                return Err(ConfigError::InvalidRedirectPrefix {
                    prefix: redirect_prefix.clone(),
                    reason: "must not contain '/'".to_string(),
                });
            }
        }

        EncodingConfig::Subdomain {
            primary_label,
            separator,
            cdn_suffix,
        } => {
            if primary_label.is_empty() || primary_label.contains('.') {
                return Err(ConfigError::InvalidSubdomainEncoding {
                    reason: format!("primary_label '{primary_label}' must be a single DNS label"),
                });
            }
            if separator.is_empty() || separator.contains('.') {
                return Err(ConfigError::InvalidSubdomainEncoding {
                    reason: format!("separator '{separator}' must be non-empty and dot-free"),
                });
            }
            if primary_label.contains(separator.as_str()) {
                return Err(ConfigError::InvalidSubdomainEncoding {
                    reason: format!(
                        "primary_label '{primary_label}' must not contain the separator '{separator}'"
                    ),
                });
            }
            if !cdn_suffix.starts_with('.') || cdn_suffix.len() < 2 {
                return Err(ConfigError::InvalidSubdomainEncoding {
                    reason: format!("cdn_suffix '{cdn_suffix}' must start with '.'"),
                });
            }
            // Every host the codec can produce must pass the allowlist.
            let probe = format!("node{cdn_suffix}");
            if !allowlist.is_allowed(&probe) {
                return Err(ConfigError::InvalidSubdomainEncoding {
                    reason: format!("cdn_suffix '{cdn_suffix}' is not covered by the allowlist"),
                });
            }
        }
    }

    Ok(())
}
