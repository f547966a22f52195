use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO / Parsing
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    //-------------------------------------------------------------------------
    // Top-level
    //-------------------------------------------------------------------------
    #[error("invalid version '{version}'")]
    InvalidVersion { version: u32 },

    #[error("invalid pid file path '{pid_file}': {reason}")]
    InvalidPidFile { pid_file: PathBuf, reason: String },

    #[error("invalid listener socket address '{addr}'")]
    InvalidListenerAddr { addr: String },

    #[error("invalid public scheme '{scheme}' (expected http or https)")]
    InvalidPublicScheme { scheme: String },

    //-------------------------------------------------------------------------
    // Upstreams
    //-------------------------------------------------------------------------
    #[error("upstream default_host must not be empty")]
    EmptyDefaultUpstream,

    #[error("default upstream '{host}' is not covered by the allowlist")]
    DefaultUpstreamNotAllowed { host: String },

    #[error("invalid allowlist suffix '{suffix}': suffix rules must start with '.'")]
    InvalidAllowlistSuffix { suffix: String },

    #[error("invalid upstream connect_to address '{addr}'")]
    InvalidConnectTo { addr: String },

    //-------------------------------------------------------------------------
    // Encoding
    //-------------------------------------------------------------------------
    #[error("invalid redirect prefix '{prefix}': {reason}")]
    InvalidRedirectPrefix { prefix: String, reason: String },

    #[error("invalid subdomain encoding: {reason}")]
    InvalidSubdomainEncoding { reason: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
