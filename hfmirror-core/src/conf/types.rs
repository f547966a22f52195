use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Represents the whole configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RuntimeConfig {
    pub server: ServerConfig,
    pub listener: ListenerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub allowlist: AllowlistConfig,

    #[serde(default)]
    pub encoding: EncodingConfig,

    #[serde(default)]
    pub public: PublicConfig,

    #[serde(default)]
    pub browser_gate: BrowserGateConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub version: u32,

    /// Optional number of worker threads - default is decided by Pingora.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    /// Optional pid file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid_file: Option<PathBuf>,

    /// Optional CA file path. If set, Pingora will use this file to verify upstream certificates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenerConfig {
    /// e.g. "0.0.0.0:8080"
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            threads: None,
            pid_file: None,
            ca_file: None,
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// The primary origin. Requests without an encoded upstream go here.
    #[serde(default = "default_upstream_host")]
    pub default_host: String,

    #[serde(default = "default_upstream_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub tls: bool,

    /// Socket address used for every upstream connection instead of DNS.
    /// `Host` and SNI still carry the real upstream host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            default_host: default_upstream_host(),
            port: default_upstream_port(),
            tls: true,
            connect_to: None,
            connect_timeout_secs: None,
            read_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AllowlistConfig {
    /// Exact hostnames.
    #[serde(default = "default_allowed_hosts")]
    pub hosts: Vec<String>,

    /// Suffix rules, each starting with a dot (".hf.co").
    #[serde(default = "default_allowed_suffixes")]
    pub suffixes: Vec<String>,
}

impl Default for AllowlistConfig {
    fn default() -> Self {
        Self {
            hosts: default_allowed_hosts(),
            suffixes: default_allowed_suffixes(),
        }
    }
}

/// How upstream addresses are folded into public addresses.
/// Exactly one strategy is active per deployment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum EncodingConfig {
    PathPrefix {
        #[serde(default = "default_redirect_prefix")]
        redirect_prefix: String,
    },
    Subdomain {
        #[serde(default = "default_primary_label")]
        primary_label: String,

        #[serde(default = "default_separator")]
        separator: String,

        #[serde(default = "default_cdn_suffix")]
        cdn_suffix: String,
    },
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self::PathPrefix {
            redirect_prefix: default_redirect_prefix(),
        }
    }
}

impl EncodingConfig {
    pub fn strategy_name(&self) -> &'static str {
        match self {
            Self::PathPrefix { .. } => "path_prefix",
            Self::Subdomain { .. } => "subdomain",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublicConfig {
    /// Scheme clients use to reach the proxy. TLS terminates at the edge,
    /// so this cannot be observed from the inbound connection.
    #[serde(default = "default_public_scheme")]
    pub scheme: String,
}

impl Default for PublicConfig {
    fn default() -> Self {
        Self {
            scheme: default_public_scheme(),
        }
    }
}

/// Heuristic browser detection. This is NOT a security boundary: any client
/// can send a tool user agent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowserGateConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_browser_paths")]
    pub allowed_paths: Vec<String>,

    #[serde(default = "default_browser_tokens")]
    pub browser_tokens: Vec<String>,

    #[serde(default = "default_tool_tokens")]
    pub tool_tokens: Vec<String>,

    #[serde(default = "default_html_media_types")]
    pub html_media_types: Vec<String>,

    /// Treat user agents that woothee recognises as crawlers as tools.
    #[serde(default = "default_true")]
    pub classify_crawlers: bool,
}

impl Default for BrowserGateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_paths: default_browser_paths(),
            browser_tokens: default_browser_tokens(),
            tool_tokens: default_tool_tokens(),
            html_media_types: default_html_media_types(),
            classify_crawlers: true,
        }
    }
}

//-----------------------------------------------------------------------------
// Defaults
//-----------------------------------------------------------------------------

pub const DEFAULT_UPSTREAM_HOST: &str = "huggingface.co";
pub const LANDING_PAGE_PATH: &str = "/";
pub const DOWNLOADER_SCRIPT_PATH: &str = "/hf_downloader.py";

fn default_true() -> bool {
    true
}

fn default_upstream_host() -> String {
    DEFAULT_UPSTREAM_HOST.to_string()
}

fn default_upstream_port() -> u16 {
    443
}

fn default_allowed_hosts() -> Vec<String> {
    vec![DEFAULT_UPSTREAM_HOST.to_string()]
}

fn default_allowed_suffixes() -> Vec<String> {
    vec![".hf.co".to_string()]
}

fn default_redirect_prefix() -> String {
    "redirect_to_".to_string()
}

fn default_primary_label() -> String {
    "hf".to_string()
}

fn default_separator() -> String {
    "---".to_string()
}

fn default_cdn_suffix() -> String {
    ".hf.co".to_string()
}

fn default_public_scheme() -> String {
    "https".to_string()
}

fn default_browser_paths() -> Vec<String> {
    vec![
        LANDING_PAGE_PATH.to_string(),
        DOWNLOADER_SCRIPT_PATH.to_string(),
    ]
}

fn default_html_media_types() -> Vec<String> {
    vec!["text/html".to_string()]
}

fn default_browser_tokens() -> Vec<String> {
    [
        "Mozilla/",
        "Chrome/",
        "Safari/",
        "Firefox/",
        "Edge/",
        "Opera/",
        "MSIE",
        "Trident/",
        "SamsungBrowser/",
        "UCBrowser/",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_tool_tokens() -> Vec<String> {
    [
        // Command line tools
        "curl/",
        "wget/",
        "Wget/",
        "HTTPie/",
        "aria2/",
        // Language HTTP libraries
        "Python-requests",
        "python-requests",
        "requests/",
        "python-httpx/",
        "aiohttp/",
        "huggingface_hub/",
        "go-http-client",
        "Go-http-client",
        "Java/",
        "okhttp",
        "axios/",
        "node-fetch",
        "undici",
        "deno/",
        "libwww-perl",
        "lwp-trivial",
        "reqwest/",
        "http.rb/",
        "Ruby/",
        "PHP/",
        "Swift/",
        "Darwin/",
        "dart:io",
        // Git and API clients
        "Git/",
        "git/",
        "GitHub-Hookshot",
        "PostmanRuntime/",
        "insomnia/",
        "Paw/",
        "REST Client",
        // Edge runtimes
        "CF-Workers",
        "Cloudflare-Workers",
        "Worker/",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
