use crate::conf::types::EncodingConfig;
use crate::conf::{ConfigError, RuntimeConfig, load_config};
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            for line in summary(&cfg) {
                println!("✔ {line}");
            }
            Ok(())
        }
        Err(err) => {
            print_config_error(&err, plain);
            std::process::exit(1);
        }
    }
}

/// One line per resolved setting worth eyeballing before a deploy.
pub fn summary(cfg: &RuntimeConfig) -> Vec<String> {
    let encoding = match &cfg.encoding {
        EncodingConfig::PathPrefix { redirect_prefix } => {
            format!("path_prefix encoding (/{redirect_prefix}<host>/...)")
        }
        EncodingConfig::Subdomain {
            primary_label,
            separator,
            cdn_suffix,
        } => format!(
            "subdomain encoding ({primary_label}.<root>, '{separator}' for '.', suffix {cdn_suffix})"
        ),
    };

    vec![
        "Config loaded successfully".to_string(),
        format!("listening on {}", cfg.listener.addr),
        format!(
            "default upstream {} (port {}, tls {})",
            cfg.upstream.default_host, cfg.upstream.port, cfg.upstream.tls
        ),
        format!(
            "{} allowed hosts, {} allowed suffixes",
            cfg.allowlist.hosts.len(),
            cfg.allowlist.suffixes.len()
        ),
        encoding,
        format!(
            "browser gate {}",
            if cfg.browser_gate.enabled {
                "enabled"
            } else {
                "disabled"
            }
        ),
    ]
}

fn print_config_error(err: &ConfigError, plain: bool) {
    if plain {
        eprintln!("error: {err}");
    } else {
        eprintln!("{}: {err}", "error".red().bold());
    }

    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::DefaultUpstreamNotAllowed { .. } => Some(
            "The default upstream must itself be allowed.\n\
             \n\
             Example:\n\
             \n\
             allowlist {\n\
               hosts    = [\"huggingface.co\"]\n\
               suffixes = [\".hf.co\"]\n\
             }",
        ),

        ConfigError::InvalidAllowlistSuffix { .. } => Some(
            "Suffix rules match subdomains only and must start with a dot, e.g. \".hf.co\".",
        ),

        ConfigError::InvalidSubdomainEncoding { .. } => Some(
            "Example:\n\
             \n\
             encoding {\n\
               strategy      = \"subdomain\"\n\
               primary_label = \"hf\"\n\
               separator     = \"---\"\n\
               cdn_suffix    = \".hf.co\"\n\
             }",
        ),

        ConfigError::InvalidConnectTo { .. } => {
            Some("connect_to must be an IP socket address, e.g. \"10.0.0.5:443\".")
        }

        _ => None,
    }
}
