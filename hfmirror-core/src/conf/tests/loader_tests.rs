use crate::conf::types::EncodingConfig;
use crate::conf::{
    ConfigError, ENTRYPOINT_FILE, RESTRICT_BROWSER_ACCESS_ENV, apply_env_overrides, load_config,
    parse_config,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

const MINIMAL: &str = r#"
server {
  version = 1
}

listener {
  addr = "127.0.0.1:8080"
}
"#;

fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(ENTRYPOINT_FILE);
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn minimal_file_gets_defaults() {
    // Arrange
    let (_dir, path) = write_config(MINIMAL);

    // Act
    let cfg = parse_config(&path).unwrap();

    // Assert
    assert_eq!(cfg.upstream.default_host, "huggingface.co");
    assert_eq!(cfg.upstream.port, 443);
    assert!(cfg.upstream.tls);
    assert_eq!(cfg.allowlist.hosts, vec!["huggingface.co".to_string()]);
    assert_eq!(cfg.allowlist.suffixes, vec![".hf.co".to_string()]);
    assert_eq!(cfg.encoding.strategy_name(), "path_prefix");
    assert_eq!(cfg.public.scheme, "https");
    assert!(!cfg.browser_gate.enabled);
    assert_eq!(
        cfg.browser_gate.allowed_paths,
        vec!["/".to_string(), "/hf_downloader.py".to_string()]
    );
}

#[test]
fn directory_resolves_entrypoint() {
    let (dir, _path) = write_config(MINIMAL);

    let cfg = parse_config(dir.path()).unwrap();

    assert_eq!(cfg.listener.addr, "127.0.0.1:8080");
}

#[test]
fn subdomain_encoding_is_parsed() {
    // Arrange
    let (_dir, path) = write_config(&format!(
        r#"{MINIMAL}
encoding {{
  strategy      = "subdomain"
  primary_label = "mirror"
  separator     = "--"
  cdn_suffix    = ".hf.co"
}}
"#
    ));

    // Act
    let cfg = parse_config(&path).unwrap();

    // Assert
    match cfg.encoding {
        EncodingConfig::Subdomain {
            primary_label,
            separator,
            cdn_suffix,
        } => {
            assert_eq!(primary_label, "mirror");
            assert_eq!(separator, "--");
            assert_eq!(cdn_suffix, ".hf.co");
        }
        other => panic!("unexpected encoding {other:?}"),
    }
}

#[test]
fn upstream_block_overrides_defaults() {
    // Arrange
    let (_dir, path) = write_config(&format!(
        r#"{MINIMAL}
upstream {{
  tls                  = false
  port                 = 80
  connect_to           = "127.0.0.1:9000"
  connect_timeout_secs = 5
}}
"#
    ));

    // Act
    let cfg = parse_config(&path).unwrap();

    // Assert
    assert!(!cfg.upstream.tls);
    assert_eq!(cfg.upstream.port, 80);
    assert_eq!(cfg.upstream.connect_to.as_deref(), Some("127.0.0.1:9000"));
    assert_eq!(cfg.upstream.connect_timeout_secs, Some(5));
    assert_eq!(cfg.upstream.read_timeout_secs, None);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();

    let err = parse_config(&dir.path().join("nope.hcl")).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn syntax_error_is_a_parse_error() {
    let (_dir, path) = write_config("server { version = ");

    let err = parse_config(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn load_config_validates() {
    let (_dir, path) = write_config(
        r#"
server {
  version = 2
}

listener {
  addr = "127.0.0.1:8080"
}
"#,
    );

    let err = load_config(&path).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidVersion { version: 2 }));
}

#[test]
fn env_override_enables_gate() {
    // Arrange
    let (_dir, path) = write_config(MINIMAL);
    let mut cfg = parse_config(&path).unwrap();

    // Act
    apply_env_overrides(&mut cfg, |key| {
        (key == RESTRICT_BROWSER_ACCESS_ENV).then(|| "true".to_string())
    });

    // Assert
    assert!(cfg.browser_gate.enabled);
}

#[test]
fn env_override_disables_gate_for_other_values() {
    // Arrange
    let (_dir, path) = write_config(&format!(
        r#"{MINIMAL}
browser_gate {{
  enabled = true
}}
"#
    ));
    let mut cfg = parse_config(&path).unwrap();
    assert!(cfg.browser_gate.enabled);

    // Act
    apply_env_overrides(&mut cfg, |_| Some("1".to_string()));

    // Assert
    assert!(!cfg.browser_gate.enabled);
}

#[test]
fn unset_env_leaves_file_value() {
    let (_dir, path) = write_config(MINIMAL);
    let mut cfg = parse_config(&path).unwrap();

    apply_env_overrides(&mut cfg, |_| None);

    assert!(!cfg.browser_gate.enabled);
}
