use crate::codec::UpstreamTarget;
use crate::conf::ConfigError;
use crate::conf::types::UpstreamConfig;
use crate::proxy::ForwardEngine;
use pingora::upstreams::peer::Peer;
use pingora_http::RequestHeader;
use pretty_assertions::assert_eq;
use std::time::Duration;

fn engine(connect_to: Option<&str>) -> ForwardEngine {
    let cfg = UpstreamConfig {
        connect_to: connect_to.map(str::to_string),
        connect_timeout_secs: Some(3),
        read_timeout_secs: Some(30),
        ..UpstreamConfig::default()
    };
    ForwardEngine::from_config(&cfg).unwrap()
}

#[test]
fn rejects_unparseable_connect_to() {
    let cfg = UpstreamConfig {
        connect_to: Some("not-an-addr".to_string()),
        ..UpstreamConfig::default()
    };

    let err = ForwardEngine::from_config(&cfg).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidConnectTo { .. }));
}

#[test]
fn prepare_request_sets_uri_and_host() {
    // Arrange
    let engine = engine(None);
    let mut req = RequestHeader::build("GET", b"/redirect_to_cdn-lfs.hf.co/x?a=1", None).unwrap();
    req.insert_header("host", "mirror.example.com").unwrap();
    req.insert_header("authorization", "Bearer hf_token").unwrap();
    let target = UpstreamTarget::new("cdn-lfs.hf.co", "/x");

    // Act
    engine.prepare_request(&mut req, &target, "/x?a=1").unwrap();

    // Assert
    assert_eq!(req.uri.to_string(), "/x?a=1");
    assert_eq!(req.headers.get("host").unwrap(), "cdn-lfs.hf.co");
    assert_eq!(req.headers.get("authorization").unwrap(), "Bearer hf_token");
    assert_eq!(req.method, "GET");
}

#[tokio::test]
async fn connect_to_overrides_address_but_keeps_sni() {
    // Arrange
    let engine = engine(Some("127.0.0.1:9443"));
    let target = UpstreamTarget::new("huggingface.co", "/");

    // Act
    let peer = engine.peer(&target).await.unwrap();

    // Assert
    assert!(peer.is_tls());
    assert_eq!(peer.sni, "huggingface.co");
    assert_eq!(peer._address.to_string(), "127.0.0.1:9443");
    assert_eq!(peer.options.connection_timeout, Some(Duration::from_secs(3)));
    assert_eq!(peer.options.read_timeout, Some(Duration::from_secs(30)));
}

#[tokio::test]
async fn plain_upstream_builds_cleartext_peer() {
    // Arrange
    let cfg = UpstreamConfig {
        tls: false,
        connect_to: Some("127.0.0.1:8080".to_string()),
        ..UpstreamConfig::default()
    };
    let engine = ForwardEngine::from_config(&cfg).unwrap();

    // Act
    let peer = engine.peer(&UpstreamTarget::new("cdn-lfs.hf.co", "/")).await.unwrap();

    // Assert
    assert!(!peer.is_tls());
    assert_eq!(peer._address.to_string(), "127.0.0.1:8080");
}
