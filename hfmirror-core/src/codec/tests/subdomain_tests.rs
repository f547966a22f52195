use super::{ALLOWED_HOSTS, default_allowlist};
use crate::codec::{AddressCodec, ProxyOrigin, PublicAddress, SubdomainCodec, UpstreamTarget};
use pretty_assertions::assert_eq;
use url::Url;

fn codec() -> SubdomainCodec {
    SubdomainCodec::new("hf", "---", ".hf.co", "huggingface.co", default_allowlist())
}

fn decode_host(codec: &SubdomainCodec, authority: &str) -> UpstreamTarget {
    codec.decode(PublicAddress {
        authority,
        path: "/resolve/main/model.bin",
    })
}

#[test]
fn decode_cdn_label_restores_dots_and_suffix() {
    let target = decode_host(&codec(), "cas-bridge---xethub.example.com");

    assert_eq!(
        target,
        UpstreamTarget::new("cas-bridge.xethub.hf.co", "/resolve/main/model.bin")
    );
}

#[test]
fn decode_primary_label_targets_default_upstream() {
    let target = decode_host(&codec(), "hf.example.com");

    assert_eq!(
        target,
        UpstreamTarget::new("huggingface.co", "/resolve/main/model.bin")
    );
}

#[test]
fn decode_label_without_separator_maps_to_cdn_node() {
    let target = decode_host(&codec(), "cdn-lfs.example.com");

    assert_eq!(target.host, "cdn-lfs.hf.co");
}

#[test]
fn decode_ignores_port_in_authority() {
    let target = decode_host(&codec(), "cdn-lfs---us-1.example.com:8443");

    assert_eq!(target.host, "cdn-lfs.us-1.hf.co");
}

#[test]
fn decode_dotless_authority_falls_back_to_default() {
    let target = decode_host(&codec(), "localhost:8080");

    assert_eq!(target.host, "huggingface.co");
    assert_eq!(target.path, "/resolve/main/model.bin");
}

#[test]
fn encode_primary_origin_uses_primary_label() {
    let origin = ProxyOrigin::new("https", "cdn-lfs.example.com");

    let encoded = codec().encode("huggingface.co", "/a/b?c=d", &origin);

    assert_eq!(encoded.as_deref(), Some("https://hf.example.com/a/b?c=d"));
}

#[test]
fn encode_cdn_host_folds_dots_into_separator() {
    let origin = ProxyOrigin::new("https", "hf.example.com");

    let encoded = codec().encode("cas-bridge.xethub.hf.co", "/x", &origin);

    assert_eq!(
        encoded.as_deref(),
        Some("https://cas-bridge---xethub.example.com/x")
    );
}

#[test]
fn encode_preserves_origin_port() {
    let origin = ProxyOrigin::new("http", "hf.example.test:8080");

    let encoded = codec().encode("cdn-lfs.hf.co", "/x", &origin);

    assert_eq!(encoded.as_deref(), Some("http://cdn-lfs.example.test:8080/x"));
}

#[test]
fn encode_refuses_hosts_it_cannot_represent() {
    let origin = ProxyOrigin::new("https", "hf.example.com");
    let codec = codec();

    // Not allowed at all.
    assert_eq!(codec.encode("evil.example.com", "/x", &origin), None);
    // Contains the separator, would decode to a different host.
    assert_eq!(codec.encode("a---b.hf.co", "/x", &origin), None);
    // Origin without a root domain.
    assert_eq!(
        codec.encode("cdn-lfs.hf.co", "/x", &ProxyOrigin::new("http", "localhost")),
        None
    );
}

#[test]
fn encode_refuses_hyphen_next_to_dot() {
    // Arrange
    let codec = codec();
    let origin = ProxyOrigin::new("https", "hf.example.com");

    // Act
    let trailing = codec.encode("a-.b.hf.co", "/x", &origin);
    let leading = codec.encode("a.-b.hf.co", "/x", &origin);

    // Assert
    assert_eq!(trailing, None);
    assert_eq!(leading.as_deref(), Some("https://a----b.example.com/x"));
    assert_eq!(decode_host(&codec, "a----b.example.com").host, "a.-b.hf.co");
}

#[test]
fn encode_refuses_allowed_host_outside_cdn_suffix() {
    // Arrange
    let allowlist = std::sync::Arc::new(crate::upstream::AllowedUpstreamSet::new(
        ["huggingface.co", "my-space.hf.space"],
        [".hf.co"],
    ));
    let codec = SubdomainCodec::new("hf", "---", ".hf.co", "huggingface.co", allowlist);
    let origin = ProxyOrigin::new("https", "hf.example.com");

    // Act
    let encoded = codec.encode("my-space.hf.space", "/x", &origin);

    // Assert
    assert_eq!(encoded, None);
}

#[test]
fn allowed_hosts_round_trip() {
    let codec = codec();
    let origin = ProxyOrigin::new("https", "hf.example.com");

    for host in ALLOWED_HOSTS {
        // Arrange
        let encoded = codec
            .encode(host, "/file?y=2", &origin)
            .expect("allowed host must encode");
        let url = Url::parse(&encoded).unwrap();

        // Act
        let target = codec.decode(PublicAddress {
            authority: url.host_str().unwrap(),
            path: url.path(),
        });

        // Assert
        assert_eq!(target, UpstreamTarget::new(*host, "/file"));
    }
}
