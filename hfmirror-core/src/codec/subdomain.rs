use crate::codec::{AddressCodec, ProxyOrigin, PublicAddress, UpstreamTarget};
use crate::upstream::AllowedUpstreamSet;
use std::sync::Arc;

/// Encodes the upstream in the first DNS label of the proxy hostname.
///
/// `hf.example.com` is the primary origin, `cas-bridge---xethub.example.com`
/// is `cas-bridge.xethub.hf.co`.
///
/// The root domain is whatever follows the first `.` of the inbound
/// authority, so the proxy must be reached as `label.root`. Roots below a
/// multi-label public suffix are not distinguished from the label.
#[derive(Debug)]
pub struct SubdomainCodec {
    primary_label: String,
    separator: String,
    cdn_suffix: String,
    default_host: String,
    allowlist: Arc<AllowedUpstreamSet>,
}

impl SubdomainCodec {
    pub fn new(
        primary_label: &str,
        separator: &str,
        cdn_suffix: &str,
        default_host: &str,
        allowlist: Arc<AllowedUpstreamSet>,
    ) -> Self {
        Self {
            primary_label: primary_label.to_string(),
            separator: separator.to_string(),
            cdn_suffix: cdn_suffix.to_ascii_lowercase(),
            default_host: default_host.to_string(),
            allowlist,
        }
    }

    /// Label to publish for `host`, if the strategy can represent it.
    fn label_for(&self, host: &str) -> Option<String> {
        if host.eq_ignore_ascii_case(&self.default_host) {
            return Some(self.primary_label.clone());
        }

        let lowered = host.to_ascii_lowercase();
        let stem = lowered.strip_suffix(self.cdn_suffix.as_str())?;

        if stem.is_empty() {
            return None;
        }

        // The label must decode back to the same stem.
        let label = stem.replace('.', &self.separator);
        if label.replace(self.separator.as_str(), ".") != stem {
            return None;
        }

        Some(label)
    }
}

/// Split an authority at its first dot: `("label", "root[:port]")`.
pub(crate) fn split_label(authority: &str) -> Option<(&str, &str)> {
    let (label, root) = authority.split_once('.')?;
    if label.is_empty() || root.is_empty() {
        return None;
    }
    Some((label, root))
}

impl AddressCodec for SubdomainCodec {
    fn decode(&self, address: PublicAddress<'_>) -> UpstreamTarget {
        let default = || UpstreamTarget::new(self.default_host.as_str(), address.path);

        let Some((label, _root)) = split_label(address.authority) else {
            return default();
        };

        if label.eq_ignore_ascii_case(&self.primary_label) {
            return default();
        }

        let host = format!("{}{}", label.replace(&self.separator, "."), self.cdn_suffix);
        UpstreamTarget::new(host, address.path)
    }

    fn encode(&self, host: &str, path_and_query: &str, origin: &ProxyOrigin) -> Option<String> {
        if !self.allowlist.is_allowed(host) {
            return None;
        }

        let label = self.label_for(host)?;
        let (_, root) = split_label(origin.authority())?;

        let path_and_query = if path_and_query.starts_with('/') {
            path_and_query.to_string()
        } else {
            format!("/{path_and_query}")
        };

        Some(format!(
            "{}://{label}.{root}{path_and_query}",
            origin.scheme()
        ))
    }

    fn strategy(&self) -> &'static str {
        "subdomain"
    }
}
