use crate::codec::{AddressCodec, ProxyOrigin, PublicAddress, UpstreamTarget};
use crate::upstream::AllowedUpstreamSet;
use std::sync::Arc;

/// Encodes secondary upstreams as a leading path segment:
/// `/{prefix}{host}/rest/of/path`.
#[derive(Debug)]
pub struct PathPrefixCodec {
    /// `"/" + prefix`, precomputed for matching.
    marker: String,
    prefix: String,
    default_host: String,
    allowlist: Arc<AllowedUpstreamSet>,
}

impl PathPrefixCodec {
    pub fn new(prefix: &str, default_host: &str, allowlist: Arc<AllowedUpstreamSet>) -> Self {
        Self {
            marker: format!("/{prefix}"),
            prefix: prefix.to_string(),
            default_host: default_host.to_string(),
            allowlist,
        }
    }

    /// `Some((host, rest))` only when the prefix is followed by a non-empty
    /// host token and an absolute sub-path.
    fn split_prefixed<'a>(&self, path: &'a str) -> Option<(&'a str, &'a str)> {
        let rest = path.strip_prefix(self.marker.as_str())?;
        let slash = rest.find('/')?;
        let (host, sub_path) = rest.split_at(slash);
        if host.is_empty() {
            return None;
        }
        Some((host, sub_path))
    }

    fn is_default(&self, host: &str) -> bool {
        host.eq_ignore_ascii_case(&self.default_host)
    }
}

impl AddressCodec for PathPrefixCodec {
    fn decode(&self, address: PublicAddress<'_>) -> UpstreamTarget {
        match self.split_prefixed(address.path) {
            Some((host, sub_path)) => UpstreamTarget::new(host, sub_path),
            None => UpstreamTarget::new(self.default_host.as_str(), address.path),
        }
    }

    fn encode(&self, host: &str, path_and_query: &str, origin: &ProxyOrigin) -> Option<String> {
        if !self.allowlist.is_allowed(host) || host.contains('/') {
            return None;
        }

        let path_and_query = if path_and_query.starts_with('/') {
            path_and_query.to_string()
        } else {
            format!("/{path_and_query}")
        };

        // A default-upstream path that itself starts with the marker would be
        // read back as a prefixed address, so it keeps the explicit form.
        if self.is_default(host) && !path_and_query.starts_with(self.marker.as_str()) {
            Some(format!("{origin}{path_and_query}"))
        } else {
            Some(format!("{origin}/{}{host}{path_and_query}", self.prefix))
        }
    }

    fn strategy(&self) -> &'static str {
        "path_prefix"
    }
}
