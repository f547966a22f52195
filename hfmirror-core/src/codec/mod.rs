//! Address translation between public proxy addresses and upstream targets.
//!
//! Two strategies exist and exactly one is active per deployment:
//!
//! - [`PathPrefixCodec`]: `{origin}/redirect_to_{host}{path}` for secondary
//!   upstreams, `{origin}{path}` for the default upstream.
//! - [`SubdomainCodec`]: `{label}.{root}{path}`, where `label` is either the
//!   primary label or a CDN hostname with its dots replaced by a token and
//!   its suffix stripped.
//!
//! For every allowed host `h`, decoding the address produced by encoding `h`
//! yields `h` again.

mod path_prefix;
mod subdomain;

#[cfg(test)]
mod tests;

use crate::conf::types::EncodingConfig;
use crate::upstream::AllowedUpstreamSet;
use std::fmt;
use std::sync::Arc;

pub use path_prefix::PathPrefixCodec;
pub use subdomain::SubdomainCodec;

/// Where a request is actually going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    pub host: String,
    /// Absolute path on the upstream, without the query string.
    pub path: String,
}

impl UpstreamTarget {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
        }
    }
}

/// The inbound address as the client sent it.
#[derive(Debug, Clone, Copy)]
pub struct PublicAddress<'a> {
    /// `Host` authority, possibly with a port.
    pub authority: &'a str,
    pub path: &'a str,
}

/// Scheme and authority under which clients reach the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyOrigin {
    scheme: String,
    authority: String,
}

impl ProxyOrigin {
    pub fn new(scheme: impl Into<String>, authority: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            authority: authority.into(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }
}

impl fmt::Display for ProxyOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)
    }
}

pub trait AddressCodec: Send + Sync + fmt::Debug {
    /// Map a public address to the upstream it stands for. Never fails:
    /// shapes the codec does not recognise resolve to the default upstream
    /// with the path untouched.
    fn decode(&self, address: PublicAddress<'_>) -> UpstreamTarget;

    /// Build the absolute public URL that re-enters the proxy and decodes to
    /// `host` with `path_and_query`.
    ///
    /// Returns `None` when `host` is not allowed or the strategy cannot
    /// represent it; callers must then leave the original address alone.
    fn encode(&self, host: &str, path_and_query: &str, origin: &ProxyOrigin) -> Option<String>;

    fn strategy(&self) -> &'static str;
}

pub fn build_codec(
    cfg: &EncodingConfig,
    default_host: &str,
    allowlist: Arc<AllowedUpstreamSet>,
) -> Arc<dyn AddressCodec> {
    match cfg {
        EncodingConfig::PathPrefix { redirect_prefix } => Arc::new(PathPrefixCodec::new(
            redirect_prefix,
            default_host,
            allowlist,
        )),
        EncodingConfig::Subdomain {
            primary_label,
            separator,
            cdn_suffix,
        } => Arc::new(SubdomainCodec::new(
            primary_label,
            separator,
            cdn_suffix,
            default_host,
            allowlist,
        )),
    }
}
