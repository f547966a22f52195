use crate::codec::{AddressCodec, ProxyOrigin};
use crate::upstream::AllowedUpstreamSet;
use http::header;
use pingora_http::ResponseHeader;
use std::fmt;
use std::sync::Arc;
use url::Url;

const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

pub fn is_redirect_status(status: u16) -> bool {
    REDIRECT_STATUSES.contains(&status)
}

/// What happened to an upstream response's `Location`.
///
/// Only `Rewritten` changes the response. Everything else is a pass-through,
/// recorded for the access log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    NotRedirect,
    MissingLocation,
    /// Not an absolute URL (or not UTF-8).
    Unparseable,
    HostNotAllowed(String),
    /// Allowed, but the active codec has no public form for it.
    Unencodable(String),
    Rewritten { location: String },
}

impl RewriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotRedirect => "not_redirect",
            Self::MissingLocation => "missing_location",
            Self::Unparseable => "unparseable",
            Self::HostNotAllowed(_) => "host_not_allowed",
            Self::Unencodable(_) => "unencodable",
            Self::Rewritten { .. } => "rewritten",
        }
    }
}

impl fmt::Display for RewriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points upstream redirects back at the proxy so the client's next hop
/// re-enters it.
#[derive(Debug, Clone)]
pub struct RedirectRewriter {
    allowlist: Arc<AllowedUpstreamSet>,
    codec: Arc<dyn AddressCodec>,
}

impl RedirectRewriter {
    pub fn new(allowlist: Arc<AllowedUpstreamSet>, codec: Arc<dyn AddressCodec>) -> Self {
        Self { allowlist, codec }
    }

    /// Decide the public form of a single `Location` value.
    pub fn rewrite_location(&self, location: &str, origin: &ProxyOrigin) -> RewriteOutcome {
        let Ok(url) = Url::parse(location) else {
            return RewriteOutcome::Unparseable;
        };

        let Some(host) = url.host_str() else {
            return RewriteOutcome::Unparseable;
        };

        if !self.allowlist.is_allowed(host) {
            return RewriteOutcome::HostNotAllowed(host.to_string());
        }

        let path_and_query = match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        };

        match self.codec.encode(host, &path_and_query, origin) {
            Some(location) => RewriteOutcome::Rewritten { location },
            None => RewriteOutcome::Unencodable(host.to_string()),
        }
    }

    /// Rewrite `Location` in place on a 3xx response. Status, other headers
    /// and the body are never touched.
    pub fn apply(
        &self,
        response: &mut ResponseHeader,
        origin: &ProxyOrigin,
    ) -> pingora::Result<RewriteOutcome> {
        if !is_redirect_status(response.status.as_u16()) {
            return Ok(RewriteOutcome::NotRedirect);
        }

        let Some(value) = response.headers.get(header::LOCATION) else {
            return Ok(RewriteOutcome::MissingLocation);
        };

        let Ok(location) = value.to_str() else {
            return Ok(RewriteOutcome::Unparseable);
        };

        let outcome = self.rewrite_location(location, origin);
        if let RewriteOutcome::Rewritten { location } = &outcome {
            response.insert_header(header::LOCATION, location.as_str())?;
        }

        Ok(outcome)
    }
}
