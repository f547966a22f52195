use http::StatusCode;
use thiserror::Error;

/// Failures answered with an error response instead of a proxied one.
///
/// The `Display` form is the plain-text body the client receives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProxyError {
    #[error("Upstream not allowed: {0}")]
    UpstreamNotAllowed(String),

    #[error("Proxy Error: {0}")]
    UpstreamTransport(String),

    #[error("{0}")]
    BrowserAccessDenied(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::UpstreamNotAllowed(_) => StatusCode::FORBIDDEN,
            ProxyError::UpstreamTransport(_) => StatusCode::BAD_GATEWAY,
            ProxyError::BrowserAccessDenied(_) => StatusCode::FORBIDDEN,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::UpstreamNotAllowed(_) => "upstream_not_allowed",
            ProxyError::UpstreamTransport(_) => "upstream_transport",
            ProxyError::BrowserAccessDenied(_) => "browser_access_denied",
        }
    }
}
