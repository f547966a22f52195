use crate::codec::{ProxyOrigin, PublicAddress, UpstreamTarget};
use crate::ctx::RequestId;
use crate::gate::ClientKind;
use crate::pages::PageKind;
use crate::proxy::TransportFailure;
use crate::redirect::RewriteOutcome;
use http::header::HOST;
use http::{HeaderMap, Method, Uri};
use pingora::prelude::Session;
use std::time::Instant;

/// Request-scoped state carried through the pingora hooks.
/// Nothing in here outlives the request.
#[derive(Debug)]
pub struct RequestCtx {
    pub request_id: RequestId,
    pub started: Instant,

    pub method: Method,
    pub path: String,
    /// Raw query string, forwarded verbatim.
    pub query: Option<String>,
    /// Inbound authority (`Host`), port included when the client sent one.
    pub authority: String,

    pub client_kind: Option<ClientKind>,

    /// Set when the request was answered by a static page.
    pub page: Option<PageKind>,

    /// Decoded upstream, set once the request is headed for forwarding.
    pub target: Option<UpstreamTarget>,

    pub redirect: Option<RewriteOutcome>,

    pub transport_failure: Option<TransportFailure>,
}

impl Default for RequestCtx {
    fn default() -> Self {
        Self::empty()
    }
}

impl RequestCtx {
    pub fn empty() -> Self {
        Self {
            request_id: RequestId::default(),
            started: Instant::now(),
            method: Method::GET,
            path: String::new(),
            query: None,
            authority: String::new(),
            client_kind: None,
            page: None,
            target: None,
            redirect: None,
            transport_failure: None,
        }
    }

    pub fn hydrate_from_session(&mut self, session: &Session) {
        let req = session.req_header();
        self.hydrate(&req.method, &req.uri, &req.headers);
    }

    /// Kept apart from `Session` so it can be exercised without a connection.
    pub(crate) fn hydrate(&mut self, method: &Method, uri: &Uri, headers: &HeaderMap) {
        self.method = method.clone();
        self.path = uri.path().to_string();
        self.query = uri.query().map(str::to_string);

        // HTTP/1 carries the authority in Host, HTTP/2 in the URI.
        self.authority = headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
            .unwrap_or_default();
    }

    pub fn public_address(&self) -> PublicAddress<'_> {
        PublicAddress {
            authority: &self.authority,
            path: &self.path,
        }
    }

    /// Hostname without the port, as shown on the static pages.
    pub fn hostname(&self) -> &str {
        strip_port(&self.authority)
    }

    pub fn origin(&self, scheme: &str) -> ProxyOrigin {
        ProxyOrigin::new(scheme, self.authority.as_str())
    }

    /// Path plus the verbatim query, as sent upstream.
    pub fn upstream_path_and_query(&self) -> Option<String> {
        let target = self.target.as_ref()?;
        Some(match &self.query {
            Some(query) => format!("{}?{query}", target.path),
            None => target.path.clone(),
        })
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}

fn strip_port(authority: &str) -> &str {
    // Bracketed IPv6 literal: keep the brackets, drop the port.
    if authority.starts_with('[') {
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        };
    }

    match authority.rsplit_once(':') {
        Some((host, port)) if port.bytes().all(|b| b.is_ascii_digit()) => host,
        _ => authority,
    }
}
