use crate::codec::UpstreamTarget;
use crate::conf::types::UpstreamConfig;
use crate::conf::ConfigError;
use http::{Uri, header};
use pingora::prelude::*;
use pingora_http::RequestHeader;
use std::net::SocketAddr;
use std::time::Duration;

/// Builds the upstream leg of a forwarded request.
///
/// Pingora owns the I/O: bodies stream in both directions without
/// buffering, and 3xx responses are handed back untouched because the
/// proxy never follows redirects itself. No retries happen here.
#[derive(Debug, Clone)]
pub struct ForwardEngine {
    port: u16,
    tls: bool,
    connect_to: Option<SocketAddr>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl ForwardEngine {
    pub fn from_config(cfg: &UpstreamConfig) -> Result<Self, ConfigError> {
        let connect_to = match &cfg.connect_to {
            Some(addr) => Some(addr.parse().map_err(|_| ConfigError::InvalidConnectTo {
                addr: addr.clone(),
            })?),
            None => None,
        };

        Ok(Self {
            port: cfg.port,
            tls: cfg.tls,
            connect_to,
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            read_timeout: cfg.read_timeout_secs.map(Duration::from_secs),
        })
    }

    /// Peer for `target`, with SNI set to the upstream host.
    pub async fn peer(&self, target: &UpstreamTarget) -> Result<Box<HttpPeer>> {
        let addr = self.resolve(&target.host).await?;

        let mut peer = HttpPeer::new(addr, self.tls, target.host.clone());
        peer.options.connection_timeout = self.connect_timeout;
        peer.options.read_timeout = self.read_timeout;

        Ok(Box::new(peer))
    }

    async fn resolve(&self, host: &str) -> Result<SocketAddr> {
        if let Some(addr) = self.connect_to {
            return Ok(addr);
        }

        let mut addrs = tokio::net::lookup_host((host, self.port))
            .await
            .map_err(|e| {
                Error::explain(
                    ErrorType::ConnectNoRoute,
                    format!("failed to resolve {host}: {e}"),
                )
                .into_up()
            })?;

        addrs.next().ok_or_else(|| {
            Error::explain(
                ErrorType::ConnectNoRoute,
                format!("no addresses found for {host}"),
            )
            .into_up()
        })
    }

    /// Point the upstream request at `target`. Method, the remaining
    /// headers and the body are the client's own.
    pub fn prepare_request(
        &self,
        upstream: &mut RequestHeader,
        target: &UpstreamTarget,
        path_and_query: &str,
    ) -> Result<()> {
        let uri: Uri = path_and_query.parse().map_err(|_| {
            Error::explain(
                ErrorType::InvalidHTTPHeader,
                format!("invalid upstream path: {path_and_query}"),
            )
        })?;

        upstream.set_uri(uri);
        upstream.insert_header(header::HOST, target.host.as_str())?;

        Ok(())
    }
}
