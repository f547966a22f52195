use crate::ctx::RequestCtx;
use crate::gate::ClientKind;
use crate::proxy::error::ProxyError;
use crate::proxy::error_classification::{classify_pingora_error, error_body_status, failure_status};
use crate::proxy::handlers::{write_page, write_text};
use crate::redirect::RewriteOutcome;
use crate::route::RouteDecision;
use crate::server::RuntimeState;
use async_trait::async_trait;
use http::Method;
use pingora::prelude::*;
use pingora::proxy::FailToProxy;
use pingora::{ErrorSource, ErrorType};
use pingora_http::{RequestHeader, ResponseHeader};
use std::sync::Arc;

/// The mirror's `ProxyHttp` implementation.
///
/// Hook order as pingora drives it:
///
/// 1. `request_filter`: hydrate ctx, access gate, static pages, decode the
///    public address, allowlist check. Anything answered locally ends here.
/// 2. `upstream_peer`: resolve the decoded host and build the peer.
/// 3. `upstream_request_filter`: rewrite URI and `Host`.
/// 4. `upstream_response_filter`: redirect rewriting.
/// 5. `fail_to_proxy`: only on errors, answers 502 for upstream failures.
/// 6. `logging`: always last, one access-log event.
pub struct MirrorGateway {
    state: Arc<RuntimeState>,
}

impl MirrorGateway {
    pub fn new(state: Arc<RuntimeState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl ProxyHttp for MirrorGateway {
    type CTX = RequestCtx;

    fn new_ctx(&self) -> Self::CTX {
        RequestCtx::empty()
    }

    async fn request_filter(&self, session: &mut Session, ctx: &mut Self::CTX) -> Result<bool> {
        ctx.hydrate_from_session(session);
        let state = &self.state;

        if let Some(denial) = state.gate.check(&session.req_header().headers, &ctx.path) {
            ctx.client_kind = Some(ClientKind::Browser);
            let err = ProxyError::BrowserAccessDenied(denial.body);
            tracing::info!(
                request_id = %ctx.request_id,
                path = %ctx.path,
                kind = err.kind(),
                "browser request denied"
            );
            write_text(session, denial.status, err.to_string()).await?;
            return Ok(true);
        }

        if let RouteDecision::Page(kind) = state.router.route(&ctx.method, &ctx.path) {
            ctx.page = Some(kind);
            let page = state.pages.render(kind, ctx.hostname());
            write_page(session, page, ctx.method == Method::HEAD).await?;
            return Ok(true);
        }

        let target = state.codec.decode(ctx.public_address());
        if !state.allowlist.is_allowed(&target.host) {
            let err = ProxyError::UpstreamNotAllowed(target.host.clone());
            tracing::info!(
                request_id = %ctx.request_id,
                host = %target.host,
                kind = err.kind(),
                "upstream rejected"
            );
            ctx.target = Some(target);
            write_text(session, err.status(), err.to_string()).await?;
            return Ok(true);
        }

        ctx.target = Some(target);
        Ok(false)
    }

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        ctx: &mut Self::CTX,
    ) -> Result<Box<HttpPeer>> {
        let target = ctx
            .target
            .as_ref()
            .ok_or_else(|| Error::explain(ErrorType::InternalError, "no upstream target"))?;

        self.state.forward.peer(target).await
    }

    async fn upstream_request_filter(
        &self,
        _session: &mut Session,
        upstream: &mut RequestHeader,
        ctx: &mut Self::CTX,
    ) -> Result<()> {
        let (Some(target), Some(path_and_query)) =
            (ctx.target.as_ref(), ctx.upstream_path_and_query())
        else {
            return Err(Error::explain(
                ErrorType::InternalError,
                "no upstream target",
            ));
        };

        self.state
            .forward
            .prepare_request(upstream, target, &path_and_query)
    }

    fn upstream_response_filter(
        &self,
        _session: &mut Session,
        upstream: &mut ResponseHeader,
        ctx: &mut Self::CTX,
    ) -> Result<()> {
        let origin = ctx.origin(&self.state.public_scheme);
        let outcome = self.state.rewriter.apply(upstream, &origin)?;

        match &outcome {
            RewriteOutcome::NotRedirect | RewriteOutcome::Rewritten { .. } => {}
            passed => tracing::debug!(
                request_id = %ctx.request_id,
                outcome = passed.as_str(),
                "redirect passed through"
            ),
        }

        ctx.redirect = Some(outcome);
        Ok(())
    }

    async fn fail_to_proxy(
        &self,
        session: &mut Session,
        e: &Error,
        ctx: &mut Self::CTX,
    ) -> FailToProxy {
        ctx.transport_failure = classify_pingora_error(e);

        let code = failure_status(e);
        let header_sent = session.response_written().is_some();

        if header_sent && code > 0 {
            tracing::debug!(
                request_id = %ctx.request_id,
                error = %e,
                "response already started, closing without error body"
            );
        }

        if let Some(code) = error_body_status(e, header_sent) {
            let written = if e.esource() == &ErrorSource::Upstream {
                let err = ProxyError::UpstreamTransport(e.to_string());
                tracing::warn!(
                    request_id = %ctx.request_id,
                    failure = ctx.transport_failure.map(|f| f.as_str()).unwrap_or("unknown"),
                    error = %e,
                    "upstream transport failure"
                );
                write_text(session, err.status(), err.to_string()).await
            } else {
                session.respond_error(code).await
            };

            if let Err(err) = written {
                tracing::debug!(request_id = %ctx.request_id, error = %err, "failed to write error response");
            }
        }

        FailToProxy {
            error_code: code,
            can_reuse_downstream: false,
        }
    }

    async fn logging(&self, session: &mut Session, e: Option<&Error>, ctx: &mut Self::CTX)
    where
        Self::CTX: Send + Sync,
    {
        if ctx.transport_failure.is_none() {
            ctx.transport_failure = e.and_then(classify_pingora_error);
        }

        let status = session
            .response_written()
            .map(|r| r.status.as_u16())
            .unwrap_or(0);

        tracing::info!(
            request_id = %ctx.request_id,
            method = %ctx.method,
            path = %ctx.path,
            upstream = ctx.target.as_ref().map(|t| t.host.as_str()).unwrap_or("-"),
            page = ctx.page.map(|p| p.as_str()).unwrap_or("-"),
            client = ctx.client_kind.map(|k| k.as_str()).unwrap_or("-"),
            status,
            redirect = ctx.redirect.as_ref().map(|r| r.as_str()).unwrap_or("-"),
            transport_failure = ctx.transport_failure.map(|f| f.as_str()).unwrap_or("-"),
            elapsed_ms = ctx.elapsed_ms() as u64,
            "request completed"
        );
    }
}
