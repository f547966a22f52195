use crate::codec::{AddressCodec, build_codec};
use crate::conf::RuntimeConfig;
use crate::gate::AccessGate;
use crate::pages::StaticPages;
use crate::proxy::ForwardEngine;
use crate::redirect::RedirectRewriter;
use crate::route::Router;
use crate::upstream::AllowedUpstreamSet;
use anyhow::Result;
use std::sync::Arc;

/// Everything a request needs, built once at startup and shared read-only
/// by every worker.
#[derive(Debug)]
pub struct RuntimeState {
    pub allowlist: Arc<AllowedUpstreamSet>,
    pub codec: Arc<dyn AddressCodec>,
    pub rewriter: RedirectRewriter,
    pub gate: AccessGate,
    pub router: Router,
    pub pages: StaticPages,
    pub forward: ForwardEngine,
    /// Scheme of rewritten `Location` URLs.
    pub public_scheme: String,
}

pub fn build_runtime_state(cfg: &RuntimeConfig) -> Result<RuntimeState> {
    let allowlist = Arc::new(AllowedUpstreamSet::from_config(&cfg.allowlist));
    let codec = build_codec(&cfg.encoding, &cfg.upstream.default_host, allowlist.clone());
    let rewriter = RedirectRewriter::new(allowlist.clone(), codec.clone());

    let state = RuntimeState {
        rewriter,
        codec,
        allowlist,
        gate: AccessGate::from_config(&cfg.browser_gate),
        router: Router::new(),
        pages: StaticPages::load()?,
        forward: ForwardEngine::from_config(&cfg.upstream)?,
        public_scheme: cfg.public.scheme.clone(),
    };

    tracing::debug!(
        strategy = state.codec.strategy(),
        allowed_hosts = state.allowlist.host_count(),
        allowed_suffixes = state.allowlist.suffix_count(),
        browser_gate = state.gate.enabled(),
        "runtime state built"
    );

    Ok(state)
}
