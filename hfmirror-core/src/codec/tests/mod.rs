mod subdomain_tests;

use crate::conf::types::AllowlistConfig;
use crate::upstream::AllowedUpstreamSet;
use std::sync::Arc;

pub(super) fn default_allowlist() -> Arc<AllowedUpstreamSet> {
    Arc::new(AllowedUpstreamSet::from_config(&AllowlistConfig::default()))
}

/// Hosts every default deployment must round-trip.
pub(super) const ALLOWED_HOSTS: &[&str] = &[
    "huggingface.co",
    "cdn-lfs.hf.co",
    "cdn-lfs-us-1.hf.co",
    "cas-bridge.xethub.hf.co",
    "transfer.xethub.hf.co",
];
