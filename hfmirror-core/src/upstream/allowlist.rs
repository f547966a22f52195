use crate::conf::types::AllowlistConfig;

/// The set of upstream hosts the proxy may contact or link to.
///
/// Membership is an exact (ASCII case-insensitive) hostname match, or a
/// match against one of the suffix rules. A suffix rule such as `.hf.co`
/// covers `cdn-lfs.hf.co` but not the bare `hf.co`.
///
/// The same set gates inbound targets and outbound redirect targets.
#[derive(Debug, Clone)]
pub struct AllowedUpstreamSet {
    hosts: Vec<String>,
    suffixes: Vec<String>,
}

impl AllowedUpstreamSet {
    pub fn new<H, S>(hosts: H, suffixes: S) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            hosts: hosts
                .into_iter()
                .map(|h| h.as_ref().to_ascii_lowercase())
                .collect(),
            suffixes: suffixes
                .into_iter()
                .map(|s| s.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn from_config(cfg: &AllowlistConfig) -> Self {
        Self::new(&cfg.hosts, &cfg.suffixes)
    }

    pub fn is_allowed(&self, host: &str) -> bool {
        if host.is_empty() {
            return false;
        }

        if self.hosts.iter().any(|h| h.eq_ignore_ascii_case(host)) {
            return true;
        }

        let host = host.to_ascii_lowercase();
        self.suffixes
            .iter()
            .any(|suffix| host.len() > suffix.len() && host.ends_with(suffix.as_str()))
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn suffix_count(&self) -> usize {
        self.suffixes.len()
    }
}
