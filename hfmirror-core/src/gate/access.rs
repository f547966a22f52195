use crate::conf::types::BrowserGateConfig;
use crate::gate::classifier::{BrowserClassifier, ClientKind};
use http::{HeaderMap, StatusCode};

/// Response the gate answers with instead of serving the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug)]
pub struct AccessGate {
    enabled: bool,
    allowed_paths: Vec<String>,
    classifier: BrowserClassifier,
}

impl AccessGate {
    pub fn from_config(cfg: &BrowserGateConfig) -> Self {
        Self {
            enabled: cfg.enabled,
            allowed_paths: cfg.allowed_paths.clone(),
            classifier: BrowserClassifier::from_config(cfg),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// `None` lets the request through.
    pub fn check(&self, headers: &HeaderMap, path: &str) -> Option<Denial> {
        if !self.enabled {
            return None;
        }

        if self.path_allowed(path) {
            return None;
        }

        match self.classifier.classify(headers) {
            ClientKind::Tool => None,
            ClientKind::Browser => Some(Denial {
                status: StatusCode::FORBIDDEN,
                body: self.denial_body(),
            }),
        }
    }

    fn path_allowed(&self, path: &str) -> bool {
        // An empty path is the landing page.
        let path = if path.is_empty() { "/" } else { path };
        self.allowed_paths.iter().any(|p| p == path)
    }

    fn denial_body(&self) -> String {
        let mut body = String::from(
            "Browser access is restricted. Use an API client (curl, wget, Python, ...) to fetch model files.\n\nPages available to browsers:\n",
        );
        for path in &self.allowed_paths {
            body.push_str("  - ");
            body.push_str(path);
            body.push('\n');
        }
        body
    }
}
