use crate::conf::types::BrowserGateConfig;
use http::HeaderMap;
use http::header::{ACCEPT, USER_AGENT};
use woothee::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    Browser,
    Tool,
}

impl ClientKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientKind::Browser => "browser",
            ClientKind::Tool => "tool",
        }
    }
}

pub struct BrowserClassifier {
    browser_tokens: Vec<String>,
    tool_tokens: Vec<String>,
    html_media_types: Vec<String>,
    crawler_parser: Option<Parser>,
}

impl std::fmt::Debug for BrowserClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserClassifier")
            .field("browser_tokens", &self.browser_tokens.len())
            .field("tool_tokens", &self.tool_tokens.len())
            .field("html_media_types", &self.html_media_types)
            .field("classify_crawlers", &self.crawler_parser.is_some())
            .finish()
    }
}

impl BrowserClassifier {
    pub fn from_config(cfg: &BrowserGateConfig) -> Self {
        Self {
            browser_tokens: cfg.browser_tokens.clone(),
            tool_tokens: cfg.tool_tokens.clone(),
            html_media_types: cfg
                .html_media_types
                .iter()
                .map(|m| m.to_ascii_lowercase())
                .collect(),
            crawler_parser: cfg.classify_crawlers.then(Parser::new),
        }
    }

    /// Browser iff the client asks for HTML, carries a browser engine token,
    /// carries no tool token and is not a known crawler. Missing or
    /// unreadable headers mean `Tool`.
    pub fn classify(&self, headers: &HeaderMap) -> ClientKind {
        let accept = header_str(headers, ACCEPT);
        let user_agent = header_str(headers, USER_AGENT);

        let (Some(accept), Some(user_agent)) = (accept, user_agent) else {
            return ClientKind::Tool;
        };

        if self.is_browser(accept, user_agent) {
            ClientKind::Browser
        } else {
            ClientKind::Tool
        }
    }

    fn is_browser(&self, accept: &str, user_agent: &str) -> bool {
        let accept = accept.to_ascii_lowercase();
        let accepts_html = self
            .html_media_types
            .iter()
            .any(|media| accept.contains(media.as_str()));
        if !accepts_html {
            return false;
        }

        let browser_engine = self
            .browser_tokens
            .iter()
            .any(|t| user_agent.contains(t.as_str()));
        if !browser_engine {
            return false;
        }

        if self.tool_tokens.iter().any(|t| user_agent.contains(t.as_str())) {
            return false;
        }

        !self.is_crawler(user_agent)
    }

    fn is_crawler(&self, user_agent: &str) -> bool {
        let Some(parser) = &self.crawler_parser else {
            return false;
        };

        parser
            .parse(user_agent)
            .is_some_and(|result| result.category == "crawler")
    }
}

fn header_str(headers: &HeaderMap, name: http::header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
