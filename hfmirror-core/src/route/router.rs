use crate::conf::types::{DOWNLOADER_SCRIPT_PATH, LANDING_PAGE_PATH};
use crate::pages::PageKind;
use http::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Page(PageKind),
    Forward,
}

/// Exact-path dispatch between the static pages and the forwarding pipeline.
///
/// Only `GET` and `HEAD` reach the pages; every other method on those paths
/// is forwarded like any other request.
#[derive(Debug)]
pub struct Router {
    pages: Vec<(&'static str, PageKind)>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            pages: vec![
                (LANDING_PAGE_PATH, PageKind::Landing),
                (DOWNLOADER_SCRIPT_PATH, PageKind::DownloaderScript),
            ],
        }
    }

    pub fn route(&self, method: &Method, path: &str) -> RouteDecision {
        if method != Method::GET && method != Method::HEAD {
            return RouteDecision::Forward;
        }

        let path = if path.is_empty() { LANDING_PAGE_PATH } else { path };

        self.pages
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, kind)| RouteDecision::Page(*kind))
            .unwrap_or(RouteDecision::Forward)
    }
}
