use crate::pages::PageKind;
use crate::route::{RouteDecision, Router};
use http::Method;
use pretty_assertions::assert_eq;

#[test]
fn landing_page_matches_root_and_empty_path() {
    let router = Router::new();

    assert_eq!(
        router.route(&Method::GET, "/"),
        RouteDecision::Page(PageKind::Landing)
    );
    assert_eq!(
        router.route(&Method::GET, ""),
        RouteDecision::Page(PageKind::Landing)
    );
}

#[test]
fn downloader_script_matches_exactly() {
    let router = Router::new();

    assert_eq!(
        router.route(&Method::HEAD, "/hf_downloader.py"),
        RouteDecision::Page(PageKind::DownloaderScript)
    );
    assert_eq!(
        router.route(&Method::GET, "/hf_downloader.py/"),
        RouteDecision::Forward
    );
    assert_eq!(
        router.route(&Method::GET, "/HF_DOWNLOADER.PY"),
        RouteDecision::Forward
    );
}

#[test]
fn everything_else_is_forwarded() {
    let router = Router::new();

    for path in [
        "/bert-base-uncased",
        "/api/models/bert-base-uncased",
        "/redirect_to_cdn-lfs.hf.co/repo/file",
    ] {
        assert_eq!(router.route(&Method::GET, path), RouteDecision::Forward);
    }
}

#[test]
fn non_read_methods_on_page_paths_are_forwarded() {
    let router = Router::new();

    assert_eq!(router.route(&Method::POST, "/"), RouteDecision::Forward);
    assert_eq!(
        router.route(&Method::PUT, "/hf_downloader.py"),
        RouteDecision::Forward
    );
}
