use integration_tests::harness::{ScriptedUpstream, TestServer};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use reqwest::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};

#[test]
fn landing_page_shows_request_host() {
    // Arrange
    let upstream = ScriptedUpstream::fixed("unused");
    let srv = TestServer::start(upstream.addr(), |_| {});

    // Act
    let res = srv.get("/").send().unwrap();

    // Assert
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
    let body = res.text().unwrap();
    assert!(body.contains("https://127.0.0.1/bert-base-uncased"));
    assert!(!body.contains("{{HOSTNAME}}"));
    assert!(upstream.requests().is_empty());
}

#[test]
fn downloader_script_is_an_uncached_attachment() {
    // Arrange
    let upstream = ScriptedUpstream::fixed("unused");
    let srv = TestServer::start(upstream.addr(), |_| {});

    // Act
    let res = srv.get("/hf_downloader.py").send().unwrap();

    // Assert
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"hf_downloader.py\""
    );
    assert_eq!(res.headers().get(CACHE_CONTROL).unwrap(), "no-cache");
    assert!(res.text().unwrap().contains("PROXY_DOMAIN = \"127.0.0.1\""));
}

#[test]
fn head_returns_headers_only() {
    // Arrange
    let upstream = ScriptedUpstream::fixed("unused");
    let srv = TestServer::start(upstream.addr(), |_| {});
    let full = srv.get("/hf_downloader.py").send().unwrap().bytes().unwrap();

    // Act
    let res = srv.head("/hf_downloader.py").send().unwrap();

    // Assert
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(CONTENT_LENGTH).unwrap(),
        full.len().to_string().as_str()
    );
    assert!(res.bytes().unwrap().is_empty());
}

#[test]
fn post_to_a_page_path_is_forwarded() {
    let upstream = ScriptedUpstream::fixed("upstream root");
    let srv = TestServer::start(upstream.addr(), |_| {});

    let res = srv.post("/").body("x").send().unwrap();

    assert_eq!(res.text().unwrap(), "upstream root");
    assert_eq!(upstream.last_request().method, "POST");
}
