use integration_tests::harness::{ScriptedUpstream, TestServer};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};

const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

fn gated(upstream: &ScriptedUpstream) -> TestServer {
    TestServer::start(upstream.addr(), |cfg| cfg.browser_gate.enabled = true)
}

#[test]
fn browser_is_denied_outside_allowed_paths() {
    // Arrange
    let upstream = ScriptedUpstream::fixed("model bytes");
    let srv = gated(&upstream);

    // Act
    let res = srv
        .get("/bert-base-uncased/resolve/main/model.bin")
        .header(USER_AGENT, CHROME_UA)
        .header(ACCEPT, BROWSER_ACCEPT)
        .send()
        .unwrap();

    // Assert
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        res.headers().get(CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
    let body = res.text().unwrap();
    assert!(body.contains("  - /\n"));
    assert!(body.contains("  - /hf_downloader.py\n"));
    assert!(upstream.requests().is_empty());
}

#[test]
fn browser_may_open_the_landing_page() {
    let upstream = ScriptedUpstream::fixed("unused");
    let srv = gated(&upstream);

    let res = srv
        .get("/")
        .header(USER_AGENT, CHROME_UA)
        .header(ACCEPT, BROWSER_ACCEPT)
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[test]
fn tools_are_never_gated() {
    // Arrange
    let upstream = ScriptedUpstream::fixed("model bytes");
    let srv = gated(&upstream);

    // Act
    let res = srv
        .get("/bert-base-uncased/resolve/main/model.bin")
        .header(USER_AGENT, "python-requests/2.31.0")
        .header(ACCEPT, "text/html")
        .send()
        .unwrap();

    // Assert
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().unwrap(), "model bytes");
}

#[test]
fn disabled_gate_forwards_browsers() {
    let upstream = ScriptedUpstream::fixed("model bytes");
    let srv = TestServer::start(upstream.addr(), |_| {});

    let res = srv
        .get("/bert-base-uncased")
        .header(USER_AGENT, CHROME_UA)
        .header(ACCEPT, BROWSER_ACCEPT)
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(upstream.requests().len(), 1);
}
