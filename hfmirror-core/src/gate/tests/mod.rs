
use http::HeaderMap;
use http::header::{ACCEPT, USER_AGENT};

pub(super) const CHROME_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub(super) const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

pub(super) fn headers(accept: Option<&str>, user_agent: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(accept) = accept {
        headers.insert(ACCEPT, accept.parse().unwrap());
    }
    if let Some(user_agent) = user_agent {
        headers.insert(USER_AGENT, user_agent.parse().unwrap());
    }
    headers
}
