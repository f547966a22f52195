use crate::harness::{CapturedEvent, init_test_tracing};
use hfmirror_core::conf::{RuntimeConfig, validate_runtime_config};
use hfmirror_core::server::{build_pingora_server, build_runtime_state};
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::redirect::Policy;
use std::net::{SocketAddr, TcpStream};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

/// Handle to a running hfmirror test server.
pub struct TestServer {
    base_url: String,
    port: u16,
    client: Client,
}

impl TestServer {
    /// Start a server whose every upstream connection goes to `upstream`.
    ///
    /// The config starts from the defaults with plain HTTP upstreams and an
    /// `http` public scheme; `configure` may adjust it further.
    pub fn start<F>(upstream: SocketAddr, configure: F) -> Self
    where
        F: FnOnce(&mut RuntimeConfig),
    {
        init_test_tracing(events());

        let port = free_port();

        let mut cfg = RuntimeConfig::default();
        cfg.listener.addr = format!("127.0.0.1:{port}");
        cfg.upstream.tls = false;
        cfg.upstream.port = 80;
        cfg.upstream.connect_to = Some(upstream.to_string());
        cfg.upstream.connect_timeout_secs = Some(1);
        cfg.upstream.read_timeout_secs = Some(2);
        cfg.public.scheme = "http".to_string();
        configure(&mut cfg);

        validate_runtime_config(&cfg).expect("invalid test config");

        let state = build_runtime_state(&cfg).expect("failed to build runtime state");
        let server =
            build_pingora_server(&cfg, Arc::new(state)).expect("failed to build hfmirror server");

        thread::spawn(move || {
            server.run_forever();
        });

        let base_url = format!("http://127.0.0.1:{port}");
        wait_for_server(port);

        // The proxy owns redirect semantics; the client must see every 3xx.
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(Policy::none())
            .build()
            .expect("failed to build client");

        Self {
            base_url,
            port,
            client,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn head(&self, path: &str) -> RequestBuilder {
        self.request(Method::HEAD, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait for the access-log event of the request to `path`.
    pub fn access_log(&self, path: &str) -> CapturedEvent {
        let deadline = Instant::now() + Duration::from_secs(2);

        loop {
            let found = events().lock().unwrap().iter().rev().find(|e| {
                e.message() == Some("request completed") && e.field("path") == Some(path)
            }).cloned();

            if let Some(event) = found {
                return event;
            }
            if Instant::now() > deadline {
                panic!("no access log event for {path}");
            }
            thread::sleep(Duration::from_millis(25));
        }
    }
}

/// A port nothing listens on.
pub fn closed_port_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], free_port()))
}

fn wait_for_server(port: u16) {
    let deadline = Instant::now() + Duration::from_secs(2);

    loop {
        match TcpStream::connect(("127.0.0.1", port)) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start on port {port}");
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
