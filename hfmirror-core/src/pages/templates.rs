use anyhow::{Context, Result};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct PageAssets;

const HOSTNAME_VAR: &str = "{{HOSTNAME}}";
const PROXY_DOMAIN_VAR: &str = "{{PROXY_DOMAIN}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Landing,
    DownloaderScript,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Landing => "landing",
            PageKind::DownloaderScript => "downloader_script",
        }
    }
}

/// A page ready to be written: headers in order, then the body.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

/// Pre-rendered documents with a single substitution variable each.
#[derive(Debug, Clone)]
pub struct StaticPages {
    landing: String,
    downloader_script: String,
}

impl StaticPages {
    pub fn load() -> Result<Self> {
        Ok(Self {
            landing: asset("home.html")?,
            downloader_script: asset("hf_downloader.py")?,
        })
    }

    /// `hostname` is the inbound host without a port.
    pub fn render(&self, kind: PageKind, hostname: &str) -> RenderedPage {
        match kind {
            PageKind::Landing => {
                let body = self.landing.replace(HOSTNAME_VAR, hostname).into_bytes();
                RenderedPage {
                    headers: vec![
                        ("content-type", "text/html; charset=utf-8".to_string()),
                        ("content-length", body.len().to_string()),
                    ],
                    body,
                }
            }

            PageKind::DownloaderScript => {
                let body = self
                    .downloader_script
                    .replace(PROXY_DOMAIN_VAR, hostname)
                    .into_bytes();
                RenderedPage {
                    headers: vec![
                        ("content-type", "text/x-python; charset=utf-8".to_string()),
                        (
                            "content-disposition",
                            "attachment; filename=\"hf_downloader.py\"".to_string(),
                        ),
                        ("cache-control", "no-cache".to_string()),
                        ("content-length", body.len().to_string()),
                    ],
                    body,
                }
            }
        }
    }
}

fn asset(name: &str) -> Result<String> {
    let file = PageAssets::get(name).with_context(|| format!("missing embedded asset {name}"))?;
    String::from_utf8(file.data.into_owned())
        .with_context(|| format!("embedded asset {name} is not UTF-8"))
}
