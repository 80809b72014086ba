//! Loading page HTML from a URL or a local file.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};
use url::Url;

/// A page ready for extraction.
#[derive(Debug)]
pub(crate) struct LoadedPage {
    pub html: String,
    pub url: Option<String>,
}

/// Parse and check a page URL. Only http and https are fetched.
pub(crate) fn parse_page_url(raw: &str) -> Result<Url, Box<dyn std::error::Error>> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("Invalid URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("Unsupported URL scheme '{}', expected http or https", other).into()),
    }
}

pub(crate) async fn fetch_page(
    raw_url: &str,
    timeout_secs: u64,
) -> Result<LoadedPage, Box<dyn std::error::Error>> {
    let url = parse_page_url(raw_url)?;

    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("brandlens/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10));
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    let client = builder.build()?;

    info!("Fetching {}", url);
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("Fetching {} failed with HTTP {}", url, status).into());
    }
    let html = response.text().await?;
    debug!("Fetched {} bytes from {}", html.len(), url);

    Ok(LoadedPage {
        html,
        url: Some(url.to_string()),
    })
}

pub(crate) fn read_page(
    path: &Path,
    url: Option<&str>,
) -> Result<LoadedPage, Box<dyn std::error::Error>> {
    let html = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let url = url.map(parse_page_url).transpose()?.map(|u| u.to_string());
    debug!("Read {} bytes from {}", html.len(), path.display());
    Ok(LoadedPage { html, url })
}

/// Read `file` when given, otherwise fetch `url`. With a file, `url` only
/// labels the page.
pub(crate) async fn load_page(
    url: Option<&str>,
    file: Option<&Path>,
    timeout_secs: u64,
) -> Result<LoadedPage, Box<dyn std::error::Error>> {
    match (file, url) {
        (Some(path), url) => read_page(path, url),
        (None, Some(url)) => fetch_page(url, timeout_secs).await,
        (None, None) => Err("either --url or --file is required".into()),
    }
}
