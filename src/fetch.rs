use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::cache::TtlCache;
use crate::files::FileRef;

const REQUEST_TIMEOUT_SECS: u64 = 15;
const BROWSER_UA: &str = "Mozilla/5.0";

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// Fetches raw text through the injected cache so repeated listing passes
/// stay cheap within the TTL.
pub fn fetch_text_cached(cache: &TtlCache, url: &str) -> Result<String> {
    cache.get_or_fetch(url, || fetch_text(url))
}

pub fn fetch_text(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client
        .get(url)
        .header(USER_AGENT, BROWSER_UA)
        .send()
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {status}"));
    }
    debug!(url, bytes = body.len() as u64, "fetched text");
    Ok(body)
}

/// Local reads decode lossily; the plot sources are hand-edited files and
/// a stray byte must not drop the whole file.
pub fn read_text_lossy(path: &Path) -> Result<String> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Resolves a file reference to its text content, through the cache for
/// remote refs. Errors surface here; extraction callers absorb them into
/// "no data".
pub fn file_text(cache: &TtlCache, file: &FileRef) -> Result<String> {
    match file {
        FileRef::Local { path } => read_text_lossy(path),
        FileRef::Remote { url, .. } => fetch_text_cached(cache, url),
    }
}
