use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::debug;

/// Fetches the public temperature page and returns its decoded body.
///
/// One GET, no retry. Transport failures bubble up so the orchestrator can
/// report them through the normal failure path. Non-success statuses are not
/// treated specially here; a broken page simply fails extraction later.
pub fn fetch_website(client: &Client, url: &str) -> Result<String> {
    debug!(url = %url, "requesting temperature page");
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("requesting {url}"))?;

    let content = response
        .text()
        .with_context(|| format!("decoding body of {url}"))?;
    debug!(bytes = content.len(), content = %content, "fetched temperature page");

    Ok(content)
}
