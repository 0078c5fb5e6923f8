//! Inventory submission to the scanning worker.

use std::time::Duration;

use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};

const MAX_RETRIES: u32 = 2;
const RETRY_BACKOFF: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Derive the ingest endpoint from the configured base URL.
fn ingest_url(worker_url: &str) -> String {
    format!("{}/ingest", worker_url.trim_end_matches('/'))
}

/// POST the serialized inventory to `<worker_url>/ingest`.
///
/// `body` is the exact document written to disk, byte for byte, so the
/// worker receives what the workflow artifacts show. Transient failures are
/// retried with a linear backoff; the last error is returned once the
/// attempts run out and the caller decides whether that is fatal.
pub async fn submit_inventory(
    worker_url: &str,
    token: Option<&str>,
    body: String,
    quiet: bool,
) -> Result<()> {
    let url = ingest_url(worker_url);

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("depcanary/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let pb = if !quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
        );
        pb.set_message(format!("Submitting inventory to {}", url));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let mut last_error = None;
    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            tokio::time::sleep(RETRY_BACKOFF * attempt).await;
        }

        match post_inventory(&client, &url, token, &body).await {
            Ok(()) => {
                if let Some(pb) = pb {
                    pb.finish_with_message("Inventory submitted");
                }
                return Ok(());
            }
            Err(e) => {
                if let Some(pb) = &pb {
                    pb.set_message(format!(
                        "Attempt {}/{} failed ({}), retrying",
                        attempt + 1,
                        MAX_RETRIES + 1,
                        e
                    ));
                }
                last_error = Some(e);
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    Err(last_error.unwrap_or_else(|| anyhow!("inventory submission failed")))
}

async fn post_inventory(
    client: &reqwest::Client,
    url: &str,
    token: Option<&str>,
    body: &str,
) -> Result<()> {
    let mut request = client
        .post(url)
        .header("Content-Type", "application/json")
        .body(body.to_string());

    if let Some(token) = token {
        request = request.header("Authorization", format!("Bearer {}", token));
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("worker responded {}", status));
    }
    Ok(())
}
