use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::Config;

/// One day's reading, serialized verbatim as the backend request body.
#[derive(Debug, Clone, Serialize)]
pub struct WaterReading {
    pub temperature: f64,
    pub time: String,
}

/// Outcome of a submission attempt. The backend write is a replace keyed on
/// (town, time), so re-running after a failure is safe.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The reading never left the process; a human has to approve it.
    Rejected { reason: String },
    /// The backend could not be reached at all.
    ConnectionFailed { url: String },
    /// The backend answered; the status may still be a rejection.
    Sent { status: StatusCode, body: String },
}

/// Pushes a reading to the backend with bearer authentication.
///
/// Values at or below freezing are implausible for the source page and are
/// held back for manual approval instead of being written automatically.
/// Connection-level failures are reported as an outcome; any other transport
/// error propagates.
pub fn submit_reading(
    client: &Client,
    config: &Config,
    reading: &WaterReading,
) -> Result<SubmitOutcome> {
    if !reading.temperature.is_finite() || reading.temperature <= 0.0 {
        return Ok(SubmitOutcome::Rejected {
            reason: "water temperature is <= 0, please approve this manually.".to_string(),
        });
    }

    let url = config.backend_endpoint();
    debug!(
        url = %url,
        temperature = reading.temperature,
        time = %reading.time,
        "sending reading to backend"
    );

    let response = match client
        .put(&url)
        .bearer_auth(&config.api_key)
        .json(reading)
        .send()
    {
        Ok(response) => response,
        Err(err) if err.is_connect() || err.is_timeout() => {
            error!(url = %url, error = %err, "backend unreachable");
            return Ok(SubmitOutcome::ConnectionFailed { url });
        }
        Err(err) => {
            return Err(err).with_context(|| format!("putting reading to {url}"));
        }
    };

    let status = response.status();
    let body = response
        .text()
        .with_context(|| format!("reading backend response from {url}"))?;
    debug!(success = status.is_success(), body = %body, "backend responded");

    Ok(SubmitOutcome::Sent { status, body })
}
