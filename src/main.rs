mod alert;
mod config;
mod extract;
mod fetch;
mod pipeline;
mod submit;
#[cfg(test)]
mod testutil;

use anyhow::Result;
use std::process::ExitCode;

use crate::config::Config;

fn init_tracing() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,temperature_forwarder=debug".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "configuration incomplete, not running");
            return Ok(ExitCode::from(2));
        }
    };

    let outcome = pipeline::run(&config)?;
    if outcome.success {
        return Ok(ExitCode::SUCCESS);
    }

    tracing::error!(message = %outcome.message, "something went wrong");
    let client = reqwest::blocking::Client::new();
    if let Err(err) = alert::send_alert(
        &client,
        &outcome.message,
        config.telegram_token.as_deref(),
        &config.telegram_chatlist,
    ) {
        tracing::error!(error = %err, "failed to deliver telegram alert");
    }

    Ok(ExitCode::FAILURE)
}
