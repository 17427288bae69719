use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Europe::Berlin;
use reqwest::blocking::Client;
use tracing::{error, info};

use crate::config::Config;
use crate::extract::extract_today_temperature;
use crate::fetch::fetch_website;
use crate::submit::{submit_reading, SubmitOutcome, WaterReading};

/// Terminal result of one run. A failed outcome carries the message that is
/// both logged and delivered to the alert recipients.
#[derive(Debug)]
pub struct RunOutcome {
    pub success: bool,
    pub message: String,
}

impl RunOutcome {
    fn success() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }

    fn failure(message: String) -> Self {
        error!("{message}");
        Self {
            success: false,
            message,
        }
    }
}

/// Runs the whole fetch → extract → submit pipeline once.
///
/// Strictly linear; the first failing step produces the outcome. Only
/// unexpected transport faults during submission propagate as `Err`.
pub fn run(config: &Config) -> anyhow::Result<RunOutcome> {
    let client = Client::new();

    let content = match fetch_website(&client, &config.temperature_url()) {
        Ok(content) => content,
        Err(err) => {
            return Ok(RunOutcome::failure(format!(
                "couldn't retrieve website: {err:#}"
            )));
        }
    };

    let Some(temperature) = extract_today_temperature(&content) else {
        return Ok(RunOutcome::failure(
            "couldn't retrieve temperature".to_string(),
        ));
    };

    let reading = WaterReading {
        temperature,
        time: reading_timestamp(Local::now().date_naive()).to_rfc3339(),
    };

    match submit_reading(&client, config, &reading)? {
        SubmitOutcome::Sent { status, body } => {
            if status.is_success() {
                info!(temperature, time = %reading.time, "reading stored");
                Ok(RunOutcome::success())
            } else {
                Ok(RunOutcome::failure(format!(
                    "failed to put data ({reading:?}) to backend: {}\n{body}",
                    config.backend_endpoint()
                )))
            }
        }
        SubmitOutcome::ConnectionFailed { url } => Ok(RunOutcome::failure(format!(
            "failed to put data ({reading:?}) to backend: {url}\nno response"
        ))),
        SubmitOutcome::Rejected { reason } => Ok(RunOutcome::failure(format!(
            "failed to put data ({reading:?}) to backend: {reason}\nno response"
        ))),
    }
}

/// Timestamp for a reading taken on `date`.
///
/// The source publishes one value per day, so the reading is anchored to that
/// date's midnight in the lake's civil timezone and expressed in UTC, no
/// matter when the job actually ran.
pub fn reading_timestamp(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match Berlin.from_local_datetime(&midnight) {
        LocalResult::Single(local) => local.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        // Berlin switches at 02:00/03:00, so midnight never falls in a gap.
        LocalResult::None => Utc.from_utc_datetime(&midnight),
    }
}
