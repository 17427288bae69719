use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::json;
use tracing::{debug, error};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Sends the failure message to every configured Telegram recipient.
///
/// A missing bot token downgrades alerting to a logged no-op; an empty
/// recipient list is logged and the loop simply has nothing to do. Delivery
/// errors from the Telegram API propagate to the caller.
pub fn send_alert(
    client: &Client,
    message: &str,
    token: Option<&str>,
    chatlist: &[String],
) -> Result<()> {
    let Some(token) = token else {
        error!("TELEGRAM_TOKEN not defined in environment, skip sending telegram message");
        return Ok(());
    };

    if chatlist.is_empty() {
        error!("telegram chatlist is empty (env var: TELEGRAM_CHATLIST)");
    }

    let url = format!("{TELEGRAM_API_BASE}/bot{token}/sendMessage");
    for chat_id in chatlist {
        let payload = json!({
            "chat_id": chat_id,
            "text": format!("Error while executing: {message}"),
        });
        let response = client
            .post(&url)
            .json(&payload)
            .send()
            .with_context(|| format!("sending telegram message to chat {chat_id}"))?;
        debug!(
            chat_id = %chat_id,
            success = response.status().is_success(),
            "telegram message sent"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::send_alert;
    use reqwest::blocking::Client;

    #[test]
    fn missing_token_is_a_no_op() {
        let client = Client::new();
        let chatlist = vec!["139656428".to_string()];
        send_alert(&client, "boom", None, &chatlist).expect("no-op");
    }

    #[test]
    fn empty_chatlist_sends_nothing() {
        let client = Client::new();
        send_alert(&client, "boom", Some("bot-token"), &[]).expect("no recipients");
    }
}
