use std::env;

use thiserror::Error;
use url::Url;

const DEFAULT_TOWN_NAME: &str = "cuxhaven";
const DEFAULT_SOURCE_BASE_URL: &str = "https://www.tourlogger.de/wassertemperatur";
const DEFAULT_BACKEND_URL: &str = "http://api:80";
const DEFAULT_BACKEND_PATH: &str = "lake/{}/temperature";
const DEFAULT_CHATLIST: &str = "139656428";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not defined in environment")]
    MissingVar(&'static str),
    #[error("invalid {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub town_name: String,
    pub source_base_url: String,
    pub backend_url: String,
    /// Path template with one `{}` slot for the town identifier.
    pub backend_path: String,
    pub town_uuid: String,
    pub api_key: String,
    pub telegram_token: Option<String>,
    pub telegram_chatlist: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let town_name = env_first(&["TOWN_NAME", "CUXHAVEN_NAME"])
            .unwrap_or_else(|| DEFAULT_TOWN_NAME.to_string());
        let source_base_url = env_optional("SOURCE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_SOURCE_BASE_URL.to_string());
        let backend_url =
            env_optional("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_path =
            env_optional("BACKEND_PATH").unwrap_or_else(|| DEFAULT_BACKEND_PATH.to_string());

        let town_uuid = env_first(&["TOWN_UUID", "CUXHAVEN_UUID"])
            .ok_or(ConfigError::MissingVar("TOWN_UUID"))?;
        let api_key = env_optional("API_KEY").ok_or(ConfigError::MissingVar("API_KEY"))?;

        let telegram_token = env_first(&["TELEGRAM_TOKEN", "TOKEN"]);
        let telegram_chatlist = parse_chatlist(
            &env_optional("TELEGRAM_CHATLIST").unwrap_or_else(|| DEFAULT_CHATLIST.to_string()),
        );

        Url::parse(&source_base_url).map_err(|source| ConfigError::InvalidUrl {
            var: "SOURCE_BASE_URL",
            source,
        })?;
        Url::parse(&backend_url).map_err(|source| ConfigError::InvalidUrl {
            var: "BACKEND_URL",
            source,
        })?;

        Ok(Self {
            town_name,
            source_base_url,
            backend_url,
            backend_path,
            town_uuid,
            api_key,
            telegram_token,
            telegram_chatlist,
        })
    }

    /// URL of the public page listing the town's water temperatures.
    pub fn temperature_url(&self) -> String {
        format!(
            "{}/{}/",
            self.source_base_url.trim_end_matches('/'),
            self.town_name
        )
    }

    /// Backend endpoint with the town identifier filled into the path template.
    pub fn backend_endpoint(&self) -> String {
        let path = self.backend_path.replacen("{}", &self.town_uuid, 1);
        format!(
            "{}/{}",
            self.backend_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn env_first(keys: &[&'static str]) -> Option<String> {
    keys.iter().find_map(|key| env_optional(key))
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_chatlist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
