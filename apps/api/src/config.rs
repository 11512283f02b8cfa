use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::generation::plan::PlanDefaults;

const DEFAULT_MODEL: &str = "o3-mini-2";
const DEFAULT_API_VERSION: &str = "2024-12-01-preview";

/// Connection settings for the Azure OpenAI deployment.
#[derive(Debug, Clone)]
pub struct AzureSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub api_version: String,
}

/// Application configuration loaded from environment variables.
///
/// Nothing is strictly required: without `AZURE_OPENAI_ENDPOINT` and
/// `AZURE_OPENAI_API_KEY` the service runs with remote generation disabled.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// `None` when endpoint or key is missing.
    pub azure: Option<AzureSettings>,
    pub remote_timeout: Duration,
    pub request_timeout: Duration,
    pub plan_defaults: PlanDefaults,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let azure = match (get("AZURE_OPENAI_ENDPOINT"), get("AZURE_OPENAI_API_KEY")) {
            (Some(endpoint), Some(api_key)) => Some(AzureSettings {
                endpoint,
                api_key,
                model: get("AZURE_OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_version: get("AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            }),
            _ => None,
        };

        let defaults = PlanDefaults::default();

        let remote_timeout = Duration::from_secs(parse_or(
            get("REMOTE_TIMEOUT_SECS"),
            "REMOTE_TIMEOUT_SECS",
            240,
        )?);
        let request_timeout = Duration::from_secs(parse_or(
            get("REQUEST_TIMEOUT_SECS"),
            "REQUEST_TIMEOUT_SECS",
            300,
        )?);
        // The remote call must give up while there is still time to answer locally.
        if remote_timeout >= request_timeout {
            bail!(
                "REMOTE_TIMEOUT_SECS ({}) must be less than REQUEST_TIMEOUT_SECS ({})",
                remote_timeout.as_secs(),
                request_timeout.as_secs()
            );
        }

        Ok(Config {
            port: parse_or(get("PORT"), "PORT", 5000)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            azure,
            remote_timeout,
            request_timeout,
            plan_defaults: PlanDefaults {
                duration: get("FALLBACK_PLAN_DURATION").unwrap_or(defaults.duration),
                estimated_cost: get("FALLBACK_ESTIMATED_COST").unwrap_or(defaults.estimated_cost),
            },
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{value}'")),
        None => Ok(default),
    }
}
