use std::{net::SocketAddr, time::Duration};

use crate::{
    error::{PlannerError, Result},
    services::gemini_client::{DEFAULT_BASE_URL, DEFAULT_MODEL},
};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const ADDR_VAR: &str = "TRIP_PLANNER_ADDR";
pub const TIMEOUT_VAR: &str = "TRIP_PLANNER_TIMEOUT_SECS";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Process configuration, resolved once at startup.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub addr: SocketAddr,
    /// No timeout unless configured
    pub request_timeout: Option<Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("addr", &self.addr)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                PlannerError::Config(format!("{API_KEY_VAR} environment variable not set."))
            })?;

        let model = lookup(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let addr = parse_addr(&lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string()))?;
        let request_timeout = lookup(TIMEOUT_VAR)
            .map(|secs| parse_timeout(&secs))
            .transpose()?;

        Ok(Self {
            api_key,
            model,
            base_url,
            addr,
            request_timeout,
        })
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

pub fn parse_addr(raw: &str) -> Result<SocketAddr> {
    raw.trim()
        .parse()
        .map_err(|err| PlannerError::Config(format!("invalid bind address `{raw}`: {err}")))
}

pub fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|err| PlannerError::Config(format!("invalid timeout `{raw}`: {err}")))?;
    if secs == 0 {
        return Err(PlannerError::Config(
            "timeout must be at least one second".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
