use anyhow::anyhow;
use std::{env, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub access_token: Option<String>,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token: None,
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Reads `.env` (if any) and then the process environment.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_base_url = non_blank("ATTENDANCE_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let access_token = non_blank("ATTENDANCE_API_TOKEN");

        let timeout = match non_blank("ATTENDANCE_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| anyhow!("Invalid ATTENDANCE_API_TIMEOUT_SECS value: {}", raw))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(ClientConfig {
            api_base_url,
            access_token,
            timeout,
            user_agent: default_user_agent(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

fn default_user_agent() -> String {
    format!("attendance-client/{}", env!("CARGO_PKG_VERSION"))
}
