use std::{env::var, fmt};
use thiserror::Error;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITHUB_TIMEOUT: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub dev_mode: bool,
    pub domain: String,
    pub github_token: String,
    pub github_user: String,
    pub github_repo: String,
    pub github_api_url: String,
    pub github_timeout: u64,
    pub mirror_status_code: bool,
}

// The token stays out of any debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("dev_mode", &self.dev_mode)
            .field("domain", &self.domain)
            .field("github_token", &"<redacted>")
            .field("github_user", &self.github_user)
            .field("github_repo", &self.github_repo)
            .field("github_api_url", &self.github_api_url)
            .field("github_timeout", &self.github_timeout)
            .field("mirror_status_code", &self.mirror_status_code)
            .finish()
    }
}

impl Config {
    pub fn init() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_token = lookup("GITHUB_COMMENT_PAT")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("GITHUB_COMMENT_PAT"))?;
        let port = match lookup("PORT") {
            Some(value) => parse_value("PORT", value)?,
            None => DEFAULT_PORT,
        };
        let github_timeout = match lookup("GITHUB_TIMEOUT_SECS") {
            Some(value) => parse_value("GITHUB_TIMEOUT_SECS", value)?,
            None => DEFAULT_GITHUB_TIMEOUT,
        };
        let mirror_status_code = match lookup("MIRROR_STATUS_CODE") {
            Some(value) => parse_value("MIRROR_STATUS_CODE", value)?,
            None => false,
        };
        let github_api_url = lookup("GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            port,
            dev_mode: lookup("NODE_ENV").as_deref() == Some("dev"),
            domain: lookup("COMMENT_DOMAIN").unwrap_or_default(),
            github_token,
            github_user: lookup("GITHUB_USER").unwrap_or_default(),
            github_repo: lookup("GITHUB_REPO").unwrap_or_default(),
            github_api_url,
            github_timeout,
            mirror_status_code,
        })
    }

    pub fn base_path(&self) -> &'static str {
        if self.dev_mode {
            "/comment"
        } else {
            "/.netlify/functions/comment"
        }
    }
}

fn parse_value<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::Invalid { name, value })
}
