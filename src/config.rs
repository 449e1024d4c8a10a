use anyhow::{Context, Result};
use tracing::warn;

pub const BOT_TOKEN_VAR: &str = "TOKEN_INVALIDATOR_TOKEN";
pub const GIST_TOKEN_VAR: &str = "GIST_API_TOKEN";

pub const GIST_API_URL: &str = "https://api.github.com/gists";
pub const USER_AGENT: &str = "Token Invalidator bot";

#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub gist: GistConfig,
}

#[derive(Clone)]
pub struct GistConfig {
    /// Sent verbatim as the `Authorization` header, e.g. `token ghp_...`.
    pub api_token: String,
    pub api_url: String,
    pub user_agent: String,
}

impl GistConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            api_url: GIST_API_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("gist", &self.gist)
            .finish()
    }
}

impl std::fmt::Debug for GistConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.api_token.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("GistConfig")
            .field("api_token", &token)
            .field("api_url", &self.api_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = lookup(BOT_TOKEN_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .with_context(|| format!("{} is not set", BOT_TOKEN_VAR))?;

        let api_token = lookup(GIST_TOKEN_VAR).unwrap_or_default();
        if api_token.trim().is_empty() {
            warn!(
                "{} is not set; gist creation will be rejected as unauthorized",
                GIST_TOKEN_VAR
            );
        }

        Ok(Self {
            bot_token,
            gist: GistConfig::new(api_token.trim()),
        })
    }
}
