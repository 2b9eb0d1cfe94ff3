// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Session configuration loading and resolution.
//!
//! Every value resolves in the same order: explicit value (usually a CLI
//! flag), then environment variable, then default. The auth token has no
//! default.

use crate::error::{TrainerError, TrainerResult};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://membean.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub const ENV_SESSION_ID: &str = "MEMBEAN_SESSION_ID";
pub const ENV_AUTH_TOKEN: &str = "MEMBEAN_AUTH_TOKEN";
pub const ENV_BASE_URL: &str = "MEMBEAN_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "MEMBEAN_TIMEOUT_MS";

const USER_AGENT: &str = concat!("membean-session/", env!("CARGO_PKG_VERSION"));

/// Identity and endpoints of one training session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub session_id: String,
    pub auth_token: String,
    pub base_url: Url,
    pub timeout_ms: u64,
    pub user_agent: String,
}

/// Values supplied explicitly, typically from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub session_id: Option<String>,
    pub auth_token: Option<String>,
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl SessionConfig {
    /// Config for `session_id` against the default service.
    pub fn new(session_id: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            auth_token: auth_token.into(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Point the session at another origin (a staging host or a test server).
    pub fn with_base_url(mut self, base_url: &str) -> TrainerResult<Self> {
        let url = Url::parse(base_url)?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(TrainerError::Config(format!(
                "base URL must be an http(s) origin: {base_url}"
            )));
        }
        self.base_url = url;
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Resolve from overrides and the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> TrainerResult<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve from overrides and an arbitrary environment lookup.
    pub fn resolve_with<E>(overrides: ConfigOverrides, env: E) -> TrainerResult<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let lookup = |explicit: Option<String>, key: &str| {
            explicit
                .or_else(|| env(key))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let session_id = lookup(overrides.session_id, ENV_SESSION_ID).ok_or_else(|| {
            TrainerError::Config(format!("no session id (pass --session or set {ENV_SESSION_ID})"))
        })?;
        let auth_token = lookup(overrides.auth_token, ENV_AUTH_TOKEN).ok_or_else(|| {
            TrainerError::Config(format!("no auth token (pass --token or set {ENV_AUTH_TOKEN})"))
        })?;

        let mut config = Self::new(session_id, auth_token);
        if let Some(base_url) = lookup(overrides.base_url, ENV_BASE_URL) {
            config = config.with_base_url(&base_url)?;
        }

        let timeout = match overrides.timeout_ms {
            Some(ms) => Some(ms),
            None => match env(ENV_TIMEOUT_MS) {
                Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                    TrainerError::Config(format!("{ENV_TIMEOUT_MS} is not a number: {raw}"))
                })?),
                None => None,
            },
        };
        if let Some(ms) = timeout {
            config = config.with_timeout_ms(ms);
        }

        Ok(config)
    }

    /// `{base}/training_sessions/{id}/advance`
    pub fn advance_url(&self) -> TrainerResult<Url> {
        self.session_url("advance")
    }

    /// `{base}/training_sessions/{id}/user_state?xhr=_xhr`
    pub fn user_state_url(&self) -> TrainerResult<Url> {
        let mut url = self.session_url("user_state")?;
        url.set_query(Some("xhr=_xhr"));
        Ok(url)
    }

    fn session_url(&self, endpoint: &str) -> TrainerResult<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| TrainerError::Config(format!("cannot extend base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(["training_sessions", self.session_id.as_str(), endpoint]);
        Ok(url)
    }
}
