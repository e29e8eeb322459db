use anyhow::{Context, Result};

mod http_client;

mod types;
pub use self::types::*;
mod auth;
mod items;
mod lists;

/// Header carrying the client-held identity on every authenticated request.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Blocking client for the stacklist REST API. One method per endpoint; no
/// retries, timeouts, or queueing: each user action issues at most one
/// request and the caller reloads afterwards.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    user_id: Option<String>,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("stacklist")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: None,
            client,
        })
    }

    pub fn with_identity(base_url: &str, user_id: &str) -> Result<Self> {
        let mut api = Self::new(base_url)?;
        api.user_id = Some(user_id.to_string());
        Ok(api)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}
