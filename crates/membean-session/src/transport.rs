// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport for a training session, wrapping reqwest.
//!
//! Each session owns one transport: its own cookie jar (seeded with the
//! `auth_token` cookie for the service origin), no redirect following, and
//! no retries. 3xx responses come back as-is; 4xx/5xx become
//! [`TrainerError::Status`].

use crate::config::SessionConfig;
use crate::error::{TrainerError, TrainerResult};
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Response to a form POST.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Requested URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// `Location` header of an unfollowed redirect.
    pub location: Option<String>,
    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// What the session controller needs from the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `fields` as an `application/x-www-form-urlencoded` body.
    async fn post_form(&self, url: &Url, fields: &[(String, String)])
        -> TrainerResult<TransportResponse>;
    /// GET `url` and return the raw body text.
    async fn get_text(&self, url: &Url) -> TrainerResult<String>;
}

/// Cookie-bearing reqwest client for one session.
pub struct HttpTransport {
    client: reqwest::Client,
    jar: Arc<Jar>,
}

impl HttpTransport {
    /// Build the client and plant the auth cookie for the configured origin.
    pub fn new(config: &SessionConfig) -> TrainerResult<Self> {
        let jar = Arc::new(Jar::default());
        jar.add_cookie_str(
            &format!("auth_token={}", config.auth_token),
            &config.base_url,
        );

        let client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, jar })
    }

    /// The `Cookie` header value this transport would send to `url`.
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        self.jar
            .cookies(url)
            .and_then(|v| v.to_str().ok().map(String::from))
    }
}

fn check_status(status: u16, url: &Url) -> TrainerResult<()> {
    if status >= 400 {
        return Err(TrainerError::Status {
            status,
            url: url.to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &Url,
        fields: &[(String, String)],
    ) -> TrainerResult<TransportResponse> {
        tracing::debug!("requesting POST {url}");
        let r = self.client.post(url.clone()).form(fields).send().await?;
        let status = r.status().as_u16();
        check_status(status, url)?;

        let location = r
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = r.text().await?;

        Ok(TransportResponse {
            url: url.to_string(),
            status,
            location,
            body,
        })
    }

    async fn get_text(&self, url: &Url) -> TrainerResult<String> {
        tracing::debug!("requesting GET {url}");
        let r = self.client.get(url.clone()).send().await?;
        check_status(r.status().as_u16(), url)?;
        Ok(r.text().await?)
    }
}
