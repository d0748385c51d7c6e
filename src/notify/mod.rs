pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Outbound notification port. Delivery is best-effort: callers log failures
/// and carry on; nothing retries automatically.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> AppResult<()>;
}

/// Build the mailer from configuration: the HTTP provider when an API key is
/// configured, otherwise a log-only stand-in.
pub fn from_config(config: &Config) -> Arc<dyn Mailer> {
    match (&config.email_api_url, &config.email_api_key) {
        (Some(url), Some(key)) => Arc::new(HttpMailer::new(
            url.clone(),
            key.clone(),
            config.email_from.clone(),
        )),
        _ => {
            tracing::warn!("EMAIL_API_URL/EMAIL_API_KEY not set, emails will only be logged");
            Arc::new(LogMailer)
        }
    }
}

/// Sends through a transactional email provider's JSON API.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: OutboundEmail) -> AppResult<()> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&SendRequest {
                from: &self.from,
                to: &email.to,
                subject: &email.subject,
                html: &email.html,
            })
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Email send failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Email provider returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Logs instead of sending. Used when no provider is configured, and as the
/// test double.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutboundEmail) -> AppResult<()> {
        tracing::info!(to = %email.to, subject = %email.subject, "Email (not sent, no provider configured)");
        Ok(())
    }
}

/// Send without surfacing failures to the caller. The log line carries the
/// recipient and subject so a failed send can be retried by hand.
pub async fn send_best_effort(mailer: &dyn Mailer, email: OutboundEmail) {
    let to = email.to.clone();
    let subject = email.subject.clone();
    if let Err(e) = mailer.send(email).await {
        tracing::warn!(to = %to, subject = %subject, error = %e, "Failed to send email");
    }
}
