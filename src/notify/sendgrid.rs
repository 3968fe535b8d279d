//! SendGrid v3 mail-send client.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use super::{Notification, Notifier};
use crate::config::Config;

const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";
const FROM_EMAIL: &str = "test@todo.com";
const FROM_NAME: &str = "Todo User";
const TO_NAME: &str = "Example User";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP client setup failed: {0}")]
    ClientBuild(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("SendGrid rejected the message (status {status}): {message}")]
    Rejected {
        status: u16,
        message: String,
    },
}

#[derive(Clone)]
pub struct SendGridNotifier {
    client: Client,
    api_key: String,
    api_url: String,
    to: String,
}

impl SendGridNotifier {
    /// Requests that take longer than ten seconds are abandoned.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::ClientBuild` if the TLS backend cannot be initialized.
    pub fn new(api_key: String, to: String) -> Result<Self, NotifyError> {
        Self::with_timeout(api_key, to, REQUEST_TIMEOUT)
    }

    fn with_timeout(api_key: String, to: String, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::ClientBuild(e.to_string()))?;
        Ok(Self { client, api_key, api_url: SENDGRID_API_URL.to_string(), to })
    }

    /// `Ok(None)` unless both an API key and a destination address are configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, NotifyError> {
        match (&config.sendgrid_api_key, &config.notify_email) {
            (Some(key), Some(to)) => Self::new(key.clone(), to.clone()).map(Some),
            _ => Ok(None),
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn recipient(&self) -> &str { &self.to }

    /// Delivers one message and waits for SendGrid's answer.
    ///
    /// # Errors
    ///
    /// Transport failures and any non-2xx response.
    pub async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let response = self.client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(notification))
            .send()
            .await
            .map_err(|e| NotifyError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response.text().await.unwrap_or_default();
        Err(NotifyError::Rejected { status: status.as_u16(), message })
    }

    fn payload<'a>(&'a self, notification: &Notification) -> MailSend<'a> {
        MailSend {
            personalizations: vec![Personalization { to: vec![Address { email: &self.to, name: TO_NAME }] }],
            from: Address { email: FROM_EMAIL, name: FROM_NAME },
            subject: notification.subject(),
            content: vec![
                Content { kind: "text/plain", value: notification.plain_text() },
                Content { kind: "text/html", value: notification.html() },
            ],
        }
    }
}

impl Notifier for SendGridNotifier {
    fn notify(&self, notification: Notification) {
        let this = self.clone();
        tokio::spawn(async move {
            match this.send(&notification).await {
                Ok(()) => tracing::debug!(subject = notification.subject(), "notification sent"),
                Err(e) => tracing::warn!(error = %e, subject = notification.subject(), "notification failed"),
            }
        });
    }
}

#[derive(Serialize)]
struct MailSend<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'static str,
    content: Vec<Content>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct Content {
    #[serde(rename = "type")]
    kind: &'static str,
    value: String,
}
