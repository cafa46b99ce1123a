//! Outgoing OTP mail.
//!
//! Delivery is behind the `Mailer` trait so handlers never depend on a
//! concrete transport. `HttpMailer` posts to a JSON mail API;
//! `LogMailer` writes the code to the log for development and tests.

use tf_core::OtpPurpose;

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Mail request failed: {source} {location}")]
    Request {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Mail provider returned status {status} {location}")]
    Provider { status: u16, location: ErrorLocation },
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a one-time code to `to`.
    async fn send_otp(
        &self,
        to: &str,
        name: &str,
        purpose: OtpPurpose,
        code: &str,
    ) -> Result<(), MailError>;
}

/// Sends mail through an HTTP JSON mail provider
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    sender: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, sender: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            sender,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_otp(
        &self,
        to: &str,
        name: &str,
        purpose: OtpPurpose,
        code: &str,
    ) -> Result<(), MailError> {
        let body = serde_json::json!({
            "from": self.sender,
            "to": to,
            "subject": purpose.subject(),
            "text": message_body(name, purpose, code),
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| MailError::Request {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        if !response.status().is_success() {
            return Err(MailError::Provider {
                status: response.status().as_u16(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

fn message_body(name: &str, purpose: OtpPurpose, code: &str) -> String {
    match purpose {
        OtpPurpose::LoginVerification => format!(
            "Hello {name},\n\nYour login verification code is {code}. \
             It expires in 24 hours.\n"
        ),
        OtpPurpose::PasswordReset => format!(
            "Hello {name},\n\nUse code {code} to reset your password. \
             It expires in 24 hours.\n"
        ),
    }
}

/// Logs the code instead of sending mail (development and tests)
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_otp(
        &self,
        to: &str,
        name: &str,
        purpose: OtpPurpose,
        code: &str,
    ) -> Result<(), MailError> {
        log::info!("[{}] OTP for {} <{}>: {}", purpose.as_str(), name, to, code);
        Ok(())
    }
}
