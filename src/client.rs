//! Client for the prediction API
//!
//! Posts user attributes to a running server and reads back the category.

use std::time::Duration;

use crate::api::PremiumResponse;
use crate::features::UserAttributes;
use crate::{ClientConfig, PremiumCategory, PremiumError, Result};

pub const CONNECTION_NOTICE: &str =
    "Could not connect to the prediction server. Make sure it is running.";

/// Blocking client for `POST /predict_insurance_premium/`
pub struct PremiumClient {
    client: reqwest::blocking::Client,
    url: String,
    timeout: Duration,
}

impl PremiumClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("premium-client/0.1")
            .timeout(timeout)
            .build()?;

        Ok(PremiumClient {
            client,
            url: url.to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.url, Duration::from_secs(config.timeout_secs))
    }

    /// Request a premium category. No retries.
    pub fn quote(&self, attrs: &UserAttributes) -> Result<PremiumCategory> {
        log::debug!("Posting to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(attrs)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PremiumError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PremiumResponse = response.json()?;
        Ok(parsed.predicted_premium)
    }

    fn classify(&self, err: reqwest::Error) -> PremiumError {
        if err.is_connect() {
            log::warn!("Connection to {} failed: {}", self.url, err);
            PremiumError::Connection(CONNECTION_NOTICE.to_string())
        } else if err.is_timeout() {
            PremiumError::Connection(format!(
                "The prediction server did not respond within {}s.",
                self.timeout.as_secs()
            ))
        } else {
            PremiumError::Http(err)
        }
    }
}
