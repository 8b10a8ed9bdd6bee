// src/register/client.rs
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header;

use crate::register::dates::encode_request_date;
use crate::register::models::RawDocument;
use crate::utils::error::FetchError;

pub const DEFAULT_REGISTER_URL: &str = "https://li-public.fmcsa.dot.gov/LIVIEW/PKG_register.prc_reg_detail";
const REGISTER_USER_AGENT: &str = "fmcsa_register/0.1 (register extraction)";
// Pause between attempts. The register host is slow to recover from bursts.
const RETRY_DELAY_MS: u64 = 1_000;

/// Settings for talking to the register host.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub url: String,
    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTER_URL.to_string(),
            timeout: Duration::from_secs(30),
            retries: 2,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

pub struct RegisterClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl RegisterClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        if !(config.url.starts_with("http://") || config.url.starts_with("https://")) {
            return Err(FetchError::InvalidRequest(format!("not an http(s) URL: '{}'", config.url)));
        }

        let client = reqwest::Client::builder()
            .user_agent(REGISTER_USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetches the register published on `date`.
    /// Network failures and 5xx responses are retried; anything else is returned as-is.
    pub async fn fetch_register(&self, date: NaiveDate) -> Result<RawDocument, FetchError> {
        let pd_date = encode_request_date(date);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.fetch_once(&pd_date).await {
                Ok(html) => return Ok(RawDocument::new(html)),
                Err(e) if attempt <= self.config.retries && is_retryable(&e) => {
                    tracing::warn!(
                        "Register fetch attempt {} for {} failed: {}; retrying in {:?}",
                        attempt, pd_date, e, self.config.retry_delay
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, pd_date: &str) -> Result<String, FetchError> {
        tracing::info!("Requesting register for pd_date={} from {}", pd_date, self.config.url);

        let response = self.client.post(&self.config.url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .form(&[("pd_date", pd_date), ("pv_vpath", "LIVIEW")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for pd_date={}", status, pd_date);
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Downloaded {} bytes for pd_date={}", body.len(), pd_date);
        Ok(body)
    }
}

fn is_retryable(error: &FetchError) -> bool {
    match error {
        FetchError::Network(_) => true,
        FetchError::Http(status) => status.is_server_error(),
        FetchError::InvalidRequest(_) => false,
    }
}
