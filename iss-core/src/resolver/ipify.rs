use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;

use super::{IpResolver, truncate_body};

pub const DEFAULT_ENDPOINT: &str = "https://api.ipify.org?format=json";

/// Public-IP echo client backed by the ipify API (https://www.ipify.org/).
#[derive(Debug, Clone)]
pub struct IpifyClient {
    endpoint: String,
    http: Client,
}

impl IpifyClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.to_string())
    }

    pub fn with_endpoint(endpoint: String) -> Self {
        Self {
            endpoint,
            http: Client::new(),
        }
    }
}

impl Default for IpifyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpEchoResponse {
    ip: String,
}

#[async_trait]
impl IpResolver for IpifyClient {
    async fn fetch_my_ip(&self) -> Result<String, FetchError> {
        log::debug!("requesting public IP from {}", self.endpoint);

        let res = self.http.get(&self.endpoint).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Upstream {
                context: "IP address lookup".to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: IpEchoResponse = serde_json::from_str(&body)?;

        // Plain dotted-quad string, nothing more; the geo stage validates it.
        Ok(parsed.ip)
    }
}
