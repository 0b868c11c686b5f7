use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{self, Location},
};

use super::{GeoResolver, truncate_body};

pub const DEFAULT_ENDPOINT: &str = "https://ipvigilante.com";

/// IP geolocation client backed by the IP Vigilante API
/// (https://www.ipvigilante.com/).
#[derive(Debug, Clone)]
pub struct IpVigilanteClient {
    endpoint: String,
    http: Client,
}

impl IpVigilanteClient {
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

impl Default for IpVigilanteClient {
    fn default() -> Self {
        Self::new()
    }
}

/// The location fields live under a `data` key in the response body.
#[derive(Debug, Deserialize)]
struct GeoEnvelope {
    data: Location,
}

#[async_trait]
impl GeoResolver for IpVigilanteClient {
    async fn fetch_coords(&self, ip: &str) -> Result<Location, FetchError> {
        if !model::is_dotted_quad(ip) {
            return Err(FetchError::Validation(format!(
                "{ip} is not a valid IPv4 address"
            )));
        }

        let url = format!("{}/{ip}", self.endpoint.trim_end_matches('/'));
        log::debug!("requesting geolocation from {url}");

        let res = self.http.get(&url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Upstream {
                context: format!("location lookup for IP address {ip}"),
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: GeoEnvelope = serde_json::from_str(&body)?;

        Ok(parsed.data)
    }
}
