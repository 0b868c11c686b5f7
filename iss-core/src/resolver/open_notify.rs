use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{Location, PassWindow},
};

use super::{PassTimeResolver, truncate_body};

pub const DEFAULT_ENDPOINT: &str = "http://api.open-notify.org/iss-pass.json";

/// Pass-time client backed by the Open Notify API, which relays NASA's data
/// (http://open-notify.org/Open-Notify-API/ISS-Pass-Times/).
#[derive(Debug, Clone)]
pub struct OpenNotifyClient {
    endpoint: String,
    http: Client,
}

impl OpenNotifyClient {
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

impl Default for OpenNotifyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct PassEnvelope {
    response: Vec<PassWindow>,
}

#[async_trait]
impl PassTimeResolver for OpenNotifyClient {
    async fn fetch_pass_times(
        &self,
        location: &Location,
        count: u32,
    ) -> Result<Vec<PassWindow>, FetchError> {
        if !location.has_valid_coords() {
            return Err(FetchError::Validation(
                "coordinates do not include a valid latitude and longitude".to_string(),
            ));
        }

        let mut query = vec![
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
        ];
        // Altitude is optional for this API.
        if let Some(alt) = location.altitude {
            query.push(("alt", alt.to_string()));
        }
        query.push(("n", count.to_string()));

        log::debug!("requesting {count} pass times from {}", self.endpoint);

        let res = self.http.get(&self.endpoint).query(&query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Upstream {
                context: "ISS pass time retrieval".to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: PassEnvelope = serde_json::from_str(&body)?;

        // Upstream order is already chronological; keep it as-is.
        Ok(parsed.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(lat: f64, lon: f64) -> Location {
        serde_json::from_str(&format!(r#"{{"latitude": {lat}, "longitude": {lon}}}"#)).unwrap()
    }

    #[tokio::test]
    async fn non_finite_coordinates_are_rejected_before_any_request() {
        let client = OpenNotifyClient::new();

        let mut loc = location(37.4, -122.1);
        loc.latitude = f64::NAN;

        let err = client.fetch_pass_times(&loc, 5).await.unwrap_err();
        match err {
            FetchError::Validation(msg) => {
                assert_eq!(msg, "coordinates do not include a valid latitude and longitude")
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn valid_coordinates_pass_the_check() {
        let client = OpenNotifyClient::with_endpoint("http://127.0.0.1:1".to_string());

        let err = client.fetch_pass_times(&location(37.4, -122.1), 5).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[test]
    fn pass_envelope_preserves_count_and_order() {
        let parsed: PassEnvelope = serde_json::from_str(
            r#"{"message": "success",
                "response": [{"duration": 500, "risetime": 100},
                             {"duration": 600, "risetime": 200},
                             {"duration": 700, "risetime": 300}]}"#,
        )
        .unwrap();

        assert_eq!(parsed.response.len(), 3);
        let rise_times: Vec<i64> = parsed.response.iter().map(|p| p.rise_time).collect();
        assert_eq!(rise_times, vec![100, 200, 300]);
    }
}
