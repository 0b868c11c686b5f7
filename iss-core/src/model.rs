use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

/// Digit-group check only; no range validation of the octets.
static DOTTED_QUAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("hard-coded pattern"));

/// Whether `s` looks like a dotted-quad IPv4 address.
pub fn is_dotted_quad(s: &str) -> bool {
    DOTTED_QUAD.is_match(s)
}

/// Approximate geographic position resolved from an IP address.
///
/// The geolocation upstream serializes latitude/longitude as JSON strings;
/// deserialization accepts both strings and numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "coord")]
    pub latitude: f64,
    #[serde(deserialize_with = "coord")]
    pub longitude: f64,
    #[serde(default, deserialize_with = "opt_coord")]
    pub altitude: Option<f64>,
    #[serde(default, rename = "city_name")]
    pub city: Option<String>,
    #[serde(default, rename = "country_name")]
    pub country: Option<String>,
}

impl Location {
    /// Both coordinates are present and finite.
    pub fn has_valid_coords(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// One predicted overhead pass of the ISS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PassWindow {
    /// Start of visibility, Unix seconds.
    #[serde(rename = "risetime")]
    pub rise_time: i64,
    /// Length of visibility, seconds.
    #[serde(rename = "duration")]
    pub duration_secs: i64,
}

fn coord<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

fn opt_coord<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrap(#[serde(deserialize_with = "coord")] f64);

    Option::<Wrap>::deserialize(deserializer).map(|opt| opt.map(|w| w.0))
}
