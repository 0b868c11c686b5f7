use crate::{
    error::FetchError,
    model::{Location, PassWindow},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod ipify;
pub mod ipvigilante;
pub mod open_notify;

pub use ipify::IpifyClient;
pub use ipvigilante::IpVigilanteClient;
pub use open_notify::OpenNotifyClient;

/// Number of passes requested when the caller does not say otherwise.
pub const DEFAULT_PASS_COUNT: u32 = 5;

/// Resolves the caller's own public IPv4 address.
#[async_trait]
pub trait IpResolver: Send + Sync + Debug {
    /// Returns the address as a string, unvalidated; validation is the
    /// consumer's job.
    async fn fetch_my_ip(&self) -> Result<String, FetchError>;
}

/// Maps an IPv4 address to an approximate geographic location.
#[async_trait]
pub trait GeoResolver: Send + Sync + Debug {
    /// Fails with `FetchError::Validation` before any request is issued if
    /// `ip` is not a dotted-quad string.
    async fn fetch_coords(&self, ip: &str) -> Result<Location, FetchError>;
}

/// Maps a location to the next predicted ISS passes over it.
#[async_trait]
pub trait PassTimeResolver: Send + Sync + Debug {
    /// Returns up to `count` passes in upstream (chronological) order.
    /// Fails with `FetchError::Validation` before any request is issued if
    /// the coordinates are not finite numbers.
    async fn fetch_pass_times(
        &self,
        location: &Location,
        count: u32,
    ) -> Result<Vec<PassWindow>, FetchError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Back off to a char boundary; upstream error pages are not always ASCII.
    let end = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
    format!("{}...", &body[..end])
}
