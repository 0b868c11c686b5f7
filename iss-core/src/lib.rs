//! Core library for the `iss` CLI.
//!
//! This crate defines:
//! - The three upstream resolvers (public IP, geolocation, ISS pass times)
//! - The sequential pipeline that chains them into one report
//! - Error taxonomy shared by all stages
//! - Configuration (endpoint overrides, default pass count)
//!
//! It is used by `iss-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use config::Config;
pub use error::{FetchError, PipelineError, Stage};
pub use model::{Location, PassWindow};
pub use pipeline::Pipeline;
pub use resolver::{GeoResolver, IpResolver, PassTimeResolver};
