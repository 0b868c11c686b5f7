use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Failure of a single upstream fetch.
///
/// `Validation` is raised before any request leaves the process; the other
/// three variants correspond to the fate of an issued request: the transport
/// failed, the upstream answered with a non-success status, or the body was
/// unparsable despite a success status.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{context} failed with status {status}: {body}")]
    Upstream {
        context: String,
        status: StatusCode,
        body: String,
    },

    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Tag this error with the pipeline stage it occurred in.
    pub fn at(self, stage: Stage) -> PipelineError {
        PipelineError { stage, source: self }
    }
}

/// The pipeline stage a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveIp,
    ResolveLocation,
    ResolvePassTimes,
    Format,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::ResolveIp => "while resolving IP",
            Stage::ResolveLocation => "while resolving location",
            Stage::ResolvePassTimes => "while resolving pass times",
            Stage::Format => "while formatting",
        })
    }
}

/// A stage failure surfaced by [`Pipeline`](crate::Pipeline).
///
/// Wraps the originating [`FetchError`] without discarding it; the stage tag
/// tells the user which of the chained calls broke.
#[derive(Debug, Error)]
#[error("{stage}: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: FetchError,
}
