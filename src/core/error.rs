use thiserror::Error;

/// Failures talking to the upstream commerce API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid header value for {header}")]
    InvalidHeader { header: &'static str },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Payload decoded fine but is not shaped the way the checker expects.
#[derive(Debug, Error)]
#[error("unexpected {endpoint} payload: {detail}")]
pub struct ShapeError {
    pub endpoint: &'static str,
    pub detail: String,
}

/// Anything a single checker run can fail with.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CHECK_INTERVAL must be a non-negative number of seconds, got {0:?}")]
    InvalidInterval(String),
}
