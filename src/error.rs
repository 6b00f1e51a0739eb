use thiserror::Error;

/// Why a fetch produced no usable payload.
///
/// A collection response that simply lacks its `_embedded` section is *not*
/// an error; it parses to an empty envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("unexpected payload: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        FetchError::Malformed(msg.into())
    }
}
