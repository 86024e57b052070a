use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Failure of a call to one of the third-party HTTP collaborators.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,

    #[error("no data for {0}")]
    NoData(String),
}

impl ProviderError {
    /// Classifies an error raised while sending a request.
    pub fn from_send(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Network(e.to_string())
        }
    }

    /// Classifies an error raised while reading or decoding a response body.
    pub fn from_body(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::Parse(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

/// Passes 2xx responses through; 429 maps to `RateLimited`, anything else
/// non-2xx to `BadResponse`.
pub fn check_status(resp: Response) -> Result<Response, ProviderError> {
    let status = resp.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited);
    }
    if !status.is_success() {
        return Err(ProviderError::BadResponse(format!("HTTP {}", status)));
    }
    Ok(resp)
}
