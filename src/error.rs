//! Standard errors used by all functions in the crate.

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Error collecting all possible failures of the BRI client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The HTTP request could not be built (malformed URL, invalid header value).
    #[error("Request creation failed: {0}")]
    RequestBuild(anyhow::Error),
    /// The outgoing request record could not be serialized.
    #[error("Cannot encode request body: {0}")]
    Encode(serde_json::Error),
    /// Network failure. When retries are enabled this is the cause of the last attempt.
    #[error("Cannot send request: {0}")]
    Transport(anyhow::Error),
    /// The response body could not be read.
    #[error("Cannot read response body: {0}")]
    Read(reqwest::Error),
    /// The server answered `404 Not Found`.
    #[error("invalid url")]
    InvalidUrl,
    /// The server answered `204 No Content`.
    #[error("204: empty response")]
    EmptyResponse,
    /// The server answered `200 OK` with a body that does not match the expected record.
    ///
    /// BRI does this for transactions that are not finalized yet. If the body is a BRI
    /// error payload, it is kept here.
    #[error("transaction is pending")]
    PendingTransaction(Option<ErrorResponse>),
    /// The response body matched neither the expected record nor the error payload.
    #[error("Cannot decode response body: {0}")]
    Decode(serde_json::Error),
    /// Error payload returned by a BRI API endpoint.
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::Transport(e.into()),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Transport)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// BRI HTTP APIs error.
#[derive(thiserror::Error, Debug)]
pub struct ApiError {
    /// HTTP status returned by the server.
    pub status: u16,
    /// Error payload decoded from the response body.
    pub payload: ErrorResponse,
}

impl ApiError {
    /// Shortcut to the BRI error code, if the payload carried one.
    pub fn error_code(&self) -> Option<&str> {
        self.payload.error_code.as_deref()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BRI HTTP error {}", self.status)?;

        if let Some(ref code) = self.payload.error_code {
            write!(f, ": {}", code)?;
        }

        if let Some(ref desc) = self.payload.error_desc {
            write!(f, " ({})", desc)?;
        }

        Ok(())
    }
}

/// Body of an error response from the BRI Direct Debit APIs.
///
/// Fields not modelled explicitly are kept in `extra`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_code: Option<String>,
    pub error_desc: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}
