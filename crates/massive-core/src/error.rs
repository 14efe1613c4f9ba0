//! Error types for Massive API calls.
//!
//! This module defines [`Error`], which covers every way a single request can
//! fail, and [`ErrorKind`], a fieldless discriminant for matching on the kind
//! of failure without caring about its payload.

use thiserror::Error;

/// Errors that can occur while calling the Massive API.
#[derive(Error, Debug)]
pub enum Error {
    /// The base URL and request path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP request could not be completed (DNS, connection, timeout, TLS).
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a status other than `200 OK`.
    #[error("API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Raw, unparsed response body.
        body: String,
    },

    /// The response body was not valid JSON or did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// No API key was found in the environment.
    #[error("MASSIVE_API_KEY environment variable not set")]
    MissingApiKey,

    /// A decoded response could not be converted into a DataFrame.
    #[error("DataFrame error: {0}")]
    DataFrame(String),
}

/// The kind of an [`Error`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidUrl`].
    InvalidUrl,
    /// See [`Error::RequestFailed`].
    RequestFailed,
    /// See [`Error::Api`].
    Api,
    /// See [`Error::Decode`].
    Decode,
    /// See [`Error::MissingApiKey`].
    Config,
    /// See [`Error::DataFrame`].
    DataFrame,
}

impl Error {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Self::RequestFailed(_) => ErrorKind::RequestFailed,
            Self::Api { .. } => ErrorKind::Api,
            Self::Decode(_) => ErrorKind::Decode,
            Self::MissingApiKey => ErrorKind::Config,
            Self::DataFrame(_) => ErrorKind::DataFrame,
        }
    }

    /// Returns the HTTP status code for [`Error::Api`] errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if repeating the same call might succeed.
    ///
    /// Transport failures and 5xx responses qualify. The client itself never
    /// retries; this is a hint for callers.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
