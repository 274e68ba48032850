//! Error types for GitHub client operations.
//!
//! This module defines the errors that can occur when talking to the self-hosted
//! runner endpoints of the GitHub REST API.

use reqwest::StatusCode;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// Callers usually care about the distinction between a missing resource
/// ([`Error::NotFound`]), a request that GitHub rejected with a message
/// ([`Error::Api`]) and a transport failure ([`Error::Http`]).
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.list_runners_page(&url).await {
///     Ok(page) => println!("{} runners", page.total_count),
///     Err(Error::NotFound) => eprintln!("No runners, check the token permissions"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the response body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Error deserializing the response from GitHub.
    ///
    /// This may indicate API version changes or a proxy returning something
    /// other than the GitHub JSON payload.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The requested resource was not found.
    ///
    /// GitHub answers 404 both for resources that do not exist and for
    /// resources the token is not allowed to see.
    #[error("Resource not found")]
    NotFound,

    /// GitHub rejected the request with a non-success status.
    ///
    /// The message is the `message` field of the GitHub error body when one
    /// was present, otherwise the canonical reason for the status.
    #[error("GitHub API returned {status}: {message}")]
    Api {
        /// The HTTP status of the response.
        status: StatusCode,
        /// The message reported by GitHub.
        message: String,
    },

    /// The request succeeded at the HTTP level but not with the status the
    /// operation expects, e.g. a delete that did not return 204.
    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(StatusCode),

    /// A URL could not be built from the given parts.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The token cannot be used as an HTTP header value.
    #[error("Failed to initialize GitHub client: {0}")]
    AuthError(String),
}
