//! Crate for interacting with the self-hosted runner endpoints of the GitHub REST API.
//!
//! This crate provides a client for making token-authenticated requests to GitHub
//! to list the runners registered to a scope and to remove them again.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, instrument};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{Runner, RunnerLabel, RunnerList, RunnerStatus, RunnersPage};

pub mod pagination;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The public GitHub API host, used when no GitHub Enterprise Server endpoint is given.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.github.com";

/// Media type for version 3 of the REST API.
pub const GITHUB_V3_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!("offline-runner-cleanup/", env!("CARGO_PKG_VERSION"));

/// Operations on the runners collection of a single scope.
///
/// Both methods take the collection URL (`.../actions/runners`) so the caller
/// decides which repository, organization or enterprise is addressed.
#[async_trait]
pub trait RunnerClient: Send + Sync {
    /// Fetches one page of runners.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` if GitHub answers 404 (missing scope or missing permissions)
    /// - `Error::Api` for any other non-success status, carrying GitHub's message
    /// - `Error::Http` or `Error::Deserialization` for transport and payload failures
    async fn list_runners_page(&self, url: &Url) -> Result<RunnersPage, Error>;

    /// Removes a runner from the collection.
    ///
    /// Succeeds only when GitHub answers 204 No Content.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` if the runner no longer exists
    /// - `Error::UnexpectedStatus` for any other status
    async fn delete_runner(&self, runners_url: &Url, runner_id: u64) -> Result<(), Error>;
}

/// A client for the GitHub API, authenticated with a personal access or workflow token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
}

impl GitHubClient {
    /// Creates a new client that sends `Authorization: token <token>` with every request.
    ///
    /// # Errors
    /// Returns an `Error::AuthError` if the token is not a valid header value and
    /// `Error::Http` if the underlying HTTP client cannot be built.
    pub fn new(token: &SecretString) -> Result<Self, Error> {
        let mut authorization = HeaderValue::from_str(&format!("token {}", token.expose_secret()))
            .map_err(|e| {
                error!("The token cannot be used in an Authorization header");
                Error::AuthError(e.to_string())
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_V3_MEDIA_TYPE));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RunnerClient for GitHubClient {
    #[instrument(skip(self), fields(url = %url))]
    async fn list_runners_page(&self, url: &Url) -> Result<RunnersPage, Error> {
        debug!("Requesting page of runners");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Runners collection not found");
            return Err(Error::NotFound);
        }

        if !status.is_success() {
            let message = error_message(status, &response.text().await.unwrap_or_default());
            error!(
                status = status.as_u16(),
                error_message = message,
                "Received an error from GitHub"
            );
            return Err(Error::Api { status, message });
        }

        let next = pagination::next_page_url(response.headers());
        let body = response.bytes().await?;
        let list: RunnerList = serde_json::from_slice(&body)?;

        debug!(
            total_count = list.total_count,
            count = list.runners.len(),
            has_next = next.is_some(),
            "Retrieved page of runners"
        );

        Ok(RunnersPage {
            total_count: list.total_count,
            runners: list.runners,
            next,
        })
    }

    #[instrument(skip(self, runners_url), fields(runner_id = runner_id))]
    async fn delete_runner(&self, runners_url: &Url, runner_id: u64) -> Result<(), Error> {
        let url = runner_url(runners_url, runner_id)?;
        let response = self.client.delete(url).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT => {
                info!(runner_id = runner_id, "GitHub confirmed runner removal");
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(Error::NotFound),
            status => Err(Error::UnexpectedStatus(status)),
        }
    }
}

/// Builds the URL of a single runner, `{runners_url}/{runner_id}`.
pub fn runner_url(runners_url: &Url, runner_id: u64) -> Result<Url, Error> {
    let base = runners_url.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{}/{}", base, runner_id))?)
}

/// Extracts the `message` of a GitHub error body, falling back to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<models::ApiErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}
