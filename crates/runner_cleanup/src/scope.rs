//! Runner scopes and the runners collection URL for each of them.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::errors::Error;

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;

/// The kind of GitHub entity self-hosted runners are registered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerScope {
    Repository,
    Organization,
    Enterprise,
}

impl RunnerScope {
    /// The REST API path segment that owns the runners collection.
    pub fn path_segment(self) -> &'static str {
        match self {
            RunnerScope::Repository => "repos",
            RunnerScope::Organization => "orgs",
            RunnerScope::Enterprise => "enterprises",
        }
    }

    /// Returns the runners collection URL of the named entity of this scope.
    ///
    /// # Errors
    /// Returns `Error::InvalidEndpoint` if the endpoint and name do not form a URL.
    pub fn runners_url(self, endpoint: &str, scope_name: &str) -> Result<Url, Error> {
        let endpoint = endpoint.trim_end_matches('/');
        Url::parse(&format!(
            "{}/{}/{}/actions/runners",
            endpoint,
            self.path_segment(),
            scope_name
        ))
        .map_err(|source| Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

impl FromStr for RunnerScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repository" => Ok(RunnerScope::Repository),
            "organization" => Ok(RunnerScope::Organization),
            "enterprise" => Ok(RunnerScope::Enterprise),
            other => Err(Error::InvalidScope(other.to_string())),
        }
    }
}

impl fmt::Display for RunnerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunnerScope::Repository => "repository",
            RunnerScope::Organization => "organization",
            RunnerScope::Enterprise => "enterprise",
        };
        f.write_str(name)
    }
}

/// Maps an endpoint, a scope type and a scope name to the runners collection URL.
///
/// ```
/// use runner_cleanup::scope::runners_url;
///
/// let url = runners_url("https://api.github.com", "organization", "acme").unwrap();
/// assert_eq!(url.as_str(), "https://api.github.com/orgs/acme/actions/runners");
/// ```
///
/// # Errors
///
/// - `Error::InvalidScope` for a scope type other than repository, organization or enterprise
/// - `Error::InvalidEndpoint` if the endpoint is not a valid base URL
pub fn runners_url(endpoint: &str, scope_type: &str, scope_name: &str) -> Result<Url, Error> {
    scope_type
        .parse::<RunnerScope>()?
        .runners_url(endpoint, scope_name)
}
