//! Run configuration loaded from environment variables.

use std::env;

use github_client::DEFAULT_API_ENDPOINT;
use secrecy::SecretString;

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Number of runners requested per page when `PER_PAGE` is unset.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Scope type used when `SCOPE_TYPE` is unset.
pub const DEFAULT_SCOPE_TYPE: &str = "repository";

/// Settings for a single cleanup run.
///
/// Resolved once at startup and passed by reference to every step; nothing
/// reads the environment after this.
#[derive(Debug)]
pub struct RunConfig {
    /// Base URL of the GitHub REST API, without a trailing slash
    pub api_endpoint: String,
    /// Personal access token or workflow token
    pub token: SecretString,
    /// "repository", "organization" or "enterprise"; checked when the URL is built
    pub scope_type: String,
    /// "owner/repo", the organization login or the enterprise slug
    pub scope_name: String,
    /// Report offline runners instead of deleting them
    pub dry_run: bool,
    /// Page size for the runners listing
    pub per_page: u32,
    /// Only runners whose name contains this string are deleted
    pub name_filter: String,
    /// Fail when the listed runners don't add up to GitHub's total count
    pub mismatch_check: bool,
}

impl RunConfig {
    /// Load the run configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `GITHUB_API_ENDPOINT`: API base URL (default `https://api.github.com`)
    /// - `GITHUB_PAT`: token, falling back to `GITHUB_TOKEN`
    /// - `SCOPE_TYPE`: `repository` (default), `organization` or `enterprise`
    /// - `SCOPE_NAME`: scope name, falling back to `GITHUB_REPOSITORY`
    /// - `DRY_RUN`: set to anything to only report deletions
    /// - `PER_PAGE`: page size (default 30)
    /// - `FUZZY_NAME`: runner name substring filter (default matches all)
    /// - `RUNNER_MISMATCH_CHECK`: set to anything to verify the runner count
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var_os(key).map(|value| value.to_string_lossy().into_owned()))
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// - `Error::MissingSetting` if no token or no scope name can be found
    /// - `Error::InvalidSetting` if `PER_PAGE` is not a positive number
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_endpoint = lookup("GITHUB_API_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        let token = lookup("GITHUB_PAT")
            .or_else(|| lookup("GITHUB_TOKEN"))
            .map(SecretString::from)
            .ok_or_else(|| Error::MissingSetting("GITHUB_PAT or GITHUB_TOKEN".to_string()))?;

        let scope_type = lookup("SCOPE_TYPE").unwrap_or_else(|| DEFAULT_SCOPE_TYPE.to_string());

        let scope_name = lookup("SCOPE_NAME")
            .or_else(|| lookup("GITHUB_REPOSITORY"))
            .ok_or_else(|| Error::MissingSetting("SCOPE_NAME or GITHUB_REPOSITORY".to_string()))?;

        let per_page = match lookup("PER_PAGE") {
            None => DEFAULT_PER_PAGE,
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(Error::InvalidSetting {
                        name: "PER_PAGE",
                        value,
                    });
                }
            },
        };

        Ok(Self {
            api_endpoint,
            token,
            scope_type,
            scope_name,
            dry_run: lookup("DRY_RUN").is_some(),
            per_page,
            name_filter: lookup("FUZZY_NAME").unwrap_or_default(),
            mismatch_check: lookup("RUNNER_MISMATCH_CHECK").is_some(),
        })
    }
}
