//! Errors raised while resolving the configuration or cleaning up runners.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that stop a cleanup run.
///
/// Listing failures reported by GitHub are not in here: the lister treats them
/// as "no runners" and the run ends through the empty-list path instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A required environment variable and its fallback are both unset.
    #[error("Configuration error: {0} environment variable not set")]
    MissingSetting(String),

    /// An environment variable holds a value that cannot be used.
    #[error("Configuration error: invalid value '{value}' for {name}")]
    InvalidSetting { name: &'static str, value: String },

    /// The scope type is not one of repository, organization or enterprise.
    #[error("Invalid runner scope: '{0}'")]
    InvalidScope(String),

    /// The API endpoint does not form a valid URL.
    #[error("Invalid API endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// Pagination returned a different number of runners than GitHub reported.
    ///
    /// Usually runners were registered or removed while the pages were read.
    #[error("Runner count mismatch: GitHub reported {expected} runners but {actual} were listed")]
    RunnerCountMismatch { expected: u64, actual: usize },

    /// The GitHub client could not be created.
    #[error(transparent)]
    Client(#[from] github_client::Error),
}
