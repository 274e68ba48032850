//! # Models
//!
//! Data models for the self-hosted runner endpoints of the GitHub REST API.
//!
//! Only the fields the cleanup needs are required; everything else GitHub
//! sends is either optional here or ignored.

use serde::{Deserialize, Serialize};
use url::Url;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Connection state GitHub reports for a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerStatus {
    /// The runner is connected and can pick up jobs.
    Online,
    /// The runner has not been in contact with GitHub recently.
    Offline,
    /// Any status value this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A label attached to a self-hosted runner.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerLabel {
    pub name: String,

    /// Either "read-only" (assigned by GitHub) or "custom".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub label_type: Option<String>,
}

/// A self-hosted runner registered to a repository, organization or enterprise.
///
/// # Examples
///
/// ```
/// use github_client::models::{Runner, RunnerStatus};
///
/// let runner: Runner = serde_json::from_str(
///     r#"{"id": 7, "name": "build-01", "status": "offline"}"#,
/// ).unwrap();
///
/// assert!(runner.is_offline());
/// assert_eq!(runner.status, RunnerStatus::Offline);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Runner {
    /// The unique ID of the runner within its scope
    pub id: u64,
    /// The display name of the runner
    pub name: String,
    /// The connection state of the runner
    pub status: RunnerStatus,
    /// The operating system the runner reported, e.g. "linux"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    /// Whether the runner is currently executing a job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub busy: Option<bool>,
    #[serde(default)]
    pub labels: Vec<RunnerLabel>,
}

impl Runner {
    pub fn is_offline(&self) -> bool {
        self.status == RunnerStatus::Offline
    }
}

/// The JSON body of a runners list response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerList {
    /// Number of runners in the whole collection, not just this page
    pub total_count: u64,
    pub runners: Vec<Runner>,
}

/// One page of runners together with the link to the following page.
#[derive(Debug, Clone)]
pub struct RunnersPage {
    /// Number of runners in the whole collection as reported by this page
    pub total_count: u64,
    /// The runners on this page, in API order
    pub runners: Vec<Runner>,
    /// The `rel="next"` link, absent on the last page
    pub next: Option<Url>,
}

/// The error body GitHub returns for failed requests.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
