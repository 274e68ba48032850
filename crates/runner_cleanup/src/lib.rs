//! Offline self-hosted runner cleanup.
//!
//! This crate finds the self-hosted runners registered to a repository,
//! organization or enterprise and removes the ones GitHub reports as offline.
//! It can be used both programmatically and via the `cleanup-runners` binary,
//! which is configured entirely through environment variables.

use github_client::{GitHubClient, Runner, RunnerClient};
use tracing::{debug, error, info, warn};
use url::Url;

pub mod config;
pub mod errors;
pub mod scope;

pub use config::RunConfig;
pub use errors::Error;
pub use scope::RunnerScope;

/// A runner that matched the deletion criteria but could not be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDeletion {
    pub runner_id: u64,
    pub runner_name: String,
    pub reason: String,
}

/// What a pass over the runner list did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupSummary {
    /// Number of runners inspected
    pub checked: usize,
    /// Names of the runners GitHub confirmed as removed
    pub deleted: Vec<String>,
    /// Names of the runners a dry run would have removed
    pub would_delete: Vec<String>,
    /// Runners whose removal was attempted but not confirmed
    pub failed: Vec<FailedDeletion>,
}

/// The result of a complete cleanup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The listing produced no runners, either because there are none or
    /// because GitHub refused the request.
    NoRunners,
    /// The runners were listed and the offline ones processed.
    Completed(CleanupSummary),
}

/// Runner cleanup operations for a single scope.
pub struct RunnerCleanup<C: RunnerClient> {
    client: C,
    scope_name: String,
}

impl<C: RunnerClient> RunnerCleanup<C> {
    /// Create a new cleanup instance.
    ///
    /// # Arguments
    ///
    /// * `client` - Authenticated runner client
    /// * `scope_name` - Name of the repository, organization or enterprise, used in diagnostics
    pub fn new(client: C, scope_name: String) -> Self {
        Self { client, scope_name }
    }

    /// Decides whether a runner is removed: it must be offline and its name
    /// must contain `name_filter`. An empty filter matches every name.
    pub fn should_delete(runner: &Runner, name_filter: &str) -> bool {
        runner.is_offline() && runner.name.contains(name_filter)
    }

    /// List every runner of the collection, following the pagination links.
    ///
    /// A 404 or any other failed first request is logged and yields an empty
    /// list. A failure on a later page ends the listing with the runners read
    /// so far.
    ///
    /// # Errors
    ///
    /// Returns `Error::RunnerCountMismatch` when `mismatch_check` is set and the
    /// number of listed runners differs from the total GitHub reported on the
    /// first page.
    pub async fn list_runners(
        &self,
        runners_url: &Url,
        per_page: u32,
        mismatch_check: bool,
    ) -> Result<Vec<Runner>, Error> {
        let mut url = runners_url.clone();
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string());

        info!(
            scope_name = self.scope_name,
            per_page = per_page,
            "Getting runners"
        );

        let first_page = match self.client.list_runners_page(&url).await {
            Ok(page) => page,
            Err(github_client::Error::NotFound) => {
                warn!(
                    scope_name = self.scope_name,
                    "No runners found for {}", self.scope_name
                );
                warn!("Perhaps check the token permissions?");
                return Ok(Vec::new());
            }
            Err(github_client::Error::Api { status, message }) => {
                error!(
                    scope_name = self.scope_name,
                    status = status.as_u16(),
                    "Connection issue: {}",
                    message
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    scope_name = self.scope_name,
                    error = %err,
                    "Connection issue: {}",
                    err
                );
                return Ok(Vec::new());
            }
        };

        let total_count = first_page.total_count;
        let mut runners = first_page.runners;
        let mut next = first_page.next;
        let mut page = 1u32;

        while let Some(next_url) = next.take() {
            page += 1;
            debug!(page = page, url = %next_url, "Fetching page {} of runners", page);

            match self.client.list_runners_page(&next_url).await {
                Ok(next_page) => {
                    debug!(
                        page = page,
                        count = next_page.runners.len(),
                        "Retrieved {} runners on page {}",
                        next_page.runners.len(),
                        page
                    );
                    runners.extend(next_page.runners);
                    next = next_page.next;
                }
                Err(err) => {
                    warn!(
                        page = page,
                        error = %err,
                        "Failed to fetch page of runners, continuing with {} runners",
                        runners.len()
                    );
                }
            }
        }

        info!(total_count = total_count, "Total runners {}", total_count);
        info!(count = runners.len(), "Runners list count {}", runners.len());

        if mismatch_check && runners.len() as u64 != total_count {
            error!(
                expected = total_count,
                actual = runners.len(),
                "Runner count mismatch"
            );
            return Err(Error::RunnerCountMismatch {
                expected: total_count,
                actual: runners.len(),
            });
        }

        Ok(runners)
    }

    /// Remove the offline runners matching `name_filter`, one at a time.
    ///
    /// In a dry run the matching runners are only reported. A runner that
    /// cannot be removed is logged and recorded; the remaining runners are
    /// still processed.
    pub async fn delete_offline_runners(
        &self,
        runners_url: &Url,
        runners: &[Runner],
        dry_run: bool,
        name_filter: &str,
    ) -> CleanupSummary {
        info!(
            scope_name = self.scope_name,
            dry_run = dry_run,
            name_filter = name_filter,
            "Deleting runners"
        );

        let mut summary = CleanupSummary::default();

        for runner in runners {
            summary.checked += 1;
            info!(
                runner_id = runner.id,
                runner_name = runner.name,
                status = ?runner.status,
                "Checking runner {}",
                runner.name
            );

            if !Self::should_delete(runner, name_filter) {
                continue;
            }

            if dry_run {
                info!(
                    runner_id = runner.id,
                    runner_name = runner.name,
                    "Runner {} is offline and would be deleted",
                    runner.name
                );
                summary.would_delete.push(runner.name.clone());
                continue;
            }

            match self.client.delete_runner(runners_url, runner.id).await {
                Ok(()) => {
                    info!(
                        runner_id = runner.id,
                        runner_name = runner.name,
                        "Deleted runner {}",
                        runner.name
                    );
                    summary.deleted.push(runner.name.clone());
                }
                Err(err) => {
                    warn!(
                        runner_id = runner.id,
                        runner_name = runner.name,
                        error = %err,
                        "Failed to delete runner {}",
                        runner.name
                    );
                    summary.failed.push(FailedDeletion {
                        runner_id: runner.id,
                        runner_name: runner.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            checked = summary.checked,
            deleted = summary.deleted.len(),
            would_delete = summary.would_delete.len(),
            failed = summary.failed.len(),
            "Cleanup completed"
        );

        summary
    }

    /// List the runners and process the offline ones according to `config`.
    pub async fn execute(&self, config: &RunConfig, runners_url: &Url) -> Result<RunOutcome, Error> {
        let runners = self
            .list_runners(runners_url, config.per_page, config.mismatch_check)
            .await?;

        if runners.is_empty() {
            return Ok(RunOutcome::NoRunners);
        }

        let summary = self
            .delete_offline_runners(runners_url, &runners, config.dry_run, &config.name_filter)
            .await;

        Ok(RunOutcome::Completed(summary))
    }
}

/// Run a complete cleanup: build the scope URL, create the client, list the
/// runners and remove the offline ones.
///
/// # Errors
///
/// - `Error::InvalidScope` or `Error::InvalidEndpoint` before any request is made
/// - `Error::Client` if the token cannot be used
/// - `Error::RunnerCountMismatch` if the count check is enabled and fails
pub async fn run(config: &RunConfig) -> Result<RunOutcome, Error> {
    let runners_url = scope::runners_url(&config.api_endpoint, &config.scope_type, &config.scope_name)?;
    let client = GitHubClient::new(&config.token)?;

    RunnerCleanup::new(client, config.scope_name.clone())
        .execute(config, &runners_url)
        .await
}

/// Initialize logging for cleanup runs.
///
/// Sets up tracing with appropriate formatting for CLI use. The filter comes
/// from `RUST_LOG` and defaults to `info`.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
