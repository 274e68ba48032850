//! Remove offline self-hosted runners.
//!
//! This binary deletes the runners of a repository, organization or enterprise
//! that GitHub reports as offline. It's designed to be run on a schedule from
//! GitHub Actions or manually for maintenance.
//!
//! Usage:
//!   cleanup-runners
//!
//! Environment variables (all optional):
//! - GITHUB_API_ENDPOINT: API base URL, for GitHub Enterprise Server
//! - GITHUB_PAT: token with runner admin rights (falls back to GITHUB_TOKEN)
//! - SCOPE_TYPE: "repository" (default), "organization" or "enterprise"
//! - SCOPE_NAME: e.g. "octo-org/octo-repo" (falls back to GITHUB_REPOSITORY)
//! - DRY_RUN: set to anything to only report what would be deleted
//! - PER_PAGE: runners per page (default 30)
//! - FUZZY_NAME: only delete runners whose name contains this string
//! - RUNNER_MISMATCH_CHECK: set to anything to fail on an inconsistent listing
//!
//! Exits with 1 when no runners were found or the configuration is invalid.

use std::process;

use anyhow::Context;
use runner_cleanup::{RunConfig, RunOutcome};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    runner_cleanup::init_logging();

    println!("🧹 Offline Runner Cleanup");
    println!("=========================");
    println!();

    // Load configuration from environment
    let config = RunConfig::from_env().context("Failed to load configuration")?;

    println!("📋 Configuration:");
    println!("   API endpoint: {}", config.api_endpoint);
    println!("   Scope: {} {}", config.scope_type, config.scope_name);
    println!("   Dry run: {}", config.dry_run);
    println!("   Name filter: {:?}", config.name_filter);
    println!();

    let outcome = match runner_cleanup::run(&config).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(error = %err, "Cleanup failed");
            process::exit(1);
        }
    };

    let summary = match outcome {
        RunOutcome::NoRunners => {
            println!("⚠️  No runners to process");
            process::exit(1);
        }
        RunOutcome::Completed(summary) => summary,
    };

    println!();
    println!("✅ Cleanup completed!");
    println!("   Checked {} runners", summary.checked);

    if config.dry_run {
        println!("   {} runners would be deleted", summary.would_delete.len());
        for name in &summary.would_delete {
            println!("   - {}", name);
        }
    } else {
        println!("   Deleted {} runners", summary.deleted.len());
        for name in &summary.deleted {
            println!("   - {}", name);
        }
    }

    if !summary.failed.is_empty() {
        println!();
        println!("❌ Not deleted:");
        for failed in &summary.failed {
            println!("   - {} ({})", failed.runner_name, failed.reason);
        }
    }

    Ok(())
}
