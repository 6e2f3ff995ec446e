//! Web dashboard: the view model plus the axum server that exposes it.

pub mod server;

use crate::activity::aggregator::{build_snapshots, SnapshotOptions};
use crate::activity::discovery::{discover_repositories, DiscoveryStrategy};
use crate::activity::types::{ActivitySnapshot, RepositoryRef};
use crate::config::Config;
use crate::github::api;
use crate::github::client::HostApi;
use crate::github::fetch::Fetch;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const UNKNOWN_USER: &str = "Unknown User";

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub user: String,
    pub repos: Vec<RepositoryRef>,
    pub repo_data: Vec<ActivitySnapshot>,
}

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub repo_limit: usize,
    pub snapshot: SnapshotOptions,
}

impl DashboardOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            repo_limit: config.dashboard_repo_limit,
            snapshot: SnapshotOptions {
                commits_per_branch: config.commits_per_branch,
                pr_title_marker: config.pr_title_marker.clone(),
                concurrency: config.fetch_concurrency,
                ..SnapshotOptions::default()
            },
        }
    }
}

pub async fn authenticated_username<A: HostApi>(api: &A) -> String {
    match api::current_user(api).await {
        Fetch::Success(user) => user.login.unwrap_or_else(|| UNKNOWN_USER.to_string()),
        Fetch::Empty => UNKNOWN_USER.to_string(),
        Fetch::TransportFailure(e) => {
            tracing::warn!(error = %e, "user lookup failed");
            UNKNOWN_USER.to_string()
        }
    }
}

/// Keeps only repositories named in `selected`; an empty selection keeps all.
pub fn apply_filter(repos: Vec<RepositoryRef>, selected: &[String]) -> Vec<RepositoryRef> {
    if selected.is_empty() {
        return repos;
    }
    repos
        .into_iter()
        .filter(|r| selected.iter().any(|s| s.trim() == r.to_string()))
        .collect()
}

pub async fn build_dashboard<A: HostApi>(
    api: &A,
    options: &DashboardOptions,
    selected: &[String],
    now: DateTime<Utc>,
) -> DashboardView {
    let user = authenticated_username(api).await;
    let discovered = discover_repositories(api, DiscoveryStrategy::AllOrgsPlusPersonal).await;
    let repos = apply_filter(discovered, selected);
    let shown = &repos[..repos.len().min(options.repo_limit)];
    let repo_data = build_snapshots(api, shown, &options.snapshot, now).await;

    DashboardView {
        user,
        repos,
        repo_data,
    }
}
