use crate::activity::normalize::normalize_commit;
use crate::activity::types::{
    ActivitySnapshot, PullRequest, RepositoryRef, MAIN_BRANCH, NO_BRANCHES_PLACEHOLDER,
};
use crate::github::api;
use crate::github::client::HostApi;
use crate::github::fetch::Fetch;
use crate::github::types::{CommitWire, PullWire};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;

/// How the primary branch of a repository is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryBranchPolicy {
    Literal(String),
    /// Ask the host for the default branch, falling back to `main`.
    HostDefault,
}

impl Default for PrimaryBranchPolicy {
    fn default() -> Self {
        PrimaryBranchPolicy::Literal(MAIN_BRANCH.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchScope {
    AllBranches,
    PrimaryOnly,
}

#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    pub primary: PrimaryBranchPolicy,
    pub scope: BranchScope,
    pub commits_per_branch: usize,
    pub pr_title_marker: String,
    pub concurrency: usize,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            primary: PrimaryBranchPolicy::default(),
            scope: BranchScope::AllBranches,
            commits_per_branch: 5,
            pr_title_marker: "🔔".to_string(),
            concurrency: 4,
        }
    }
}

pub async fn resolve_primary_branch<A: HostApi>(
    api: &A,
    repo: &RepositoryRef,
    policy: &PrimaryBranchPolicy,
) -> String {
    match policy {
        PrimaryBranchPolicy::Literal(name) => name.clone(),
        PrimaryBranchPolicy::HostDefault => api::repository(api, repo)
            .await
            .success()
            .and_then(|r| r.default_branch)
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!(%repo, "default branch unknown, assuming {MAIN_BRANCH}");
                MAIN_BRANCH.to_string()
            }),
    }
}

/// Assembles the activity snapshot for one repository. Never fails: each
/// fetch that goes wrong just contributes nothing.
pub async fn build_snapshot<A: HostApi>(
    api: &A,
    repo: &RepositoryRef,
    options: &SnapshotOptions,
    now: DateTime<Utc>,
) -> ActivitySnapshot {
    let primary = resolve_primary_branch(api, repo, &options.primary).await;

    let branches = match options.scope {
        BranchScope::PrimaryOnly => vec![primary.clone()],
        BranchScope::AllBranches => list_branches(api, repo).await,
    };

    let pull_requests = decorate_pulls(
        api::open_pulls(api, repo)
            .await
            .or_empty(&format!("pull requests of {repo}")),
        &options.pr_title_marker,
    );

    let ordered = primary_first(branches, &primary)
        .into_iter()
        .filter(|b| b != NO_BRANCHES_PLACEHOLDER);
    let fetched: Vec<(String, Vec<CommitWire>)> = stream::iter(ordered)
        .map(|branch| async move {
            let commits = api::branch_commits(api, repo, &branch)
                .await
                .or_empty(&format!("commits of {repo}@{branch}"));
            (branch, commits)
        })
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    let mut snapshot = ActivitySnapshot::empty(repo.clone(), primary);
    snapshot.pull_requests = pull_requests;
    let mut main_hashes: HashSet<String> = HashSet::new();

    for (branch, raw) in &fetched {
        let is_primary = *branch == snapshot.primary_branch;
        for wire in raw.iter().take(options.commits_per_branch) {
            let Some(mut commit) = normalize_commit(wire, branch, now) else {
                tracing::warn!(%repo, sha = %wire.sha, "skipping commit with unreadable timestamp");
                continue;
            };
            if is_primary {
                main_hashes.insert(commit.hash.clone());
                snapshot.main_commits.push(commit);
            } else {
                commit.is_also_on_main = Some(main_hashes.contains(&commit.hash));
                snapshot.other_commits.push(commit);
            }
        }
    }

    tracing::debug!(
        %repo,
        prs = snapshot.pull_requests.len(),
        main = snapshot.main_commits.len(),
        other = snapshot.other_commits.len(),
        "snapshot built"
    );
    snapshot
}

/// Builds snapshots for several repositories concurrently; output order
/// follows `repos`.
pub async fn build_snapshots<A: HostApi>(
    api: &A,
    repos: &[RepositoryRef],
    options: &SnapshotOptions,
    now: DateTime<Utc>,
) -> Vec<ActivitySnapshot> {
    stream::iter(repos.iter().cloned())
        .map(|repo| async move { build_snapshot(api, &repo, options, now).await })
        .buffered(options.concurrency.max(1))
        .collect()
        .await
}

async fn list_branches<A: HostApi>(api: &A, repo: &RepositoryRef) -> Vec<String> {
    let names = api::branches(api, repo)
        .await
        .map(|list| list.into_iter().map(|b| b.name).collect::<Vec<String>>());
    match names {
        Fetch::Success(list) => list,
        Fetch::Empty => vec![NO_BRANCHES_PLACEHOLDER.to_string()],
        Fetch::TransportFailure(e) => {
            tracing::warn!(%repo, error = %e, "branch listing failed");
            Vec::new()
        }
    }
}

/// Moves `primary` to the front, keeping the host order of the rest.
fn primary_first(branches: Vec<String>, primary: &str) -> Vec<String> {
    let (mut ordered, rest): (Vec<String>, Vec<String>) =
        branches.into_iter().partition(|b| b == primary);
    ordered.truncate(1);
    ordered.extend(rest);
    ordered
}

fn decorate_pulls(pulls: Vec<PullWire>, marker: &str) -> Vec<PullRequest> {
    pulls
        .into_iter()
        .map(|p| PullRequest {
            number: p.number,
            title: if marker.is_empty() {
                p.title
            } else {
                format!("{marker} {}", p.title)
            },
            url: p.html_url,
        })
        .collect()
}
