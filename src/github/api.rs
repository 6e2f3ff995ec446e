use crate::activity::types::RepositoryRef;
use crate::github::client::HostApi;
use crate::github::fetch::{fetch_list, fetch_object, Fetch};
use crate::github::types::{BranchWire, CommitWire, OrgWire, PullWire, RepoWire, UserWire};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

pub async fn current_user<A: HostApi>(api: &A) -> Fetch<UserWire> {
    fetch_object(api, "/user").await
}

pub async fn user_orgs<A: HostApi>(api: &A) -> Fetch<Vec<OrgWire>> {
    fetch_list(api, "/user/orgs").await
}

pub async fn org_repos<A: HostApi>(api: &A, org: &str) -> Fetch<Vec<RepoWire>> {
    fetch_list(api, &format!("/orgs/{org}/repos")).await
}

pub async fn user_repos<A: HostApi>(api: &A) -> Fetch<Vec<RepoWire>> {
    fetch_list(api, "/user/repos").await
}

pub async fn repository<A: HostApi>(api: &A, repo: &RepositoryRef) -> Fetch<RepoWire> {
    fetch_object(api, &format!("/repos/{repo}")).await
}

pub async fn branches<A: HostApi>(api: &A, repo: &RepositoryRef) -> Fetch<Vec<BranchWire>> {
    fetch_list(api, &format!("/repos/{repo}/branches")).await
}

pub async fn open_pulls<A: HostApi>(api: &A, repo: &RepositoryRef) -> Fetch<Vec<PullWire>> {
    fetch_list(api, &format!("/repos/{repo}/pulls")).await
}

pub async fn branch_commits<A: HostApi>(
    api: &A,
    repo: &RepositoryRef,
    branch: &str,
) -> Fetch<Vec<CommitWire>> {
    fetch_list(api, &commits_path(repo, branch)).await
}

pub fn commits_path(repo: &RepositoryRef, branch: &str) -> String {
    format!(
        "/repos/{repo}/commits?sha={}",
        utf8_percent_encode(branch, QUERY_VALUE)
    )
}
