//! Subsets of the GitHub REST payloads that the radar reads.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct UserWire {
    pub login: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OrgWire {
    pub login: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RepoWire {
    pub full_name: String,
    #[serde(default)]
    pub default_branch: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BranchWire {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PullWire {
    pub number: u64,
    pub title: String,
    pub html_url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommitWire {
    pub sha: String,
    pub commit: CommitDetails,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommitDetails {
    pub message: String,
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommitAuthor {
    pub name: String,
    pub date: String,
}
