use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Literal branch name treated as primary by the dashboard.
pub const MAIN_BRANCH: &str = "main";

/// Stand-in branch name for a repository whose branch list came back empty.
pub const NO_BRANCHES_PLACEHOLDER: &str = "No branches found";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    /// Parses `owner/name`. Both halves must be non-empty and `name` may not
    /// contain another slash.
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl Serialize for RepositoryRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    /// `Today, 14:03:11 (UTC)` style label, fixed at build time.
    pub date: String,
    pub branch: String,
    /// Only set for commits outside the primary branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_also_on_main: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivitySnapshot {
    #[serde(rename = "name")]
    pub repository: RepositoryRef,
    #[serde(skip)]
    pub primary_branch: String,
    #[serde(rename = "prs")]
    pub pull_requests: Vec<PullRequest>,
    #[serde(rename = "commits_main")]
    pub main_commits: Vec<Commit>,
    #[serde(rename = "commits_all")]
    pub other_commits: Vec<Commit>,
}

impl ActivitySnapshot {
    pub fn empty(repository: RepositoryRef, primary_branch: String) -> Self {
        Self {
            repository,
            primary_branch,
            pull_requests: Vec::new(),
            main_commits: Vec::new(),
            other_commits: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_owner_and_name() {
        let r = RepositoryRef::parse("octo/demo").unwrap();
        assert_eq!(r.owner, "octo");
        assert_eq!(r.name, "demo");
        assert_eq!(r.to_string(), "octo/demo");
    }

    #[test]
    fn parse_rejects_malformed_names() {
        for bad in ["", "octo", "/demo", "octo/", "a/b/c"] {
            assert!(RepositoryRef::parse(bad).is_none(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn serializes_as_full_name() {
        let r = RepositoryRef::parse("octo/demo").unwrap();
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"octo/demo\"");
    }

    #[test]
    fn snapshot_uses_dashboard_field_names() {
        let snap = ActivitySnapshot::empty(
            RepositoryRef::parse("octo/demo").unwrap(),
            MAIN_BRANCH.to_string(),
        );
        let value = serde_json::to_value(&snap).unwrap();
        assert_eq!(value["name"], "octo/demo");
        assert!(value["prs"].as_array().unwrap().is_empty());
        assert!(value["commits_main"].as_array().unwrap().is_empty());
        assert!(value["commits_all"].as_array().unwrap().is_empty());
        assert!(value.get("primary_branch").is_none());
    }
}
