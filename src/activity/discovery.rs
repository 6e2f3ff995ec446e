use crate::activity::types::RepositoryRef;
use crate::github::api;
use crate::github::client::HostApi;
use crate::github::fetch::Fetch;
use crate::github::types::RepoWire;
use itertools::Itertools;

/// Which repositories a mode gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStrategy {
    /// Every organization's repositories, then the personal ones.
    AllOrgsPlusPersonal,
    /// Only the first organization's repositories; personal ones when the
    /// user belongs to no organization.
    FirstOrgOrPersonal,
}

pub async fn discover_repositories<A: HostApi>(
    api: &A,
    strategy: DiscoveryStrategy,
) -> Vec<RepositoryRef> {
    let orgs: Vec<String> = api::user_orgs(api)
        .await
        .or_empty("user orgs")
        .into_iter()
        .map(|o| o.login)
        .collect();

    let mut found: Vec<RepositoryRef> = Vec::new();

    let (org_scope, include_personal) = match strategy {
        DiscoveryStrategy::AllOrgsPlusPersonal => (&orgs[..], true),
        DiscoveryStrategy::FirstOrgOrPersonal => (&orgs[..orgs.len().min(1)], orgs.is_empty()),
    };

    for org in org_scope {
        let repos = api::org_repos(api, org).await;
        found.extend(full_names(repos, &format!("repos of org {org}")));
    }

    if include_personal {
        found.extend(full_names(api::user_repos(api).await, "personal repos"));
    }

    let repos: Vec<RepositoryRef> = found.into_iter().unique().collect();
    tracing::info!(?strategy, count = repos.len(), "discovered repositories");
    repos
}

fn full_names(fetched: Fetch<Vec<RepoWire>>, what: &str) -> Vec<RepositoryRef> {
    fetched
        .or_empty(what)
        .into_iter()
        .filter_map(|r| {
            let parsed = RepositoryRef::parse(&r.full_name);
            if parsed.is_none() {
                tracing::warn!(full_name = %r.full_name, "skipping malformed repository name");
            }
            parsed
        })
        .collect()
}
