use crate::activity::types::{ActivitySnapshot, Commit, RepositoryRef};
use crossterm::style::{Color, Stylize};
use std::io::{self, Write};
use std::path::Path;

pub const PRIMARY_COLOR: Color = Color::Red;
pub const OTHER_COLOR: Color = Color::White;

pub fn commit_color(commit: &Commit, primary_branch: &str) -> Color {
    if commit.branch == primary_branch {
        PRIMARY_COLOR
    } else {
        OTHER_COLOR
    }
}

pub fn render_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n📡 {} - Live GitHub Tracking\n", "Repo Radar".bold())
}

pub fn render_log_hint(out: &mut impl Write, log_file: &Path) -> io::Result<()> {
    writeln!(out, "\n📝 Fetch warnings are logged to {}", log_file.display())
}

pub fn render_tracked(out: &mut impl Write, repos: &[RepositoryRef]) -> io::Result<()> {
    if repos.is_empty() {
        return writeln!(out, "\n🔹 No repositories found.");
    }
    writeln!(out, "\n📡 Tracking the latest repositories:")?;
    for repo in repos {
        writeln!(out, "  📂 {repo}")?;
    }
    Ok(())
}

pub fn render_snapshot(
    out: &mut impl Write,
    snapshot: &ActivitySnapshot,
    pr_limit: usize,
) -> io::Result<()> {
    render_pulls(out, snapshot, pr_limit)?;
    render_commits(out, snapshot)
}

fn render_pulls(out: &mut impl Write, snapshot: &ActivitySnapshot, limit: usize) -> io::Result<()> {
    let repo = &snapshot.repository;
    let pulls = &snapshot.pull_requests;
    if pulls.is_empty() {
        return writeln!(out, "\n[PR] No open pull requests for {repo}.");
    }
    let shown = pulls.len().min(limit);
    writeln!(out, "\n=== Open Pull Requests for {repo} (Latest {shown}) ===\n")?;
    for pr in pulls.iter().take(shown) {
        writeln!(out, "  [PR #{}] {}", pr.number, pr.title)?;
    }
    Ok(())
}

fn render_commits(out: &mut impl Write, snapshot: &ActivitySnapshot) -> io::Result<()> {
    let repo = &snapshot.repository;
    let primary = &snapshot.primary_branch;
    if snapshot.main_commits.is_empty() && snapshot.other_commits.is_empty() {
        return writeln!(
            out,
            "\n[COMMITS] No recent commits in {repo} on branch {primary}."
        );
    }
    writeln!(out, "\n=== Recent Commits for {repo} (Branch: {primary}) ===\n")?;
    for commit in snapshot.main_commits.iter().chain(&snapshot.other_commits) {
        let color = commit_color(commit, primary);
        let marker = match commit.is_also_on_main {
            Some(true) => format!(" (also on {primary})"),
            _ => String::new(),
        };
        writeln!(
            out,
            "{}",
            format!("  [{}] {}{marker}", commit.hash, commit.message).with(color)
        )?;
        writeln!(
            out,
            "{}",
            format!("     Author: {} | Date: {}", commit.author, commit.date).with(color)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::types::PullRequest;
    use crate::test_utils::utc;

    fn commit(hash: &str, branch: &str, on_main: Option<bool>) -> Commit {
        Commit {
            hash: hash.to_string(),
            message: format!("work {hash}"),
            author: "Mona".to_string(),
            timestamp: utc(2024, 1, 1, 0, 0, 0),
            date: "Today, 00:00:00 (UTC)".to_string(),
            branch: branch.to_string(),
            is_also_on_main: on_main,
        }
    }

    fn snapshot() -> ActivitySnapshot {
        let mut snap = ActivitySnapshot::empty(
            RepositoryRef::parse("octo/demo").unwrap(),
            "trunk".to_string(),
        );
        snap.pull_requests = (1..=7)
            .map(|n| PullRequest {
                number: n,
                title: format!("PR {n}"),
                url: String::new(),
            })
            .collect();
        snap.main_commits = vec![commit("aaaaaaa", "trunk", None)];
        snap
    }

    #[test]
    fn log_hint_names_the_file() {
        let mut buf = Vec::new();
        render_log_hint(&mut buf, Path::new("/tmp/repo-radar/tracker.log")).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("/tmp/repo-radar/tracker.log"));
    }

    fn rendered(snap: &ActivitySnapshot, limit: usize) -> String {
        let mut buf = Vec::new();
        render_snapshot(&mut buf, snap, limit).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn pull_requests_are_capped_for_display() {
        let text = rendered(&snapshot(), 5);
        assert!(text.contains("=== Open Pull Requests for octo/demo (Latest 5) ==="));
        assert!(text.contains("[PR #5] PR 5"));
        assert!(!text.contains("[PR #6]"));
    }

    #[test]
    fn commits_list_author_and_date() {
        let text = rendered(&snapshot(), 5);
        assert!(text.contains("=== Recent Commits for octo/demo (Branch: trunk) ==="));
        assert!(text.contains("[aaaaaaa] work aaaaaaa"));
        assert!(text.contains("Author: Mona | Date: Today, 00:00:00 (UTC)"));
    }

    #[test]
    fn empty_snapshot_says_so() {
        let snap = ActivitySnapshot::empty(
            RepositoryRef::parse("octo/demo").unwrap(),
            "main".to_string(),
        );
        let text = rendered(&snap, 5);
        assert!(text.contains("[PR] No open pull requests for octo/demo."));
        assert!(text.contains("[COMMITS] No recent commits in octo/demo on branch main."));
    }

    #[test]
    fn primary_branch_is_highlighted() {
        assert_eq!(commit_color(&commit("a", "trunk", None), "trunk"), PRIMARY_COLOR);
        assert_eq!(commit_color(&commit("b", "dev", Some(false)), "trunk"), OTHER_COLOR);
        assert_ne!(PRIMARY_COLOR, OTHER_COLOR);
    }

    #[test]
    fn shared_commits_are_marked() {
        let mut snap = snapshot();
        snap.other_commits = vec![commit("aaaaaaa", "dev", Some(true))];
        let text = rendered(&snap, 5);
        assert!(text.contains("(also on trunk)"));
    }

    #[test]
    fn tracked_list() {
        let mut buf = Vec::new();
        render_tracked(&mut buf, &[RepositoryRef::parse("a/b").unwrap()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("📂 a/b"));

        let mut buf = Vec::new();
        render_tracked(&mut buf, &[]).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("No repositories found"));
    }
}
