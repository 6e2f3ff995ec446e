//! Terminal live-tracker: rescans on a fixed interval and prints colored
//! activity for each tracked repository.

pub mod render;
pub mod setup;

use crate::activity::aggregator::{
    build_snapshots, BranchScope, PrimaryBranchPolicy, SnapshotOptions,
};
use crate::activity::discovery::{discover_repositories, DiscoveryStrategy};
use crate::config::Config;
use crate::error::{RadarError, Result};
use crate::event::TrackerEvent;
use crate::github::api;
use crate::github::client::{GitHubClient, HostApi};
use crate::github::fetch::{Failure, Fetch};
use crate::watcher::poll::{rescan_pause, run_scan_loop};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;
use std::ops::ControlFlow;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct TrackerOptions {
    pub repo_limit: usize,
    pub pr_limit: usize,
    pub interval_secs: u64,
    pub snapshot: SnapshotOptions,
    /// Shown under each repaint so fetch warnings can be found.
    pub log_file: Option<PathBuf>,
}

impl TrackerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            repo_limit: config.tracker_repo_limit,
            pr_limit: config.tracker_pr_limit,
            interval_secs: config.poll_interval_secs,
            snapshot: SnapshotOptions {
                primary: PrimaryBranchPolicy::HostDefault,
                scope: BranchScope::PrimaryOnly,
                commits_per_branch: config.commits_per_branch,
                pr_title_marker: String::new(),
                concurrency: config.fetch_concurrency,
            },
            log_file: Some(config.tracker_log_path()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Tracked(usize),
    NoRepositories,
}

/// Looks up the token's owner. Unlike the dashboard, a failure here is fatal.
pub async fn authenticate<A: HostApi>(api: &A) -> Result<String> {
    match api::current_user(api).await {
        Fetch::Success(user) => Ok(user.login.unwrap_or_else(|| "unknown".to_string())),
        Fetch::Empty => Err(RadarError::GitHub("empty user response".to_string())),
        Fetch::TransportFailure(Failure::Status(status)) => {
            Err(RadarError::AuthenticationFailed { status })
        }
        Fetch::TransportFailure(e) => Err(RadarError::GitHub(e.to_string())),
    }
}

/// One full pass: discover, snapshot, print.
pub async fn scan<A: HostApi>(
    api: &A,
    options: &TrackerOptions,
    out: &mut impl Write,
) -> Result<ScanOutcome> {
    let mut repos = discover_repositories(api, DiscoveryStrategy::FirstOrgOrPersonal).await;
    repos.truncate(options.repo_limit);
    render::render_tracked(out, &repos)?;
    if repos.is_empty() {
        return Ok(ScanOutcome::NoRepositories);
    }

    let snapshots = build_snapshots(api, &repos, &options.snapshot, chrono::Utc::now()).await;
    for snapshot in &snapshots {
        render::render_snapshot(out, snapshot, options.pr_limit)?;
    }
    Ok(ScanOutcome::Tracked(snapshots.len()))
}

pub async fn run(config: &Config, credential: &crate::credentials::Credential) -> Result<()> {
    let client = GitHubClient::new(credential, &config.api_base_url)?;
    let user = authenticate(&client).await?;
    println!("\n✅ Logged into GitHub as {user}.");

    let options = TrackerOptions::from_config(config);
    let (tx, mut rx) = mpsc::unbounded_channel::<TrackerEvent>();
    let shutdown_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(TrackerEvent::Shutdown);
        }
    });
    spawn_enter_refresh(tx.clone());

    let (client, options) = (&client, &options);
    let scans = run_scan_loop(&mut rx, options.interval_secs, move || {
        scan_cycle(client, options, std::io::stdout())
    })
    .await?;

    drop(tx);
    tracing::info!(scans, "tracker stopped");
    Ok(())
}

/// Each line read from stdin requests an immediate rescan.
fn spawn_enter_refresh(tx: mpsc::UnboundedSender<TrackerEvent>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            if line.is_err() || tx.send(TrackerEvent::Refresh).is_err() {
                break;
            }
        }
    });
}

/// Scans, then repaints `out` in one go and says whether to keep polling.
pub async fn scan_cycle<A: HostApi, W: Write>(
    api: &A,
    options: &TrackerOptions,
    mut out: W,
) -> Result<ControlFlow<()>> {
    let mut buf = Vec::new();
    let outcome = scan(api, options, &mut buf).await?;

    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    render::render_header(&mut out)?;
    out.write_all(&buf)?;
    if let Some(path) = &options.log_file {
        render::render_log_hint(&mut out, path)?;
    }

    let flow = match outcome {
        ScanOutcome::NoRepositories => {
            writeln!(out, "❌ No repositories found. Exiting...")?;
            ControlFlow::Break(())
        }
        ScanOutcome::Tracked(_) => {
            writeln!(
                out,
                "\n🔄 Next update in {} seconds... (Enter to refresh now)\n",
                rescan_pause(options.interval_secs).as_secs()
            )?;
            ControlFlow::Continue(())
        }
    };
    out.flush()?;
    Ok(flow)
}
