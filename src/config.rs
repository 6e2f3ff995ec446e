use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub credentials_path: PathBuf,
    pub poll_interval_secs: u64,
    pub commits_per_branch: usize,
    pub dashboard_repo_limit: usize,
    pub tracker_repo_limit: usize,
    pub tracker_pr_limit: usize,
    pub pr_title_marker: String,
    pub fetch_concurrency: usize,
    pub bind_addr: String,
    /// Where `track` writes its log; defaults to `tracker.log` in the radar directory.
    pub tracker_log_file: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &self.github_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_base_url", &self.api_base_url)
            .field("credentials_path", &self.credentials_path)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("commits_per_branch", &self.commits_per_branch)
            .field("dashboard_repo_limit", &self.dashboard_repo_limit)
            .field("tracker_repo_limit", &self.tracker_repo_limit)
            .field("tracker_pr_limit", &self.tracker_pr_limit)
            .field("pr_title_marker", &self.pr_title_marker)
            .field("fetch_concurrency", &self.fetch_concurrency)
            .field("bind_addr", &self.bind_addr)
            .field("tracker_log_file", &self.tracker_log_file)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            credentials_path: PathBuf::from(".env"),
            poll_interval_secs: 60,
            commits_per_branch: 5,
            dashboard_repo_limit: 6,
            tracker_repo_limit: 10,
            tracker_pr_limit: 5,
            pr_title_marker: "🔔".to_string(),
            fetch_concurrency: 4,
            bind_addr: "0.0.0.0:5000".to_string(),
            tracker_log_file: None,
        }
    }
}

/// Values given on the command line; they win over every other source.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub poll_interval_secs: Option<u64>,
    pub bind_addr: Option<String>,
}

impl Config {
    pub fn load(overrides: &CliOverrides) -> Self {
        let config_file = overrides
            .config_file
            .clone()
            .unwrap_or_else(|| radar_dir().join("config.toml"));
        Self::load_from(&config_file, overrides)
    }

    pub fn load_from(config_file: &Path, overrides: &CliOverrides) -> Self {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_file.exists() {
            figment = figment.merge(Toml::file(config_file));
        }

        figment = figment.merge(Env::prefixed("REPO_RADAR_")).merge(
            Env::raw()
                .only(&["GITHUB_TOKEN"])
                .map(|_| "github_token".into()),
        );

        if let Some(secs) = overrides.poll_interval_secs {
            figment = figment.merge(Serialized::default("poll_interval_secs", secs));
        }
        if let Some(ref addr) = overrides.bind_addr {
            figment = figment.merge(Serialized::default("bind_addr", addr));
        }

        match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: config parse error, using defaults: {e}");
                Config::default()
            }
        }
    }

    /// Token supplied through config or environment, ignoring blank values.
    pub fn configured_token(&self) -> Option<&str> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn tracker_log_path(&self) -> PathBuf {
        self.tracker_log_file
            .clone()
            .unwrap_or_else(|| radar_dir().join("tracker.log"))
    }
}

/// Per-user `repo-radar` directory holding `config.toml` and the tracker log.
/// An empty `XDG_CONFIG_HOME` counts as unset.
pub fn radar_dir() -> PathBuf {
    let base = match (std::env::var_os("XDG_CONFIG_HOME"), std::env::var_os("HOME")) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) if !home.is_empty() => Path::new(&home).join(".config"),
        _ => PathBuf::from("."),
    };
    base.join("repo-radar")
}
