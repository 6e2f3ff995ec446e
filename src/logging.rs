use std::path::{Path, PathBuf};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Where log lines go. `track` repaints the whole screen after every scan,
/// so its warnings go to a file instead of the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

pub fn init(target: &LogTarget, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
        LogTarget::File(path) => match file_appender(path) {
            Ok(appender) => builder.with_ansi(false).with_writer(appender).init(),
            Err(e) => {
                builder.with_writer(std::io::stderr).init();
                tracing::warn!(path = %path.display(), error = %e, "cannot open log file, logging to stderr");
            }
        },
    }
}

/// Appends to `path` as is, without date suffixes. Missing parent
/// directories are created.
pub fn file_appender(path: &Path) -> Result<RollingFileAppender, InitError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tracker.log".to_string());

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn appender_writes_to_exact_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tracker.log");

        let mut appender = file_appender(&path).unwrap();
        appender.write_all(b"commits of octo/demo@main failed\n").unwrap();
        appender.flush().unwrap();

        let logged = std::fs::read_to_string(&path).unwrap();
        assert!(logged.contains("octo/demo@main failed"));
    }

    #[test]
    fn appender_appends_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.log");

        for line in ["first\n", "second\n"] {
            let mut appender = file_appender(&path).unwrap();
            appender.write_all(line.as_bytes()).unwrap();
            appender.flush().unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
