use thiserror::Error;

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("github error: {0}")]
    GitHub(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no GitHub token found, restart and enter a valid token")]
    NoCredential,

    #[error("authentication failed: HTTP {status}")]
    AuthenticationFailed { status: u16 },

    #[error("server error: {0}")]
    Server(String),
}

impl From<octocrab::Error> for RadarError {
    fn from(e: octocrab::Error) -> Self {
        RadarError::GitHub(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RadarError>;
