use crate::error::{RadarError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

pub const TOKEN_KEY: &str = "GITHUB_TOKEN";

#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Trims surrounding whitespace; a blank token is no credential at all.
    pub fn new(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Key-value file holding the single `GITHUB_TOKEN` entry.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let entries = dotenvy::from_path_iter(&self.path)
            .map_err(|e| RadarError::Config(format!("{}: {e}", self.path.display())))?;
        for entry in entries {
            let (key, value) =
                entry.map_err(|e| RadarError::Config(format!("{}: {e}", self.path.display())))?;
            if key == TOKEN_KEY {
                return Ok(Credential::new(&value));
            }
        }
        Ok(None)
    }

    pub fn write(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, format!("{TOKEN_KEY}={}\n", credential.expose()))?;
        Ok(())
    }
}

/// Process-wide credential. Read-only after `load` except through `set`,
/// which persists before publishing the new value.
#[derive(Debug)]
pub struct CredentialState {
    store: CredentialStore,
    current: RwLock<Option<Credential>>,
}

impl CredentialState {
    /// A token from config or environment wins over the file.
    pub fn load(store: CredentialStore, configured: Option<&str>) -> Result<Self> {
        let current = match configured.and_then(Credential::new) {
            Some(c) => Some(c),
            None => store.read()?,
        };
        Ok(Self {
            store,
            current: RwLock::new(current),
        })
    }

    pub fn get(&self) -> Option<Credential> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    pub fn set(&self, credential: Credential) -> Result<()> {
        self.store.write(&credential)?;
        let mut guard = self
            .current
            .write()
            .map_err(|_| RadarError::Config("credential lock poisoned".to_string()))?;
        *guard = Some(credential);
        Ok(())
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }
}
