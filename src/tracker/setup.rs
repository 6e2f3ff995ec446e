use crate::credentials::{Credential, CredentialState};
use crate::error::{RadarError, Result};
use std::io::{BufRead, Write};

const WELCOME: &str = "\
\n🔹 Welcome to Repo Radar!
🚀 To get started, you need a GitHub Personal Access Token.
👉 Go to: https://github.com/settings/tokens/new to create one.
🔹 Enable 'repo' permissions to track private repositories.
🔹 Copy the token and paste it below.\n";

/// Returns the loaded credential, or asks for one on `input` and persists it.
pub fn ensure_credential(
    credentials: &CredentialState,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> Result<Credential> {
    if let Some(existing) = credentials.get() {
        return Ok(existing);
    }

    writeln!(out, "{WELCOME}")?;
    write!(out, "🔑 Enter your GitHub token: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let credential = Credential::new(&line).ok_or(RadarError::NoCredential)?;
    credentials.set(credential.clone())?;
    writeln!(out, "\n✅ Token saved! Continuing with authentication...\n")?;
    Ok(credential)
}
