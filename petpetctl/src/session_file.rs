//! On-disk CLI session: where we are logged in, and with what token.
//!
//! Stored as JSON under the user's config directory
//! (`$XDG_CONFIG_HOME/petpet/session.json`, falling back to
//! `~/.config/petpet/session.json`). The token is the opaque bearer token
//! the server issued; treat the file like a credential.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliSession {
    pub server_url: String,
    pub token: String,
}

impl CliSession {
    pub fn new(server_url: &str, token: &str) -> Self {
        Self {
            server_url: server_url.to_string(),
            token: token.to_string(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = session_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create {}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;

        // Token file: keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&path, permissions).with_context(|| {
                format!("failed to restrict {}", path.display())
            })?;
        }
        Ok(())
    }

    pub fn load() -> Result<Option<Self>> {
        let path = session_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let session = serde_json::from_str(&contents).with_context(
                    || format!("corrupt session file {}", path.display()),
                )?;
                Ok(Some(session))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| {
                format!("failed to read {}", path.display())
            }),
        }
    }

    pub fn clear() -> Result<()> {
        let path = session_path()?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| {
                format!("failed to remove {}", path.display())
            }),
        }
    }
}

fn session_path() -> Result<PathBuf> {
    if let Some(override_path) = std::env::var_os("PETPET_SESSION_FILE") {
        return Ok(PathBuf::from(override_path));
    }
    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .context("neither XDG_CONFIG_HOME nor HOME is set")?;
    Ok(config_home.join("petpet").join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_through_the_override_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        // Env vars are process-global; fine for a single-threaded check.
        unsafe {
            std::env::set_var("PETPET_SESSION_FILE", &path);
        }

        let session = CliSession::new("http://localhost:3000", "tok-123");
        session.save().unwrap();
        let loaded = CliSession::load().unwrap().unwrap();
        assert_eq!(loaded.server_url, "http://localhost:3000");
        assert_eq!(loaded.token, "tok-123");

        CliSession::clear().unwrap();
        assert!(CliSession::load().unwrap().is_none());

        unsafe {
            std::env::remove_var("PETPET_SESSION_FILE");
        }
    }
}
