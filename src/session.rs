//! Client-held identity and server address, persisted on disk.
//!
//! This replaces the page-persistent local storage of the original UI with
//! an explicit session object: login writes the identity, logout and
//! auth-failure detection clear it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:7878";

const SESSION_FILE: &str = "session.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub version: u32,
    pub base_url: String,

    #[serde(default)]
    pub identity: Option<Identity>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            version: 1,
            base_url: DEFAULT_BASE_URL.to_string(),
            identity: None,
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    /// Default session directory: `$STACKLIST_DIR`, else `$HOME/.stacklist`.
    pub fn default_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os("STACKLIST_DIR") {
            return Ok(PathBuf::from(dir));
        }
        let home = std::env::var_os("HOME").context("HOME not set (use STACKLIST_DIR)")?;
        Ok(PathBuf::from(home).join(".stacklist"))
    }

    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create session dir {}", root.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_FILE)
    }

    pub fn read(&self) -> Result<SessionConfig> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(SessionConfig::default());
        }
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let cfg: SessionConfig = serde_json::from_slice(&bytes).context("parse session.json")?;
        Ok(cfg)
    }

    pub fn write(&self, cfg: &SessionConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize session")?;
        write_atomic(&self.session_path(), &bytes).context("write session.json")?;
        Ok(())
    }

    /// Record a successful login.
    pub fn set_identity(&self, user_id: &str, email: &str) -> Result<()> {
        let mut cfg = self.read()?;
        cfg.identity = Some(Identity {
            user_id: user_id.to_string(),
            email: email.to_string(),
        });
        self.write(&cfg)
    }

    /// Teardown on logout or when the server stops recognizing the identity.
    pub fn clear_identity(&self) -> Result<()> {
        let mut cfg = self.read()?;
        cfg.identity = None;
        self.write(&cfg)
    }

    pub fn set_base_url(&self, base_url: &str) -> Result<()> {
        let mut cfg = self.read()?;
        cfg.base_url = base_url.trim_end_matches('/').to_string();
        self.write(&cfg)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/session/store_tests.rs"]
mod tests;
