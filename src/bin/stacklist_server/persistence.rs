//! On-disk state: `users.json` and `boards.json` under the data dir,
//! rewritten atomically after every mutation so the dev server survives
//! restarts.

use std::path::Path;

use super::*;

fn users_path(data_dir: &Path) -> PathBuf {
    data_dir.join("users.json")
}

fn boards_path(data_dir: &Path) -> PathBuf {
    data_dir.join("boards.json")
}

pub(super) fn load_users_from_disk(data_dir: &Path) -> Result<HashMap<String, UserRecord>> {
    let path = users_path(data_dir);
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let bytes = std::fs::read(&path).context("read users.json")?;
    let users: HashMap<String, UserRecord> =
        serde_json::from_slice(&bytes).context("parse users.json")?;
    Ok(users)
}

pub(super) fn load_boards_from_disk(data_dir: &Path) -> Result<HashMap<String, Board>> {
    let path = boards_path(data_dir);
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let bytes = std::fs::read(&path).context("read boards.json")?;
    let boards: HashMap<String, Board> =
        serde_json::from_slice(&bytes).context("parse boards.json")?;
    Ok(boards)
}

pub(super) fn persist_users(data_dir: &Path, users: &HashMap<String, UserRecord>) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(users).context("serialize users")?;
    write_atomic(&users_path(data_dir), &bytes).context("write users.json")?;
    Ok(())
}

pub(super) fn persist_boards(data_dir: &Path, boards: &HashMap<String, Board>) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(boards).context("serialize boards")?;
    write_atomic(&boards_path(data_dir), &bytes).context("write boards.json")?;
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
