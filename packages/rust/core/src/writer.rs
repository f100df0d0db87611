//! Atomic artifact writer.
//!
//! Every output file (dataset JSON, bundled HTML) goes through the same
//! path: write to a dot-prefixed temp file in the target directory, then
//! rename over the target. A crash mid-write never leaves a truncated
//! artifact behind.

use std::path::{Path, PathBuf};

use chempack_shared::{ChempackError, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Metadata for one written artifact.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArtifactMeta {
    pub path: PathBuf,
    pub size_bytes: usize,
    pub sha256: String,
}

/// Write `content` to `target` atomically, creating parent directories as
/// needed.
pub fn write_artifact(target: &Path, content: &str) -> Result<ArtifactMeta> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ChempackError::io(parent, e))?;
        }
    }

    let temp = temp_path(target)?;
    std::fs::write(&temp, content).map_err(|e| ChempackError::io(&temp, e))?;
    std::fs::rename(&temp, target).map_err(|e| ChempackError::io(target, e))?;

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let sha256 = format!("{:x}", hasher.finalize());

    debug!(path = %target.display(), size = content.len(), "wrote artifact");

    Ok(ArtifactMeta {
        path: target.to_path_buf(),
        size_bytes: content.len(),
        sha256,
    })
}

/// Temp file sibling of `target`, dot-prefixed so a leftover never shadows
/// the real artifact.
fn temp_path(target: &Path) -> Result<PathBuf> {
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ChempackError::config(format!("invalid artifact path: {}", target.display()))
        })?;
    Ok(target.with_file_name(format!(".{name}.tmp")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("chempack-{tag}-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn writes_content_and_meta() {
        let dir = temp_dir("writer");
        let target = dir.join("units_data.json");

        let meta = write_artifact(&target, "{\"units\":{}}").unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "{\"units\":{}}");
        assert_eq!(meta.size_bytes, 12);
        assert_eq!(meta.sha256.len(), 64);
        assert_eq!(meta.path, target);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = temp_dir("writer-nested");
        let target = dir.join("data").join("constants.json");

        write_artifact(&target, "[]").unwrap();
        assert!(target.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn overwrites_existing_artifact() {
        let dir = temp_dir("writer-overwrite");
        let target = dir.join("bundle.html");

        write_artifact(&target, "old").unwrap();
        write_artifact(&target, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = temp_dir("writer-temp");
        let target = dir.join("out.json");

        write_artifact(&target, "{}").unwrap();
        assert!(!dir.join(".out.json.tmp").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
