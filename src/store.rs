//! Session file persistence.
//!
//! A saved session is a pretty-printed JSON array of windows. Saves go to
//! a sibling temporary file first and are renamed into place, so an
//! interrupted save never leaves a truncated session behind.

use std::path::{Path, PathBuf};

use crate::session::SessionData;

/// Session store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no saved session at {}", .0.display())]
    Missing(PathBuf),
    #[error("cannot decode session file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot encode session: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("session file I/O on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads and writes one session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn save(&self, session: &SessionData) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(session).map_err(StoreError::Encode)?;
        write_atomic(&self.path, &json).await
    }

    pub async fn load(&self) -> Result<SessionData, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::Missing(self.path.clone()));
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_slice(&raw).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }
}

/// Write `content` to `path` via a temporary sibling and a rename.
///
/// Creates missing parent directories.
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, content).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::window;

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested/session.json"));
        let mut floating = window("0x2", "pavucontrol", [100, 100], [400, 300]);
        floating.floating = true;
        floating.cmdline = String::new();
        let session = SessionData::new(vec![window("0x1", "kitty", [0, 0], [960, 1080]), floating]);

        store.save(&session).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, session);
        assert!(!dir.path().join("nested/session.json.tmp").exists());
    }

    #[tokio::test]
    async fn save_overwrites_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        store
            .save(&SessionData::new(vec![window("0x1", "kitty", [0, 0], [1, 1])]))
            .await
            .unwrap();
        store.save(&SessionData::default()).await.unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.load().await, Err(StoreError::Missing(_))));
    }

    #[tokio::test]
    async fn garbage_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = SessionStore::new(&path);
        assert!(matches!(store.load().await, Err(StoreError::Decode { .. })));
    }

    #[tokio::test]
    async fn unwritable_location_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        tokio::fs::write(&blocker, b"x").await.unwrap();

        let store = SessionStore::new(blocker.join("session.json"));
        let err = store.save(&SessionData::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
