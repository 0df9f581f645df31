//! Persistent session list backed by a single JSON file.

use crate::error::SessionError;
use crate::types::SessionSummary;
use std::path::PathBuf;

const SESSIONS_FILE: &str = "sessions.json";

/// File-based session list. The whole list lives under one key
/// (`sessions.json` in the config directory), mirroring a browser
/// local-storage entry.
///
/// Access is serialized by the single-threaded caller; no locking.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a new store, ensuring the config directory exists.
    pub async fn new(config_dir: PathBuf) -> Result<Self, SessionError> {
        tokio::fs::create_dir_all(&config_dir).await?;
        Ok(Self {
            path: config_dir.join(SESSIONS_FILE),
        })
    }

    /// Load the persisted list. A missing or malformed file reads as an
    /// empty list; this never errors.
    pub async fn load(&self) -> Vec<SessionSummary> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            // Missing file is the normal first-run case.
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&data) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Upsert a session by id and persist the full list.
    ///
    /// An existing entry is replaced in place; new entries append, so the
    /// list keeps insertion order.
    pub async fn save(&self, summary: SessionSummary) -> Result<(), SessionError> {
        let mut list = self.load().await;
        match list
            .iter_mut()
            .find(|s| s.session_id == summary.session_id)
        {
            Some(existing) => *existing = summary,
            None => list.push(summary),
        }
        self.persist(&list).await
    }

    /// Remove a session by id and persist the remainder.
    /// Deleting an id that is not present is a no-op.
    pub async fn delete(&self, session_id: &str) -> Result<(), SessionError> {
        let mut list = self.load().await;
        let before = list.len();
        list.retain(|s| s.session_id != session_id);
        if list.len() == before {
            return Ok(());
        }
        self.persist(&list).await
    }

    /// Persist the full list atomically (write `.tmp`, rename).
    async fn persist(&self, list: &[SessionSummary]) -> Result<(), SessionError> {
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(list)?;
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_store() -> (SessionStore, TempDir) {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path().to_path_buf()).await.unwrap();
        (store, tmp)
    }

    #[tokio::test]
    async fn load_missing_file_is_empty() {
        let (store, _tmp) = test_store().await;
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_malformed_file_is_empty() {
        let (store, tmp) = test_store().await;
        tokio::fs::write(tmp.path().join(SESSIONS_FILE), "{not json")
            .await
            .unwrap();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_wrong_shape_is_empty() {
        let (store, tmp) = test_store().await;
        tokio::fs::write(tmp.path().join(SESSIONS_FILE), r#"{"session_id":"a"}"#)
            .await
            .unwrap();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn save_appends_in_insertion_order() {
        let (store, _tmp) = test_store().await;
        store.save(SessionSummary::new("a", "Tesla")).await.unwrap();
        store.save(SessionSummary::new("b", "Rivian")).await.unwrap();

        let list = store.load().await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].session_id, "a");
        assert_eq!(list[1].session_id, "b");
    }

    #[tokio::test]
    async fn save_existing_id_updates_in_place() {
        let (store, _tmp) = test_store().await;
        store.save(SessionSummary::new("a", "Tesla")).await.unwrap();
        store.save(SessionSummary::new("b", "Rivian")).await.unwrap();
        store
            .save(SessionSummary::new("a", "Tesla, Inc."))
            .await
            .unwrap();

        let list = store.load().await;
        assert_eq!(list.len(), 2, "upsert must not grow the list");
        assert_eq!(list[0].session_id, "a", "updated entry keeps its position");
        assert_eq!(list[0].company, "Tesla, Inc.");
        assert_eq!(list[1].session_id, "b");
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let (store, _tmp) = test_store().await;
        store.save(SessionSummary::new("a", "Tesla")).await.unwrap();
        store.save(SessionSummary::new("b", "Rivian")).await.unwrap();

        store.delete("a").await.unwrap();
        let list = store.load().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].session_id, "b");
    }

    #[tokio::test]
    async fn delete_nonexistent_is_noop() {
        let (store, _tmp) = test_store().await;
        store.save(SessionSummary::new("a", "Tesla")).await.unwrap();

        store.delete("zzz").await.unwrap();
        let list = store.load().await;
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn delete_on_empty_store_is_noop() {
        let (store, _tmp) = test_store().await;
        store.delete("anything").await.unwrap();
        assert!(store.load().await.is_empty());
    }
}
