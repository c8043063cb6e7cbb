//! Badge image lookup

use std::path::{Path, PathBuf};
use bytes::Bytes;
use crate::status::StatusState;

pub const CONTENT_TYPE: &str = "image/svg+xml";

/// Directory of static badge images, one `<badge>.svg` per state
#[derive(Debug, Clone)]
pub struct BadgeStore {
    dir: PathBuf,
}

impl BadgeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, state: &StatusState) -> PathBuf {
        self.dir.join(format!("{}.svg", state.badge_name()))
    }

    /// Read the badge served for `state`
    pub async fn load(&self, state: &StatusState) -> std::io::Result<Bytes> {
        let data = tokio::fs::read(self.path_for(state)).await?;
        Ok(Bytes::from(data))
    }

    /// Names of the expected badge files that are not present on disk
    pub fn missing(&self) -> Vec<PathBuf> {
        [
            StatusState::Success,
            StatusState::Failure,
            StatusState::Pending,
            StatusState::Error,
        ]
        .iter()
        .map(|state| self.path_for(state))
        .filter(|path| !path.is_file())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped() -> BadgeStore {
        BadgeStore::new(concat!(env!("CARGO_MANIFEST_DIR"), "/images"))
    }

    #[test]
    fn test_path_for_unknown_state() {
        let store = BadgeStore::new("/srv/badges");
        assert_eq!(
            store.path_for(&StatusState::Unknown("neutral".to_string())),
            PathBuf::from("/srv/badges/error.svg")
        );
    }

    #[test]
    fn test_shipped_badges_complete() {
        assert!(shipped().missing().is_empty());
    }

    #[tokio::test]
    async fn test_load_reads_file() {
        let store = shipped();
        let bytes = store.load(&StatusState::Pending).await.unwrap();
        let expected = std::fs::read(store.dir().join("pending.svg")).unwrap();
        assert_eq!(bytes.as_ref(), expected.as_slice());
    }

    #[tokio::test]
    async fn test_load_missing_dir() {
        let store = BadgeStore::new("/nonexistent/statusbadge");
        assert!(store.load(&StatusState::Success).await.is_err());
        assert_eq!(store.missing().len(), 4);
    }
}
