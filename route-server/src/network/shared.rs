//! Shared, refreshable network handle.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::client::NetworkSource;
use super::error::NetworkError;
use super::snapshot::NetworkSnapshot;

/// Thread-safe handle to the current network snapshot.
///
/// Readers take an `Arc` of the current snapshot and keep it for as long as
/// they need; a refresh swaps in a new snapshot without disturbing searches
/// that already hold the old one.
#[derive(Clone)]
pub struct SharedNetwork {
    inner: Arc<RwLock<Arc<NetworkSnapshot>>>,
    source: Arc<NetworkSource>,
}

impl SharedNetwork {
    /// Load the network from its source.
    ///
    /// This will fail if the source is unreachable or the data is invalid.
    pub async fn load(source: NetworkSource) -> Result<Self, NetworkError> {
        let snapshot = source.load().await?;
        info!(
            source = %source.describe(),
            nodes = snapshot.len(),
            "loaded network"
        );
        Ok(Self::from_snapshot(snapshot, source))
    }

    /// Wrap an already-built snapshot.
    pub fn from_snapshot(snapshot: NetworkSnapshot, source: NetworkSource) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
            source: Arc::new(source),
        }
    }

    /// The current snapshot.
    pub async fn current(&self) -> Arc<NetworkSnapshot> {
        let guard = self.inner.read().await;
        Arc::clone(&*guard)
    }

    /// Reload the network from its source.
    ///
    /// On success, replaces the current snapshot and returns its node count.
    /// On failure, the existing snapshot is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, NetworkError> {
        let snapshot = self.source.load().await?;
        let count = snapshot.len();

        let mut guard = self.inner.write().await;
        *guard = Arc::new(snapshot);

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, Write};

    fn write_towns(file: &mut std::fs::File, names: &[&str]) {
        let nodes: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!(r#"{{"type": "Town", "i": {i}, "name": "{name}"}}"#))
            .collect();
        file.set_len(0).unwrap();
        file.rewind().unwrap();
        write!(file, r#"{{"nodes": [{}]}}"#, nodes.join(",")).unwrap();
        file.flush().unwrap();
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_but_keeps_old_handles() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write_towns(file.as_file_mut(), &["A"]);

        let shared = SharedNetwork::load(NetworkSource::File(file.path().to_path_buf()))
            .await
            .unwrap();
        let before = shared.current().await;
        assert_eq!(before.len(), 1);

        write_towns(file.as_file_mut(), &["A", "B", "C"]);
        assert_eq!(shared.refresh().await.unwrap(), 3);

        assert_eq!(shared.current().await.len(), 3);
        assert_eq!(before.len(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write_towns(file.as_file_mut(), &["A", "B"]);

        let shared = SharedNetwork::load(NetworkSource::File(file.path().to_path_buf()))
            .await
            .unwrap();

        file.as_file_mut().set_len(0).unwrap();
        assert!(shared.refresh().await.is_err());
        assert_eq!(shared.current().await.len(), 2);
    }
}
