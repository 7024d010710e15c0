//! Browser state container
//!
//! Holds the submitted pages and the store they are persisted to. The
//! rendering surface is a collaborator passed in per call.

use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::CoreError;
use crate::page::Page;
use crate::page_list::PageList;
use crate::snapshot::Snapshotter;
use crate::store::PageStore;
use crate::Result;

pub struct Browser {
    /// Configuration
    config: Config,
    /// Submitted pages and selection
    pages: Arc<RwLock<PageList>>,
    /// Persistence
    store: PageStore,
}

impl Browser {
    /// Open the configured database, ensure the schema and seed the page list.
    pub async fn open(config: Config) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = PageStore::open(&config.database_path)?;
        Self::with_store(config, store).await
    }

    /// Use an already running store, e.g. an in-memory one.
    pub async fn with_store(config: Config, store: PageStore) -> Result<Self> {
        store.initialize_schema().await?;

        let pages = PageList::seeded(&config.seed_urls);

        tracing::info!(
            database = %config.database_path.display(),
            seeded = pages.len(),
            "Browser initialized"
        );

        Ok(Self {
            config,
            pages: Arc::new(RwLock::new(pages)),
            store,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    // === Page list ===

    pub fn submit_url(&self, input: &str) -> Result<Page> {
        Ok(self.pages.write().submit(input)?.clone())
    }

    pub fn select(&self, id: Uuid) -> Result<Page> {
        Ok(self.pages.write().select(id)?.clone())
    }

    pub fn selected(&self) -> Option<Page> {
        self.pages.read().selected().cloned()
    }

    pub fn pages(&self) -> Vec<Page> {
        self.pages.read().pages().to_vec()
    }

    // === Persistence ===

    /// Insert the selected page as it is now.
    pub async fn persist_selected(&self) -> Result<Page> {
        let page = self.selected().ok_or(CoreError::NoPageSelected)?;
        self.store.insert(page.clone()).await?;
        Ok(page)
    }

    /// Capture the selected page, attach the bytes and persist it.
    ///
    /// A failed capture changes nothing. A failed insert keeps the snapshot
    /// on the in-memory page.
    pub async fn snapshot_selected<S: Snapshotter>(&self, snapshotter: &S) -> Result<Page> {
        let id = self
            .pages
            .read()
            .selected()
            .map(Page::id)
            .ok_or(CoreError::NoPageSelected)?;

        let bytes = snapshotter.capture().await?;

        let page = {
            let mut pages = self.pages.write();
            let page = pages
                .get_mut(id)
                .ok_or_else(|| CoreError::PageNotFound(id.to_string()))?;
            page.set_snapshot(bytes);
            page.clone()
        };

        tracing::info!(
            page_id = %id,
            bytes = page.snapshot.as_ref().map_or(0, Vec::len),
            "Captured snapshot"
        );

        self.store.insert(page.clone()).await?;
        Ok(page)
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.store.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotError;
    use std::path::PathBuf;

    struct FixedSnapshot(Vec<u8>);

    impl Snapshotter for FixedSnapshot {
        async fn capture(&self) -> std::result::Result<Vec<u8>, SnapshotError> {
            Ok(self.0.clone())
        }
    }

    struct Detached;

    impl Snapshotter for Detached {
        async fn capture(&self) -> std::result::Result<Vec<u8>, SnapshotError> {
            Err(SnapshotError::NoSurface)
        }
    }

    async fn browser() -> Browser {
        let config = Config::new(PathBuf::from("unused"));
        let store = PageStore::open_in_memory().unwrap();
        Browser::with_store(config, store).await.unwrap()
    }

    #[tokio::test]
    async fn test_seeded_and_submit() {
        let browser = browser().await;
        assert_eq!(browser.pages().len(), 2);

        let page = browser.submit_url("https://example.com").unwrap();
        assert_eq!(browser.pages().len(), 3);
        assert_eq!(browser.pages()[2].id(), page.id());
        assert!(matches!(
            browser.submit_url("nope"),
            Err(CoreError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_snapshot_requires_selection() {
        let browser = browser().await;
        let err = browser
            .snapshot_selected(&FixedSnapshot(vec![1]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NoPageSelected));
    }

    #[tokio::test]
    async fn test_snapshot_persists_selected_page() {
        let browser = browser().await;
        let id = browser.pages()[0].id();
        browser.select(id).unwrap();

        let png = vec![0x89, b'P', b'N', b'G', 0, 0];
        let page = browser
            .snapshot_selected(&FixedSnapshot(png.clone()))
            .await
            .unwrap();
        assert_eq!(page.snapshot.as_deref(), Some(png.as_slice()));

        let row = browser.store().get(id).await.unwrap().unwrap();
        assert_eq!(row.snapshot, Some(png));
        assert_eq!(row.url, "https://prayash.io/");
    }

    #[tokio::test]
    async fn test_failed_capture_changes_nothing() {
        let browser = browser().await;
        let id = browser.pages()[1].id();
        browser.select(id).unwrap();

        let err = browser.snapshot_selected(&Detached).await.unwrap_err();
        assert!(matches!(err, CoreError::Snapshot(SnapshotError::NoSurface)));
        assert!(browser.selected().unwrap().snapshot.is_none());
        assert_eq!(browser.store().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_persist_selected_once() {
        let browser = browser().await;
        let id = browser.pages()[0].id();
        browser.select(id).unwrap();

        browser.persist_selected().await.unwrap();
        assert!(matches!(
            browser.persist_selected().await,
            Err(CoreError::Storage(_))
        ));
        assert_eq!(browser.store().count().await.unwrap(), 1);

        browser.shutdown().await.unwrap();
        assert!(browser.store().is_closed());
    }
}
