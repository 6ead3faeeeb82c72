use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shortcut_core::repository::Result;
use shortcut_core::{Alias, DeleteRepository, ReadRepository, StorageError, WriteRepository};
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory storage entry for a URL mapping.
#[derive(Debug, Clone)]
struct StoredUrl {
    #[allow(dead_code)]
    id: i64,
    target_url: String,
}

/// In-memory implementation of the repository traits using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Inserts go through the entry API so the
/// existence check and the write happen under the same shard lock.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: DashMap<String, StoredUrl>,
    next_id: AtomicI64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn read(&self, alias: &Alias) -> Result<String> {
        self.storage
            .get(alias.as_str())
            .map(|entry| entry.target_url.clone())
            .ok_or_else(|| StorageError::NotFound(alias.to_string()))
    }
}

#[async_trait]
impl WriteRepository for InMemoryRepository {
    async fn create(&self, alias: &Alias, target_url: &str) -> Result<()> {
        match self.storage.entry(alias.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(alias.to_string())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                slot.insert(StoredUrl {
                    id,
                    target_url: target_url.to_owned(),
                });
                Ok(())
            }
        }
    }
}

#[async_trait]
impl DeleteRepository for InMemoryRepository {
    async fn delete(&self, alias: &Alias) -> Result<()> {
        self.storage
            .remove(alias.as_str())
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(alias.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn alias(s: &str) -> Alias {
        Alias::new_unchecked(s)
    }

    #[tokio::test]
    async fn create_and_read() {
        let repo = InMemoryRepository::new();

        repo.create(&alias("abc123"), "https://example.com")
            .await
            .unwrap();

        let url = repo.read(&alias("abc123")).await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn round_trip_preserves_bytes() {
        let repo = InMemoryRepository::new();
        let target = "https://example.com/p\u{e4}th?q=a%20b&x=1#frag";

        repo.create(&alias("odd"), target).await.unwrap();

        assert_eq!(repo.read(&alias("odd")).await.unwrap(), target);
    }

    #[tokio::test]
    async fn read_nonexistent() {
        let repo = InMemoryRepository::new();

        let err = repo.read(&alias("nope")).await.unwrap_err();
        assert_eq!(err, StorageError::NotFound("nope".to_string()));
    }

    #[tokio::test]
    async fn create_conflict_keeps_original() {
        let repo = InMemoryRepository::new();

        repo.create(&alias("abc123"), "https://example.com")
            .await
            .unwrap();

        let err = repo
            .create(&alias("abc123"), "https://other.com")
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(
            repo.read(&alias("abc123")).await.unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn delete_then_read() {
        let repo = InMemoryRepository::new();

        repo.create(&alias("abc123"), "https://example.com")
            .await
            .unwrap();

        repo.delete(&alias("abc123")).await.unwrap();
        assert!(repo.read(&alias("abc123")).await.unwrap_err().is_not_found());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn delete_nonexistent() {
        let repo = InMemoryRepository::new();

        let err = repo.delete(&alias("nope")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let repo = InMemoryRepository::new();

        repo.create(&alias("a"), "https://a.example").await.unwrap();
        let first = repo.storage.get("a").unwrap().id;
        repo.delete(&alias("a")).await.unwrap();
        repo.create(&alias("a"), "https://a.example").await.unwrap();
        let second = repo.storage.get("a").unwrap().id;

        assert!(second > first);
    }

    #[tokio::test]
    async fn racing_creates_yield_one_winner() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..32u32 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.create(&alias("contested"), &format!("https://example{}.com", i))
                    .await
            }));
        }

        let mut wins = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => wins += 1,
                Err(e) if e.is_conflict() => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(conflicts, 31);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_access() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let a = Alias::new_unchecked(format!("code{:03}", i));
                repo.create(&a, &format!("https://example{}.com", i))
                    .await
                    .unwrap();
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let a = Alias::new_unchecked(format!("code{:03}", i));
            let url = repo.read(&a).await.unwrap();
            assert_eq!(url, format!("https://example{}.com", i));
        }
    }
}
