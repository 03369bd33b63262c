use async_trait::async_trait;
use checkin::Participant;
use checkin::ports::RosterCache;
use moka::future::Cache;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// Moka-backed holder for the merged participant snapshot.
/// One key, expired wholesale by the cache's time-to-live.
pub struct MokaRosterCache {
    cache: Cache<(), Arc<Vec<Participant>>>,
}

impl MokaRosterCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .name("participants")
            .time_to_live(ttl)
            .build();

        Self { cache }
    }
}

impl Default for MokaRosterCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

#[async_trait]
impl RosterCache for MokaRosterCache {
    async fn get(&self) -> Option<Arc<Vec<Participant>>> {
        self.cache.get(&()).await
    }

    async fn put(&self, snapshot: Arc<Vec<Participant>>) {
        self.cache.insert((), snapshot).await;
    }

    async fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}

impl Debug for MokaRosterCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaRosterCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn snapshot(ids: &[&str]) -> Arc<Vec<Participant>> {
        Arc::new(
            ids.iter()
                .map(|id| Participant {
                    id: id.to_string(),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_moka_roster_cache_put_and_get() {
        let cache = MokaRosterCache::default();
        assert!(cache.get().await.is_none());

        cache.put(snapshot(&["BK1", "BK2"])).await;

        let cached = cache.get().await.unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].id, "BK1");
    }

    #[tokio::test]
    async fn test_moka_roster_cache_overwrite() {
        let cache = MokaRosterCache::default();

        cache.put(snapshot(&["BK1"])).await;
        cache.put(snapshot(&["BK2", "BK3"])).await;

        let cached = cache.get().await.unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].id, "BK2");
    }

    #[tokio::test]
    async fn test_moka_roster_cache_invalidate() {
        let cache = MokaRosterCache::default();

        cache.put(snapshot(&["BK1"])).await;
        cache.invalidate().await;

        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_moka_roster_cache_expires() {
        let cache = MokaRosterCache::new(Duration::from_millis(100));

        cache.put(snapshot(&["BK1"])).await;
        assert!(cache.get().await.is_some());

        // Wait for expiration
        sleep(Duration::from_millis(150)).await;

        assert!(cache.get().await.is_none());
    }
}
