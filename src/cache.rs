//! In-process announcement cache
//!
//! String-keyed, string-valued, no durability: entries are derived from
//! current database state and recomputed by background jobs, so losing them
//! on restart only costs a recomputation.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Global key for the sold-out-soon announcement.
pub const ANNOUNCEMENTS_KEY: &str = "RECENT_ANNOUNCEMENTS";

/// Key prefix for per-conference featured-speaker entries.
pub const FEATURED_SPEAKER_KEY: &str = "CONF_FEAT_SPEAK";

/// Build the cache key for a conference's featured-speaker entry.
pub fn featured_speaker_key(conference_id: &str) -> String {
    format!("{}_{}", FEATURED_SPEAKER_KEY, conference_id)
}

/// Shared read-through cache handle. Cheap to clone.
#[derive(Clone, Default)]
pub struct Cache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    pub async fn delete(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}
