use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the synchronization layer and the remote store.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub sync: SyncSettings,
    pub store: StoreSettings,
}

/// Configuration settings for the synchronization layer.
///
/// Controls how long a cache snapshot counts as fresh.
#[derive(Debug, Deserialize, Clone)]
pub struct SyncSettings {
    pub freshness_window_secs: u64,
}

impl SyncSettings {
    /// The freshness window on the scale the cache uses.
    pub fn freshness_window_ms(&self) -> i64 {
        self.freshness_window_secs as i64 * 1000
    }
}

/// Configuration settings for the remote store.
///
/// Names the collection the topic documents live in.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub collection: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub sync: Option<PartialSyncSettings>,
    pub store: Option<PartialStoreSettings>,
}

/// Partial synchronization settings.
#[derive(Debug, Deserialize)]
pub struct PartialSyncSettings {
    pub freshness_window_secs: Option<u64>,
}

/// Partial store settings.
#[derive(Debug, Deserialize)]
pub struct PartialStoreSettings {
    pub collection: Option<String>,
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            sync: SyncSettings {
                freshness_window_secs: 300,
            },
            store: StoreSettings {
                collection: "topics".to_string(),
            },
        }
    }
}
