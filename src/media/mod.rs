//! Media resolution.
//!
//! Turns a logical reference (category plus human-readable key) into a
//! verified public URL:
//!
//! 1. Map the category and normalized key to a bucket and object path
//! 2. Build the public URL and probe it once
//! 3. On any failure fall back to the default video (videos) or the
//!    placeholder (everything else); guides fall back to nothing
//!
//! Stored asset records skip probing and use their public URL directly.

pub mod cache;
pub mod paths;
pub mod slots;
pub mod storage;

pub use cache::{CacheKey, ResolutionCache};
pub use paths::{normalize_key, storage_path, StoragePath};
pub use slots::{LoadState, MediaSlots, Ticket};
pub use storage::{HttpStorage, ObjectStorage, ProbeError};

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::sync::Mutex;

use crate::config;
use crate::domain::{MediaCategory, MediaFile, MediaRef};

/// Resolution outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "url", rename_all = "snake_case")]
pub enum AssetUrl {
    /// Probed and present, or taken from a stored record
    Verified(String),
    /// Fallback asset
    Placeholder(String),
}

impl AssetUrl {
    pub fn as_str(&self) -> &str {
        match self {
            AssetUrl::Verified(url) | AssetUrl::Placeholder(url) => url,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, AssetUrl::Verified(_))
    }
}

/// Bucket names and fallback assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSettings {
    pub images_bucket: String,
    pub videos_bucket: String,
    pub pdfs_bucket: String,
    pub placeholder_url: String,
    pub default_video_url: String,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            images_bucket: config::DEFAULT_IMAGES_BUCKET.to_string(),
            videos_bucket: config::DEFAULT_VIDEOS_BUCKET.to_string(),
            pdfs_bucket: config::DEFAULT_PDFS_BUCKET.to_string(),
            placeholder_url: config::DEFAULT_PLACEHOLDER_URL.to_string(),
            default_video_url: config::DEFAULT_VIDEO_URL.to_string(),
        }
    }
}

pub struct MediaResolver<S> {
    storage: S,
    settings: MediaSettings,
    cache: Mutex<ResolutionCache>,
}

impl<S: ObjectStorage> MediaResolver<S> {
    pub fn new(storage: S, settings: MediaSettings) -> Self {
        Self::with_cache(storage, settings, 0)
    }

    /// Resolver remembering up to `capacity` results. 0 disables caching.
    pub fn with_cache(storage: S, settings: MediaSettings, capacity: usize) -> Self {
        Self {
            storage,
            settings,
            cache: Mutex::new(ResolutionCache::new(capacity)),
        }
    }

    pub fn settings(&self) -> &MediaSettings {
        &self.settings
    }

    pub fn placeholder(&self) -> &str {
        &self.settings.placeholder_url
    }

    pub fn fallback(&self, category: &MediaCategory) -> AssetUrl {
        if category.is_video() {
            AssetUrl::Placeholder(self.settings.default_video_url.clone())
        } else {
            AssetUrl::Placeholder(self.settings.placeholder_url.clone())
        }
    }

    fn cached(&self, key: &CacheKey) -> Option<AssetUrl> {
        let cache = self.cache.lock().ok()?;
        cache.get(key).cloned()
    }

    fn remember(&self, key: CacheKey, url: &AssetUrl) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, url.clone());
        }
    }

    /// Probe the candidate location; Some(url) only when it exists.
    async fn probe_candidate(&self, category: &MediaCategory, key: &str) -> Option<String> {
        let StoragePath { bucket, path } = storage_path(category, key, &self.settings)?;
        let url = self.storage.public_url(&bucket, &path);
        match self.storage.probe(&url).await {
            Ok(()) => Some(url),
            Err(e) => {
                tracing::debug!(%category, path = %path, error = %e, "Asset unresolved");
                None
            }
        }
    }

    /// Verified URL for a logical reference, or the category's fallback.
    pub async fn resolve(&self, category: &MediaCategory, key: &str) -> AssetUrl {
        let cache_key = (category.clone(), normalize_key(key));
        if let Some(hit) = self.cached(&cache_key) {
            return hit;
        }

        let url = match self.probe_candidate(category, key).await {
            Some(url) => AssetUrl::Verified(url),
            None => self.fallback(category),
        };
        self.remember(cache_key, &url);
        url
    }

    /// PDF guide for a style, if one is published.
    pub async fn resolve_guide(&self, style: &str) -> Option<String> {
        match self.resolve(&MediaCategory::StyleGuide, style).await {
            AssetUrl::Verified(url) => Some(url),
            AssetUrl::Placeholder(_) => None,
        }
    }

    pub fn stored_url(&self, file: &MediaFile) -> String {
        self.storage.public_url(&file.bucket, &file.file_path)
    }

    pub async fn url_for(&self, media: &MediaRef) -> AssetUrl {
        match media {
            MediaRef::Stored(file) => AssetUrl::Verified(self.stored_url(file)),
            MediaRef::Logical { category, key } => self.resolve(category, key).await,
            MediaRef::Missing => AssetUrl::Placeholder(self.settings.placeholder_url.clone()),
        }
    }

    /// Stored record if present, otherwise resolve the logical name.
    pub async fn stored_or_resolve(
        &self,
        stored: Option<&MediaFile>,
        category: &MediaCategory,
        key: &str,
    ) -> AssetUrl {
        match stored {
            Some(file) => AssetUrl::Verified(self.stored_url(file)),
            None => self.resolve(category, key).await,
        }
    }

    /// Resolve tickets concurrently, applying each result as it arrives.
    ///
    /// Returns how many results were applied; superseded tickets are dropped.
    pub async fn resolve_all(&self, tickets: Vec<Ticket>, slots: &mut MediaSlots) -> usize {
        let mut pending: FuturesUnordered<_> = tickets
            .into_iter()
            .map(|ticket| async move {
                let url = self.resolve(ticket.category(), ticket.key()).await;
                (ticket, url)
            })
            .collect();

        let mut applied = 0;
        while let Some((ticket, url)) = pending.next().await {
            if slots.complete(&ticket, url) {
                applied += 1;
            }
        }
        applied
    }

    /// Drop a cached result so the next resolve probes again.
    pub fn invalidate(&self, category: &MediaCategory, key: &str) -> bool {
        match self.cache.lock() {
            Ok(mut cache) => cache.invalidate(&(category.clone(), normalize_key(key))),
            Err(_) => false,
        }
    }

    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }
}
