//! Test utilities: in-memory object storage and content databases.
//!
//! Provides helpers that reuse the authoritative schema and seed data,
//! so tests never duplicate table definitions.

use rusqlite::Connection;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::db::{self, DbPool};
use crate::media::{storage::encode_path, ObjectStorage, ProbeError};

const FAKE_BASE_URL: &str = "https://storage.test";

/// Object storage holding a fixed set of objects and counting probes.
#[derive(Default)]
pub struct FakeStorage {
    objects: Mutex<HashSet<String>>,
    probes: AtomicUsize,
}

impl FakeStorage {
    /// Storage where each `(bucket, path)` pair exists.
    pub fn with_objects(objects: &[(&str, &str)]) -> Self {
        let storage = Self::default();
        for (bucket, path) in objects {
            storage.add_object(bucket, path);
        }
        storage
    }

    pub fn add_object(&self, bucket: &str, path: &str) {
        let url = self.public_url(bucket, path);
        if let Ok(mut objects) = self.objects.lock() {
            objects.insert(url);
        }
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl ObjectStorage for FakeStorage {
    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", FAKE_BASE_URL, bucket, encode_path(path))
    }

    async fn probe(&self, url: &str) -> Result<(), ProbeError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let exists = self
            .objects
            .lock()
            .map(|objects| objects.contains(url))
            .unwrap_or(false);
        if exists {
            Ok(())
        } else {
            Err(ProbeError::Status(404))
        }
    }
}

/// In-memory content database with the full schema, optionally seeded.
pub fn content_pool(seed: bool) -> rusqlite::Result<DbPool> {
    let conn = Connection::open_in_memory()?;
    db::run_migrations(&conn)?;
    if seed {
        db::seed_content(&conn)?;
    }
    Ok(Arc::new(Mutex::new(conn)))
}
