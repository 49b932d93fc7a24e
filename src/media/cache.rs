use std::collections::{HashMap, VecDeque};

use super::AssetUrl;
use crate::domain::MediaCategory;

pub type CacheKey = (MediaCategory, String);

/// Bounded FIFO of resolved assets. Capacity 0 disables caching.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    capacity: usize,
    entries: HashMap<CacheKey, AssetUrl>,
    order: VecDeque<CacheKey>,
}

impl ResolutionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn get(&self, key: &CacheKey) -> Option<&AssetUrl> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: CacheKey, url: AssetUrl) {
        if !self.is_enabled() {
            return;
        }
        if self.entries.insert(key.clone(), url).is_none() {
            self.order.push_back(key);
        }
        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.order.retain(|k| k != key);
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
