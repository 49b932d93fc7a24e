//! Per-view media slots filled in as probes complete.
//!
//! Each request for a slot hands out a [`Ticket`] carrying a generation number.
//! Re-requesting the same slot bumps the generation, so results for an older
//! ticket are dropped instead of overwriting newer state.

use std::collections::HashMap;

use serde::Serialize;

use super::cache::CacheKey;
use super::AssetUrl;
use crate::domain::MediaCategory;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
  Loading { placeholder: String },
  Ready { asset: AssetUrl },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
  key: CacheKey,
  generation: u64,
}

impl Ticket {
  pub fn category(&self) -> &MediaCategory {
    &self.key.0
  }

  pub fn key(&self) -> &str {
    &self.key.1
  }
}

#[derive(Debug)]
pub struct MediaSlots {
  placeholder: String,
  next_generation: u64,
  slots: HashMap<CacheKey, (u64, LoadState)>,
}

impl MediaSlots {
  pub fn new(placeholder: impl Into<String>) -> Self {
    Self {
      placeholder: placeholder.into(),
      next_generation: 0,
      slots: HashMap::new(),
    }
  }

  /// Mark a slot loading and return the ticket its result must present.
  pub fn request(&mut self, category: MediaCategory, key: impl Into<String>) -> Ticket {
    self.next_generation += 1;
    let key = (category, key.into());
    let loading = LoadState::Loading {
      placeholder: self.placeholder.clone(),
    };
    self.slots.insert(key.clone(), (self.next_generation, loading));
    Ticket {
      key,
      generation: self.next_generation,
    }
  }

  /// Apply a result. Returns false when the ticket was superseded.
  pub fn complete(&mut self, ticket: &Ticket, asset: AssetUrl) -> bool {
    match self.slots.get_mut(&ticket.key) {
      Some((generation, state)) if *generation == ticket.generation => {
        *state = LoadState::Ready { asset };
        true
      }
      _ => {
        tracing::debug!(key = %ticket.key.1, "Discarding stale media result");
        false
      }
    }
  }

  pub fn get(&self, category: &MediaCategory, key: &str) -> Option<&LoadState> {
    self
      .slots
      .get(&(category.clone(), key.to_string()))
      .map(|(_, state)| state)
  }

  /// Current state, or a loading placeholder for slots never requested.
  pub fn state_or_loading(&self, category: &MediaCategory, key: &str) -> LoadState {
    self.get(category, key).cloned().unwrap_or_else(|| LoadState::Loading {
      placeholder: self.placeholder.clone(),
    })
  }

  pub fn all_ready(&self) -> bool {
    self
      .slots
      .values()
      .all(|(_, state)| matches!(state, LoadState::Ready { .. }))
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }
}
