//! Application state shared by all handlers.

use std::sync::Arc;

use crate::content::ContentStore;
use crate::media::MediaResolver;

/// Application state passed to all handlers
pub struct AppState<S> {
    /// Question, style and material source picked at startup
    pub content: ContentStore,

    pub resolver: Arc<MediaResolver<S>>,
}

impl<S> AppState<S> {
    pub fn new(content: ContentStore, resolver: MediaResolver<S>) -> Self {
        Self {
            content,
            resolver: Arc::new(resolver),
        }
    }
}

// Manual impl: S itself need not be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            content: self.content.clone(),
            resolver: Arc::clone(&self.resolver),
        }
    }
}
