//! Content sources for questions, styles and materials.
//!
//! Two backings provide the same read interface:
//! - **Static**: compiled-in table, always available
//! - **Database**: SQLite content store edited by the admin tooling
//!
//! The backing is picked once at startup (see [`ContentStore`]). Callers never
//! see a fault: every read returns [`Loaded`], carrying data (possibly empty)
//! and an optional [`ContentError`].

pub mod database;
pub mod static_table;

pub use database::DatabaseContent;
pub use static_table::StaticContent;

use std::future::Future;

use crate::domain::{Question, Style, StyleMaterials};

/// Content read failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The backing store could not be read
    Store(String),
    /// Store lock poisoned
    Unavailable,
    /// Read succeeded but returned nothing
    Empty(&'static str),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::Store(err) => write!(f, "Content store error: {}", err),
            ContentError::Unavailable => write!(f, "Content store unavailable"),
            ContentError::Empty(what) => write!(f, "No {} available", what),
        }
    }
}

impl ContentError {
    /// Returns a user-facing message without store internals.
    pub fn user_message(&self) -> &'static str {
        match self {
            ContentError::Store(_) | ContentError::Unavailable => "Content is temporarily unavailable",
            ContentError::Empty(_) => "No content available",
        }
    }
}

impl std::error::Error for ContentError {}

impl From<rusqlite::Error> for ContentError {
    fn from(e: rusqlite::Error) -> Self {
        ContentError::Store(e.to_string())
    }
}

/// Outcome of a content read: data plus an error flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    pub error: Option<ContentError>,
}

impl<T> Loaded<T> {
    pub fn ok(data: T) -> Self {
        Self { data, error: None }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<T, ContentError> {
        match self.error {
            None => Ok(self.data),
            Some(e) => Err(e),
        }
    }
}

impl<T: Default> Loaded<T> {
    /// Empty data with an error, logged at warn level.
    pub fn failed(context: &str, error: ContentError) -> Self {
        tracing::warn!("{}: {}", context, error);
        Self {
            data: T::default(),
            error: Some(error),
        }
    }

    /// Wrap a store result, degrading errors to empty data.
    pub fn from_result(context: &str, result: Result<T, ContentError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failed(context, e),
        }
    }
}

impl<T> Loaded<Vec<T>> {
    /// Flag an empty but otherwise successful list.
    pub fn require_non_empty(mut self, what: &'static str) -> Self {
        if self.error.is_none() && self.data.is_empty() {
            self.error = Some(ContentError::Empty(what));
        }
        self
    }
}

/// Read interface over quiz content.
///
/// Questions and options come back in sort order; randomization is applied
/// later by the quiz session.
pub trait ContentSource {
    fn list_questions(&self) -> impl Future<Output = Loaded<Vec<Question>>> + Send;

    fn list_styles(&self) -> impl Future<Output = Loaded<Vec<Style>>> + Send;

    fn materials_for_style(&self, style_id: &str) -> impl Future<Output = Loaded<StyleMaterials>> + Send;

    fn style_by_slug(&self, slug: &str) -> impl Future<Output = Loaded<Option<Style>>> + Send;
}

/// Content backing chosen at startup.
#[derive(Clone)]
pub enum ContentStore {
    Static(StaticContent),
    Database(DatabaseContent),
}

impl ContentStore {
    pub fn kind(&self) -> &'static str {
        match self {
            ContentStore::Static(_) => "static",
            ContentStore::Database(_) => "database",
        }
    }
}

impl ContentSource for ContentStore {
    async fn list_questions(&self) -> Loaded<Vec<Question>> {
        match self {
            ContentStore::Static(s) => s.list_questions().await,
            ContentStore::Database(d) => d.list_questions().await,
        }
    }

    async fn list_styles(&self) -> Loaded<Vec<Style>> {
        match self {
            ContentStore::Static(s) => s.list_styles().await,
            ContentStore::Database(d) => d.list_styles().await,
        }
    }

    async fn materials_for_style(&self, style_id: &str) -> Loaded<StyleMaterials> {
        match self {
            ContentStore::Static(s) => s.materials_for_style(style_id).await,
            ContentStore::Database(d) => d.materials_for_style(style_id).await,
        }
    }

    async fn style_by_slug(&self, slug: &str) -> Loaded<Option<Style>> {
        match self {
            ContentStore::Static(s) => s.style_by_slug(slug).await,
            ContentStore::Database(d) => d.style_by_slug(slug).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_from_result_degrades_to_default() {
        let loaded: Loaded<Vec<u8>> =
            Loaded::from_result("reading", Err(ContentError::Store("boom".into())));
        assert!(loaded.data.is_empty());
        assert_eq!(loaded.error, Some(ContentError::Store("boom".into())));
        assert!(loaded.into_result().is_err());
    }

    #[test]
    fn test_require_non_empty() {
        let loaded: Loaded<Vec<u8>> = Loaded::ok(vec![]).require_non_empty("questions");
        assert_eq!(loaded.error, Some(ContentError::Empty("questions")));

        let loaded = Loaded::ok(vec![1]).require_non_empty("questions");
        assert!(loaded.is_ok());
    }

    #[test]
    fn test_user_message_hides_details() {
        let err = ContentError::Store("no such table: quiz_questions".into());
        assert!(!err.user_message().contains("quiz_questions"));
    }

    #[tokio::test]
    async fn test_static_store_dispatch() {
        let store = ContentStore::Static(StaticContent::new());
        assert_eq!(store.kind(), "static");
        let questions = store.list_questions().await;
        assert!(questions.is_ok());
        assert_eq!(questions.data.len(), 11);
    }
}
