//! SQLite-backed content source.

use rusqlite::Connection;

use super::{ContentError, ContentSource, Loaded};
use crate::db::{self, try_lock, DbPool};
use crate::domain::{Question, Style, StyleMaterials};

#[derive(Clone)]
pub struct DatabaseContent {
    pool: DbPool,
}

impl DatabaseContent {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run a read against the locked connection, degrading failures to empty data.
    fn read<T, F>(&self, context: &str, f: F) -> Loaded<T>
    where
        T: Default,
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = match try_lock(&self.pool) {
            Ok(conn) => conn,
            Err(_) => return Loaded::failed(context, ContentError::Unavailable),
        };
        Loaded::from_result(context, f(&conn).map_err(ContentError::from))
    }
}

impl ContentSource for DatabaseContent {
    async fn list_questions(&self) -> Loaded<Vec<Question>> {
        self.read("Failed to load quiz questions", db::get_quiz_questions)
            .require_non_empty("questions")
    }

    async fn list_styles(&self) -> Loaded<Vec<Style>> {
        self.read("Failed to load design styles", db::get_design_styles)
            .require_non_empty("styles")
    }

    async fn materials_for_style(&self, style_id: &str) -> Loaded<StyleMaterials> {
        self.read("Failed to load style materials", |conn| {
            db::get_style_materials(conn, style_id)
        })
    }

    async fn style_by_slug(&self, slug: &str) -> Loaded<Option<Style>> {
        self.read("Failed to load style", |conn| {
            db::get_design_style_by_slug(conn, slug)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::content_pool;
    use std::sync::{Arc, Mutex};

    fn pool(seed: bool) -> DbPool {
        content_pool(seed).unwrap()
    }

    #[tokio::test]
    async fn test_seeded_database_serves_content() {
        let source = DatabaseContent::new(pool(true));

        let questions = source.list_questions().await;
        assert!(questions.is_ok());
        assert_eq!(questions.data.len(), 11);

        let styles = source.list_styles().await;
        assert_eq!(styles.data.len(), 8);

        let style = source.style_by_slug("bohemian").await.data.unwrap();
        let materials = source.materials_for_style(&style.id).await;
        assert!(materials.is_ok());
        assert_eq!(materials.data.metal[0].name, "Antique Brass");
    }

    #[tokio::test]
    async fn test_empty_database_flags_empty_lists() {
        let source = DatabaseContent::new(pool(false));
        let questions = source.list_questions().await;
        assert!(questions.data.is_empty());
        assert_eq!(questions.error, Some(ContentError::Empty("questions")));

        // Missing single records are not errors
        let style = source.style_by_slug("japandi").await;
        assert!(style.is_ok());
        assert!(style.data.is_none());
    }

    #[tokio::test]
    async fn test_store_error_degrades_to_empty() {
        let conn = Connection::open_in_memory().unwrap();
        let source = DatabaseContent::new(Arc::new(Mutex::new(conn)));
        let styles = source.list_styles().await;
        assert!(styles.data.is_empty());
        assert!(matches!(styles.error, Some(ContentError::Store(_))));
    }

    #[tokio::test]
    async fn test_poisoned_lock_reports_unavailable() {
        let pool = pool(true);
        let poisoner = pool.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison");
        })
        .join();

        let source = DatabaseContent::new(pool);
        let questions = source.list_questions().await;
        assert_eq!(questions.error, Some(ContentError::Unavailable));
    }
}
