pub mod content;
pub mod schema;

use rusqlite::{Connection, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::content::static_table;
use crate::domain::slugify;

// Re-export all public items from submodules
pub use content::*;
pub use schema::run_migrations;

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return the default
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                T::default()
            }
        }
    }
}

/// Error returned when database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Database unavailable")
  }
}

impl std::error::Error for DbLockError {}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).ok();
  }

  // Create backup before migrations if database exists
  if path.exists() {
    let backup_path = path.with_extension("db.backup");
    if let Err(e) = std::fs::copy(path, &backup_path) {
      tracing::warn!("Could not create database backup: {}", e);
    }
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

/// Fill an empty content store with the compiled-in questions, styles and materials.
///
/// Does nothing once any style exists, so admin edits are never overwritten.
/// All rows are written in one transaction; a failed seed leaves the store empty.
pub fn seed_content(conn: &Connection) -> Result<()> {
  let count: i64 = conn.query_row("SELECT COUNT(*) FROM design_styles", [], |row| row.get(0))?;
  if count > 0 {
    return Ok(());
  }

  // Rolls back on drop if any insert fails
  let tx = conn.unchecked_transaction()?;

  let styles = static_table::styles();
  for style in &styles {
    insert_style(&tx, style)?;
    let materials = static_table::materials(&style.id);
    for material in materials.wood.iter().chain(materials.metal.iter()) {
      insert_material(&tx, material)?;
    }
  }

  let mut rooms = HashSet::new();
  for question in static_table::questions() {
    let room_id = slugify(question.room.label());
    if rooms.insert(room_id.clone()) {
      insert_room_type(&tx, &room_id, &question.room, rooms.len() as i64)?;
    }
    insert_question(&tx, &question, Some(&room_id))?;
    for option in &question.options {
      insert_option(&tx, &question.id, option)?;
    }
  }

  tx.commit()?;
  tracing::info!(styles = styles.len(), "Seeded content store");
  Ok(())
}
