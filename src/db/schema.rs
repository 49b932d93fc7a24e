use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  conn.execute_batch(
    r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS media_files (
      id TEXT PRIMARY KEY,
      filename TEXT NOT NULL,
      original_filename TEXT,
      file_path TEXT NOT NULL,
      bucket_name TEXT NOT NULL,
      file_type TEXT NOT NULL CHECK (file_type IN ('image', 'video', 'pdf')),
      mime_type TEXT,
      alt_text TEXT,
      description TEXT,
      is_active INTEGER NOT NULL DEFAULT 1,
      created_at TEXT NOT NULL,
      updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS room_types (
      id TEXT PRIMARY KEY,
      name TEXT NOT NULL,
      slug TEXT NOT NULL UNIQUE,
      description TEXT,
      is_active INTEGER NOT NULL DEFAULT 1,
      sort_order INTEGER NOT NULL DEFAULT 0,
      created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS design_styles (
      id TEXT PRIMARY KEY,
      name TEXT NOT NULL UNIQUE,
      slug TEXT NOT NULL UNIQUE,
      description TEXT NOT NULL DEFAULT '',
      history TEXT,
      -- JSON arrays of strings
      characteristics TEXT NOT NULL DEFAULT '[]',
      design_tips TEXT NOT NULL DEFAULT '[]',
      color_palette TEXT NOT NULL DEFAULT '[]',
      hero_image_id TEXT REFERENCES media_files(id) ON DELETE SET NULL,
      video_id TEXT REFERENCES media_files(id) ON DELETE SET NULL,
      pdf_guide_id TEXT REFERENCES media_files(id) ON DELETE SET NULL,
      is_active INTEGER NOT NULL DEFAULT 1,
      sort_order INTEGER NOT NULL DEFAULT 0,
      created_at TEXT NOT NULL,
      updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS quiz_questions (
      id TEXT PRIMARY KEY,
      question_text TEXT NOT NULL,
      room_type_id TEXT REFERENCES room_types(id) ON DELETE SET NULL,
      question_type TEXT NOT NULL DEFAULT 'image_choice',
      is_active INTEGER NOT NULL DEFAULT 1,
      sort_order INTEGER NOT NULL DEFAULT 0,
      created_at TEXT NOT NULL,
      updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS quiz_options (
      id TEXT PRIMARY KEY,
      question_id TEXT NOT NULL REFERENCES quiz_questions(id) ON DELETE CASCADE,
      option_letter TEXT NOT NULL,
      option_text TEXT,
      style_id TEXT REFERENCES design_styles(id) ON DELETE SET NULL,
      image_id TEXT REFERENCES media_files(id) ON DELETE SET NULL,
      -- Logical image key used when image_id is unset; defaults to the style name
      image_key TEXT,
      is_active INTEGER NOT NULL DEFAULT 1,
      sort_order INTEGER NOT NULL DEFAULT 0,
      created_at TEXT NOT NULL,
      UNIQUE (question_id, option_letter)
    );

    CREATE TABLE IF NOT EXISTS style_materials (
      id TEXT PRIMARY KEY,
      style_id TEXT NOT NULL REFERENCES design_styles(id) ON DELETE CASCADE,
      material_type TEXT NOT NULL CHECK (material_type IN ('wood', 'metal')),
      material_name TEXT NOT NULL,
      image_id TEXT REFERENCES media_files(id) ON DELETE SET NULL,
      description TEXT,
      sort_order INTEGER NOT NULL DEFAULT 0,
      created_at TEXT NOT NULL
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_quiz_options_question ON quiz_options(question_id, sort_order);
    CREATE INDEX IF NOT EXISTS idx_style_materials_style ON style_materials(style_id, material_type, sort_order);
    CREATE INDEX IF NOT EXISTS idx_design_styles_order ON design_styles(is_active, sort_order);
    "#,
  )?;

  // Stores created before option image keys existed
  add_column_if_missing(conn, "quiz_options", "image_key", "TEXT")?;

  Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
  conn
    .prepare(&format!("SELECT {} FROM {} LIMIT 1", column, table))
    .is_ok()
}

/// Add a column if it doesn't already exist
fn add_column_if_missing(conn: &Connection, table: &str, column: &str, column_def: &str) -> Result<()> {
  if !column_exists(conn, table, column) {
    conn.execute(
      &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def),
      [],
    )?;
  }
  Ok(())
}
