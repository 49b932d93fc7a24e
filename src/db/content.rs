//! Content store queries: questions with options, styles, materials.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};
use std::collections::HashMap;

use super::LogOnError;
use crate::domain::{
    Letter, Material, MediaCategory, MediaFile, MediaRef, Question, QuizOption, RoomType, Style,
    StyleMaterials,
};

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Read an optional joined media_files record starting at column `start`.
///
/// Expects id, filename, bucket_name, file_path, file_type, alt_text, description.
fn media_at(row: &Row, start: usize) -> Result<Option<MediaFile>> {
    let id: Option<String> = row.get(start)?;
    let Some(id) = id else {
        return Ok(None);
    };
    Ok(Some(MediaFile {
        id,
        filename: row.get(start + 1)?,
        bucket: row.get(start + 2)?,
        file_path: row.get(start + 3)?,
        file_type: row.get(start + 4)?,
        alt_text: row.get(start + 5)?,
        description: row.get(start + 6)?,
    }))
}

fn parse_list(raw: &str, column: &str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(raw).log_warn_default(&format!("Malformed {} list", column))
}

// ==================== Queries ====================

const STYLE_SELECT: &str = r#"
    SELECT s.id, s.name, s.slug, s.description, s.history, s.characteristics, s.design_tips,
           s.color_palette, s.sort_order,
           h.id, h.filename, h.bucket_name, h.file_path, h.file_type, h.alt_text, h.description,
           v.id, v.filename, v.bucket_name, v.file_path, v.file_type, v.alt_text, v.description,
           p.id, p.filename, p.bucket_name, p.file_path, p.file_type, p.alt_text, p.description
    FROM design_styles s
    LEFT JOIN media_files h ON h.id = s.hero_image_id AND h.is_active = 1
    LEFT JOIN media_files v ON v.id = s.video_id AND v.is_active = 1
    LEFT JOIN media_files p ON p.id = s.pdf_guide_id AND p.is_active = 1
"#;

fn row_to_style(row: &Row) -> Result<Style> {
    let characteristics: String = row.get(5)?;
    let design_tips: String = row.get(6)?;
    let color_palette: String = row.get(7)?;
    Ok(Style {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        history: row.get(4)?,
        characteristics: parse_list(&characteristics, "characteristics"),
        design_tips: parse_list(&design_tips, "design_tips"),
        color_palette: parse_list(&color_palette, "color_palette"),
        sort_order: row.get(8)?,
        hero_image: media_at(row, 9)?,
        video: media_at(row, 16)?,
        pdf_guide: media_at(row, 23)?,
    })
}

/// Active styles in sort order.
pub fn get_design_styles(conn: &Connection) -> Result<Vec<Style>> {
    let sql = format!("{} WHERE s.is_active = 1 ORDER BY s.sort_order, s.name", STYLE_SELECT);
    let mut stmt = conn.prepare(&sql)?;
    let styles = stmt
        .query_map([], row_to_style)?
        .collect::<Result<Vec<_>>>()?;
    Ok(styles)
}

pub fn get_design_style_by_slug(conn: &Connection, slug: &str) -> Result<Option<Style>> {
    let sql = format!("{} WHERE s.slug = ?1 AND s.is_active = 1", STYLE_SELECT);
    conn.query_row(&sql, params![slug], row_to_style).optional()
}

/// Active questions with their active options, both in sort order.
///
/// Options without an image record fall back to a logical room reference keyed
/// by `image_key` (or the style name when unset); options without a style stay unscored.
pub fn get_quiz_questions(conn: &Connection) -> Result<Vec<Question>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT q.id, q.question_text, q.sort_order, r.name
    FROM quiz_questions q
    LEFT JOIN room_types r ON r.id = q.room_type_id
    WHERE q.is_active = 1
    ORDER BY q.sort_order, q.id
    "#,
    )?;

    let mut questions: Vec<Question> = stmt
        .query_map([], |row| {
            let room_name: Option<String> = row.get(3)?;
            Ok(Question {
                id: row.get(0)?,
                prompt: row.get(1)?,
                sort_order: row.get(2)?,
                room: RoomType::from_tag(room_name.as_deref().unwrap_or("General")),
                options: Vec::new(),
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(
        r#"
    SELECT o.question_id, o.option_letter, o.option_text, o.sort_order, s.name, o.image_key,
           m.id, m.filename, m.bucket_name, m.file_path, m.file_type, m.alt_text, m.description
    FROM quiz_options o
    LEFT JOIN design_styles s ON s.id = o.style_id AND s.is_active = 1
    LEFT JOIN media_files m ON m.id = o.image_id AND m.is_active = 1
    WHERE o.is_active = 1
    ORDER BY o.question_id, o.sort_order, o.option_letter
    "#,
    )?;

    let position: HashMap<String, usize> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| (q.id.clone(), i))
        .collect();

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let question_id: String = row.get(0)?;
        let Some(&qi) = position.get(&question_id) else {
            continue;
        };
        let raw_letter: String = row.get(1)?;
        let Some(letter) = Letter::parse(&raw_letter) else {
            tracing::warn!(question = %question_id, letter = %raw_letter, "Skipping option with invalid letter");
            continue;
        };

        let style: Option<String> = row.get(4)?;
        let image_key: Option<String> = row.get(5)?;
        let room = questions[qi].room.clone();
        let image = match (media_at(row, 6)?, &style) {
            (Some(file), _) => MediaRef::Stored(file),
            (None, Some(style)) => MediaRef::Logical {
                category: MediaCategory::Room(room.clone()),
                key: image_key.unwrap_or_else(|| style.clone()),
            },
            (None, None) => MediaRef::Missing,
        };

        questions[qi].options.push(QuizOption {
            letter,
            style,
            room,
            image,
            text: row.get(2)?,
            sort_order: row.get(3)?,
        });
    }

    Ok(questions)
}

/// Materials for a style, split into wood and metal, each in sort order.
pub fn get_style_materials(conn: &Connection, style_id: &str) -> Result<StyleMaterials> {
    let mut stmt = conn.prepare(
        r#"
    SELECT sm.id, sm.style_id, sm.material_type, sm.material_name, sm.description, sm.sort_order,
           m.id, m.filename, m.bucket_name, m.file_path, m.file_type, m.alt_text, m.description
    FROM style_materials sm
    LEFT JOIN media_files m ON m.id = sm.image_id AND m.is_active = 1
    WHERE sm.style_id = ?1
    ORDER BY sm.material_type, sm.sort_order
    "#,
    )?;

    let materials = stmt
        .query_map(params![style_id], |row| {
            Ok(Material {
                id: row.get(0)?,
                style_id: row.get(1)?,
                material_type: row.get(2)?,
                name: row.get(3)?,
                description: row.get(4)?,
                sort_order: row.get(5)?,
                image: media_at(row, 6)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(StyleMaterials::partition(materials))
}

// ==================== Inserts ====================

pub fn insert_media_file(conn: &Connection, file: &MediaFile) -> Result<()> {
    let ts = now();
    conn.execute(
        r#"
    INSERT INTO media_files (id, filename, original_filename, file_path, bucket_name, file_type,
                             alt_text, description, created_at, updated_at)
    VALUES (?1, ?2, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
    "#,
        params![
            file.id,
            file.filename,
            file.file_path,
            file.bucket,
            file.file_type,
            file.alt_text,
            file.description,
            ts,
        ],
    )?;
    Ok(())
}

pub fn insert_room_type(conn: &Connection, id: &str, room: &RoomType, sort_order: i64) -> Result<()> {
    conn.execute(
        r#"
    INSERT INTO room_types (id, name, slug, sort_order, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
        params![id, room.label(), crate::domain::slugify(room.label()), sort_order, now()],
    )?;
    Ok(())
}

pub fn insert_style(conn: &Connection, style: &Style) -> Result<()> {
    let ts = now();
    let to_json = |items: &[String]| serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string());
    conn.execute(
        r#"
    INSERT INTO design_styles (id, name, slug, description, history, characteristics, design_tips,
                               color_palette, hero_image_id, video_id, pdf_guide_id, sort_order,
                               created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)
    "#,
        params![
            style.id,
            style.name,
            style.slug,
            style.description,
            style.history,
            to_json(&style.characteristics),
            to_json(&style.design_tips),
            to_json(&style.color_palette),
            style.hero_image.as_ref().map(|m| &m.id),
            style.video.as_ref().map(|m| &m.id),
            style.pdf_guide.as_ref().map(|m| &m.id),
            style.sort_order,
            ts,
        ],
    )?;
    Ok(())
}

pub fn insert_question(conn: &Connection, question: &Question, room_type_id: Option<&str>) -> Result<()> {
    let ts = now();
    conn.execute(
        r#"
    INSERT INTO quiz_questions (id, question_text, room_type_id, sort_order, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?5)
    "#,
        params![question.id, question.prompt, room_type_id, question.sort_order, ts],
    )?;
    Ok(())
}

/// Insert an option; its style is linked by name.
pub fn insert_option(conn: &Connection, question_id: &str, option: &QuizOption) -> Result<()> {
    let (image_id, image_key) = match &option.image {
        MediaRef::Stored(file) => (Some(file.id.as_str()), None),
        MediaRef::Logical { key, .. } => (None, Some(key.as_str())),
        MediaRef::Missing => (None, None),
    };
    conn.execute(
        r#"
    INSERT INTO quiz_options (id, question_id, option_letter, option_text, style_id, image_id,
                              image_key, sort_order, created_at)
    VALUES (?1, ?2, ?3, ?4, (SELECT id FROM design_styles WHERE name = ?5), ?6, ?7, ?8, ?9)
    "#,
        params![
            format!("{}-{}", question_id, option.letter),
            question_id,
            option.letter.to_string(),
            option.text,
            option.style,
            image_id,
            image_key,
            option.sort_order,
            now(),
        ],
    )?;
    Ok(())
}

pub fn insert_material(conn: &Connection, material: &Material) -> Result<()> {
    conn.execute(
        r#"
    INSERT INTO style_materials (id, style_id, material_type, material_name, image_id, description,
                                 sort_order, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    "#,
        params![
            material.id,
            material.style_id,
            material.material_type,
            material.name,
            material.image.as_ref().map(|m| &m.id),
            material.description,
            material.sort_order,
            now(),
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::static_table;
    use crate::db::{run_migrations, seed_content};
    use crate::domain::{FileType, MaterialType};

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        seed_content(&conn).unwrap();
        conn
    }

    fn media(id: &str, path: &str, file_type: FileType) -> MediaFile {
        MediaFile {
            id: id.into(),
            filename: path.rsplit('/').next().unwrap().into(),
            bucket: "styledmyhome.images".into(),
            file_path: path.into(),
            file_type,
            alt_text: None,
            description: None,
        }
    }

    #[test]
    fn test_seeded_styles_match_static_order() {
        let conn = seeded();
        let styles = get_design_styles(&conn).unwrap();
        let names: Vec<_> = styles.iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, static_table::universe().names().to_vec());
        assert_eq!(styles[1].characteristics.len(), 5);
    }

    #[test]
    fn test_seeded_questions_have_sorted_options() {
        let conn = seeded();
        let questions = get_quiz_questions(&conn).unwrap();
        assert_eq!(questions.len(), 11);
        assert_eq!(questions[0].room, RoomType::Kitchen);
        let letters: Vec<char> = questions[0].options.iter().map(|o| o.letter.as_char()).collect();
        assert_eq!(letters, vec!['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H']);
        assert_eq!(questions[0].options[1].style.as_deref(), Some("Japandi"));
        assert!(matches!(questions[0].options[1].image, MediaRef::Logical { .. }));
    }

    #[test]
    fn test_seeded_option_images_match_static_table() {
        let conn = seeded();
        let stored = get_quiz_questions(&conn).unwrap();
        let table = static_table::questions();
        assert_eq!(stored.len(), table.len());

        let mut compared = 0;
        for (db_question, static_question) in stored.iter().zip(&table) {
            assert_eq!(db_question.room, static_question.room);
            assert_eq!(db_question.options.len(), static_question.options.len());
            for (db_option, static_option) in db_question.options.iter().zip(&static_question.options) {
                assert_eq!(db_option.letter, static_option.letter);
                assert_eq!(
                    db_option.image, static_option.image,
                    "question {} option {}",
                    static_question.id, static_option.letter
                );
                compared += 1;
            }
        }
        assert_eq!(compared, 88);

        let chair = &stored[9].options[1];
        assert_eq!(
            chair.image,
            MediaRef::Logical {
                category: MediaCategory::Room(RoomType::Lifestyle),
                key: "Japandi Chair".into(),
            }
        );
    }

    #[test]
    fn test_option_without_image_key_falls_back_to_style() {
        let conn = seeded();
        conn.execute("UPDATE quiz_options SET image_key = NULL WHERE question_id = '1'", [])
            .unwrap();
        let questions = get_quiz_questions(&conn).unwrap();
        assert_eq!(
            questions[0].options[1].image,
            MediaRef::Logical {
                category: MediaCategory::Room(RoomType::Kitchen),
                key: "Japandi".into(),
            }
        );
    }

    #[test]
    fn test_inactive_rows_are_hidden() {
        let conn = seeded();
        conn.execute("UPDATE quiz_questions SET is_active = 0 WHERE sort_order = 0", [])
            .unwrap();
        conn.execute("UPDATE design_styles SET is_active = 0 WHERE name = 'Japandi'", [])
            .unwrap();

        let questions = get_quiz_questions(&conn).unwrap();
        assert_eq!(questions.len(), 10);
        // Option still listed, but no longer scores
        assert!(questions[0].options[1].style.is_none());
        assert_eq!(questions[0].options[1].image, MediaRef::Missing);
        assert_eq!(get_design_styles(&conn).unwrap().len(), 7);
        assert!(get_design_style_by_slug(&conn, "japandi").unwrap().is_none());
    }

    #[test]
    fn test_stored_media_is_joined() {
        let conn = seeded();
        let hero = media("m1", "Style Match Images/Japandi.png", FileType::Image);
        let option_image = media("m2", "Kitchen Images/Japandi.png", FileType::Image);
        insert_media_file(&conn, &hero).unwrap();
        insert_media_file(&conn, &option_image).unwrap();
        conn.execute("UPDATE design_styles SET hero_image_id = 'm1' WHERE slug = 'japandi'", [])
            .unwrap();
        conn.execute(
            "UPDATE quiz_options SET image_id = 'm2' WHERE question_id = '1' AND option_letter = 'B'",
            [],
        )
        .unwrap();

        let style = get_design_style_by_slug(&conn, "japandi").unwrap().unwrap();
        assert_eq!(style.hero_image, Some(hero));
        assert!(style.video.is_none());

        let questions = get_quiz_questions(&conn).unwrap();
        assert_eq!(questions[0].options[1].image, MediaRef::Stored(option_image));
    }

    #[test]
    fn test_materials_partitioned() {
        let conn = seeded();
        let materials = get_style_materials(&conn, "modern-farmhouse").unwrap();
        assert_eq!(materials.wood.len(), 4);
        assert_eq!(materials.metal.len(), 4);
        assert_eq!(materials.wood[0].name, "Reclaimed Barn Wood");
        assert!(materials.wood.iter().all(|m| m.material_type == MaterialType::Wood));
        assert!(get_style_materials(&conn, "unknown").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_list_degrades_to_empty() {
        let conn = seeded();
        conn.execute(
            "UPDATE design_styles SET design_tips = 'not json' WHERE slug = 'bohemian'",
            [],
        )
        .unwrap();
        let style = get_design_style_by_slug(&conn, "bohemian").unwrap().unwrap();
        assert!(style.design_tips.is_empty());
        assert!(!style.characteristics.is_empty());
    }
}
