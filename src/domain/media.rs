use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use super::material::MaterialType;

/// Kind of stored asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Video,
    Pdf,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Pdf => "pdf",
        }
    }
}

impl std::str::FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(FileType::Image),
            "video" => Ok(FileType::Video),
            "pdf" => Ok(FileType::Pdf),
            _ => Err(format!("Invalid file type: {}", s)),
        }
    }
}

impl ToSql for FileType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for FileType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// Asset record from the media_files table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: String,
    pub filename: String,
    pub bucket: String,
    pub file_path: String,
    pub file_type: FileType,
    pub alt_text: Option<String>,
    pub description: Option<String>,
}

/// Room tag carried by questions and options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    Kitchen,
    LivingRoom,
    DiningRoom,
    PrimaryBedroom,
    PrimaryBathroom,
    HomeOffice,
    Entryway,
    OutdoorPatio,
    /// Catch-all for chairs, palettes, door hardware
    Lifestyle,
    Other(String),
}

impl RoomType {
    /// Case-insensitive lookup by display label. Unknown tags are kept verbatim.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "kitchen" => RoomType::Kitchen,
            "living room" => RoomType::LivingRoom,
            "dining room" => RoomType::DiningRoom,
            "primary bedroom" => RoomType::PrimaryBedroom,
            "primary bathroom" => RoomType::PrimaryBathroom,
            "home office" => RoomType::HomeOffice,
            "entryway" => RoomType::Entryway,
            "outdoor patio" => RoomType::OutdoorPatio,
            "lifestyle" => RoomType::Lifestyle,
            _ => RoomType::Other(tag.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RoomType::Kitchen => "Kitchen",
            RoomType::LivingRoom => "Living Room",
            RoomType::DiningRoom => "Dining Room",
            RoomType::PrimaryBedroom => "Primary Bedroom",
            RoomType::PrimaryBathroom => "Primary Bathroom",
            RoomType::HomeOffice => "Home Office",
            RoomType::Entryway => "Entryway",
            RoomType::OutdoorPatio => "Outdoor Patio",
            RoomType::Lifestyle => "Lifestyle",
            RoomType::Other(tag) => tag,
        }
    }
}

impl From<String> for RoomType {
    fn from(value: String) -> Self {
        RoomType::from_tag(&value)
    }
}

impl From<RoomType> for String {
    fn from(room: RoomType) -> Self {
        room.label().to_string()
    }
}

/// What a logical media reference points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaCategory {
    /// Option image for a room; the key is the style (plus lifestyle hint)
    Room(RoomType),
    StylePortrait,
    StyleVideo,
    StyleGuide,
    Material(MaterialType),
}

impl MediaCategory {
    /// Parse the query form: `room:<label>`, `portrait`, `video`, `guide`, `wood`, `metal`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(room) = s.strip_prefix("room:") {
            if room.trim().is_empty() {
                return None;
            }
            return Some(MediaCategory::Room(RoomType::from_tag(room)));
        }
        match s.to_lowercase().as_str() {
            "portrait" | "style" => Some(MediaCategory::StylePortrait),
            "video" => Some(MediaCategory::StyleVideo),
            "guide" | "pdf" => Some(MediaCategory::StyleGuide),
            "wood" => Some(MediaCategory::Material(MaterialType::Wood)),
            "metal" => Some(MediaCategory::Material(MaterialType::Metal)),
            _ => None,
        }
    }

    /// Stable textual key, inverse of [`MediaCategory::parse`].
    pub fn as_key(&self) -> String {
        match self {
            MediaCategory::Room(room) => format!("room:{}", room.label().to_lowercase()),
            MediaCategory::StylePortrait => "portrait".to_string(),
            MediaCategory::StyleVideo => "video".to_string(),
            MediaCategory::StyleGuide => "guide".to_string(),
            MediaCategory::Material(kind) => kind.as_str().to_string(),
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, MediaCategory::StyleVideo)
    }
}

impl std::fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// Media reference on an option, discriminated by which content source built it.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaRef {
    /// Derived from names; resolved by probing storage
    Logical { category: MediaCategory, key: String },
    /// Linked asset record; its public URL is used as-is
    Stored(MediaFile),
    Missing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_from_tag_case_insensitive() {
        assert_eq!(RoomType::from_tag("Living Room"), RoomType::LivingRoom);
        assert_eq!(RoomType::from_tag("PRIMARY bedroom"), RoomType::PrimaryBedroom);
        assert_eq!(RoomType::from_tag(" Laundry "), RoomType::Other("Laundry".into()));
        assert_eq!(RoomType::from_tag("Laundry").label(), "Laundry");
    }

    #[test]
    fn test_category_parse_roundtrip_keys() {
        for raw in ["room:kitchen", "room:outdoor patio", "portrait", "video", "guide", "wood", "metal"] {
            let category = MediaCategory::parse(raw).unwrap();
            assert_eq!(MediaCategory::parse(&category.as_key()), Some(category));
        }
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        assert!(MediaCategory::parse("kitchen").is_none());
        assert!(MediaCategory::parse("room:").is_none());
        assert!(MediaCategory::parse("stone").is_none());
    }

    #[test]
    fn test_file_type_parse() {
        assert_eq!("VIDEO".parse::<FileType>(), Ok(FileType::Video));
        assert!("audio".parse::<FileType>().is_err());
    }
}
