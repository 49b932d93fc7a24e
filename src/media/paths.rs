//! Logical name to storage path mapping.

use unicode_normalization::UnicodeNormalization;

use super::MediaSettings;
use crate::domain::{MaterialType, MediaCategory, RoomType};

/// Bucket plus object path inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath {
  pub bucket: String,
  pub path: String,
}

/// NFC-normalize, collapse whitespace runs to single spaces, trim.
pub fn normalize_key(key: &str) -> String {
  let composed: String = key.nfc().collect();
  composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn room_folder(room: &RoomType, key: &str) -> &'static str {
  match room {
    RoomType::Kitchen => "Kitchen Images",
    RoomType::LivingRoom => "Living Room Images",
    RoomType::DiningRoom => "Dining Room Images",
    RoomType::PrimaryBedroom => "Master Bedroom Images",
    RoomType::PrimaryBathroom => "Master Bathroom Images",
    RoomType::Entryway => "Foyer Images",
    RoomType::OutdoorPatio => "Patio Images",
    RoomType::Lifestyle => lifestyle_folder(key),
    RoomType::HomeOffice | RoomType::Other(_) => "General Images",
  }
}

/// Lifestyle images are split by what the key describes.
///
/// Matching is case-sensitive, so "Outdoor" is not a door.
fn lifestyle_folder(key: &str) -> &'static str {
  if key.contains("Chair") {
    "Chair Images"
  } else if key.contains("Color") {
    "Color Palette"
  } else if key.contains("Door") {
    "Doorknob Images"
  } else {
    "General Images"
  }
}

/// Candidate location for a logical reference. None for a blank key.
pub fn storage_path(category: &MediaCategory, key: &str, settings: &MediaSettings) -> Option<StoragePath> {
  let key = normalize_key(key);
  if key.is_empty() {
    return None;
  }

  let images = |folder: &str| StoragePath {
    bucket: settings.images_bucket.clone(),
    path: format!("{}/{}.png", folder, key),
  };

  Some(match category {
    MediaCategory::Room(room) => images(room_folder(room, &key)),
    MediaCategory::StylePortrait => images("Style Match Images"),
    MediaCategory::Material(MaterialType::Wood) => images("Wood Images"),
    MediaCategory::Material(MaterialType::Metal) => images("Metal Images"),
    MediaCategory::StyleVideo => StoragePath {
      bucket: settings.videos_bucket.clone(),
      path: format!("{}.mp4", key),
    },
    MediaCategory::StyleGuide => StoragePath {
      bucket: settings.pdfs_bucket.clone(),
      path: format!("{} Style Guide.pdf", key),
    },
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn path(category: MediaCategory, key: &str) -> Option<String> {
    storage_path(&category, key, &MediaSettings::default()).map(|p| format!("{}:{}", p.bucket, p.path))
  }

  #[test]
  fn test_normalize_key() {
    assert_eq!(normalize_key("  Mid   Century\tModern "), "Mid Century Modern");
    // Decomposed e + combining acute composes to a single code point
    assert_eq!(normalize_key("Cafe\u{0301}"), "Caf\u{00e9}");
    assert_eq!(normalize_key("   "), "");
  }

  #[test]
  fn test_room_folders() {
    assert_eq!(
      path(MediaCategory::Room(RoomType::PrimaryBedroom), "Japandi").unwrap(),
      "styledmyhome.images:Master Bedroom Images/Japandi.png"
    );
    assert_eq!(
      path(MediaCategory::Room(RoomType::Entryway), "Bohemian").unwrap(),
      "styledmyhome.images:Foyer Images/Bohemian.png"
    );
    assert_eq!(
      path(MediaCategory::Room(RoomType::from_tag("Laundry")), "Bohemian").unwrap(),
      "styledmyhome.images:General Images/Bohemian.png"
    );
  }

  #[test]
  fn test_lifestyle_dispatch_by_key() {
    let lifestyle = |key| path(MediaCategory::Room(RoomType::Lifestyle), key).unwrap();
    assert_eq!(lifestyle("Japandi Chair"), "styledmyhome.images:Chair Images/Japandi Chair.png");
    assert_eq!(
      lifestyle("Japandi Color Palette"),
      "styledmyhome.images:Color Palette/Japandi Color Palette.png"
    );
    assert_eq!(lifestyle("Japandi Door Knob"), "styledmyhome.images:Doorknob Images/Japandi Door Knob.png");
    assert_eq!(lifestyle("Japandi Lamp"), "styledmyhome.images:General Images/Japandi Lamp.png");
  }

  #[test]
  fn test_lifestyle_dispatch_is_case_sensitive() {
    assert_eq!(room_folder(&RoomType::Lifestyle, "Bohemian Outdoor Lantern"), "General Images");
    assert_eq!(room_folder(&RoomType::Lifestyle, "Armchair Throw"), "General Images");
    assert_eq!(room_folder(&RoomType::Lifestyle, "Rustic Door Knob"), "Doorknob Images");
  }

  #[test]
  fn test_style_and_material_paths() {
    assert_eq!(
      path(MediaCategory::StyleVideo, "French  Country").unwrap(),
      "styledmyhome.videos:French Country.mp4"
    );
    assert_eq!(
      path(MediaCategory::StyleGuide, "Japandi").unwrap(),
      "styledmyhome.pdfs:Japandi Style Guide.pdf"
    );
    assert_eq!(
      path(MediaCategory::Material(MaterialType::Wood), "Reclaimed Barn Wood").unwrap(),
      "styledmyhome.images:Wood Images/Reclaimed Barn Wood.png"
    );
    assert_eq!(
      path(MediaCategory::StylePortrait, "Japandi").unwrap(),
      "styledmyhome.images:Style Match Images/Japandi.png"
    );
  }

  #[test]
  fn test_blank_key_has_no_path() {
    assert!(path(MediaCategory::StylePortrait, " \n ").is_none());
  }
}
