use serde::Serialize;

use super::media::MediaFile;

/// A design style profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub id: String,
    /// Canonical identity used for scoring
    pub name: String,
    pub slug: String,
    pub description: String,
    pub history: Option<String>,
    pub characteristics: Vec<String>,
    pub design_tips: Vec<String>,
    pub color_palette: Vec<String>,
    pub hero_image: Option<MediaFile>,
    pub video: Option<MediaFile>,
    pub pdf_guide: Option<MediaFile>,
    pub sort_order: i64,
}

/// URL slug for a style name: "Mid Century Modern" -> "mid-century-modern"
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// The declared, ordered set of styles a tally reports over.
///
/// Order is canonical: it decides tie-breaks and stable ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleUniverse {
    names: Vec<String>,
}

impl StyleUniverse {
    /// Build from names in declared order. Duplicates keep their first position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { names: unique }
    }

    pub fn from_styles(styles: &[Style]) -> Self {
        Self::new(styles.iter().map(|s| s.name.clone()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Mid Century Modern"), "mid-century-modern");
        assert_eq!(slugify("  French   Country "), "french-country");
        assert_eq!(slugify("Japandi"), "japandi");
    }

    #[test]
    fn test_universe_keeps_declared_order_and_dedups() {
        let universe = StyleUniverse::new(["Japandi", "Bohemian", "Japandi"]);
        assert_eq!(universe.names(), &["Japandi".to_string(), "Bohemian".to_string()]);
        assert_eq!(universe.position("Bohemian"), Some(1));
        assert!(!universe.contains("Coastal"));
    }
}
