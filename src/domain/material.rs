use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use super::media::MediaFile;

/// Finish family a material belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Wood,
    Metal,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Wood => "wood",
            MaterialType::Metal => "metal",
        }
    }
}

impl std::str::FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wood" => Ok(MaterialType::Wood),
            "metal" => Ok(MaterialType::Metal),
            _ => Err(format!("Invalid material type: {}", s)),
        }
    }
}

impl ToSql for MaterialType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for MaterialType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub id: String,
    pub style_id: String,
    pub material_type: MaterialType,
    pub name: String,
    pub image: Option<MediaFile>,
    pub description: Option<String>,
    pub sort_order: i64,
}

/// Materials of one style, split by type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMaterials {
    pub wood: Vec<Material>,
    pub metal: Vec<Material>,
}

impl StyleMaterials {
    /// Split a flat list by material type, keeping relative order.
    pub fn partition(materials: Vec<Material>) -> Self {
        let (wood, metal) = materials
            .into_iter()
            .partition(|m| m.material_type == MaterialType::Wood);
        Self { wood, metal }
    }

    pub fn is_empty(&self) -> bool {
        self.wood.is_empty() && self.metal.is_empty()
    }
}
