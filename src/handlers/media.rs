use axum::{
  extract::{Query, State},
  Json,
};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::domain::MediaCategory;
use crate::media::{AssetUrl, ObjectStorage};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MediaQuery {
  pub category: String,
  #[serde(default)]
  pub key: String,
}

#[derive(Debug, Serialize)]
pub struct ResolvedMedia {
  pub category: String,
  pub key: String,
  pub asset: AssetUrl,
}

/// GET /media?category=...&key=... - Resolve one logical reference
pub async fn resolve<S: ObjectStorage + 'static>(
  State(state): State<AppState<S>>,
  Query(query): Query<MediaQuery>,
) -> Result<Json<ResolvedMedia>, ApiError> {
  let category = MediaCategory::parse(&query.category)
    .ok_or_else(|| ApiError::BadRequest(format!("Unknown media category: {}", query.category)))?;

  let asset = state.resolver.resolve(&category, &query.key).await;
  Ok(Json(ResolvedMedia {
    category: category.as_key(),
    key: query.key,
    asset,
  }))
}
