use axum::{
  extract::{Path, State},
  Json,
};
use futures::future::join_all;
use serde::Serialize;

use super::ApiError;
use crate::content::ContentSource;
use crate::domain::{Material, MediaCategory, Style};
use crate::media::{AssetUrl, MediaResolver, ObjectStorage};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StyleSummary {
  pub name: String,
  pub slug: String,
  pub description: String,
}

#[derive(Debug, Serialize)]
pub struct StyleList {
  pub styles: Vec<StyleSummary>,
}

#[derive(Debug, Serialize)]
pub struct MaterialView {
  pub name: String,
  pub description: Option<String>,
  pub image: AssetUrl,
}

#[derive(Debug, Serialize)]
pub struct MaterialsView {
  pub wood: Vec<MaterialView>,
  pub metal: Vec<MaterialView>,
}

#[derive(Debug, Serialize)]
pub struct StyleProfile {
  pub name: String,
  pub slug: String,
  pub description: String,
  pub history: Option<String>,
  pub characteristics: Vec<String>,
  pub design_tips: Vec<String>,
  pub color_palette: Vec<String>,
  pub portrait: AssetUrl,
  pub video: AssetUrl,
  pub guide_url: Option<String>,
  pub materials: MaterialsView,
}

/// GET /styles - All styles in display order
pub async fn list<S: ObjectStorage + 'static>(
  State(state): State<AppState<S>>,
) -> Result<Json<StyleList>, ApiError> {
  let styles = state.content.list_styles().await.into_result()?;
  Ok(Json(StyleList {
    styles: styles
      .into_iter()
      .map(|s| StyleSummary {
        name: s.name,
        slug: s.slug,
        description: s.description,
      })
      .collect(),
  }))
}

async fn material_views<S: ObjectStorage>(resolver: &MediaResolver<S>, materials: &[Material]) -> Vec<MaterialView> {
  join_all(materials.iter().map(|m| async move {
    let category = MediaCategory::Material(m.material_type);
    MaterialView {
      name: m.name.clone(),
      description: m.description.clone(),
      image: resolver.stored_or_resolve(m.image.as_ref(), &category, &m.name).await,
    }
  }))
  .await
}

async fn guide_url<S: ObjectStorage>(resolver: &MediaResolver<S>, style: &Style) -> Option<String> {
  match &style.pdf_guide {
    Some(file) => Some(resolver.stored_url(file)),
    None => resolver.resolve_guide(&style.name).await,
  }
}

/// GET /styles/{slug} - Full profile with resolved media
pub async fn profile<S: ObjectStorage + 'static>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Json<StyleProfile>, ApiError> {
  let style = state
    .content
    .style_by_slug(&slug)
    .await
    .into_result()?
    .ok_or_else(|| ApiError::NotFound(format!("Style '{}'", slug)))?;

  // A style without materials still renders
  let materials = state.content.materials_for_style(&style.id).await.data;
  let resolver = state.resolver.as_ref();

  let (portrait, video, guide_url, wood, metal) = tokio::join!(
    resolver.stored_or_resolve(style.hero_image.as_ref(), &MediaCategory::StylePortrait, &style.name),
    resolver.stored_or_resolve(style.video.as_ref(), &MediaCategory::StyleVideo, &style.name),
    guide_url(resolver, &style),
    material_views(resolver, &materials.wood),
    material_views(resolver, &materials.metal),
  );

  Ok(Json(StyleProfile {
    name: style.name,
    slug: style.slug,
    description: style.description,
    history: style.history,
    characteristics: style.characteristics,
    design_tips: style.design_tips,
    color_palette: style.color_palette,
    portrait,
    video,
    guide_url,
    materials: MaterialsView { wood, metal },
  }))
}
