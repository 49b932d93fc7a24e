pub mod media;
pub mod quiz;
pub mod styles;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};

use crate::content::ContentError;
use crate::media::ObjectStorage;
use crate::quiz::SessionError;
use crate::state::AppState;

/// Error responses for the JSON API.
#[derive(Debug)]
pub enum ApiError {
  Content(ContentError),
  Session(SessionError),
  /// No live quiz session for the cookie
  NoSession,
  NotFound(String),
  BadRequest(String),
}

impl ApiError {
  fn status(&self) -> StatusCode {
    match self {
      ApiError::Content(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Session(SessionError::NoQuestions) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Session(SessionError::UnknownOption { .. }) => StatusCode::BAD_REQUEST,
      ApiError::Session(SessionError::AlreadyComplete) => StatusCode::CONFLICT,
      ApiError::NoSession | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
    }
  }

  fn message(&self) -> String {
    match self {
      ApiError::Content(e) => e.user_message().to_string(),
      ApiError::Session(e) => e.to_string(),
      ApiError::NoSession => "No quiz in progress. Start a new quiz.".to_string(),
      ApiError::NotFound(what) => format!("{} not found", what),
      ApiError::BadRequest(msg) => msg.clone(),
    }
  }
}

impl From<ContentError> for ApiError {
  fn from(e: ContentError) -> Self {
    ApiError::Content(e)
  }
}

impl From<SessionError> for ApiError {
  fn from(e: SessionError) -> Self {
    ApiError::Session(e)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::warn!(error = ?self, "Request failed");
    } else {
      tracing::debug!(error = ?self, "Request rejected");
    }
    (status, Json(serde_json::json!({ "error": self.message() }))).into_response()
  }
}

pub async fn health() -> Json<serde_json::Value> {
  Json(serde_json::json!({ "status": "ok" }))
}

pub fn router<S: ObjectStorage + 'static>(state: AppState<S>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/quiz", get(quiz::view::<S>))
    .route("/quiz/start", post(quiz::start::<S>))
    .route("/quiz/answer", post(quiz::answer::<S>))
    .route("/quiz/restart", post(quiz::restart::<S>))
    .route("/quiz/media", get(quiz::option_media::<S>))
    .route("/styles", get(styles::list::<S>))
    .route("/styles/{slug}", get(styles::profile::<S>))
    .route("/media", get(media::resolve::<S>))
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::{ContentStore, DatabaseContent, StaticContent};
  use crate::media::{MediaResolver, MediaSettings};
  use crate::testing::{content_pool, FakeStorage};
  use axum_test::TestServer;
  use serde_json::{json, Value};

  fn server_with(content: ContentStore, objects: &[(&str, &str)]) -> TestServer {
    let resolver = MediaResolver::new(FakeStorage::with_objects(objects), MediaSettings::default());
    TestServer::new(router(AppState::new(content, resolver))).unwrap()
  }

  fn server() -> TestServer {
    server_with(ContentStore::Static(StaticContent::new()), &[])
  }

  #[tokio::test]
  async fn test_health() {
    let res = server().get("/health").await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["status"], "ok");
  }

  #[tokio::test]
  async fn test_full_quiz_flow() {
    let server = server();

    let res = server.post("/quiz/start").json(&json!({ "first_name": "Ana" })).await;
    res.assert_status_ok();
    let cookie = res.cookie(crate::config::SESSION_COOKIE);
    let view = res.json::<Value>();
    assert_eq!(view["kind"], "question");
    assert_eq!(view["question_index"], 0);
    assert_eq!(view["total_questions"], 11);
    assert!(view["prompt"].as_str().unwrap().starts_with("Hi Ana, "));
    assert_eq!(view["options"].as_array().unwrap().len(), 8);

    let mut last = Value::Null;
    for _ in 0..11 {
      let res = server
        .post("/quiz/answer")
        .add_cookie(cookie.clone())
        .json(&json!({ "letter": "a" }))
        .await;
      res.assert_status_ok();
      last = res.json::<Value>();
    }

    assert_eq!(last["kind"], "result");
    assert_eq!(last["total_answers"], 11);
    assert!(last["winner"].is_string());
    let ranked = last["ranked"].as_array().unwrap();
    assert!(!ranked.is_empty() && ranked.len() <= 3);

    // Completed quiz keeps showing the result and rejects further answers
    let res = server.get("/quiz").add_cookie(cookie.clone()).await;
    assert_eq!(res.json::<Value>()["kind"], "result");
    let res = server
      .post("/quiz/answer")
      .add_cookie(cookie.clone())
      .json(&json!({ "letter": "A" }))
      .await;
    res.assert_status(StatusCode::CONFLICT);

    let res = server.post("/quiz/restart").add_cookie(cookie).await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["question_index"], 0);
  }

  #[tokio::test]
  async fn test_answer_validation() {
    let server = server();
    let res = server.post("/quiz/answer").json(&json!({ "letter": "A" })).await;
    res.assert_status(StatusCode::NOT_FOUND);

    let res = server.post("/quiz/start").json(&json!({})).await;
    let cookie = res.cookie(crate::config::SESSION_COOKIE);
    let view = res.json::<Value>();
    assert_eq!(view["prompt"].as_str().map(|p| p.starts_with("Hi ")), Some(false));

    let res = server
      .post("/quiz/answer")
      .add_cookie(cookie)
      .json(&json!({ "letter": "Z" }))
      .await;
    res.assert_status(StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn test_option_media_resolves_every_option() {
    let server = server();
    let res = server.post("/quiz/start").json(&json!({})).await;
    let cookie = res.cookie(crate::config::SESSION_COOKIE);

    let res = server.get("/quiz/media").add_cookie(cookie).await;
    res.assert_status_ok();
    let body = res.json::<Value>();
    let options = body["options"].as_array().unwrap();
    assert_eq!(options.len(), 8);
    for option in options {
      assert_eq!(option["media"]["state"], "ready");
      assert_eq!(option["media"]["asset"]["status"], "placeholder");
    }
  }

  #[tokio::test]
  async fn test_style_profile_resolves_media() {
    let server = server_with(
      ContentStore::Static(StaticContent::new()),
      &[
        ("styledmyhome.images", "Style Match Images/Japandi.png"),
        ("styledmyhome.pdfs", "Japandi Style Guide.pdf"),
      ],
    );

    let res = server.get("/styles/japandi").await;
    res.assert_status_ok();
    let profile = res.json::<Value>();
    assert_eq!(profile["name"], "Japandi");
    assert_eq!(profile["portrait"]["status"], "verified");
    assert_eq!(profile["video"]["status"], "placeholder");
    assert_eq!(profile["video"]["url"], crate::config::DEFAULT_VIDEO_URL);
    assert!(profile["guide_url"].is_string());
    assert_eq!(profile["materials"]["wood"].as_array().unwrap().len(), 4);
    assert_eq!(profile["materials"]["wood"][0]["image"]["status"], "placeholder");

    server.get("/styles/coastal").await.assert_status(StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_style_list() {
    let res = server().get("/styles").await;
    res.assert_status_ok();
    let styles = res.json::<Value>();
    assert_eq!(styles["styles"].as_array().unwrap().len(), 8);
    assert_eq!(styles["styles"][0]["slug"], "french-country");
  }

  #[tokio::test]
  async fn test_media_endpoint() {
    let server = server_with(
      ContentStore::Static(StaticContent::new()),
      &[("styledmyhome.images", "Chair Images/Bohemian Chair.png")],
    );

    let res = server
      .get("/media")
      .add_query_param("category", "room:lifestyle")
      .add_query_param("key", "Bohemian Chair")
      .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["asset"]["status"], "verified");

    let res = server
      .get("/media")
      .add_query_param("category", "stone")
      .add_query_param("key", "Granite")
      .await;
    res.assert_status(StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn test_empty_database_reports_unavailable() {
    let content = ContentStore::Database(DatabaseContent::new(content_pool(false).unwrap()));
    let server = server_with(content, &[]);

    let res = server.post("/quiz/start").json(&json!({})).await;
    res.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.json::<Value>()["error"], "No content available");
  }

  #[tokio::test]
  async fn test_seeded_database_serves_quiz() {
    let content = ContentStore::Database(DatabaseContent::new(content_pool(true).unwrap()));
    let server = server_with(content, &[]);

    let res = server.post("/quiz/start").json(&json!({})).await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["total_questions"], 11);
  }
}
