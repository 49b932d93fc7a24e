//! Quiz endpoints driving a cookie-keyed [`QuizSession`].

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::config::{SESSION_COOKIE, SESSION_EXPIRY_HOURS};
use crate::content::ContentSource;
use crate::domain::{Letter, MediaRef, Question, StyleUniverse};
use crate::media::{LoadState, MediaSlots, ObjectStorage};
use crate::quiz::{QuizSession, SessionError, TallyResult};
use crate::session;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
  #[serde(default)]
  pub first_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
  pub letter: String,
}

#[derive(Debug, Serialize)]
pub struct OptionView {
  pub letter: Letter,
  pub text: Option<String>,
}

/// What the respondent sees next.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuizView {
  Question {
    question_index: usize,
    total_questions: usize,
    prompt: String,
    room: String,
    options: Vec<OptionView>,
  },
  Result {
    first_name: Option<String>,
    #[serde(flatten)]
    result: TallyResult,
  },
}

impl QuizView {
  pub fn of(quiz: &QuizSession) -> Self {
    if let Some(result) = quiz.result() {
      return QuizView::Result {
        first_name: quiz.first_name().map(str::to_string),
        result: result.clone(),
      };
    }

    let index = quiz.question_index().unwrap_or(0);
    match quiz.current_question() {
      Some(q) => QuizView::Question {
        question_index: index,
        total_questions: quiz.total_questions(),
        prompt: q.personalized_prompt(quiz.first_name()),
        room: q.room.label().to_string(),
        options: q
          .options
          .iter()
          .map(|o| OptionView {
            letter: o.letter,
            text: o.text.clone(),
          })
          .collect(),
      },
      // Sessions never start empty, so this only guards the type
      None => QuizView::Question {
        question_index: index,
        total_questions: quiz.total_questions(),
        prompt: String::new(),
        room: String::new(),
        options: Vec::new(),
      },
    }
  }
}

#[derive(Debug, Serialize)]
pub struct OptionMedia {
  pub letter: Letter,
  pub media: LoadState,
}

#[derive(Debug, Serialize)]
pub struct OptionMediaView {
  pub question_index: usize,
  pub options: Vec<OptionMedia>,
}

fn session_id(jar: &CookieJar) -> Option<String> {
  jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

fn load_session(jar: &CookieJar) -> Result<QuizSession, ApiError> {
  let id = session_id(jar).ok_or(ApiError::NoSession)?;
  session::get_session(&id).ok_or(ApiError::NoSession)
}

async fn load_quiz_content<C: ContentSource>(content: &C) -> Result<(Vec<Question>, StyleUniverse), ApiError> {
  let questions = content.list_questions().await.into_result()?;
  let styles = content.list_styles().await.into_result()?;
  Ok((questions, StyleUniverse::from_styles(&styles)))
}

/// POST /quiz/start - Begin a fresh quiz and set the session cookie
pub async fn start<S: ObjectStorage + 'static>(
  State(state): State<AppState<S>>,
  jar: CookieJar,
  Json(request): Json<StartRequest>,
) -> Result<(CookieJar, Json<QuizView>), ApiError> {
  let (questions, universe) = load_quiz_content(&state.content).await?;
  let quiz = QuizSession::start(questions, universe, request.first_name)?;
  let view = QuizView::of(&quiz);

  // Replace any previous session held by this browser
  if let Some(old) = session_id(&jar) {
    session::remove_session(&old);
  }
  let id = session::generate_session_id();
  session::update_session(&id, quiz);
  tracing::debug!(content = state.content.kind(), "Quiz started");

  let cookie = Cookie::build((SESSION_COOKIE, id))
    .path("/")
    .http_only(true)
    .secure(false) // Set to true in production with HTTPS
    .max_age(time::Duration::hours(SESSION_EXPIRY_HOURS))
    .build();

  Ok((jar.add(cookie), Json(view)))
}

/// GET /quiz - Current question or the result
pub async fn view<S: ObjectStorage + 'static>(
  State(_state): State<AppState<S>>,
  jar: CookieJar,
) -> Result<Json<QuizView>, ApiError> {
  let quiz = load_session(&jar)?;
  Ok(Json(QuizView::of(&quiz)))
}

/// POST /quiz/answer - Record a letter for the current question
pub async fn answer<S: ObjectStorage + 'static>(
  State(_state): State<AppState<S>>,
  jar: CookieJar,
  Json(request): Json<AnswerRequest>,
) -> Result<Json<QuizView>, ApiError> {
  let id = session_id(&jar).ok_or(ApiError::NoSession)?;
  let letter = Letter::parse(&request.letter)
    .ok_or_else(|| ApiError::BadRequest(format!("Invalid answer letter: {}", request.letter)))?;

  // A rejected letter leaves the stored session untouched
  let view = session::with_session(&id, |quiz| -> Result<QuizView, SessionError> {
    quiz.submit(letter)?;
    Ok(QuizView::of(quiz))
  })
  .ok_or(ApiError::NoSession)??;
  Ok(Json(view))
}

/// POST /quiz/restart - Back to the first question with a fresh order
pub async fn restart<S: ObjectStorage + 'static>(
  State(_state): State<AppState<S>>,
  jar: CookieJar,
) -> Result<Json<QuizView>, ApiError> {
  let id = session_id(&jar).ok_or(ApiError::NoSession)?;
  let view = session::with_session(&id, |quiz| {
    quiz.restart();
    QuizView::of(quiz)
  })
  .ok_or(ApiError::NoSession)?;
  Ok(Json(view))
}

/// GET /quiz/media - Option images for the current question
pub async fn option_media<S: ObjectStorage + 'static>(
  State(state): State<AppState<S>>,
  jar: CookieJar,
) -> Result<Json<OptionMediaView>, ApiError> {
  let quiz = load_session(&jar)?;
  let question_index = quiz
    .question_index()
    .ok_or(ApiError::Session(SessionError::AlreadyComplete))?;
  let Some(question) = quiz.current_question() else {
    return Err(ApiError::NoSession);
  };

  let resolver = &state.resolver;
  let mut slots = MediaSlots::new(resolver.placeholder());
  let mut tickets = Vec::new();
  for option in &question.options {
    if let MediaRef::Logical { category, key } = &option.image {
      tickets.push(slots.request(category.clone(), key.clone()));
    }
  }
  resolver.resolve_all(tickets, &mut slots).await;

  let mut options = Vec::with_capacity(question.options.len());
  for option in &question.options {
    let media = match &option.image {
      MediaRef::Logical { category, key } => slots.state_or_loading(category, key),
      other => LoadState::Ready {
        asset: resolver.url_for(other).await,
      },
    };
    options.push(OptionMedia {
      letter: option.letter,
      media,
    });
  }

  Ok(Json(OptionMediaView {
    question_index,
    options,
  }))
}
