//! Quiz session state machine.
//!
//! A session owns its randomized question order and the answer sequence.
//! It moves forward one question per answer and tallies exactly once, when
//! the last question is answered. The only way back is a full restart.

use rand::Rng;
use serde::Serialize;

use super::shuffle::shuffle_with;
use super::tally::{tally, TallyResult};
use crate::domain::{Letter, Question, StyleUniverse};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuizState {
  AwaitingFirstAnswer,
  AwaitingNextAnswer { question_index: usize },
  Complete { result: TallyResult },
}

/// Errors from driving a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
  /// No questions to ask
  NoQuestions,
  /// Answer submitted after the last question
  AlreadyComplete,
  /// The current question has no option with this letter
  UnknownOption { question_index: usize, letter: Letter },
}

impl std::fmt::Display for SessionError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SessionError::NoQuestions => write!(f, "Quiz has no questions"),
      SessionError::AlreadyComplete => write!(f, "Quiz is already complete"),
      SessionError::UnknownOption {
        question_index,
        letter,
      } => write!(
        f,
        "Question {} has no option {}",
        question_index + 1,
        letter
      ),
    }
  }
}

impl std::error::Error for SessionError {}

/// Shuffle question order, then each question's options, re-deriving letters.
pub fn randomize_questions<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<Question> {
  shuffle_with(questions, rng)
    .into_iter()
    .map(|mut q| {
      q.options = shuffle_with(&q.options, rng);
      q.reletter()
    })
    .collect()
}

#[derive(Debug, Clone)]
pub struct QuizSession {
  /// Questions as delivered by the content source, used for restarts
  base_questions: Vec<Question>,
  questions: Vec<Question>,
  universe: StyleUniverse,
  answers: Vec<Letter>,
  state: QuizState,
  first_name: Option<String>,
}

impl QuizSession {
  pub fn start(
    questions: Vec<Question>,
    universe: StyleUniverse,
    first_name: Option<String>,
  ) -> Result<Self, SessionError> {
    Self::start_with(questions, universe, first_name, &mut rand::rng())
  }

  pub fn start_with<R: Rng + ?Sized>(
    questions: Vec<Question>,
    universe: StyleUniverse,
    first_name: Option<String>,
    rng: &mut R,
  ) -> Result<Self, SessionError> {
    if questions.is_empty() {
      return Err(SessionError::NoQuestions);
    }
    let shuffled = randomize_questions(&questions, rng);
    let first_name = first_name
      .map(|n| n.trim().to_string())
      .filter(|n| !n.is_empty());

    Ok(Self {
      base_questions: questions,
      questions: shuffled,
      universe,
      answers: Vec::new(),
      state: QuizState::AwaitingFirstAnswer,
      first_name,
    })
  }

  /// Back to the first question with a fresh order. Answers and result are dropped.
  pub fn restart(&mut self) {
    self.restart_with(&mut rand::rng());
  }

  pub fn restart_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    self.questions = randomize_questions(&self.base_questions, rng);
    self.answers.clear();
    self.state = QuizState::AwaitingFirstAnswer;
  }

  /// Record an answer for the current question and advance.
  pub fn submit(&mut self, letter: Letter) -> Result<&QuizState, SessionError> {
    let index = self.question_index().ok_or(SessionError::AlreadyComplete)?;

    if self.questions[index].option(letter).is_none() {
      return Err(SessionError::UnknownOption {
        question_index: index,
        letter,
      });
    }

    self.answers.push(letter);

    let next = index + 1;
    self.state = if next < self.questions.len() {
      QuizState::AwaitingNextAnswer {
        question_index: next,
      }
    } else {
      let result = tally(&self.answers, self.questions.as_slice(), &self.universe);
      tracing::info!(
        winner = ?result.winner,
        answers = self.answers.len(),
        skipped = result.skipped.len(),
        "Quiz complete"
      );
      QuizState::Complete { result }
    };

    Ok(&self.state)
  }

  /// Index of the question awaiting an answer; None once complete.
  pub fn question_index(&self) -> Option<usize> {
    match self.state {
      QuizState::AwaitingFirstAnswer => Some(0),
      QuizState::AwaitingNextAnswer { question_index } => Some(question_index),
      QuizState::Complete { .. } => None,
    }
  }

  pub fn current_question(&self) -> Option<&Question> {
    self.question_index().and_then(|i| self.questions.get(i))
  }

  pub fn result(&self) -> Option<&TallyResult> {
    match &self.state {
      QuizState::Complete { result } => Some(result),
      _ => None,
    }
  }

  pub fn state(&self) -> &QuizState {
    &self.state
  }

  pub fn answers(&self) -> &[Letter] {
    &self.answers
  }

  pub fn questions(&self) -> &[Question] {
    &self.questions
  }

  pub fn universe(&self) -> &StyleUniverse {
    &self.universe
  }

  pub fn first_name(&self) -> Option<&str> {
    self.first_name.as_deref()
  }

  pub fn total_questions(&self) -> usize {
    self.questions.len()
  }
}
