//! Simple in-memory session storage for quiz sessions.
//!
//! Stores QuizSession state keyed by session ID (from cookie).
//! Sessions auto-expire after a configurable duration of inactivity.

use crate::config;
use crate::quiz::QuizSession;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

/// Session entry with last access time for expiration
struct SessionEntry {
  session: QuizSession,
  last_access: DateTime<Utc>,
}

/// Global session store
static SESSIONS: LazyLock<Mutex<HashMap<String, SessionEntry>>> =
  LazyLock::new(|| Mutex::new(HashMap::new()));

/// Entries are plain data, so a poisoned store is still usable
fn store() -> MutexGuard<'static, HashMap<String, SessionEntry>> {
  SESSIONS.lock().unwrap_or_else(PoisonError::into_inner)
}

fn expiry_cutoff() -> DateTime<Utc> {
  Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS)
}

/// Run `f` on the live session while holding the store lock.
///
/// Returns None if the session does not exist or has expired. Concurrent
/// requests for the same session are applied one after another.
pub fn with_session<R>(session_id: &str, f: impl FnOnce(&mut QuizSession) -> R) -> Option<R> {
  let mut sessions = store();

  // Clean up expired sessions occasionally (~10% chance)
  if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
    cleanup_expired(&mut sessions);
  }

  let cutoff = expiry_cutoff();
  match sessions.get_mut(session_id) {
    Some(entry) if entry.last_access > cutoff => {
      entry.last_access = Utc::now();
      Some(f(&mut entry.session))
    }
    Some(_) => {
      tracing::debug!("Quiz session expired");
      sessions.remove(session_id);
      None
    }
    None => None,
  }
}

/// Get a copy of the session for the given ID, if it exists and has not expired
pub fn get_session(session_id: &str) -> Option<QuizSession> {
  with_session(session_id, |quiz| quiz.clone())
}

/// Insert or replace a session
pub fn update_session(session_id: &str, session: QuizSession) {
  store().insert(
    session_id.to_string(),
    SessionEntry {
      session,
      last_access: Utc::now(),
    },
  );
}

pub fn remove_session(session_id: &str) -> bool {
  store().remove(session_id).is_some()
}

/// Clean up expired sessions
fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>) {
  let expiry = expiry_cutoff();
  sessions.retain(|_, entry| entry.last_access > expiry);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::static_table;

  fn quiz() -> QuizSession {
    QuizSession::start(static_table::questions(), static_table::universe(), None).unwrap()
  }

  #[test]
  fn test_session_id_shape() {
    let id = generate_session_id();
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert_ne!(id, generate_session_id());
  }

  #[test]
  fn test_update_get_remove() {
    let id = generate_session_id();
    assert!(get_session(&id).is_none());

    let mut session = quiz();
    let first = session.current_question().unwrap().options[0].letter;
    session.submit(first).unwrap();
    update_session(&id, session);

    let stored = get_session(&id).unwrap();
    assert_eq!(stored.answers().len(), 1);

    assert!(remove_session(&id));
    assert!(get_session(&id).is_none());
  }

  #[test]
  fn test_concurrent_answers_are_all_kept() {
    let id = generate_session_id();
    update_session(&id, quiz());

    let handles: Vec<_> = (0..8)
      .map(|_| {
        let id = id.clone();
        std::thread::spawn(move || {
          with_session(&id, |quiz| {
            let letter = quiz.current_question().unwrap().options[0].letter;
            quiz.submit(letter).unwrap();
          })
          .unwrap();
        })
      })
      .collect();
    for handle in handles {
      handle.join().unwrap();
    }

    assert_eq!(get_session(&id).unwrap().answers().len(), 8);
    remove_session(&id);
  }

  #[test]
  fn test_with_session_skips_missing() {
    let id = generate_session_id();
    let mut called = false;
    assert!(with_session(&id, |_| called = true).is_none());
    assert!(!called);
  }

  #[test]
  fn test_expired_session_is_dropped() {
    let id = generate_session_id();
    update_session(&id, quiz());
    if let Some(entry) = store().get_mut(&id) {
      entry.last_access = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS + 1);
    }
    assert!(get_session(&id).is_none());
    assert!(!remove_session(&id));
  }
}
