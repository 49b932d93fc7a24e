use serde::{Deserialize, Serialize};

use super::media::{MediaRef, RoomType};

/// Letter alphabet for answer options, assigned by position.
pub const LETTERS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Respondent-facing option code (A..H).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Letter(char);

impl Letter {
  /// Letter for the option at `position` (0 -> A). None past H.
  pub fn from_index(position: usize) -> Option<Self> {
    LETTERS.get(position).map(|&c| Letter(c))
  }

  /// Parse a single letter, case-insensitive. Surrounding whitespace is ignored.
  pub fn parse(s: &str) -> Option<Self> {
    let mut chars = s.trim().chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !LETTERS.contains(&c) {
      return None;
    }
    Some(Letter(c))
  }

  pub fn index(&self) -> usize {
    (self.0 as u8 - b'A') as usize
  }

  pub fn as_char(&self) -> char {
    self.0
  }
}

impl std::fmt::Display for Letter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl TryFrom<String> for Letter {
  type Error = String;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Letter::parse(&value).ok_or_else(|| format!("Invalid option letter: {}", value))
  }
}

impl From<Letter> for String {
  fn from(letter: Letter) -> Self {
    letter.0.to_string()
  }
}

/// One answer option of a question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOption {
  pub letter: Letter,
  /// Style name this option scores for. None = unscored.
  pub style: Option<String>,
  pub room: RoomType,
  pub image: MediaRef,
  pub text: Option<String>,
  pub sort_order: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
  pub id: String,
  pub prompt: String,
  pub room: RoomType,
  pub options: Vec<QuizOption>,
  pub sort_order: i64,
}

impl Question {
  /// Find the option carrying `letter`
  pub fn option(&self, letter: Letter) -> Option<&QuizOption> {
    self.options.iter().find(|o| o.letter == letter)
  }

  /// Prompt prefixed with a greeting when a first name was given.
  pub fn personalized_prompt(&self, first_name: Option<&str>) -> String {
    match first_name.map(str::trim) {
      Some(name) if !name.is_empty() => format!("Hi {}, {}", name, self.prompt),
      _ => self.prompt.clone(),
    }
  }

  /// Reassign letter codes A..H by current position.
  ///
  /// Options past the alphabet cannot be addressed and are dropped.
  pub fn reletter(mut self) -> Self {
    if self.options.len() > LETTERS.len() {
      tracing::warn!(
        question = %self.id,
        options = self.options.len(),
        "Question has more options than letters, extra options dropped"
      );
      self.options.truncate(LETTERS.len());
    }
    for (i, option) in self.options.iter_mut().enumerate() {
      if let Some(letter) = Letter::from_index(i) {
        option.letter = letter;
      }
    }
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn option(letter: char, style: &str) -> QuizOption {
    QuizOption {
      letter: Letter::parse(&letter.to_string()).unwrap(),
      style: Some(style.to_string()),
      room: RoomType::Kitchen,
      image: MediaRef::Missing,
      text: None,
      sort_order: 0,
    }
  }

  #[test]
  fn test_letter_parse() {
    assert_eq!(Letter::parse("a").map(|l| l.as_char()), Some('A'));
    assert_eq!(Letter::parse(" H ").map(|l| l.index()), Some(7));
    assert!(Letter::parse("I").is_none());
    assert!(Letter::parse("AB").is_none());
    assert!(Letter::parse("").is_none());
  }

  #[test]
  fn test_letter_from_index_bounds() {
    assert_eq!(Letter::from_index(0).unwrap().as_char(), 'A');
    assert_eq!(Letter::from_index(7).unwrap().as_char(), 'H');
    assert!(Letter::from_index(8).is_none());
  }

  #[test]
  fn test_letter_serde_as_string() {
    let letter = Letter::parse("c").unwrap();
    assert_eq!(serde_json::to_string(&letter).unwrap(), "\"C\"");
    let back: Letter = serde_json::from_str("\"d\"").unwrap();
    assert_eq!(back.as_char(), 'D');
    assert!(serde_json::from_str::<Letter>("\"Z\"").is_err());
  }

  #[test]
  fn test_personalized_prompt() {
    let q = Question {
      id: "1".into(),
      prompt: "Which kitchen?".into(),
      room: RoomType::Kitchen,
      options: vec![],
      sort_order: 0,
    };
    assert_eq!(q.personalized_prompt(Some("Ana")), "Hi Ana, Which kitchen?");
    assert_eq!(q.personalized_prompt(Some("   ")), "Which kitchen?");
    assert_eq!(q.personalized_prompt(None), "Which kitchen?");
  }

  #[test]
  fn test_reletter_by_position() {
    let q = Question {
      id: "1".into(),
      prompt: "p".into(),
      room: RoomType::Kitchen,
      options: vec![option('C', "Japandi"), option('A', "Bohemian")],
      sort_order: 0,
    }
    .reletter();

    assert_eq!(q.options[0].letter.as_char(), 'A');
    assert_eq!(q.options[0].style.as_deref(), Some("Japandi"));
    assert_eq!(q.options[1].letter.as_char(), 'B');
    assert_eq!(q.option(Letter::parse("B").unwrap()).unwrap().style.as_deref(), Some("Bohemian"));
  }
}
