//! Answer tallying: per-style counts, winner selection, percentage ranking.
//!
//! Letters are only meaningful per question once options have been shuffled,
//! so every lookup goes through a [`StyleResolver`] taking the question index.

use serde::Serialize;

use crate::config;
use crate::domain::{Letter, Question, StyleUniverse};

/// Maps an answered letter at a question index to the style it scores for.
pub trait StyleResolver {
  fn style_for(&self, question_index: usize, letter: Letter) -> Option<&str>;
}

/// Per-question lookup over the session's (possibly shuffled) questions.
impl StyleResolver for [Question] {
  fn style_for(&self, question_index: usize, letter: Letter) -> Option<&str> {
    self
      .get(question_index)?
      .option(letter)?
      .style
      .as_deref()
  }
}

/// Single letter->style table shared by every question.
///
/// Only valid while questions keep their declared, unshuffled option order.
#[derive(Debug, Clone)]
pub struct FixedLetterTable {
  styles: Vec<String>,
}

impl FixedLetterTable {
  /// A -> first style of the universe, B -> second, and so on.
  pub fn from_universe(universe: &StyleUniverse) -> Self {
    Self {
      styles: universe.names().iter().take(crate::domain::LETTERS.len()).cloned().collect(),
    }
  }
}

impl StyleResolver for FixedLetterTable {
  fn style_for(&self, _question_index: usize, letter: Letter) -> Option<&str> {
    self.styles.get(letter.index()).map(String::as_str)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleCount {
  pub style: String,
  pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleShare {
  pub style: String,
  pub percentage: u8,
}

/// An answer that could not be scored (no option, unscored option, or unknown style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAnswer {
  pub question_index: usize,
  pub letter: Letter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyResult {
  /// Every style of the universe, canonical order, zero default
  pub counts: Vec<StyleCount>,
  pub winner: Option<String>,
  /// Top styles by percentage, at most [`config::TOP_STYLES`]
  pub ranked: Vec<StyleShare>,
  pub skipped: Vec<SkippedAnswer>,
  pub total_answers: usize,
}

impl TallyResult {
  pub fn count_for(&self, style: &str) -> u32 {
    self
      .counts
      .iter()
      .find(|c| c.style == style)
      .map_or(0, |c| c.count)
  }

  /// Number of answers that were matched to a style.
  pub fn scored_answers(&self) -> u32 {
    self.counts.iter().map(|c| c.count).sum()
  }
}

/// Tally `answers` in submission order.
pub fn tally<R: StyleResolver + ?Sized>(
  answers: &[Letter],
  resolver: &R,
  universe: &StyleUniverse,
) -> TallyResult {
  let mut counts: Vec<StyleCount> = universe
    .names()
    .iter()
    .map(|style| StyleCount {
      style: style.clone(),
      count: 0,
    })
    .collect();
  let mut skipped = Vec::new();

  for (question_index, &letter) in answers.iter().enumerate() {
    let slot = resolver
      .style_for(question_index, letter)
      .and_then(|style| universe.position(style));

    match slot {
      Some(pos) => counts[pos].count += 1,
      None => {
        tracing::debug!(
          question_index,
          letter = %letter,
          "Inconsistent answer skipped during tally"
        );
        skipped.push(SkippedAnswer {
          question_index,
          letter,
        });
      }
    }
  }

  let winner = select_winner(&counts);
  let ranked = rank_percentages(&counts, answers.len());

  TallyResult {
    counts,
    winner,
    ranked,
    skipped,
    total_answers: answers.len(),
  }
}

/// Strict maximum; ties go to the earliest style in canonical order.
fn select_winner(counts: &[StyleCount]) -> Option<String> {
  let mut best: Option<&StyleCount> = None;
  for c in counts {
    if c.count == 0 {
      continue;
    }
    match best {
      Some(b) if c.count <= b.count => {}
      _ => best = Some(c),
    }
  }
  best.map(|c| c.style.clone())
}

/// round(100 * count / total), half rounding up, in integer arithmetic.
fn percentage(count: u32, total: usize) -> u8 {
  let count = count as u64;
  let total = total as u64;
  ((200 * count + total) / (2 * total)).min(100) as u8
}

fn rank_percentages(counts: &[StyleCount], total_answers: usize) -> Vec<StyleShare> {
  if total_answers == 0 {
    return Vec::new();
  }

  let mut shares: Vec<StyleShare> = counts
    .iter()
    .filter(|c| c.count > 0)
    .map(|c| StyleShare {
      style: c.style.clone(),
      percentage: percentage(c.count, total_answers),
    })
    .filter(|s| s.percentage > 0)
    .collect();

  // sort_by is stable: equal percentages keep canonical order
  shares.sort_by(|a, b| b.percentage.cmp(&a.percentage));
  shares.truncate(config::TOP_STYLES);
  shares
}
