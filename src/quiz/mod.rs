//! Quiz core: question randomization, answer tallying, session state machine.

pub mod session;
pub mod shuffle;
pub mod tally;

pub use session::{randomize_questions, QuizSession, QuizState, SessionError};
pub use shuffle::{shuffle, shuffle_with};
pub use tally::{tally, FixedLetterTable, SkippedAnswer, StyleCount, StyleResolver, StyleShare, TallyResult};
