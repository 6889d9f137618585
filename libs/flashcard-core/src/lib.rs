//! Core flashcard library used by the Flashy backend.
//!
//! Provides:
//! - Answer grading for typed test answers (normalization, Levenshtein distance)
//! - Character highlighting of typed answers
//! - Self-test sessions with reports
//! - Saved deck format, backup export/import, and the card store trait
//! - Shared types (Card, TestDirection, TestOrder, etc.)

pub mod backup;
pub mod error;
pub mod grading;
pub mod highlight;
pub mod session;
pub mod types;

pub use backup::{
    default_cards, export_cards, import_cards, CardStore, MemoryStore, StorageInfo, StoredDeck,
};
pub use error::{ImportError, SessionError, StoreError};
pub use grading::{edit_distance, grade, normalize, score, Grade};
pub use highlight::{highlight, HighlightSegment, SegmentKind};
pub use session::{AnswerOutcome, Prompt, Tally, TestAnswer, TestReport, TestSession, TestStatus};
pub use types::{categories, Card, ScoreBand, TestDirection, TestOrder};
