//! Self-test sessions with typed answers.
//!
//! A session fixes its card list when it starts (filtered by category and,
//! for random order, shuffled once). Each card is answered exactly once and
//! then advanced past; the report is available at any point.

use crate::error::SessionError;
use crate::grading::{grade, Grade};
use crate::highlight::{highlight, HighlightSegment};
use crate::types::{in_category, Card, ScoreBand, TestDirection, TestOrder};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The card currently being asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub card_id: i64,
    /// Zero-based index within the session.
    pub position: usize,
    pub total: usize,
    pub text: String,
}

/// One recorded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestAnswer {
    pub word: String,
    pub definition: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: usize,
    pub total: usize,
}

/// Result of submitting an answer for the current card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub grade: Grade,
    pub expected: String,
    pub highlight: Vec<HighlightSegment>,
    pub tally: Tally,
}

/// Snapshot of a running session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStatus {
    pub category: String,
    pub direction: TestDirection,
    pub order: TestOrder,
    pub position: usize,
    pub total: usize,
    pub answered: bool,
    pub finished: bool,
    pub tally: Tally,
    pub prompt: Option<Prompt>,
}

/// Summary shown when a test ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub category: String,
    pub direction: TestDirection,
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub band: ScoreBand,
    pub answers: Vec<TestAnswer>,
}

#[derive(Debug, Clone)]
pub struct TestSession {
    category: String,
    direction: TestDirection,
    order: TestOrder,
    cards: Vec<Card>,
    position: usize,
    answered: bool,
    answers: Vec<TestAnswer>,
}

impl TestSession {
    /// Start a test over the cards in `category`.
    pub fn new<R: Rng + ?Sized>(
        cards: &[Card],
        category: &str,
        direction: TestDirection,
        order: TestOrder,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let mut selected: Vec<Card> = cards
            .iter()
            .filter(|card| in_category(card, category))
            .cloned()
            .collect();

        if selected.is_empty() {
            return Err(SessionError::NoCards {
                category: category.to_string(),
            });
        }

        if order == TestOrder::Random {
            selected.shuffle(rng);
        }

        Ok(Self {
            category: category.to_string(),
            direction,
            order,
            cards: selected,
            position: 0,
            answered: false,
            answers: Vec::new(),
        })
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.cards.len()
    }

    /// Prompt for the current card, `None` once every card is done.
    pub fn current(&self) -> Option<Prompt> {
        self.cards.get(self.position).map(|card| Prompt {
            card_id: card.id,
            position: self.position,
            total: self.cards.len(),
            text: self.direction.prompt(card).to_string(),
        })
    }

    /// Grade an answer for the current card and record it.
    pub fn submit(&mut self, answer: &str) -> Result<AnswerOutcome, SessionError> {
        let card = self
            .cards
            .get(self.position)
            .ok_or(SessionError::Finished)?;

        if self.answered {
            return Err(SessionError::AlreadyAnswered {
                position: self.position,
            });
        }

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(SessionError::EmptyAnswer);
        }

        let expected = self.direction.expected(card).to_string();
        let grade = grade(answer, &expected);
        let highlight = highlight(answer, &expected);

        self.answers.push(TestAnswer {
            word: card.front.clone(),
            definition: card.back.clone(),
            user_answer: answer.to_string(),
            is_correct: grade.is_correct,
            score: grade.score,
        });
        self.answered = true;

        Ok(AnswerOutcome {
            grade,
            expected,
            highlight,
            tally: self.tally(),
        })
    }

    /// Move past an answered card. Returns whether the test is now finished.
    pub fn advance(&mut self) -> Result<bool, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        if !self.answered {
            return Err(SessionError::NotAnswered {
                position: self.position,
            });
        }

        self.position += 1;
        self.answered = false;
        Ok(self.is_finished())
    }

    pub fn tally(&self) -> Tally {
        Tally {
            correct: self.answers.iter().filter(|a| a.is_correct).count(),
            total: self.answers.len(),
        }
    }

    pub fn status(&self) -> TestStatus {
        TestStatus {
            category: self.category.clone(),
            direction: self.direction,
            order: self.order,
            position: self.position.min(self.cards.len()),
            total: self.cards.len(),
            answered: self.answered,
            finished: self.is_finished(),
            tally: self.tally(),
            prompt: self.current(),
        }
    }

    pub fn report(&self) -> TestReport {
        let Tally { correct, total } = self.tally();
        let percentage = if total == 0 {
            0
        } else {
            (correct as f64 * 100.0 / total as f64).round() as u32
        };

        TestReport {
            category: self.category.clone(),
            direction: self.direction,
            correct,
            total,
            percentage,
            band: ScoreBand::from_percentage(percentage),
            answers: self.answers.clone(),
        }
    }
}
