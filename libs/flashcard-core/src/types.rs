//! Core types for flashcard application.

use serde::{Deserialize, Serialize};

/// Category assigned to cards that were saved without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Pseudo-category that selects every card.
pub const ALL_CATEGORIES: &str = "All";

/// A flashcard: a word on the front and its definition on the back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub front: String,
    pub back: String,
    pub category: String,
}

impl Card {
    pub fn new(
        id: i64,
        front: impl Into<String>,
        back: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            category: category.into(),
        }
    }
}

/// Which side of the card is shown and which must be typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestDirection {
    /// Show the definition, type the word.
    DefinitionToWord,
    /// Show the word, type the definition.
    WordToDefinition,
}

impl Default for TestDirection {
    fn default() -> Self {
        Self::DefinitionToWord
    }
}

impl TestDirection {
    /// Text shown to the user for this card.
    pub fn prompt<'a>(&self, card: &'a Card) -> &'a str {
        match self {
            Self::DefinitionToWord => &card.back,
            Self::WordToDefinition => &card.front,
        }
    }

    /// Text the user is expected to type for this card.
    pub fn expected<'a>(&self, card: &'a Card) -> &'a str {
        match self {
            Self::DefinitionToWord => &card.front,
            Self::WordToDefinition => &card.back,
        }
    }
}

/// Order in which a test walks through its cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestOrder {
    Sequential,
    Random,
}

impl Default for TestOrder {
    fn default() -> Self {
        Self::Sequential
    }
}

/// Coarse rating of a test percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => Self::High,
            60..=79 => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Whether `card` belongs to `category`; [`ALL_CATEGORIES`] matches everything.
pub fn in_category(card: &Card, category: &str) -> bool {
    category == ALL_CATEGORIES || card.category == category
}

/// Category list for a picker: "All" followed by each category in first-seen order.
pub fn categories(cards: &[Card]) -> Vec<String> {
    let mut result = vec![ALL_CATEGORIES.to_string()];
    for card in cards {
        if !result.iter().skip(1).any(|c| *c == card.category) {
            result.push(card.category.clone());
        }
    }
    result
}
