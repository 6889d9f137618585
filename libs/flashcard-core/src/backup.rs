//! Card persistence format, backup export/import, and the store trait.
//!
//! Saved decks are a JSON document `{ version, cards, lastModified }`.
//! Loading is lenient: invalid cards are dropped, and a missing or unusable
//! document yields the built-in sample cards.

use crate::error::{ImportError, StoreError};
use crate::types::{Card, DEFAULT_CATEGORY};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Mutex, PoisonError};

/// Format version written into saved documents and exports.
pub const STORAGE_VERSION: &str = "2.0";

/// Application name written into exports.
pub const APP_NAME: &str = "Flashy";

/// Saved deck document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDeck {
    pub version: String,
    pub cards: Vec<Card>,
    /// Milliseconds since the Unix epoch.
    pub last_modified: i64,
}

impl StoredDeck {
    pub fn new(cards: Vec<Card>, now: DateTime<Utc>) -> Self {
        Self {
            version: STORAGE_VERSION.to_string(),
            cards,
            last_modified: now.timestamp_millis(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    version: &'a str,
    export_date: String,
    cards: &'a [Card],
    app_name: &'a str,
}

/// What a store currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    pub has_data: bool,
    pub card_count: usize,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Key-value persistence for the card list.
pub trait CardStore: Send + Sync {
    /// Saved cards, or the sample cards when nothing usable is stored.
    fn load(&self) -> Vec<Card>;

    fn save(&self, cards: &[Card]) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;

    fn info(&self) -> StorageInfo;
}

/// Sample cards for a fresh install.
pub fn default_cards() -> Vec<Card> {
    vec![
        Card::new(1, "noxious", "(formal) poisonous or harmful", "Vocabulary"),
        Card::new(
            2,
            "Eloquent",
            "Fluent and persuasive in speaking or writing",
            "Vocabulary",
        ),
        Card::new(
            3,
            "Pristine",
            "In its original condition; unspoiled; perfectly clean",
            "Vocabulary",
        ),
        Card::new(
            4,
            "Resilient",
            "Able to recover quickly from difficult conditions",
            "Vocabulary",
        ),
        Card::new(
            5,
            "Meticulous",
            "Showing great attention to detail; very careful",
            "Vocabulary",
        ),
    ]
}

/// Serialize cards into a saved deck document.
pub fn encode_stored(cards: &[Card], now: DateTime<Utc>) -> Result<String, StoreError> {
    let deck = StoredDeck::new(cards.to_vec(), now);
    Ok(serde_json::to_string(&deck)?)
}

/// Parse a saved deck document, keeping only valid cards.
///
/// A card is valid when it has a numeric id and non-blank front and back.
/// Missing categories become [`DEFAULT_CATEGORY`].
pub fn decode_stored(json: &str) -> Result<Vec<Card>, ImportError> {
    let document: Value = serde_json::from_str(json)?;
    let cards = document
        .get("cards")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingCards)?;

    let valid: Vec<Card> = cards.iter().filter_map(stored_card).collect();
    if valid.is_empty() {
        return Err(ImportError::NoValidCards);
    }
    Ok(valid)
}

/// Summarize a saved deck document without validating its cards.
pub fn stored_info(json: &str) -> StorageInfo {
    let Ok(document) = serde_json::from_str::<Value>(json) else {
        return StorageInfo::default();
    };

    StorageInfo {
        has_data: true,
        card_count: document
            .get("cards")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
        last_modified: document
            .get("lastModified")
            .and_then(Value::as_i64)
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
    }
}

/// Render cards as a pretty-printed backup document.
pub fn export_cards(cards: &[Card], now: DateTime<Utc>) -> Result<String, serde_json::Error> {
    let document = ExportDocument {
        version: STORAGE_VERSION,
        export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        cards,
        app_name: APP_NAME,
    };
    serde_json::to_string_pretty(&document)
}

/// Read cards from a backup document.
///
/// Entries need non-blank string front and back; both are trimmed. Ids
/// default to the entry's position among the valid cards (starting at 1).
pub fn import_cards(json: &str) -> Result<Vec<Card>, ImportError> {
    let document: Value = serde_json::from_str(json)?;
    let cards = document
        .get("cards")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingCards)?;

    let valid: Vec<Card> = cards
        .iter()
        .filter_map(|entry| {
            let front = non_blank(entry, "front")?;
            let back = non_blank(entry, "back")?;
            Some((entry, front.trim(), back.trim()))
        })
        .enumerate()
        .map(|(index, (entry, front, back))| Card {
            id: entry
                .get("id")
                .and_then(Value::as_i64)
                .filter(|id| *id != 0)
                .unwrap_or(index as i64 + 1),
            front: front.to_string(),
            back: back.to_string(),
            category: category_of(entry),
        })
        .collect();

    if valid.is_empty() {
        return Err(ImportError::NoValidCards);
    }
    Ok(valid)
}

fn stored_card(entry: &Value) -> Option<Card> {
    Some(Card {
        id: entry.get("id")?.as_i64()?,
        front: non_blank(entry, "front")?.to_string(),
        back: non_blank(entry, "back")?.to_string(),
        category: category_of(entry),
    })
}

fn non_blank<'a>(entry: &'a Value, field: &str) -> Option<&'a str> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn category_of(entry: &Value) -> String {
    entry
        .get("category")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}

/// In-memory store holding the serialized document, like a browser's local storage slot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a raw document.
    pub fn with_document(json: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(json.into())),
        }
    }

    fn document(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CardStore for MemoryStore {
    fn load(&self) -> Vec<Card> {
        self.document()
            .and_then(|json| decode_stored(&json).ok())
            .unwrap_or_else(default_cards)
    }

    fn save(&self, cards: &[Card]) -> Result<(), StoreError> {
        let json = encode_stored(cards, Utc::now())?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    fn info(&self) -> StorageInfo {
        self.document()
            .map(|json| stored_info(&json))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_drops_invalid_cards() {
        let doc = json!({
            "version": "2.0",
            "cards": [
                { "id": 1, "front": "noxious", "back": "harmful", "category": "Vocabulary" },
                { "id": "2", "front": "bad id", "back": "x" },
                { "id": 3, "front": "  ", "back": "blank front" },
                { "id": 4, "front": "no back" },
                { "id": 5, "front": "legacy", "back": "no category" },
                null
            ],
            "lastModified": 0
        });

        let cards = decode_stored(&doc.to_string()).expect("decode");
        assert_eq!(
            cards,
            vec![
                Card::new(1, "noxious", "harmful", "Vocabulary"),
                Card::new(5, "legacy", "no category", "General"),
            ]
        );
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode_stored("not json"), Err(ImportError::Json(_))));
        assert!(matches!(
            decode_stored(r#"{"version":"2.0"}"#),
            Err(ImportError::MissingCards)
        ));
        assert!(matches!(
            decode_stored(r#"{"cards":[]}"#),
            Err(ImportError::NoValidCards)
        ));
    }

    #[test]
    fn test_encode_writes_version_and_timestamp() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let json = encode_stored(&default_cards(), now).expect("encode");
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "2.0");
        assert_eq!(value["lastModified"], 1_700_000_000_123_i64);
        assert_eq!(value["cards"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_stored_info() {
        let info = stored_info(r#"{"cards":[{},{}],"lastModified":1700000000000}"#);
        assert!(info.has_data);
        assert_eq!(info.card_count, 2);
        assert_eq!(
            info.last_modified,
            Utc.timestamp_millis_opt(1_700_000_000_000).single()
        );

        assert_eq!(stored_info("{oops"), StorageInfo::default());
    }

    #[test]
    fn test_export_document() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let json = export_cards(&default_cards()[..1], now).expect("export");
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["appName"], "Flashy");
        assert_eq!(value["version"], "2.0");
        assert_eq!(value["exportDate"], "2024-03-01T12:00:00.000Z");
        assert_eq!(value["cards"][0]["front"], "noxious");
    }

    #[test]
    fn test_import_trims_and_fills_defaults() {
        let doc = json!({
            "cards": [
                { "front": "  Paris ", "back": " Capital of France " },
                { "front": "", "back": "dropped" },
                { "id": 42, "front": "Berlin", "back": "Capital of Germany", "category": "Geo" },
                { "id": 0, "front": "Rome", "back": "Capital of Italy" }
            ]
        });

        let cards = import_cards(&doc.to_string()).expect("import");
        assert_eq!(
            cards,
            vec![
                Card::new(1, "Paris", "Capital of France", "General"),
                Card::new(42, "Berlin", "Capital of Germany", "Geo"),
                Card::new(3, "Rome", "Capital of Italy", "General"),
            ]
        );
    }

    #[test]
    fn test_import_rejects_documents_without_cards() {
        assert!(matches!(
            import_cards(r#"{"cards":"nope"}"#),
            Err(ImportError::MissingCards)
        ));
        assert!(matches!(
            import_cards(r#"{"cards":[{"front":" ","back":"x"}]}"#),
            Err(ImportError::NoValidCards)
        ));
    }

    #[test]
    fn test_export_then_import_keeps_cards() {
        let cards = default_cards();
        let json = export_cards(&cards, Utc::now()).expect("export");
        assert_eq!(import_cards(&json).expect("import"), cards);
    }

    #[test]
    fn test_memory_store_falls_back_to_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), default_cards());
        assert_eq!(store.info(), StorageInfo::default());

        let store = MemoryStore::with_document("garbage");
        assert_eq!(store.load(), default_cards());
    }

    #[test]
    fn test_memory_store_save_load_clear() {
        let store = MemoryStore::new();
        let cards = vec![Card::new(7, "to", "toward", "Grammar")];

        store.save(&cards).expect("save");
        assert_eq!(store.load(), cards);

        let info = store.info();
        assert!(info.has_data);
        assert_eq!(info.card_count, 1);
        assert!(info.last_modified.is_some());

        store.clear().expect("clear");
        assert_eq!(store.load(), default_cards());
        assert!(!store.info().has_data);
    }
}
