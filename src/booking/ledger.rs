//! Booking history ledger: projection to the reserved-seat set and
//! persistence under a single storage key.

use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::models::{BookingRecord, SeatId};
use crate::store::{KeyValueStore, StoreError};

/// Ключ, под которым хранится вся история в виде JSON-массива.
pub const LEDGER_KEY: &str = "bookingHistory";

/// Все места, встречающиеся хоть в одной брони. Считается при каждом чтении.
pub fn reserved_seats(ledger: &[BookingRecord]) -> BTreeSet<SeatId> {
    ledger
        .iter()
        .flat_map(|record| record.seats.iter().cloned())
        .collect()
}

pub fn encode(ledger: &[BookingRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(ledger)
}

/// `null` читается как пустая история.
pub fn decode(raw: &str) -> Result<Vec<BookingRecord>, serde_json::Error> {
    let parsed: Option<Vec<BookingRecord>> = serde_json::from_str(raw)?;
    Ok(parsed.unwrap_or_default())
}

/// Отсутствующее или битое значение даёт пустую историю; ошибки самого хранилища пробрасываются.
pub async fn load(store: &dyn KeyValueStore) -> Result<Vec<BookingRecord>, StoreError> {
    let Some(raw) = store.get(LEDGER_KEY).await? else {
        info!("No booking history found, starting with an empty ledger");
        return Ok(Vec::new());
    };

    match decode(&raw) {
        Ok(ledger) => {
            info!("Loaded {} booking records", ledger.len());
            Ok(ledger)
        }
        Err(e) => {
            warn!("Stored booking history is not valid JSON, ignoring it: {}", e);
            Ok(Vec::new())
        }
    }
}

pub async fn save(store: &dyn KeyValueStore, ledger: &[BookingRecord]) -> Result<(), StoreError> {
    let data = encode(ledger)?;
    store.set(LEDGER_KEY, &data).await
}

pub async fn clear(store: &dyn KeyValueStore) -> Result<(), StoreError> {
    store.remove(LEDGER_KEY).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn sample() -> Vec<BookingRecord> {
        vec![
            BookingRecord::new("Lan", vec!["A1".into(), "A2".into()]),
            BookingRecord::new("Minh", vec!["C7".into()]),
        ]
    }

    #[test]
    fn projection_flattens_all_records() {
        let reserved = reserved_seats(&sample());
        let ids: Vec<_> = reserved.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["A1", "A2", "C7"]);
    }

    #[test]
    fn projection_of_empty_ledger_is_empty() {
        assert!(reserved_seats(&[]).is_empty());
    }

    #[test]
    fn wire_format_matches_history_blob() {
        let json = encode(&sample()[..1]).unwrap();
        assert_eq!(json, r#"[{"name":"Lan","seats":["A1","A2"],"quantity":2}]"#);
    }

    #[test]
    fn decode_treats_null_as_empty() {
        assert!(decode("null").unwrap().is_empty());
        assert!(decode("not json").is_err());
    }

    #[tokio::test]
    async fn reload_reproduces_reserved_set() {
        let store = MemoryStore::new();
        let ledger = sample();
        save(&store, &ledger).await.unwrap();

        let reloaded = load(&store).await.unwrap();
        assert_eq!(reloaded, ledger);
        assert_eq!(reserved_seats(&reloaded), reserved_seats(&ledger));
    }

    #[tokio::test]
    async fn corrupt_value_loads_as_empty() {
        let store = MemoryStore::with_entry(LEDGER_KEY, "{broken");
        assert!(load(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_removes_key() {
        let store = MemoryStore::new();
        save(&store, &sample()).await.unwrap();
        clear(&store).await.unwrap();
        assert_eq!(store.get(LEDGER_KEY).await.unwrap(), None);
    }
}
