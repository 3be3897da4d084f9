use super::aggregate::ProductionEntry;
use crate::domain::common::ProductKey;
use crate::shared::config::StoreKeys;
use crate::shared::error::{StoreError, ValidationError, WriteError};
use crate::shared::recency;
use crate::shared::record_store::{self, RecordStore};

/// Добавить запись в журнал выпуска позиции
pub fn append_production_entry<S: RecordStore + ?Sized>(
    store: &mut S,
    keys: &StoreKeys,
    product: &ProductKey,
    entry: &ProductionEntry,
) -> Result<(), WriteError> {
    validate(entry)?;
    let mut entry = entry.clone();
    entry.created_at.get_or_insert_with(recency::now_timestamp);
    let value = serde_json::to_value(&entry).map_err(|e| StoreError::Serialize {
        key: keys.production_followups.clone(),
        reason: e.to_string(),
    })?;
    record_store::push_to_keyed_list(
        store,
        &keys.production_followups,
        &product.storage_key(),
        value,
    )?;
    log::debug!("Production entry appended for {}", product);
    Ok(())
}

fn validate(entry: &ProductionEntry) -> Result<(), ValidationError> {
    let fields = [
        ("acceptedComponents", entry.accepted_components),
        ("rejectedComponents", entry.rejected_components),
        ("labelWastage", entry.label_wastage),
    ];
    for (field, value) in fields {
        if value < 0 {
            return Err(ValidationError::NegativeQuantity { field, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::record_store::{read_keyed_lists, MemoryStore};

    #[test]
    fn test_append_keeps_log_order() {
        let mut store = MemoryStore::new();
        let keys = StoreKeys::default();
        let key = ProductKey::new("o1", "p1");
        append_production_entry(&mut store, &keys, &key, &ProductionEntry::new(10, 1, 0)).unwrap();
        append_production_entry(&mut store, &keys, &key, &ProductionEntry::new(20, 0, 2)).unwrap();

        let log = read_keyed_lists::<ProductionEntry, _>(&store, &keys.production_followups);
        let entries = &log["o1_p1"];
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].accepted_components, 20);
    }

    #[test]
    fn test_negative_quantity_is_not_written() {
        let mut store = MemoryStore::new();
        let keys = StoreKeys::default();
        let err = append_production_entry(
            &mut store,
            &keys,
            &ProductKey::new("o1", "p1"),
            &ProductionEntry::new(-1, 0, 0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            WriteError::Validation(ValidationError::NegativeQuantity { .. })
        ));
        assert!(store.is_empty());
    }
}
