use super::aggregate::ReturnEntry;
use crate::shared::config::StoreKeys;
use crate::shared::error::{StoreError, ValidationError, WriteError};
use crate::shared::field_mapping::FieldMapping;
use crate::shared::recency;
use crate::shared::record_store::{self, RecordStore};

/// Добавить возврат к заказу
pub fn record_goods_return<S: RecordStore + ?Sized>(
    store: &mut S,
    keys: &StoreKeys,
    mapping: &FieldMapping,
    order_id: &str,
    entry: &ReturnEntry,
) -> Result<(), WriteError> {
    if order_id.trim().is_empty() {
        return Err(ValidationError::EmptyField("orderId").into());
    }
    let quantity = entry.quantity(mapping);
    if quantity <= 0 {
        return Err(ValidationError::NonPositiveQuantity {
            field: "returnedQuantity",
            value: quantity,
        }
        .into());
    }

    let mut entry = entry.clone();
    entry.created_at.get_or_insert_with(recency::now_timestamp);
    let value = serde_json::to_value(&entry).map_err(|e| StoreError::Serialize {
        key: keys.goods_returned.clone(),
        reason: e.to_string(),
    })?;
    record_store::push_to_keyed_list(store, &keys.goods_returned, order_id, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::record_store::{read_keyed_lists, MemoryStore};

    #[test]
    fn test_return_is_grouped_by_order() {
        let mut store = MemoryStore::new();
        let keys = StoreKeys::default();
        let mapping = FieldMapping::default();
        let entry = ReturnEntry::new("p1", "returnedQuantity", 4);
        record_goods_return(&mut store, &keys, &mapping, "o1", &entry).unwrap();
        record_goods_return(&mut store, &keys, &mapping, "o1", &entry).unwrap();

        let returns = read_keyed_lists::<ReturnEntry, _>(&store, &keys.goods_returned);
        assert_eq!(returns["o1"].len(), 2);
        assert!(returns["o1"][0].created_at.is_some());
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let mut store = MemoryStore::new();
        let entry = ReturnEntry::new("p1", "returnedQuantity", 0);
        let result = record_goods_return(
            &mut store,
            &StoreKeys::default(),
            &FieldMapping::default(),
            "o1",
            &entry,
        );
        assert!(result.is_err());
        assert!(store.is_empty());
    }
}
