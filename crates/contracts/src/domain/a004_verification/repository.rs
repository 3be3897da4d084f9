use super::aggregate::{VerificationRecord, VerificationTarget};
use crate::shared::config::StoreKeys;
use crate::shared::error::{StoreError, ValidationError, WriteError};
use crate::shared::field_mapping::FieldMapping;
use crate::shared::recency;
use crate::shared::record_store::{self, RecordStore};

pub fn target_key(keys: &StoreKeys, target: VerificationTarget) -> &str {
    match target {
        VerificationTarget::Inventory => &keys.inventory_verified,
        VerificationTarget::Stocks => &keys.stocks_verified,
    }
}

/// Добавить запись проверки к заказу
pub fn record_verification<S: RecordStore + ?Sized>(
    store: &mut S,
    keys: &StoreKeys,
    mapping: &FieldMapping,
    target: VerificationTarget,
    order_id: &str,
    record: &VerificationRecord,
) -> Result<(), WriteError> {
    if order_id.trim().is_empty() {
        return Err(ValidationError::EmptyField("orderId").into());
    }
    if record.product_id.trim().is_empty() {
        return Err(ValidationError::EmptyField("productId").into());
    }
    let quantity = record.quantity(mapping);
    if quantity < 0 {
        return Err(ValidationError::NegativeQuantity {
            field: "verifiedQuantity",
            value: quantity,
        }
        .into());
    }

    let key = target_key(keys, target);
    let mut record = record.clone();
    record.created_at.get_or_insert_with(recency::now_timestamp);
    let value = serde_json::to_value(&record).map_err(|e| StoreError::Serialize {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    record_store::push_to_keyed_list(store, key, order_id, value)?;
    log::debug!("Verification of {} recorded in `{}` for order {}", quantity, key, order_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_verification::aggregate::verified_quantity;
    use crate::shared::record_store::{read_keyed_lists, MemoryStore};

    #[test]
    fn test_targets_write_to_separate_keys() {
        let mut store = MemoryStore::new();
        let keys = StoreKeys::default();
        let mapping = FieldMapping::default();

        let iml = VerificationRecord::new("p1", "finalQty", 30);
        let sp = VerificationRecord::new("p1", "quantityVerified", 7);
        record_verification(&mut store, &keys, &mapping, VerificationTarget::Inventory, "o1", &iml)
            .unwrap();
        record_verification(&mut store, &keys, &mapping, VerificationTarget::Stocks, "o1", &sp)
            .unwrap();

        let inventory = read_keyed_lists::<VerificationRecord, _>(&store, &keys.inventory_verified);
        let stocks = read_keyed_lists::<VerificationRecord, _>(&store, &keys.stocks_verified);
        assert_eq!(verified_quantity(&inventory["o1"], "p1", &mapping), 30);
        assert_eq!(verified_quantity(&stocks["o1"], "p1", &mapping), 7);
    }

    #[test]
    fn test_empty_order_id_is_rejected() {
        let mut store = MemoryStore::new();
        let record = VerificationRecord::new("p1", "finalQty", 1);
        let err = record_verification(
            &mut store,
            &StoreKeys::default(),
            &FieldMapping::default(),
            VerificationTarget::Inventory,
            " ",
            &record,
        )
        .unwrap_err();
        assert_eq!(err, WriteError::Validation(ValidationError::EmptyField("orderId")));
        assert!(store.is_empty());
    }
}
