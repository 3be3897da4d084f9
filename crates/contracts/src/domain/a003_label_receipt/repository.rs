use super::aggregate::LabelReceipt;
use crate::domain::common::ProductKey;
use crate::shared::config::StoreKeys;
use crate::shared::error::{StoreError, ValidationError, WriteError};
use crate::shared::recency;
use crate::shared::record_store::{self, RecordStore};

/// Записать приход этикеток; предыдущая запись по ключу заменяется
pub fn record_label_receipt<S: RecordStore + ?Sized>(
    store: &mut S,
    keys: &StoreKeys,
    product: &ProductKey,
    receipt: &LabelReceipt,
) -> Result<(), WriteError> {
    if receipt.received_quantity < 0 {
        return Err(ValidationError::NegativeQuantity {
            field: "receivedQuantity",
            value: receipt.received_quantity,
        }
        .into());
    }
    let mut receipt = receipt.clone();
    receipt.received_at.get_or_insert_with(recency::now_timestamp);
    let value = serde_json::to_value(&receipt).map_err(|e| StoreError::Serialize {
        key: keys.label_receipts.clone(),
        reason: e.to_string(),
    })?;
    record_store::put_keyed(store, &keys.label_receipts, &product.storage_key(), value)?;
    Ok(())
}
