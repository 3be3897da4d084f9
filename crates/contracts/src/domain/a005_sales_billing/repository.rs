use super::aggregate::{BillingDraft, BillingRecord};
use crate::domain::a001_order::aggregate::Order;
use crate::shared::config::StoreKeys;
use crate::shared::error::{StoreError, ValidationError, WriteError};
use crate::shared::record_store::{self, RecordStore};

/// Проверить форму оплаты и добавить запись биллинга.
///
/// При ошибке проверки ничего не записывается.
pub fn record_billing<S: RecordStore + ?Sized>(
    store: &mut S,
    keys: &StoreKeys,
    draft: BillingDraft,
) -> Result<BillingRecord, WriteError> {
    draft.validate()?;

    let orders: Vec<Order> = record_store::read_list(store, &keys.orders);
    if !orders.iter().any(|o| o.id == draft.order_id) {
        return Err(ValidationError::UnknownOrder(draft.order_id).into());
    }

    let record = draft.into_record();
    let value = serde_json::to_value(&record).map_err(|e| StoreError::Serialize {
        key: keys.sales_billing.clone(),
        reason: e.to_string(),
    })?;
    record_store::push_to_list(store, &keys.sales_billing, value)?;
    log::info!(
        "Billing {} of {:.2} recorded for order {}",
        record.id,
        record.amount,
        record.order_id
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::record_store::{read_list, MemoryStore};
    use serde_json::json;

    fn store_with_order() -> MemoryStore {
        MemoryStore::new().with_json(
            &StoreKeys::default().orders,
            &json!([{"id": "o1", "orderNumber": "IML-1", "contact": {"company": "Acme"}}]),
        )
    }

    #[test]
    fn test_valid_billing_is_appended() {
        let mut store = store_with_order();
        let keys = StoreKeys::default();
        let draft = BillingDraft {
            order_id: "o1".to_string(),
            amount: 2500.0,
            ..Default::default()
        };
        let record = record_billing(&mut store, &keys, draft).unwrap();
        let stored: Vec<BillingRecord> = read_list(&store, &keys.sales_billing);
        assert_eq!(stored, vec![record]);
    }

    #[test]
    fn test_invalid_amount_is_not_written() {
        let mut store = store_with_order();
        let keys = StoreKeys::default();
        let draft = BillingDraft {
            order_id: "o1".to_string(),
            amount: 0.0,
            ..Default::default()
        };
        let err = record_billing(&mut store, &keys, draft).unwrap_err();
        assert_eq!(
            err,
            WriteError::Validation(ValidationError::NonPositiveAmount(0.0))
        );
        assert!(store.get(&keys.sales_billing).is_none());
    }

    #[test]
    fn test_unknown_order_is_rejected() {
        let mut store = store_with_order();
        let draft = BillingDraft {
            order_id: "o9".to_string(),
            amount: 1.0,
            ..Default::default()
        };
        let err = record_billing(&mut store, &StoreKeys::default(), draft).unwrap_err();
        assert_eq!(
            err,
            WriteError::Validation(ValidationError::UnknownOrder("o9".to_string()))
        );
    }
}
