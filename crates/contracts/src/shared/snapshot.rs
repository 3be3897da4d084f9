use super::config::StoreKeys;
use super::record_store::{self, RecordStore};
use crate::domain::a001_order::aggregate::Order;
use crate::domain::a002_production_followup::aggregate::ProductionEntry;
use crate::domain::a003_label_receipt::aggregate::LabelReceipt;
use crate::domain::a004_verification::aggregate::VerificationRecord;
use crate::domain::a005_sales_billing::aggregate::BillingRecord;
use crate::domain::a006_goods_return::aggregate::ReturnEntry;
use indexmap::IndexMap;

/// Снимок всех коллекций хранилища, прочитанный за одну загрузку.
///
/// Каждый ключ читается независимо: битый ключ даёт пустую коллекцию и не
/// мешает остальным.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub orders: Vec<Order>,
    /// `orderId_productId` → журнал выпуска
    pub production: IndexMap<String, Vec<ProductionEntry>>,
    /// `orderId_productId` → приход этикеток
    pub label_receipts: IndexMap<String, LabelReceipt>,
    /// `orderId` → проверки склада IML
    pub inventory_verified: IndexMap<String, Vec<VerificationRecord>>,
    /// `orderId` → проверки остатков шелкографии
    pub stocks_verified: IndexMap<String, Vec<VerificationRecord>>,
    /// `orderId` → возвраты
    pub goods_returned: IndexMap<String, Vec<ReturnEntry>>,
    pub billing: Vec<BillingRecord>,
}

impl StoreSnapshot {
    pub fn load<S: RecordStore + ?Sized>(store: &S, keys: &StoreKeys) -> Self {
        let snapshot = Self {
            orders: record_store::read_list(store, &keys.orders),
            production: record_store::read_keyed_lists(store, &keys.production_followups),
            label_receipts: record_store::read_keyed(store, &keys.label_receipts),
            inventory_verified: record_store::read_keyed_lists(store, &keys.inventory_verified),
            stocks_verified: record_store::read_keyed_lists(store, &keys.stocks_verified),
            goods_returned: record_store::read_keyed_lists(store, &keys.goods_returned),
            billing: record_store::read_list(store, &keys.sales_billing),
        };
        log::debug!(
            "Snapshot loaded: {} orders, {} production logs, {} billing records",
            snapshot.orders.len(),
            snapshot.production.len(),
            snapshot.billing.len()
        );
        snapshot
    }

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::record_store::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_broken_key_does_not_affect_others() {
        let keys = StoreKeys::default();
        let store = MemoryStore::new()
            .with_json(&keys.orders, &json!([{"id": "o1", "products": []}]))
            .with_raw(&keys.production_followups, "definitely not json")
            .with_json(&keys.label_receipts, &json!({"o1_p1": {"receivedQuantity": 150}}));

        let snapshot = StoreSnapshot::load(&store, &keys);
        assert_eq!(snapshot.orders.len(), 1);
        assert!(snapshot.production.is_empty());
        assert_eq!(snapshot.label_receipts["o1_p1"].received_quantity, 150);
        assert!(snapshot.order("o1").is_some());
    }

    #[test]
    fn test_empty_store_gives_empty_snapshot() {
        let snapshot = StoreSnapshot::load(&MemoryStore::new(), &StoreKeys::default());
        assert_eq!(snapshot, StoreSnapshot::default());
    }
}
