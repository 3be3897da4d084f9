use super::dto::ReturnGroup;
use crate::domain::common::{lenient, UNKNOWN_COMPANY};
use crate::shared::field_mapping::FieldMapping;
use crate::shared::recency::{self, Activity};
use crate::shared::snapshot::StoreSnapshot;
use indexmap::IndexMap;

/// Журнал возвратов по заказам, сначала самые свежие.
///
/// Возврат по заказу, которого нет в списке заказов, не теряется: он
/// показывается под "Unknown Company" с id заказа вместо номера.
pub fn build_register(snapshot: &StoreSnapshot, mapping: &FieldMapping) -> Vec<ReturnGroup> {
    let mut groups: Vec<ReturnGroup> = snapshot
        .goods_returned
        .iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(order_id, entries)| {
            let order = snapshot.order(order_id);
            let mut entries = entries.clone();

            let mut returned_by_product: IndexMap<String, i64> = IndexMap::new();
            for entry in &entries {
                let total = returned_by_product.entry(entry.product_id.clone()).or_default();
                *total = lenient::sum_quantities([*total, entry.quantity(mapping)]);
            }
            let latest_activity = recency::latest_of(entries.iter().map(Activity::latest_activity));
            recency::sort_by_recency(&mut entries);

            ReturnGroup {
                order_id: order_id.clone(),
                order_key: order
                    .map(|o| o.order_key().to_string())
                    .unwrap_or_else(|| order_id.clone()),
                company_name: order
                    .map(|o| o.company_name().to_string())
                    .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
                total_returned: lenient::sum_quantities(returned_by_product.values().copied()),
                returned_by_product,
                entries,
                latest_activity,
            }
        })
        .collect();

    recency::sort_by_recency(&mut groups);
    groups
}
