use super::dto::BillingGroup;
use crate::domain::a005_sales_billing::aggregate::BillingRecord;
use crate::domain::common::UNKNOWN_COMPANY;
use crate::shared::recency::{self, Activity};
use indexmap::IndexMap;

/// Сгруппировать записи биллинга по заказу и отсортировать по свежести
pub fn build_register(records: &[BillingRecord]) -> Vec<BillingGroup> {
    let mut by_order: IndexMap<&str, Vec<BillingRecord>> = IndexMap::new();
    for record in records {
        by_order
            .entry(record.order_id.as_str())
            .or_default()
            .push(record.clone());
    }

    let mut groups: Vec<BillingGroup> = by_order
        .into_iter()
        .map(|(order_id, records)| build_group(order_id, records))
        .collect();
    recency::sort_by_recency(&mut groups);
    groups
}

fn build_group(order_id: &str, mut records: Vec<BillingRecord>) -> BillingGroup {
    let latest_activity = recency::latest_of(records.iter().map(Activity::latest_activity));
    let latest_status = records
        .iter()
        .max_by_key(|r| r.latest_activity())
        .and_then(|r| r.status.clone());

    let company_name = records
        .iter()
        .filter_map(|r| r.company_name.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_COMPANY)
        .to_string();
    let order_number = records.iter().find_map(|r| r.order_number.clone());
    let total_billed: f64 = records.iter().map(|r| r.amount).sum();
    let estimated_value = records
        .iter()
        .map(|r| r.estimated_value)
        .fold(0.0_f64, f64::max);

    recency::sort_by_recency(&mut records);

    BillingGroup {
        order_id: order_id.to_string(),
        order_number,
        company_name,
        records,
        total_billed,
        estimated_value,
        balance: (estimated_value - total_billed).max(0.0),
        latest_status,
        latest_activity,
    }
}
