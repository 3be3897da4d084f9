use crate::domain::a005_sales_billing::aggregate::BillingRecord;
use crate::shared::recency::Activity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Оплаты одного заказа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingGroup {
    pub order_id: String,
    pub order_number: Option<String>,
    pub company_name: String,
    /// Записи группы, сначала самые свежие
    pub records: Vec<BillingRecord>,
    pub total_billed: f64,
    pub estimated_value: f64,
    /// Оценка минус оплачено, не меньше нуля
    pub balance: f64,
    /// Статус самой свежей записи
    pub latest_status: Option<String>,
    pub latest_activity: DateTime<Utc>,
}

impl Activity for BillingGroup {
    fn latest_activity(&self) -> DateTime<Utc> {
        self.latest_activity
    }
}

impl BillingGroup {
    /// Регистронезависимый поиск по компании и номеру заказа
    pub fn matches(&self, search: &str) -> bool {
        let term = search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.company_name.to_lowercase().contains(&term)
            || self
                .order_number
                .as_deref()
                .unwrap_or(&self.order_id)
                .to_lowercase()
                .contains(&term)
    }
}
