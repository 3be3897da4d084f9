use crate::domain::a006_goods_return::aggregate::ReturnEntry;
use crate::shared::recency::Activity;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Возвраты одного заказа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnGroup {
    pub order_id: String,
    pub order_key: String,
    pub company_name: String,
    /// Возвраты, сначала самые свежие
    pub entries: Vec<ReturnEntry>,
    /// Возвращено по позициям: product_id → количество
    pub returned_by_product: IndexMap<String, i64>,
    pub total_returned: i64,
    pub latest_activity: DateTime<Utc>,
}

impl Activity for ReturnGroup {
    fn latest_activity(&self) -> DateTime<Utc> {
        self.latest_activity
    }
}
