use crate::domain::common::lenient;
use crate::shared::field_mapping::{self, FieldMapping};
use crate::shared::recency::{self, Activity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Возврат товара по позиции заказа (шелкография)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnEntry {
    #[serde(deserialize_with = "lenient::id")]
    pub product_id: String,

    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    /// Дата возврата из формы, если `createdAt` не записан
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub return_date: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ReturnEntry {
    pub fn new(product_id: impl Into<String>, quantity_field: &str, quantity: i64) -> Self {
        let mut fields = Map::new();
        fields.insert(quantity_field.to_string(), Value::from(quantity));
        Self {
            product_id: product_id.into(),
            reason: None,
            created_at: None,
            return_date: None,
            fields,
        }
    }

    pub fn quantity(&self, mapping: &FieldMapping) -> i64 {
        field_mapping::resolve_quantity(&self.fields, &mapping.returned_quantity)
    }
}

impl Activity for ReturnEntry {
    fn latest_activity(&self) -> DateTime<Utc> {
        recency::activity_timestamp(self.created_at.as_deref(), self.return_date.as_deref())
    }
}

/// Сумма возвращённого количества по позиции
pub fn returned_quantity(entries: &[ReturnEntry], product_id: &str, mapping: &FieldMapping) -> i64 {
    lenient::sum_quantities(
        entries
            .iter()
            .filter(|e| e.product_id == product_id)
            .map(|e| e.quantity(mapping)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_returned_quantity_per_product() {
        let entries: Vec<ReturnEntry> = serde_json::from_value(json!([
            {"productId": "p1", "returnedQuantity": 12, "reason": "smudged print"},
            {"productId": "p1", "quantity": "3"},
            {"productId": "p2", "returnedQuantity": 50}
        ]))
        .unwrap();
        let mapping = FieldMapping::default();
        assert_eq!(returned_quantity(&entries, "p1", &mapping), 15);
        assert_eq!(returned_quantity(&entries, "p2", &mapping), 50);
    }
}
