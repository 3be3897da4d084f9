use crate::domain::common::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Приход этикеток по позиции заказа; на ключ хранится одна запись
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelReceipt {
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub received_quantity: i64,

    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub received_at: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LabelReceipt {
    pub fn new(received_quantity: i64) -> Self {
        Self {
            received_quantity,
            received_at: None,
            fields: Map::new(),
        }
    }
}

/// Остаток этикеток: приход минус расход, не меньше нуля
pub fn remaining_labels(received: i64, used: i64) -> i64 {
    received.max(0).saturating_sub(used.max(0)).max(0)
}
