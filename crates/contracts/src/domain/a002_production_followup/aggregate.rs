use crate::domain::common::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Запись журнала выпуска по позиции заказа (журнал только дополняется)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEntry {
    /// Принятые изделия
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub accepted_components: i64,

    /// Отбракованные изделия
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub rejected_components: i64,

    /// Этикетки, израсходованные без годного или бракованного изделия
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub label_wastage: i64,

    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ProductionEntry {
    pub fn new(accepted: i64, rejected: i64, wastage: i64) -> Self {
        Self {
            accepted_components: accepted,
            rejected_components: rejected,
            label_wastage: wastage,
            created_at: None,
            fields: Map::new(),
        }
    }

    /// Этикетки, израсходованные этой записью
    pub fn used_labels(&self) -> i64 {
        lenient::sum_quantities([
            self.accepted_components,
            self.rejected_components,
            self.label_wastage,
        ])
    }
}

/// Сумма принятых изделий по журналу
pub fn produced_quantity(entries: &[ProductionEntry]) -> i64 {
    lenient::sum_quantities(entries.iter().map(|e| e.accepted_components))
}

/// Сумма израсходованных этикеток по журналу
pub fn used_labels(entries: &[ProductionEntry]) -> i64 {
    lenient::sum_quantities(entries.iter().map(ProductionEntry::used_labels))
}
