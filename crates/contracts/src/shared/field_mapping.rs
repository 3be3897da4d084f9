//! Соответствие имён полей для записей, которые разные страницы пишут по-разному.
//!
//! Страницы IML пишут `imlName` и `finalQty`, страницы шелкографии пишут
//! `productName` и `quantityVerified`. Для каждого логического поля задан
//! список кандидатов; берётся первый, найденный в записи.

use crate::domain::common::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    /// Наименование продукта
    pub product_name: Vec<String>,
    /// Категория продукта (для фильтра)
    pub category: Vec<String>,
    /// Проверенное количество в записи верификации
    pub verified_quantity: Vec<String>,
    /// Количество в записи возврата
    pub returned_quantity: Vec<String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            product_name: names(&["imlName", "productName", "name"]),
            category: names(&["category", "imlType", "productCategory"]),
            verified_quantity: names(&["finalQty", "quantityVerified"]),
            returned_quantity: names(&["returnedQuantity", "quantity"]),
        }
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Первое непустое текстовое значение среди кандидатов
pub fn resolve_text(fields: &Map<String, Value>, candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|name| fields.get(name))
        .filter_map(lenient::text_from_value)
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

/// Количество из первого присутствующего (не `null`) поля-кандидата
pub fn resolve_quantity(fields: &Map<String, Value>, candidates: &[String]) -> i64 {
    candidates
        .iter()
        .filter_map(|name| fields.get(name))
        .find(|value| !value.is_null())
        .map(lenient::quantity_from_value)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_first_present_candidate_wins() {
        let mapping = FieldMapping::default();
        let iml = fields(json!({"imlName": "Lid 500ml", "productName": "ignored"}));
        let sp = fields(json!({"imlName": "  ", "productName": "Cup"}));
        assert_eq!(
            resolve_text(&iml, &mapping.product_name).as_deref(),
            Some("Lid 500ml")
        );
        assert_eq!(resolve_text(&sp, &mapping.product_name).as_deref(), Some("Cup"));
    }

    #[test]
    fn test_quantity_field_variants() {
        let mapping = FieldMapping::default();
        let a = fields(json!({"finalQty": "40"}));
        let b = fields(json!({"finalQty": null, "quantityVerified": 15}));
        let c = fields(json!({"note": "none"}));
        assert_eq!(resolve_quantity(&a, &mapping.verified_quantity), 40);
        assert_eq!(resolve_quantity(&b, &mapping.verified_quantity), 15);
        assert_eq!(resolve_quantity(&c, &mapping.verified_quantity), 0);
    }
}
