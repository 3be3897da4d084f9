use crate::domain::common::{lenient, UNKNOWN_COMPANY};
use crate::shared::field_mapping::{self, FieldMapping};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Заказ клиента (создаётся формой ввода заказа, здесь только читается)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,

    /// Номер заказа для отображения (напр. "IML-0042")
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub order_number: Option<String>,

    #[serde(default)]
    pub contact: Contact,

    /// Позиции заказа; битые позиции пропускаются
    #[serde(default, deserialize_with = "lenient::list")]
    pub products: Vec<Product>,

    /// Смета заказа в свободной форме
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_estimate: Option<Value>,
}

/// Контактные данные клиента
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub contact_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub phone: Option<String>,
}

/// Позиция заказа
///
/// Наименование и категория пишутся разными страницами под разными именами
/// полей, поэтому они остаются в `fields` и читаются через [`FieldMapping`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub size: Option<String>,

    #[serde(default, deserialize_with = "lenient::quantity")]
    pub order_quantity: i64,

    /// Позиция передана в закупку (попадает в складской учёт IML)
    #[serde(default, deserialize_with = "lenient::flag")]
    pub move_to_purchase: bool,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Order {
    /// Название компании для группировки; пустое значение заменяется на "Unknown Company"
    pub fn company_name(&self) -> &str {
        self.contact
            .company
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_COMPANY)
    }

    /// Ключ заказа в дереве: номер заказа, а если его нет, id
    pub fn order_key(&self) -> &str {
        self.order_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }

    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Оценка стоимости заказа: число или объект с полем `total`/`grandTotal`
    pub fn estimated_total(&self) -> f64 {
        match &self.order_estimate {
            Some(Value::Object(estimate)) => ["total", "grandTotal", "amount"]
                .iter()
                .find_map(|k| estimate.get(*k))
                .map(lenient::amount_from_value)
                .unwrap_or(0.0),
            Some(value) => lenient::amount_from_value(value),
            None => 0.0,
        }
    }
}

impl Product {
    pub fn display_name(&self, mapping: &FieldMapping) -> String {
        field_mapping::resolve_text(&self.fields, &mapping.product_name)
            .unwrap_or_else(|| self.id.clone())
    }

    pub fn category(&self, mapping: &FieldMapping) -> Option<String> {
        field_mapping::resolve_text(&self.fields, &mapping.category)
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_parses_form_shapes() {
        let order: Order = serde_json::from_value(json!({
            "id": 1712,
            "orderNumber": "IML-7",
            "contact": {"company": "Acme Foods", "contactName": "R. Shah", "phone": 9876},
            "products": [
                {"id": "p1", "imlName": "Lid", "size": "500ml", "orderQuantity": "1000", "moveToPurchase": "true"},
                {"imlName": "no id"},
                {"id": 2, "productName": "Cup", "category": "Round"}
            ],
            "orderEstimate": {"total": 5000}
        }))
        .unwrap();

        let mapping = FieldMapping::default();
        assert_eq!(order.id, "1712");
        assert_eq!(order.products.len(), 2);
        assert_eq!(order.contact.phone.as_deref(), Some("9876"));
        assert!(order.products[0].move_to_purchase);
        assert_eq!(order.products[0].order_quantity, 1000);
        assert_eq!(order.products[0].display_name(&mapping), "Lid");
        assert_eq!(order.products[1].id, "2");
        assert_eq!(order.products[1].category(&mapping).as_deref(), Some("Round"));
        assert_eq!(order.estimated_total(), 5000.0);
    }

    #[test]
    fn test_company_and_order_key_fallbacks() {
        let order: Order = serde_json::from_value(json!({
            "id": "o-1",
            "orderNumber": " ",
            "contact": {"company": ""}
        }))
        .unwrap();
        assert_eq!(order.company_name(), UNKNOWN_COMPANY);
        assert_eq!(order.order_key(), "o-1");
    }
}
