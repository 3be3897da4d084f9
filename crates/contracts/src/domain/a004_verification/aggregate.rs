use crate::domain::common::lenient;
use crate::shared::field_mapping::{self, FieldMapping};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Запись проверки (приёмки на склад) по позиции заказа.
///
/// Количество хранится под `finalQty` (IML) или `quantityVerified`
/// (шелкография) и читается через [`FieldMapping`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub product_id: String,

    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Коллекция, в которую пишется проверка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationTarget {
    /// Проверка склада IML (`inventoryFollowUps`)
    Inventory,
    /// Проверка остатков шелкографии (`stocksVerified`)
    Stocks,
}

impl VerificationTarget {
    /// Поле количества, под которым форма сохраняет проверку
    pub fn quantity_field(&self) -> &'static str {
        match self {
            VerificationTarget::Inventory => "finalQty",
            VerificationTarget::Stocks => "quantityVerified",
        }
    }
}

impl VerificationRecord {
    pub fn new(product_id: impl Into<String>, quantity_field: &str, quantity: i64) -> Self {
        let mut fields = Map::new();
        fields.insert(quantity_field.to_string(), Value::from(quantity));
        Self {
            product_id: product_id.into(),
            created_at: None,
            fields,
        }
    }

    pub fn quantity(&self, mapping: &FieldMapping) -> i64 {
        field_mapping::resolve_quantity(&self.fields, &mapping.verified_quantity)
    }
}

/// Сумма проверенного количества по позиции; записи других позиций не учитываются
pub fn verified_quantity(
    records: &[VerificationRecord],
    product_id: &str,
    mapping: &FieldMapping,
) -> i64 {
    lenient::sum_quantities(
        records
            .iter()
            .filter(|r| r.product_id == product_id)
            .map(|r| r.quantity(mapping)),
    )
}
