use crate::domain::a001_order::aggregate::Order;
use crate::domain::common::lenient;
use crate::shared::error::ValidationError;
use crate::shared::recency::{self, Activity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Статус новой записи биллинга, если форма его не передала
pub const DEFAULT_BILLING_STATUS: &str = "Pending";

/// Статусы, которые предлагает форма оплаты
pub const BILLING_STATUSES: [&str; 3] = ["Pending", "Partially Paid", "Paid"];

/// Запись биллинга (оплата по заказу)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    #[serde(alias = "billingId", deserialize_with = "lenient::id")]
    pub id: String,

    #[serde(deserialize_with = "lenient::id")]
    pub order_id: String,

    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub order_number: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub company_name: Option<String>,

    /// Снимок позиций на момент выставления счёта
    #[serde(default)]
    pub products: Vec<Value>,

    /// Оценочная стоимость заказа
    #[serde(default, alias = "estimatedAmount", deserialize_with = "lenient::amount")]
    pub estimated_value: f64,

    /// Сумма этой оплаты
    #[serde(
        default,
        alias = "paidAmount",
        alias = "billingAmount",
        deserialize_with = "lenient::amount"
    )]
    pub amount: f64,

    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub created_at: Option<String>,

    /// Дата оплаты, если `createdAt` не записан
    #[serde(
        default,
        alias = "paymentDate",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub billing_date: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Activity for BillingRecord {
    fn latest_activity(&self) -> DateTime<Utc> {
        recency::activity_timestamp(self.created_at.as_deref(), self.billing_date.as_deref())
    }
}

/// Данные формы оплаты до проверки
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingDraft {
    pub order_id: String,
    pub order_number: Option<String>,
    pub company_name: Option<String>,
    pub products: Vec<Value>,
    pub estimated_value: f64,
    pub amount: f64,
    pub status: Option<String>,
}

impl BillingDraft {
    /// Форма оплаты, заполненная данными заказа
    pub fn for_order(order: &Order, amount: f64, status: Option<String>) -> Self {
        let products = order
            .products
            .iter()
            .filter_map(|p| serde_json::to_value(p).ok())
            .collect();
        Self {
            order_id: order.id.clone(),
            order_number: order.order_number.clone(),
            company_name: Some(order.company_name().to_string()),
            products,
            estimated_value: order.estimated_total(),
            amount,
            status,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.order_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("orderId"));
        }
        // NaN тоже не проходит
        if !(self.amount > 0.0) || !self.amount.is_finite() {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }

    /// Новая запись с уникальным id и текущим временем
    pub fn into_record(self) -> BillingRecord {
        BillingRecord {
            id: Uuid::new_v4().to_string(),
            order_id: self.order_id,
            order_number: self.order_number,
            company_name: self.company_name,
            products: self.products,
            estimated_value: self.estimated_value,
            amount: self.amount,
            status: Some(
                self.status
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_BILLING_STATUS.to_string()),
            ),
            created_at: Some(recency::now_timestamp()),
            billing_date: None,
            fields: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(amount: f64) -> BillingDraft {
        BillingDraft {
            order_id: "o1".to_string(),
            amount,
            ..Default::default()
        }
    }

    #[test]
    fn test_amount_must_be_positive() {
        assert!(draft(10.0).validate().is_ok());
        assert_eq!(draft(0.0).validate(), Err(ValidationError::NonPositiveAmount(0.0)));
        assert_eq!(
            draft(-5.0).validate(),
            Err(ValidationError::NonPositiveAmount(-5.0))
        );
        assert!(draft(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_record_accepts_legacy_field_names() {
        let record: BillingRecord = serde_json::from_value(json!({
            "billingId": 77,
            "orderId": "o1",
            "companyName": "Acme",
            "estimatedAmount": "12000",
            "paidAmount": 5000,
            "paymentDate": "2024-02-01"
        }))
        .unwrap();
        assert_eq!(record.id, "77");
        assert_eq!(record.estimated_value, 12000.0);
        assert_eq!(record.amount, 5000.0);
        assert_eq!(
            record.latest_activity(),
            recency::parse_timestamp("2024-02-01").unwrap()
        );
    }

    #[test]
    fn test_draft_for_order_copies_order_details() {
        let order: Order = serde_json::from_value(json!({
            "id": "o1",
            "orderNumber": "IML-1",
            "contact": {"company": "Acme"},
            "products": [{"id": "p1", "imlName": "Lid"}],
            "orderEstimate": "7500"
        }))
        .unwrap();
        let draft = BillingDraft::for_order(&order, 1000.0, Some("Paid".to_string()));
        assert_eq!(draft.company_name.as_deref(), Some("Acme"));
        assert_eq!(draft.order_number.as_deref(), Some("IML-1"));
        assert_eq!(draft.estimated_value, 7500.0);
        assert_eq!(draft.products.len(), 1);
        assert_eq!(draft.products[0]["imlName"], "Lid");
    }

    #[test]
    fn test_into_record_fills_defaults() {
        let record = draft(10.0).into_record();
        assert_eq!(record.status.as_deref(), Some(DEFAULT_BILLING_STATUS));
        assert!(record.created_at.is_some());
        assert!(!record.id.is_empty());
    }
}
