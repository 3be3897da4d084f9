//! Переходное состояние навигации: список передаёт выбранный заказ странице деталей.

use crate::domain::a001_order::aggregate::Contact;
use crate::projections::p900_order_tree::{OrderView, ProductView};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Страница открыта без ожидаемого контекста
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Invalid Access: `{page}` was opened without a selected order")]
    InvalidAccess { page: String },
}

/// Снимок выбранного заказа, передаваемый на следующую страницу
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSelection {
    pub company_name: String,
    pub order_id: String,
    pub order_key: String,
    pub contact: Contact,
    pub products: Vec<ProductView>,
}

impl OrderSelection {
    /// Выбрать заказ целиком
    pub fn from_order(company_name: &str, order: &OrderView) -> Self {
        Self {
            company_name: company_name.to_string(),
            order_id: order.order_id.clone(),
            order_key: order.order_key.clone(),
            contact: order.contact.clone(),
            products: order.products.values().cloned().collect(),
        }
    }

    /// Выбрать только часть позиций заказа
    pub fn with_products(company_name: &str, order: &OrderView, product_ids: &[&str]) -> Self {
        let mut selection = Self::from_order(company_name, order);
        selection
            .products
            .retain(|p| product_ids.contains(&p.product_id.as_str()));
        selection
    }
}

/// Проверить, что страница получила контекст навигации
pub fn require_context<T>(state: Option<T>, page: &str) -> Result<T, AccessError> {
    state.ok_or_else(|| {
        log::warn!("Page `{}` opened without navigation context", page);
        AccessError::InvalidAccess {
            page: page.to_string(),
        }
    })
}
