use crate::domain::a001_order::aggregate::{Contact, Order};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Статус позиции или заказа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    #[serde(rename = "In Production")]
    InProduction,
    #[serde(rename = "Complete")]
    Complete,
}

impl ProductStatus {
    /// Complete, когда остаток равен нулю
    pub fn from_remaining(remaining: i64) -> Self {
        if remaining == 0 {
            ProductStatus::Complete
        } else {
            ProductStatus::InProduction
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::InProduction => "In Production",
            ProductStatus::Complete => "Complete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "In Production" => Some(ProductStatus::InProduction),
            "Complete" => Some(ProductStatus::Complete),
            _ => None,
        }
    }

    pub fn all() -> [ProductStatus; 2] {
        [ProductStatus::InProduction, ProductStatus::Complete]
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Позиция заказа с производными количествами
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    pub product_id: String,
    pub name: String,
    pub category: Option<String>,
    pub size: Option<String>,
    pub order_quantity: i64,
    /// Принято в производстве (для шелкографии: возвращено)
    pub produced: i64,
    pub received_labels: i64,
    pub used_labels: i64,
    pub remaining_labels: i64,
    pub verified: i64,
    /// Произведено, но ещё не проверено
    pub remaining_quantity: i64,
    /// На складе: проверенное количество
    pub in_stock: i64,
    pub status: ProductStatus,
    /// Complete, когда этикетки израсходованы полностью
    pub label_status: ProductStatus,
}

/// Итоги по заказу (или по группе заказов)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub total_produced: i64,
    pub total_stock: i64,
    pub total_remaining: i64,
}

impl AddAssign for OrderTotals {
    fn add_assign(&mut self, other: Self) {
        self.total_produced = self.total_produced.saturating_add(other.total_produced);
        self.total_stock = self.total_stock.saturating_add(other.total_stock);
        self.total_remaining = self.total_remaining.saturating_add(other.total_remaining);
    }
}

impl OrderTotals {
    pub fn of_products<'a, I>(products: I) -> Self
    where
        I: IntoIterator<Item = &'a ProductView>,
    {
        let mut totals = Self::default();
        for p in products {
            totals += Self {
                total_produced: p.produced,
                total_stock: p.in_stock,
                total_remaining: p.remaining_quantity,
            };
        }
        totals
    }
}

/// Заказ в дереве
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: String,
    /// Ключ в дереве: номер заказа или id, если номера нет
    pub order_key: String,
    pub contact: Contact,
    pub products: IndexMap<String, ProductView>,
    pub totals: OrderTotals,
    pub status: ProductStatus,
}

impl OrderView {
    /// Собрать заказ из отобранных позиций и посчитать итоги
    pub fn new(order: &Order, products: IndexMap<String, ProductView>) -> Self {
        let totals = OrderTotals::of_products(products.values());
        let status = if products
            .values()
            .any(|p| p.status == ProductStatus::InProduction)
        {
            ProductStatus::InProduction
        } else {
            ProductStatus::Complete
        };
        Self {
            order_id: order.id.clone(),
            order_key: order.order_key().to_string(),
            contact: order.contact.clone(),
            products,
            totals,
            status,
        }
    }

    pub fn contact_name(&self) -> Option<&str> {
        self.contact.contact_name.as_deref()
    }
}

/// Дерево «компания → номер заказа → заказ» в порядке первого появления
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTree {
    pub companies: IndexMap<String, IndexMap<String, OrderView>>,
}

impl OrderTree {
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn company_count(&self) -> usize {
        self.companies.len()
    }

    pub fn order_count(&self) -> usize {
        self.companies.values().map(IndexMap::len).sum()
    }

    /// Все заказы с названием компании, в порядке дерева
    pub fn orders(&self) -> impl Iterator<Item = (&str, &OrderView)> + '_ {
        self.companies
            .iter()
            .flat_map(|(company, orders)| orders.values().map(move |o| (company.as_str(), o)))
    }

    pub fn find_order(&self, company: &str, order_key: &str) -> Option<&OrderView> {
        self.companies.get(company)?.get(order_key)
    }

    /// Вставить заказ; при повторе ключа остаётся первый. Возвращает `true`, если вставлен.
    pub fn insert(&mut self, company: &str, order: OrderView) -> bool {
        let orders = self.companies.entry(company.to_string()).or_default();
        if orders.contains_key(&order.order_key) {
            return false;
        }
        orders.insert(order.order_key.clone(), order);
        true
    }

    pub fn company_totals(&self, company: &str) -> OrderTotals {
        let mut totals = OrderTotals::default();
        if let Some(orders) = self.companies.get(company) {
            for order in orders.values() {
                totals += order.totals;
            }
        }
        totals
    }

    pub fn grand_totals(&self) -> OrderTotals {
        let mut totals = OrderTotals::default();
        for (_, order) in self.orders() {
            totals += order.totals;
        }
        totals
    }
}
