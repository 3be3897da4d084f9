use crate::domain::a004_verification::aggregate::VerificationTarget;
use crate::domain::common::WorkflowDomain;
use serde::{Deserialize, Serialize};

/// Откуда берётся «произведённое» количество
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplySource {
    /// Журнал выпуска (`acceptedComponents`)
    Production,
    /// Возвраты товара
    GoodsReturned,
}

/// Откуда берётся проверенное количество
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationSource {
    Inventory,
    Stocks,
}

/// Какие позиции заказа попадают в представление
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetainRule {
    /// Передана в закупку и есть хотя бы одна запись выпуска
    MovedToPurchaseWithSupply,
    /// Есть хотя бы одна запись проверки
    HasVerification,
    /// Есть выпуск/возврат или проверка
    HasAnyActivity,
}

/// Настройка общего построителя дерева под конкретную страницу
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationProfile {
    pub name: String,
    pub domain: WorkflowDomain,
    pub supply: SupplySource,
    pub verification: VerificationSource,
    /// Учитывать приход этикеток (только IML)
    pub use_label_receipts: bool,
    pub retain: RetainRule,
}

impl AggregationProfile {
    /// Склад IML: позиции, переданные в закупку и уже выпускавшиеся
    pub fn iml_inventory() -> Self {
        Self {
            name: "iml_inventory".to_string(),
            domain: WorkflowDomain::Iml,
            supply: SupplySource::Production,
            verification: VerificationSource::Inventory,
            use_label_receipts: true,
            retain: RetainRule::MovedToPurchaseWithSupply,
        }
    }

    /// Остатки IML: позиции с проверенным количеством
    pub fn iml_stocks() -> Self {
        Self {
            name: "iml_stocks".to_string(),
            domain: WorkflowDomain::Iml,
            supply: SupplySource::Production,
            verification: VerificationSource::Inventory,
            use_label_receipts: false,
            retain: RetainRule::HasVerification,
        }
    }

    /// Остатки шелкографии: возвраты и их проверка
    pub fn screen_printing_stocks() -> Self {
        Self {
            name: "screen_printing_stocks".to_string(),
            domain: WorkflowDomain::ScreenPrinting,
            supply: SupplySource::GoodsReturned,
            verification: VerificationSource::Stocks,
            use_label_receipts: false,
            retain: RetainRule::HasAnyActivity,
        }
    }

    /// Коллекция, куда пишутся проверки со страницы этого профиля
    pub fn verification_target(&self) -> VerificationTarget {
        match self.verification {
            VerificationSource::Inventory => VerificationTarget::Inventory,
            VerificationSource::Stocks => VerificationTarget::Stocks,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::iml_inventory(),
            Self::iml_stocks(),
            Self::screen_printing_stocks(),
        ]
    }
}
