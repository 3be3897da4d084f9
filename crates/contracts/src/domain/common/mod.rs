//! Общие типы для всех хранимых записей

pub mod lenient;
pub mod product_key;
pub mod workflow;

// Re-exports
pub use product_key::ProductKey;
pub use workflow::WorkflowDomain;

/// Название компании, если в заказе оно не заполнено
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
