//! Общие типы и движок агрегации для дашборда заказов (IML и шелкография).
//!
//! Крейт не зависит от браузера: хранилище записей задаётся трейтом
//! [`shared::record_store::RecordStore`], а frontend подставляет реализацию
//! поверх localStorage.

pub mod domain;
pub mod projections;
pub mod shared;
