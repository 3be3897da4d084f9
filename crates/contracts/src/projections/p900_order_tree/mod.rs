//! Дерево «компания → заказ → позиция» с производными количествами.
//!
//! Один построитель обслуживает все страницы: склад IML, остатки IML и
//! остатки шелкографии отличаются только [`profile::AggregationProfile`].

pub mod builder;
pub mod dto;
pub mod filter;
pub mod profile;

pub use builder::aggregate;
pub use dto::{OrderTotals, OrderTree, OrderView, ProductStatus, ProductView};
pub use filter::{FilterCriteria, FilterOptions};
pub use profile::AggregationProfile;
