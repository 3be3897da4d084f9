pub mod config;
pub mod error;
pub mod field_mapping;
pub mod navigation;
pub mod recency;
pub mod record_store;
pub mod snapshot;
pub mod view_state;
