pub mod aggregate;
pub mod repository;
