pub mod details;
pub mod list;
pub mod product_table;
