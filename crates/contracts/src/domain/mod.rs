pub mod a001_order;
pub mod a002_production_followup;
pub mod a003_label_receipt;
pub mod a004_verification;
pub mod a005_sales_billing;
pub mod a006_goods_return;
pub mod common;
