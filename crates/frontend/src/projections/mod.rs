pub mod p900_order_tree;
pub mod p901_billing_register;
pub mod p902_returns_register;
