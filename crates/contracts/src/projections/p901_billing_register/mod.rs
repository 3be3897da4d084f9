pub mod builder;
pub mod dto;

pub use builder::build_register;
pub use dto::BillingGroup;
