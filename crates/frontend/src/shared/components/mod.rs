pub mod invalid_access;
pub mod page_header;
