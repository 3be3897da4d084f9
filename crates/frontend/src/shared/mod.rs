pub mod components;
pub mod list_utils;
pub mod storage;
