// src/services/mod.rs
pub mod calculations;
pub mod format;
pub mod history;
pub mod quote_feed;
pub mod reference_data;
pub mod store;
