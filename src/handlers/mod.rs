// src/handlers/mod.rs
pub mod calculator;
pub mod error;
pub mod history;
pub mod quotes;
pub mod strategies;
pub mod transactions;
