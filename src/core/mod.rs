//! Configuration and request-scoped domain types

pub mod config;
pub mod models;
