// src/services/mod.rs
pub mod charts;
pub mod client;
pub mod error;
pub mod formatting;
pub mod quota;
pub mod treasury;
