// src/views/mod.rs
pub mod query;
pub mod quota;
pub mod table;
pub mod treasury;
