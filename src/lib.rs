// src/lib.rs

pub mod config;
pub mod models;
pub mod services;
pub mod views;

pub use config::DashboardConfig;
pub use services::client::ApiClient;
pub use services::error::ApiError;
