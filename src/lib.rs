//! Frontdesk Visitor Management System
//!
//! A Rust REST API server for multi-tenant visitor check-in and approval:
//! kiosk self-registration, staff approval via dashboard or one-click email
//! links, reception check-in/check-out, and admin configuration of
//! locations, staff, roles, and custom form fields.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
