//! Admin-defined form field schema and per-visitor values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// An extensible registration form field defined by an admin
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CustomField {
    pub id: i32,
    /// Key used in the visitor custom field value map
    pub name: String,
    pub label: String,
    /// text, number, date or select
    pub field_type: String,
    pub required: bool,
    /// Choice list for select fields
    pub options: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single captured value, many per visitor
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VisitorCustomFieldValue {
    pub id: i32,
    pub visitor_id: i32,
    pub field_name: String,
    pub value: String,
}

/// Create custom field request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomField {
    #[validate(length(min = 1, message = "Field name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Field label is required"))]
    pub label: String,
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    pub options: Option<serde_json::Value>,
}

/// Update custom field request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCustomField {
    pub label: Option<String>,
    pub field_type: Option<String>,
    pub required: Option<bool>,
    pub options: Option<serde_json::Value>,
}
