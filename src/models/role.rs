//! Dynamic role configuration: named role -> permission set + route set.
//! Pure data lookup, no dispatch through these rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A named role configuration row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RoleConfiguration {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role configuration with its permission and route sets attached
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleConfigurationDetails {
    #[serde(flatten)]
    pub configuration: RoleConfiguration,
    pub permissions: Vec<String>,
    pub routes: Vec<String>,
}

/// Create role configuration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoleConfiguration {
    #[validate(length(min = 1, message = "Role name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub routes: Vec<String>,
}

/// Update role configuration request. Permission/route sets, when present,
/// replace the stored sets wholesale.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleConfiguration {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub routes: Option<Vec<String>>,
}
