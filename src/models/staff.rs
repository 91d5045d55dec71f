//! Staff member model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A person visitors can name as "whom to meet", bound to one location.
/// Optionally linked to a login-capable user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StaffMember {
    pub id: i32,
    pub location_id: i32,
    pub display_name: String,
    pub email: String,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create staff member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStaffMember {
    pub location_id: i32,
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub user_id: Option<i32>,
}

/// Update staff member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStaffMember {
    pub display_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub user_id: Option<i32>,
}
