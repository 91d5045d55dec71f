//! Visitor model and lifecycle types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Visitor lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VisitorStatus {
    AwaitingApproval,
    Approved,
    Rejected,
    CheckedIn,
    CheckedOut,
    Rescheduled,
}

impl VisitorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitorStatus::AwaitingApproval => "awaiting_approval",
            VisitorStatus::Approved => "approved",
            VisitorStatus::Rejected => "rejected",
            VisitorStatus::CheckedIn => "checked_in",
            VisitorStatus::CheckedOut => "checked_out",
            VisitorStatus::Rescheduled => "rescheduled",
        }
    }

    /// Check-in is only legal from Approved
    pub fn can_check_in(&self) -> bool {
        matches!(self, VisitorStatus::Approved)
    }

    /// Check-out is only legal from CheckedIn
    pub fn can_check_out(&self) -> bool {
        matches!(self, VisitorStatus::CheckedIn)
    }
}

impl std::fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VisitorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "awaiting_approval" => Ok(VisitorStatus::AwaitingApproval),
            "approved" => Ok(VisitorStatus::Approved),
            "rejected" => Ok(VisitorStatus::Rejected),
            "checked_in" => Ok(VisitorStatus::CheckedIn),
            "checked_out" => Ok(VisitorStatus::CheckedOut),
            "rescheduled" => Ok(VisitorStatus::Rescheduled),
            _ => Err(format!("Invalid visitor status: {}", s)),
        }
    }
}

// SQLx conversion for VisitorStatus (stored as text)
impl sqlx::Type<Postgres> for VisitorStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for VisitorStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for VisitorStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Full visitor record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Visitor {
    pub id: i32,
    pub location_id: i32,
    pub full_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub purpose_of_visit: String,
    pub whom_to_meet: String,
    pub scheduled_time: DateTime<Utc>,
    pub id_proof_type: Option<String>,
    pub id_proof_number: Option<String>,
    pub photo_url: Option<String>,
    pub status: VisitorStatus,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Visitor with custom field values for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VisitorDetails {
    #[serde(flatten)]
    pub visitor: Visitor,
    /// Name-keyed values for admin-defined form fields
    pub custom_fields: HashMap<String, String>,
}

/// Public registration request (kiosk)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVisitor {
    pub location_id: i32,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 4, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub company_name: Option<String>,
    #[validate(length(min = 1, message = "Purpose of visit is required"))]
    pub purpose_of_visit: String,
    #[validate(length(min = 1, message = "Whom to meet is required"))]
    pub whom_to_meet: String,
    pub scheduled_time: DateTime<Utc>,
    pub id_proof_type: Option<String>,
    pub id_proof_number: Option<String>,
    pub photo_url: Option<String>,
    /// Values for admin-defined form fields, keyed by field name
    #[serde(default)]
    pub custom_fields: HashMap<String, String>,
}

/// Status update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatus {
    pub status: VisitorStatus,
    pub notes: Option<String>,
}

/// Visitor list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct VisitorQuery {
    pub location_id: Option<i32>,
    /// Calendar date filter (visits scheduled on this day)
    pub date: Option<chrono::NaiveDate>,
    pub status: Option<VisitorStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Stats query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct StatsQuery {
    pub location_id: Option<i32>,
    pub from_date: Option<chrono::NaiveDate>,
    pub to_date: Option<chrono::NaiveDate>,
}

/// Summary counts over a filtered visitor set
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VisitorStats {
    pub total: i64,
    pub awaiting_approval: i64,
    /// Union of approved, checked-in and checked-out visitors
    pub approved: i64,
    pub checked_in: i64,
    pub checked_out: i64,
    pub rejected: i64,
    /// approved / total * 100, one decimal place, 0 when total is 0
    pub approval_rate: f64,
}

impl VisitorStats {
    /// Compute the approval rate, guarding against division by zero
    pub fn approval_rate(approved: i64, total: i64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        (approved as f64 / total as f64 * 1000.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            VisitorStatus::AwaitingApproval,
            VisitorStatus::Approved,
            VisitorStatus::Rejected,
            VisitorStatus::CheckedIn,
            VisitorStatus::CheckedOut,
            VisitorStatus::Rescheduled,
        ] {
            assert_eq!(status.as_str().parse::<VisitorStatus>(), Ok(status));
        }
        assert!("arrived".parse::<VisitorStatus>().is_err());
    }

    #[test]
    fn check_in_only_from_approved() {
        assert!(VisitorStatus::Approved.can_check_in());
        assert!(!VisitorStatus::AwaitingApproval.can_check_in());
        assert!(!VisitorStatus::CheckedIn.can_check_in());
        assert!(!VisitorStatus::Rejected.can_check_in());
        assert!(!VisitorStatus::CheckedOut.can_check_in());
        assert!(!VisitorStatus::Rescheduled.can_check_in());
    }

    #[test]
    fn check_out_only_from_checked_in() {
        assert!(VisitorStatus::CheckedIn.can_check_out());
        assert!(!VisitorStatus::Approved.can_check_out());
        assert!(!VisitorStatus::CheckedOut.can_check_out());
        assert!(!VisitorStatus::AwaitingApproval.can_check_out());
    }

    #[test]
    fn approval_rate_is_bounded_and_zero_safe() {
        assert_eq!(VisitorStats::approval_rate(0, 0), 0.0);
        assert_eq!(VisitorStats::approval_rate(1, 3), 33.3);
        assert_eq!(VisitorStats::approval_rate(2, 3), 66.7);
        assert_eq!(VisitorStats::approval_rate(10, 10), 100.0);
    }
}
