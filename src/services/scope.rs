//! Location-scoped access filter.
//!
//! Every visitor read or mutation first resolves the caller's scope: admins
//! see all locations, everyone else is pinned to exactly one location id.

use crate::{
    error::{AppError, AppResult},
    models::{user::UserClaims, visitor::Visitor},
    repository::Repository,
};

/// The set of location ids a caller may touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Admin: unrestricted
    All,
    /// Pinned to a single location
    Location(i32),
}

impl Scope {
    /// Combine the resolved scope with an explicitly requested location
    /// filter. Non-admins asking for a different location than their own
    /// get Forbidden, never silently-empty results.
    pub fn effective_location(&self, requested: Option<i32>) -> AppResult<Option<i32>> {
        match (self, requested) {
            (Scope::All, requested) => Ok(requested),
            (Scope::Location(own), Some(requested)) if *own != requested => Err(
                AppError::Forbidden(format!("Not authorized for location {}", requested)),
            ),
            (Scope::Location(own), _) => Ok(Some(*own)),
        }
    }

    /// Per-visitor recheck applied before any mutation
    pub fn ensure_visitor(&self, visitor: &Visitor) -> AppResult<()> {
        match self {
            Scope::All => Ok(()),
            Scope::Location(own) if *own == visitor.location_id => Ok(()),
            Scope::Location(_) => Err(AppError::Forbidden(format!(
                "Visitor {} belongs to another location",
                visitor.id
            ))),
        }
    }
}

#[derive(Clone)]
pub struct ScopeService {
    repository: Repository,
}

impl ScopeService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Resolve the caller's scope. Non-admin locations come from the staff
    /// record by user id, then by email, then from the token claim; a
    /// caller with no resolvable location is denied outright.
    pub async fn resolve(&self, claims: &UserClaims) -> AppResult<Scope> {
        if claims.is_admin() {
            return Ok(Scope::All);
        }

        if let Some(staff) = self.repository.staff.find_by_user_id(claims.user_id).await? {
            return Ok(Scope::Location(staff.location_id));
        }

        if let Some(ref email) = claims.email {
            if let Some(staff) = self.repository.staff.find_by_email(email).await? {
                return Ok(Scope::Location(staff.location_id));
            }
        }

        if let Some(location_id) = claims.location_id {
            return Ok(Scope::Location(location_id));
        }

        Err(AppError::AccessDenied(
            "No location is assigned to this account".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::visitor::VisitorStatus;
    use chrono::Utc;

    fn visitor_at(location_id: i32) -> Visitor {
        let now = Utc::now();
        Visitor {
            id: 1,
            location_id,
            full_name: "Jane Doe".into(),
            phone_number: "+15551234567".into(),
            email: None,
            company_name: None,
            purpose_of_visit: "Interview".into(),
            whom_to_meet: "Bob".into(),
            scheduled_time: now,
            id_proof_type: None,
            id_proof_number: None,
            photo_url: None,
            status: VisitorStatus::AwaitingApproval,
            approved_by: None,
            approved_at: None,
            check_in_time: None,
            check_out_time: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn admin_scope_passes_requested_filter_through() {
        assert_eq!(Scope::All.effective_location(None).unwrap(), None);
        assert_eq!(Scope::All.effective_location(Some(7)).unwrap(), Some(7));
    }

    #[test]
    fn pinned_scope_rejects_conflicting_filter() {
        let scope = Scope::Location(5);
        assert_eq!(scope.effective_location(None).unwrap(), Some(5));
        assert_eq!(scope.effective_location(Some(5)).unwrap(), Some(5));
        assert!(matches!(
            scope.effective_location(Some(7)),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn per_visitor_recheck_matches_location() {
        assert!(Scope::All.ensure_visitor(&visitor_at(9)).is_ok());
        assert!(Scope::Location(9).ensure_visitor(&visitor_at(9)).is_ok());
        assert!(matches!(
            Scope::Location(3).ensure_visitor(&visitor_at(9)),
            Err(AppError::Forbidden(_))
        ));
    }
}
