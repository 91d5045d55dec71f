//! Visitor workflow service: registration, status transitions, statistics

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::visitor::{
        CreateVisitor, StatsQuery, Visitor, VisitorDetails, VisitorQuery, VisitorStats,
        VisitorStatus,
    },
    repository::{visitors::VisitorFilter, Repository},
    services::{
        approval::ApprovalTokenCodec, notifications::NotificationDispatcher, scope::Scope,
    },
};

const DEFAULT_PER_PAGE: i64 = 50;

#[derive(Clone)]
pub struct VisitorsService {
    repository: Repository,
    notifications: NotificationDispatcher,
    codec: ApprovalTokenCodec,
    public_url: String,
}

impl VisitorsService {
    pub fn new(
        repository: Repository,
        notifications: NotificationDispatcher,
        codec: ApprovalTokenCodec,
        public_url: String,
    ) -> Self {
        Self {
            repository,
            notifications,
            codec,
            public_url,
        }
    }

    /// Register a visitor from the public kiosk. The record always starts
    /// awaiting approval; if the named host resolves to a staff member an
    /// approval link is mailed out.
    pub async fn register(&self, request: CreateVisitor) -> AppResult<Visitor> {
        // Reject registrations against unknown locations up front
        self.repository.locations.get_by_id(request.location_id).await?;

        let visitor = self.repository.visitors.create(&request).await?;

        match self
            .repository
            .staff
            .find_by_name_at_location(visitor.location_id, &visitor.whom_to_meet)
            .await?
        {
            Some(staff) => {
                let token = self.codec.issue(visitor.id, &staff.email, Utc::now());
                let approve_url = format!(
                    "{}/api/v1/visitors/{}/approve?token={}",
                    self.public_url, visitor.id, token
                );
                self.notifications.approval_requested(
                    &visitor,
                    &staff.email,
                    &approve_url,
                    self.codec.ttl_days(),
                );
            }
            None => {
                tracing::debug!(
                    "No staff member named '{}' at location {}, skipping approval email",
                    visitor.whom_to_meet,
                    visitor.location_id
                );
            }
        }

        Ok(visitor)
    }

    /// Get a visitor with custom field values, inside the caller's scope
    pub async fn get_details(&self, id: i32, scope: Scope) -> AppResult<VisitorDetails> {
        let details = self.repository.visitors.get_details(id).await?;
        scope.ensure_visitor(&details.visitor)?;
        Ok(details)
    }

    /// List visitors, silently constrained to the caller's scope
    pub async fn list(&self, query: &VisitorQuery, scope: Scope) -> AppResult<Vec<Visitor>> {
        let filter = VisitorFilter {
            location_id: scope.effective_location(query.location_id)?,
            date: query.date,
            status: query.status,
            ..Default::default()
        };
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, 200);
        self.repository.visitors.list(&filter, page, per_page).await
    }

    /// Convenience listing for visits scheduled today
    pub async fn list_today(&self, location_id: Option<i32>, scope: Scope) -> AppResult<Vec<Visitor>> {
        let filter = VisitorFilter {
            location_id: scope.effective_location(location_id)?,
            date: Some(Utc::now().date_naive()),
            ..Default::default()
        };
        self.repository.visitors.list(&filter, 1, 500).await
    }

    /// Apply a requested status change. The general path is deliberately
    /// unguarded; only approval side effects are computed here. The write
    /// is a single UPDATE, so it lands entirely or not at all.
    pub async fn update_status(
        &self,
        id: i32,
        status: VisitorStatus,
        actor: Option<&str>,
        notes: Option<&str>,
        scope: Scope,
    ) -> AppResult<Visitor> {
        let visitor = self.repository.visitors.get_by_id(id).await?;
        scope.ensure_visitor(&visitor)?;

        let (approved_by, approved_at) = match (status, actor) {
            (VisitorStatus::Approved, Some(actor)) if !actor.trim().is_empty() => {
                (Some(actor), Some(Utc::now()))
            }
            _ => (None, None),
        };

        let updated = self
            .repository
            .visitors
            .update_status(id, status, approved_by, approved_at, notes)
            .await?;

        self.notifications.status_changed(&updated);

        Ok(updated)
    }

    /// Check a visitor in at the desk; legal only from Approved
    pub async fn check_in(&self, id: i32, scope: Scope) -> AppResult<Visitor> {
        let visitor = self.repository.visitors.get_by_id(id).await?;
        scope.ensure_visitor(&visitor)?;

        self.repository
            .visitors
            .check_in(id)
            .await?
            .ok_or_else(|| {
                AppError::InvalidTransition(format!(
                    "Cannot check in visitor {} from status {}",
                    id, visitor.status
                ))
            })
    }

    /// Check a visitor out; legal only from CheckedIn
    pub async fn check_out(&self, id: i32, scope: Scope) -> AppResult<Visitor> {
        let visitor = self.repository.visitors.get_by_id(id).await?;
        scope.ensure_visitor(&visitor)?;

        self.repository
            .visitors
            .check_out(id)
            .await?
            .ok_or_else(|| {
                AppError::InvalidTransition(format!(
                    "Cannot check out visitor {} from status {}",
                    id, visitor.status
                ))
            })
    }

    /// One-click approval from an email link. The token is the capability;
    /// no session or scope applies. Validation order: signature/shape,
    /// visitor id, expiry, then staff resolution.
    pub async fn approve_with_token(&self, visitor_id: i32, token: &str) -> AppResult<Visitor> {
        let claim = self.codec.validate(token, visitor_id, Utc::now())?;

        let staff = self
            .repository
            .staff
            .find_by_email(&claim.staff_email)
            .await?
            .ok_or_else(|| AppError::UnknownStaff(claim.staff_email.clone()))?;

        let visitor = self.repository.visitors.get_by_id(visitor_id).await?;

        let updated = self
            .repository
            .visitors
            .update_status(
                visitor.id,
                VisitorStatus::Approved,
                Some(&staff.display_name),
                Some(Utc::now()),
                None,
            )
            .await?;

        self.notifications.status_changed(&updated);

        Ok(updated)
    }

    /// Delete a visitor (admin only, enforced at the handler)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.visitors.delete(id).await
    }

    /// Summary counts over the scoped, optionally date-bounded visitor set
    pub async fn stats(&self, query: &StatsQuery, scope: Scope) -> AppResult<VisitorStats> {
        let filter = VisitorFilter {
            location_id: scope.effective_location(query.location_id)?,
            from_date: query.from_date,
            to_date: query.to_date,
            ..Default::default()
        };
        self.repository.visitors.stats(&filter).await
    }
}
