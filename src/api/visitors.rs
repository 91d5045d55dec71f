//! Visitor lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppResult,
    models::visitor::{
        CreateVisitor, StatsQuery, UpdateStatus, Visitor, VisitorDetails, VisitorQuery,
        VisitorStats,
    },
};

use super::AuthenticatedUser;

/// Approval link query string
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ApproveQuery {
    pub token: String,
}

/// Today listing query string
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct TodayQuery {
    pub location_id: Option<i32>,
}

/// Register a visitor from the public kiosk
#[utoipa::path(
    post,
    path = "/visitors",
    tag = "visitors",
    request_body = CreateVisitor,
    responses(
        (status = 201, description = "Visitor registered awaiting approval", body = Visitor),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Unknown location")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateVisitor>,
) -> AppResult<(StatusCode, Json<Visitor>)> {
    request.validate()?;

    let visitor = state.services.visitors.register(request).await?;
    Ok((StatusCode::CREATED, Json(visitor)))
}

/// List visitors within the caller's location scope
#[utoipa::path(
    get,
    path = "/visitors",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(VisitorQuery),
    responses(
        (status = 200, description = "Visitors", body = Vec<Visitor>),
        (status = 403, description = "Location outside caller's scope")
    )
)]
pub async fn list_visitors(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<VisitorQuery>,
) -> AppResult<Json<Vec<Visitor>>> {
    let scope = state.services.scope.resolve(&claims).await?;
    let visitors = state.services.visitors.list(&query, scope).await?;
    Ok(Json(visitors))
}

/// List visits scheduled today
#[utoipa::path(
    get,
    path = "/visitors/today",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(TodayQuery),
    responses(
        (status = 200, description = "Today's visitors", body = Vec<Visitor>)
    )
)]
pub async fn list_today(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<TodayQuery>,
) -> AppResult<Json<Vec<Visitor>>> {
    let scope = state.services.scope.resolve(&claims).await?;
    let visitors = state
        .services
        .visitors
        .list_today(query.location_id, scope)
        .await?;
    Ok(Json(visitors))
}

/// Visitor summary statistics
#[utoipa::path(
    get,
    path = "/visitors/stats",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(StatsQuery),
    responses(
        (status = 200, description = "Summary counts", body = VisitorStats)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<VisitorStats>> {
    let scope = state.services.scope.resolve(&claims).await?;
    let stats = state.services.visitors.stats(&query, scope).await?;
    Ok(Json(stats))
}

/// Get a visitor with custom field values
#[utoipa::path(
    get,
    path = "/visitors/{id}",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Visitor ID")
    ),
    responses(
        (status = 200, description = "Visitor details", body = VisitorDetails),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn get_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<VisitorDetails>> {
    let scope = state.services.scope.resolve(&claims).await?;
    let details = state.services.visitors.get_details(id, scope).await?;
    Ok(Json(details))
}

/// Update a visitor's status (approve, reject, reschedule)
#[utoipa::path(
    put,
    path = "/visitors/{id}/status",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Visitor ID")
    ),
    request_body = UpdateStatus,
    responses(
        (status = 200, description = "Status updated", body = Visitor),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn update_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatus>,
) -> AppResult<Json<Visitor>> {
    let scope = state.services.scope.resolve(&claims).await?;

    // Approvals record the acting user's display name; if the account row
    // cannot be fetched the token subject still attributes the action
    let actor = match state.services.users.get(claims.user_id).await {
        Ok(user) => user.display_name,
        Err(_) => claims.sub.clone(),
    };

    let visitor = state
        .services
        .visitors
        .update_status(
            id,
            request.status,
            Some(&actor),
            request.notes.as_deref(),
            scope,
        )
        .await?;
    Ok(Json(visitor))
}

/// Check a visitor in at the front desk
#[utoipa::path(
    post,
    path = "/visitors/{id}/checkin",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Visitor ID")
    ),
    responses(
        (status = 200, description = "Visitor checked in", body = Visitor),
        (status = 404, description = "Visitor not found"),
        (status = 409, description = "Visitor is not in an approved state")
    )
)]
pub async fn check_in(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Visitor>> {
    claims.require_reception()?;

    let scope = state.services.scope.resolve(&claims).await?;
    let visitor = state.services.visitors.check_in(id, scope).await?;
    Ok(Json(visitor))
}

/// Check a visitor out
#[utoipa::path(
    post,
    path = "/visitors/{id}/checkout",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Visitor ID")
    ),
    responses(
        (status = 200, description = "Visitor checked out", body = Visitor),
        (status = 404, description = "Visitor not found"),
        (status = 409, description = "Visitor is not checked in")
    )
)]
pub async fn check_out(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Visitor>> {
    claims.require_reception()?;

    let scope = state.services.scope.resolve(&claims).await?;
    let visitor = state.services.visitors.check_out(id, scope).await?;
    Ok(Json(visitor))
}

/// One-click approval from an email link
#[utoipa::path(
    get,
    path = "/visitors/{id}/approve",
    tag = "visitors",
    params(
        ("id" = i32, Path, description = "Visitor ID"),
        ApproveQuery
    ),
    responses(
        (status = 303, description = "Approved, redirecting to confirmation page"),
        (status = 400, description = "Invalid or mismatched token"),
        (status = 404, description = "Visitor or staff member not found"),
        (status = 410, description = "Approval link has expired")
    )
)]
pub async fn approve(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<ApproveQuery>,
) -> AppResult<Redirect> {
    state
        .services
        .visitors
        .approve_with_token(id, &query.token)
        .await?;

    let confirmation = format!("{}/approval-confirmed", state.config.server.public_url);
    Ok(Redirect::to(&confirmation))
}

/// Delete a visitor record
#[utoipa::path(
    delete,
    path = "/visitors/{id}",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Visitor ID")
    ),
    responses(
        (status = 204, description = "Visitor deleted"),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn delete_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.visitors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
