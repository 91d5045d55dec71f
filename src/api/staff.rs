//! Staff member endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppResult,
    models::staff::{CreateStaffMember, StaffMember, UpdateStaffMember},
};

use super::AuthenticatedUser;

/// Staff list query string
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct StaffQuery {
    pub location_id: Option<i32>,
}

/// Kiosk staff picker query string
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PublicStaffQuery {
    pub location_id: i32,
}

/// List staff members within the caller's scope
#[utoipa::path(
    get,
    path = "/staff",
    tag = "staff",
    security(("bearer_auth" = [])),
    params(StaffQuery),
    responses(
        (status = 200, description = "Staff members", body = Vec<StaffMember>),
        (status = 403, description = "Location outside caller's scope")
    )
)]
pub async fn list_staff(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<StaffQuery>,
) -> AppResult<Json<Vec<StaffMember>>> {
    let scope = state.services.scope.resolve(&claims).await?;
    let staff = state.services.staff.list(query.location_id, scope).await?;
    Ok(Json(staff))
}

/// Kiosk picker: staff names at one location, no auth required
#[utoipa::path(
    get,
    path = "/staff/public",
    tag = "staff",
    params(PublicStaffQuery),
    responses(
        (status = 200, description = "Staff members at the location", body = Vec<StaffMember>),
        (status = 404, description = "Location not found")
    )
)]
pub async fn list_staff_public(
    State(state): State<crate::AppState>,
    Query(query): Query<PublicStaffQuery>,
) -> AppResult<Json<Vec<StaffMember>>> {
    let staff = state.services.staff.list_public(query.location_id).await?;
    Ok(Json(staff))
}

/// Get staff member by ID
#[utoipa::path(
    get,
    path = "/staff/{id}",
    tag = "staff",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Staff member ID")
    ),
    responses(
        (status = 200, description = "Staff member", body = StaffMember),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn get_staff_member(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StaffMember>> {
    let member = state.services.staff.get(id).await?;
    Ok(Json(member))
}

/// Create a staff member
#[utoipa::path(
    post,
    path = "/staff",
    tag = "staff",
    security(("bearer_auth" = [])),
    request_body = CreateStaffMember,
    responses(
        (status = 201, description = "Staff member created", body = StaffMember),
        (status = 404, description = "Location not found"),
        (status = 409, description = "Staff member already exists at this location")
    )
)]
pub async fn create_staff_member(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateStaffMember>,
) -> AppResult<(StatusCode, Json<StaffMember>)> {
    claims.require_admin()?;
    request.validate()?;

    let member = state.services.staff.create(&request).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// Update a staff member
#[utoipa::path(
    put,
    path = "/staff/{id}",
    tag = "staff",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Staff member ID")
    ),
    request_body = UpdateStaffMember,
    responses(
        (status = 200, description = "Staff member updated", body = StaffMember),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn update_staff_member(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStaffMember>,
) -> AppResult<Json<StaffMember>> {
    claims.require_admin()?;
    request.validate()?;

    let member = state.services.staff.update(id, &request).await?;
    Ok(Json(member))
}

/// Delete a staff member
#[utoipa::path(
    delete,
    path = "/staff/{id}",
    tag = "staff",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Staff member ID")
    ),
    responses(
        (status = 204, description = "Staff member deleted"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn delete_staff_member(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.staff.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
