//! Role configuration endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::role::{CreateRoleConfiguration, RoleConfigurationDetails, UpdateRoleConfiguration},
};

use super::AuthenticatedUser;

/// List role configurations
#[utoipa::path(
    get,
    path = "/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role configurations", body = Vec<RoleConfigurationDetails>),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn list_roles(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<RoleConfigurationDetails>>> {
    claims.require_admin()?;

    let roles = state.services.roles.list().await?;
    Ok(Json(roles))
}

/// Get role configuration by ID
#[utoipa::path(
    get,
    path = "/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Role configuration ID")
    ),
    responses(
        (status = 200, description = "Role configuration", body = RoleConfigurationDetails),
        (status = 404, description = "Role configuration not found")
    )
)]
pub async fn get_role(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RoleConfigurationDetails>> {
    claims.require_admin()?;

    let role = state.services.roles.get(id).await?;
    Ok(Json(role))
}

/// Create a role configuration
#[utoipa::path(
    post,
    path = "/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    request_body = CreateRoleConfiguration,
    responses(
        (status = 201, description = "Role configuration created", body = RoleConfigurationDetails),
        (status = 409, description = "Role name already exists")
    )
)]
pub async fn create_role(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateRoleConfiguration>,
) -> AppResult<(StatusCode, Json<RoleConfigurationDetails>)> {
    claims.require_admin()?;
    request.validate()?;

    let role = state.services.roles.create(&request).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// Update a role configuration; provided sets replace the stored ones
#[utoipa::path(
    put,
    path = "/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Role configuration ID")
    ),
    request_body = UpdateRoleConfiguration,
    responses(
        (status = 200, description = "Role configuration updated", body = RoleConfigurationDetails),
        (status = 404, description = "Role configuration not found")
    )
)]
pub async fn update_role(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRoleConfiguration>,
) -> AppResult<Json<RoleConfigurationDetails>> {
    claims.require_admin()?;

    let role = state.services.roles.update(id, &request).await?;
    Ok(Json(role))
}

/// Delete a role configuration
#[utoipa::path(
    delete,
    path = "/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Role configuration ID")
    ),
    responses(
        (status = 204, description = "Role configuration deleted"),
        (status = 404, description = "Role configuration not found")
    )
)]
pub async fn delete_role(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.roles.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
