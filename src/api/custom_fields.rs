//! Custom registration field endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::custom_field::{CreateCustomField, CustomField, UpdateCustomField},
};

use super::AuthenticatedUser;

/// List custom registration fields. Anonymous so the kiosk can render
/// the form without a session.
#[utoipa::path(
    get,
    path = "/custom-fields",
    tag = "custom-fields",
    responses(
        (status = 200, description = "Custom fields", body = Vec<CustomField>)
    )
)]
pub async fn list_custom_fields(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<CustomField>>> {
    let fields = state.services.custom_fields.list().await?;
    Ok(Json(fields))
}

/// Get custom field by ID
#[utoipa::path(
    get,
    path = "/custom-fields/{id}",
    tag = "custom-fields",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Custom field ID")
    ),
    responses(
        (status = 200, description = "Custom field", body = CustomField),
        (status = 404, description = "Custom field not found")
    )
)]
pub async fn get_custom_field(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<CustomField>> {
    claims.require_admin()?;

    let field = state.services.custom_fields.get(id).await?;
    Ok(Json(field))
}

/// Create a custom registration field
#[utoipa::path(
    post,
    path = "/custom-fields",
    tag = "custom-fields",
    security(("bearer_auth" = [])),
    request_body = CreateCustomField,
    responses(
        (status = 201, description = "Custom field created", body = CustomField),
        (status = 409, description = "Field name already exists")
    )
)]
pub async fn create_custom_field(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateCustomField>,
) -> AppResult<(StatusCode, Json<CustomField>)> {
    claims.require_admin()?;
    request.validate()?;

    let field = state.services.custom_fields.create(&request).await?;
    Ok((StatusCode::CREATED, Json(field)))
}

/// Update a custom field (the name key is immutable)
#[utoipa::path(
    put,
    path = "/custom-fields/{id}",
    tag = "custom-fields",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Custom field ID")
    ),
    request_body = UpdateCustomField,
    responses(
        (status = 200, description = "Custom field updated", body = CustomField),
        (status = 404, description = "Custom field not found")
    )
)]
pub async fn update_custom_field(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateCustomField>,
) -> AppResult<Json<CustomField>> {
    claims.require_admin()?;

    let field = state.services.custom_fields.update(id, &request).await?;
    Ok(Json(field))
}

/// Delete a custom field definition; captured visitor values are kept
#[utoipa::path(
    delete,
    path = "/custom-fields/{id}",
    tag = "custom-fields",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Custom field ID")
    ),
    responses(
        (status = 204, description = "Custom field deleted"),
        (status = 404, description = "Custom field not found")
    )
)]
pub async fn delete_custom_field(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.custom_fields.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
