//! Authentication endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{Role, User},
};

use super::AuthenticatedUser;

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Authenticated user info returned to the frontend
#[derive(Serialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role: Role,
    pub location_id: Option<i32>,
    /// Permission slugs from the user's role configuration
    pub permissions: Vec<String>,
    /// Frontend routes the role may navigate to
    pub routes: Vec<String>,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Build the user info payload, resolving the role configuration by id
/// first and by role name as a fallback
async fn user_info(state: &crate::AppState, user: User) -> AppResult<UserInfo> {
    let configuration = match user.role_configuration_id {
        Some(id) => state.services.roles.get(id).await.ok(),
        None => None,
    };
    let configuration = match configuration {
        Some(details) => Some(details),
        None => state
            .services
            .roles
            .find_by_name(user.role.as_str())
            .await?,
    };

    let (permissions, routes) = configuration
        .map(|details| (details.permissions, details.routes))
        .unwrap_or_default();

    Ok(UserInfo {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
        email: user.email,
        role: user.role,
        location_id: user.location_id,
        permissions,
        routes,
    })
}

/// Authenticate with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state
        .services
        .users
        .authenticate(&request.username, &request.password)
        .await?;

    let user = user_info(&state, user).await?;

    Ok(Json(LoginResponse { token, user }))
}

/// Get the current authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserInfo>> {
    let user = state.services.users.get(claims.user_id).await?;
    let user = user_info(&state, user).await?;
    Ok(Json(user))
}
