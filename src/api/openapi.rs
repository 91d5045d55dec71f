//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, custom_fields, health, locations, roles, staff, users, visitors};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Frontdesk API",
        version = "1.0.0",
        description = "Visitor check-in and approval REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Visitors
        visitors::register,
        visitors::list_visitors,
        visitors::list_today,
        visitors::get_stats,
        visitors::get_visitor,
        visitors::update_status,
        visitors::check_in,
        visitors::check_out,
        visitors::approve,
        visitors::delete_visitor,
        // Locations
        locations::list_locations,
        locations::get_location,
        locations::get_location_by_slug,
        locations::create_location,
        locations::update_location,
        locations::delete_location,
        // Staff
        staff::list_staff,
        staff::list_staff_public,
        staff::get_staff_member,
        staff::create_staff_member,
        staff::update_staff_member,
        staff::delete_staff_member,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Roles
        roles::list_roles,
        roles::get_role,
        roles::create_role,
        roles::update_role,
        roles::delete_role,
        // Custom fields
        custom_fields::list_custom_fields,
        custom_fields::get_custom_field,
        custom_fields::create_custom_field,
        custom_fields::update_custom_field,
        custom_fields::delete_custom_field,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Visitors
            crate::models::visitor::Visitor,
            crate::models::visitor::VisitorDetails,
            crate::models::visitor::VisitorStatus,
            crate::models::visitor::CreateVisitor,
            crate::models::visitor::UpdateStatus,
            crate::models::visitor::VisitorQuery,
            crate::models::visitor::StatsQuery,
            crate::models::visitor::VisitorStats,
            // Locations
            crate::models::location::Location,
            crate::models::location::CreateLocation,
            crate::models::location::UpdateLocation,
            // Staff
            crate::models::staff::StaffMember,
            crate::models::staff::CreateStaffMember,
            crate::models::staff::UpdateStaffMember,
            // Users
            crate::models::user::User,
            crate::models::user::Role,
            crate::models::user::UserQuery,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Roles
            crate::models::role::RoleConfiguration,
            crate::models::role::RoleConfigurationDetails,
            crate::models::role::CreateRoleConfiguration,
            crate::models::role::UpdateRoleConfiguration,
            // Custom fields
            crate::models::custom_field::CustomField,
            crate::models::custom_field::CreateCustomField,
            crate::models::custom_field::UpdateCustomField,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "visitors", description = "Visitor registration and lifecycle"),
        (name = "locations", description = "Location management"),
        (name = "staff", description = "Staff member management"),
        (name = "users", description = "User account management"),
        (name = "roles", description = "Role configuration management"),
        (name = "custom-fields", description = "Custom registration fields")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
