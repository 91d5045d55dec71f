//! Idempotent startup seeding.
//!
//! Runs once after migrations, before the server starts serving. Each step
//! is guarded by an existence check so repeated deploys are no-ops. The
//! caller logs and swallows failures: a server with a half-seeded database
//! still serves traffic (intentional degraded start).

use crate::{
    error::AppResult,
    models::{role::CreateRoleConfiguration, user::Role},
    repository::Repository,
    services::{locations::LocationsService, users::UsersService},
};

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "frontdesk-admin";

pub async fn run(repository: &Repository) -> AppResult<()> {
    seed_role_configurations(repository).await?;
    seed_admin_user(repository).await?;
    seed_default_location(repository).await?;
    Ok(())
}

async fn seed_role_configurations(repository: &Repository) -> AppResult<()> {
    let defaults = [
        CreateRoleConfiguration {
            name: "admin".to_string(),
            description: Some("Full access to all locations and settings".to_string()),
            permissions: vec![
                "visitors.read".into(),
                "visitors.write".into(),
                "visitors.delete".into(),
                "locations.manage".into(),
                "staff.manage".into(),
                "users.manage".into(),
                "roles.manage".into(),
                "fields.manage".into(),
            ],
            routes: vec![
                "/dashboard".into(),
                "/visitors".into(),
                "/locations".into(),
                "/staff".into(),
                "/users".into(),
                "/roles".into(),
                "/settings".into(),
            ],
        },
        CreateRoleConfiguration {
            name: "staff".to_string(),
            description: Some("Approve and manage visitors at one location".to_string()),
            permissions: vec!["visitors.read".into(), "visitors.write".into()],
            routes: vec!["/dashboard".into(), "/visitors".into()],
        },
        CreateRoleConfiguration {
            name: "reception".to_string(),
            description: Some("Check visitors in and out at the front desk".to_string()),
            permissions: vec![
                "visitors.read".into(),
                "visitors.checkin".into(),
                "visitors.checkout".into(),
            ],
            routes: vec!["/dashboard".into(), "/visitors".into()],
        },
    ];

    for config in &defaults {
        if repository.roles.name_exists(&config.name).await? {
            continue;
        }
        repository.roles.create(config).await?;
        tracing::info!("Seeded role configuration '{}'", config.name);
    }
    Ok(())
}

async fn seed_admin_user(repository: &Repository) -> AppResult<()> {
    if repository.users.username_exists(DEFAULT_ADMIN_USERNAME).await? {
        return Ok(());
    }

    let role_configuration_id = repository
        .roles
        .find_by_name("admin")
        .await?
        .map(|details| details.configuration.id);

    let password_hash = UsersService::hash_password(DEFAULT_ADMIN_PASSWORD)?;
    repository
        .users
        .create(
            DEFAULT_ADMIN_USERNAME,
            &password_hash,
            "Administrator",
            None,
            Role::Admin,
            role_configuration_id,
            None,
        )
        .await?;

    tracing::warn!(
        "Seeded default admin account '{}'; change its password immediately",
        DEFAULT_ADMIN_USERNAME
    );
    Ok(())
}

async fn seed_default_location(repository: &Repository) -> AppResult<()> {
    if repository.locations.count().await? > 0 {
        return Ok(());
    }

    let slug = LocationsService::slugify("Main Office");
    repository
        .locations
        .create("Main Office", None, &slug, None)
        .await?;

    tracing::info!("Seeded default location 'Main Office'");
    Ok(())
}
