//! Business logic layer

pub mod approval;
pub mod custom_fields;
pub mod email;
pub mod locations;
pub mod notifications;
pub mod roles;
pub mod scope;
pub mod seed;
pub mod staff;
pub mod users;
pub mod visitors;

use crate::config::AppConfig;
use crate::repository::Repository;

use self::{
    approval::ApprovalTokenCodec, custom_fields::CustomFieldsService, email::EmailService,
    locations::LocationsService, notifications::NotificationDispatcher, roles::RolesService,
    scope::ScopeService, staff::StaffService, users::UsersService, visitors::VisitorsService,
};

/// Container wiring every service to the shared repository
#[derive(Clone)]
pub struct Services {
    pub visitors: VisitorsService,
    pub scope: ScopeService,
    pub users: UsersService,
    pub locations: LocationsService,
    pub staff: StaffService,
    pub roles: RolesService,
    pub custom_fields: CustomFieldsService,
}

impl Services {
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let notifications = NotificationDispatcher::new(EmailService::new(config.email.clone()));
        let codec = ApprovalTokenCodec::new(
            config.auth.approval_token_secret.clone(),
            config.auth.approval_token_ttl_days,
        );

        Self {
            visitors: VisitorsService::new(
                repository.clone(),
                notifications,
                codec,
                config.server.public_url.clone(),
            ),
            scope: ScopeService::new(repository.clone()),
            users: UsersService::new(repository.clone(), config.auth.clone()),
            locations: LocationsService::new(repository.clone()),
            staff: StaffService::new(repository.clone()),
            roles: RolesService::new(repository.clone()),
            custom_fields: CustomFieldsService::new(repository),
        }
    }
}
