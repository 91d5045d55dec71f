//! Role configuration service: data-driven role -> permissions/routes

use crate::{
    error::{AppError, AppResult},
    models::role::{CreateRoleConfiguration, RoleConfigurationDetails, UpdateRoleConfiguration},
    repository::Repository,
};

#[derive(Clone)]
pub struct RolesService {
    repository: Repository,
}

impl RolesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i32) -> AppResult<RoleConfigurationDetails> {
        self.repository.roles.get_details(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<RoleConfigurationDetails>> {
        self.repository.roles.list().await
    }

    /// Lookup by role name, used to resolve login permissions
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<RoleConfigurationDetails>> {
        self.repository.roles.find_by_name(name).await
    }

    pub async fn create(&self, request: &CreateRoleConfiguration) -> AppResult<RoleConfigurationDetails> {
        if self.repository.roles.name_exists(&request.name).await? {
            return Err(AppError::Conflict(format!(
                "Role '{}' already exists",
                request.name
            )));
        }
        self.repository.roles.create(request).await
    }

    pub async fn update(&self, id: i32, update: &UpdateRoleConfiguration) -> AppResult<RoleConfigurationDetails> {
        self.repository.roles.update(id, update).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.roles.delete(id).await
    }
}
