//! Staff member management service

use crate::{
    error::AppResult,
    models::staff::{CreateStaffMember, StaffMember, UpdateStaffMember},
    repository::Repository,
    services::scope::Scope,
};

#[derive(Clone)]
pub struct StaffService {
    repository: Repository,
}

impl StaffService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i32) -> AppResult<StaffMember> {
        self.repository.staff.get_by_id(id).await
    }

    /// List staff within the caller's scope; an explicitly requested
    /// location must agree with a non-admin scope
    pub async fn list(&self, location_id: Option<i32>, scope: Scope) -> AppResult<Vec<StaffMember>> {
        let effective = scope.effective_location(location_id)?;
        self.repository.staff.list(effective).await
    }

    /// Kiosk picker: staff at one location, no auth involved
    pub async fn list_public(&self, location_id: i32) -> AppResult<Vec<StaffMember>> {
        self.repository.locations.get_by_id(location_id).await?;
        self.repository.staff.list(Some(location_id)).await
    }

    pub async fn create(&self, request: &CreateStaffMember) -> AppResult<StaffMember> {
        self.repository.locations.get_by_id(request.location_id).await?;
        self.repository.staff.create(request).await
    }

    pub async fn update(&self, id: i32, update: &UpdateStaffMember) -> AppResult<StaffMember> {
        self.repository.staff.update(id, update).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.staff.delete(id).await
    }
}
