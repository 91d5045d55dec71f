//! Custom registration field definitions service

use crate::{
    error::AppResult,
    models::custom_field::{CreateCustomField, CustomField, UpdateCustomField},
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomFieldsService {
    repository: Repository,
}

impl CustomFieldsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i32) -> AppResult<CustomField> {
        self.repository.custom_fields.get_by_id(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<CustomField>> {
        self.repository.custom_fields.list().await
    }

    pub async fn create(&self, request: &CreateCustomField) -> AppResult<CustomField> {
        self.repository.custom_fields.create(request).await
    }

    pub async fn update(&self, id: i32, update: &UpdateCustomField) -> AppResult<CustomField> {
        self.repository.custom_fields.update(id, update).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.custom_fields.delete(id).await
    }
}
