//! Location management service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::location::{CreateLocation, Location, UpdateLocation},
    repository::Repository,
};

#[derive(Clone)]
pub struct LocationsService {
    repository: Repository,
}

impl LocationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Sanitize a location name into a URL slug
    pub fn slugify(name: &str) -> String {
        let mut slug = String::with_capacity(name.len());
        let mut last_dash = true;
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
                last_dash = false;
            } else if !last_dash {
                slug.push('-');
                last_dash = true;
            }
        }
        let slug = slug.trim_end_matches('-').to_string();
        if slug.is_empty() {
            "location".to_string()
        } else {
            slug
        }
    }

    /// Slugs are globally unique; collisions get a short random suffix
    async fn unique_slug(&self, name: &str) -> AppResult<String> {
        let base = Self::slugify(name);
        if !self.repository.locations.slug_exists(&base).await? {
            return Ok(base);
        }
        let suffix = Uuid::new_v4().simple().to_string();
        Ok(format!("{}-{}", base, &suffix[..8]))
    }

    pub async fn get(&self, id: i32) -> AppResult<Location> {
        self.repository.locations.get_by_id(id).await
    }

    /// Kiosk bootstrap lookup by registration slug
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Location> {
        self.repository.locations.get_by_slug(slug).await
    }

    pub async fn list(&self) -> AppResult<Vec<Location>> {
        self.repository.locations.list().await
    }

    pub async fn create(&self, request: &CreateLocation) -> AppResult<Location> {
        let slug = self.unique_slug(&request.name).await?;
        self.repository
            .locations
            .create(
                &request.name,
                request.address.as_deref(),
                &slug,
                request.qr_code_url.as_deref(),
            )
            .await
    }

    pub async fn update(&self, id: i32, update: &UpdateLocation) -> AppResult<Location> {
        self.repository.locations.update(id, update).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.locations.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation_and_case() {
        assert_eq!(LocationsService::slugify("HQ Building 3"), "hq-building-3");
        assert_eq!(LocationsService::slugify("  Lab // West  "), "lab-west");
        assert_eq!(LocationsService::slugify("Übersee"), "bersee");
    }

    #[test]
    fn slugify_never_returns_empty() {
        assert_eq!(LocationsService::slugify("!!!"), "location");
        assert_eq!(LocationsService::slugify(""), "location");
    }
}
