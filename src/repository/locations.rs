//! Locations repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::location::{Location, UpdateLocation},
};

#[derive(Clone)]
pub struct LocationsRepository {
    pool: Pool<Postgres>,
}

impl LocationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get location by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Location> {
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location with id {} not found", id)))
    }

    /// Get location by its kiosk registration slug
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Location> {
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE registration_slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location '{}' not found", slug)))
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM locations WHERE registration_slug = $1)")
                .bind(slug)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// List all locations
    pub async fn list(&self) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>("SELECT * FROM locations ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(locations)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a new location with a pre-generated unique slug
    pub async fn create(
        &self,
        name: &str,
        address: Option<&str>,
        registration_slug: &str,
        qr_code_url: Option<&str>,
    ) -> AppResult<Location> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (name, address, registration_slug, qr_code_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(registration_slug)
        .bind(qr_code_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    /// Update a location; the registration slug is immutable
    pub async fn update(&self, id: i32, update: &UpdateLocation) -> AppResult<Location> {
        sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET name = COALESCE($2, name),
                address = COALESCE($3, address),
                qr_code_url = COALESCE($4, qr_code_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.address)
        .bind(&update.qr_code_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Location with id {} not found", id)))
    }

    /// Delete a location. Visitors reference locations with ON DELETE
    /// RESTRICT, surfaced to the caller as a conflict.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    AppError::Conflict("Location still has registered visitors".to_string())
                }
                _ => AppError::from(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Location with id {} not found", id)));
        }
        Ok(())
    }
}
