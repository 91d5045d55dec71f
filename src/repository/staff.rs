//! Staff members repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::staff::{CreateStaffMember, StaffMember, UpdateStaffMember},
};

#[derive(Clone)]
pub struct StaffRepository {
    pool: Pool<Postgres>,
}

impl StaffRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get staff member by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<StaffMember> {
        sqlx::query_as::<_, StaffMember>("SELECT * FROM staff_members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Staff member with id {} not found", id)))
    }

    /// Find the staff record backing a user account, if any
    pub async fn find_by_user_id(&self, user_id: i32) -> AppResult<Option<StaffMember>> {
        let staff = sqlx::query_as::<_, StaffMember>(
            "SELECT * FROM staff_members WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(staff)
    }

    /// Find a staff member by email, case-insensitively (approval links
    /// carry the address in whatever casing the mail client preserved)
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<StaffMember>> {
        let staff = sqlx::query_as::<_, StaffMember>(
            "SELECT * FROM staff_members WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(staff)
    }

    /// Resolve the kiosk's free-text "whom to meet" name to a staff member
    /// at the visitor's location
    pub async fn find_by_name_at_location(
        &self,
        location_id: i32,
        display_name: &str,
    ) -> AppResult<Option<StaffMember>> {
        let staff = sqlx::query_as::<_, StaffMember>(
            "SELECT * FROM staff_members WHERE location_id = $1 AND LOWER(display_name) = LOWER($2)",
        )
        .bind(location_id)
        .bind(display_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(staff)
    }

    /// List staff, optionally restricted to one location
    pub async fn list(&self, location_id: Option<i32>) -> AppResult<Vec<StaffMember>> {
        let staff = match location_id {
            Some(location_id) => {
                sqlx::query_as::<_, StaffMember>(
                    "SELECT * FROM staff_members WHERE location_id = $1 ORDER BY display_name",
                )
                .bind(location_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, StaffMember>(
                    "SELECT * FROM staff_members ORDER BY display_name",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(staff)
    }

    /// Create a staff member
    pub async fn create(&self, request: &CreateStaffMember) -> AppResult<StaffMember> {
        let staff = sqlx::query_as::<_, StaffMember>(
            r#"
            INSERT INTO staff_members (location_id, display_name, email, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(request.location_id)
        .bind(&request.display_name)
        .bind(&request.email)
        .bind(request.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("A staff member with this email already exists at this location".to_string())
            }
            _ => AppError::from(e),
        })?;

        Ok(staff)
    }

    /// Update a staff member
    pub async fn update(&self, id: i32, update: &UpdateStaffMember) -> AppResult<StaffMember> {
        sqlx::query_as::<_, StaffMember>(
            r#"
            UPDATE staff_members
            SET display_name = COALESCE($2, display_name),
                email = COALESCE($3, email),
                user_id = COALESCE($4, user_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.display_name)
        .bind(&update.email)
        .bind(update.user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Staff member with id {} not found", id)))
    }

    /// Delete a staff member
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM staff_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Staff member with id {} not found", id)));
        }
        Ok(())
    }
}
