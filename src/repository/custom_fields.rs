//! Custom fields repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::custom_field::{CreateCustomField, CustomField, UpdateCustomField},
};

#[derive(Clone)]
pub struct CustomFieldsRepository {
    pool: Pool<Postgres>,
}

impl CustomFieldsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get custom field by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<CustomField> {
        sqlx::query_as::<_, CustomField>("SELECT * FROM custom_fields WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Custom field with id {} not found", id)))
    }

    /// List all custom fields in definition order
    pub async fn list(&self) -> AppResult<Vec<CustomField>> {
        let fields = sqlx::query_as::<_, CustomField>("SELECT * FROM custom_fields ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(fields)
    }

    /// Create a custom field
    pub async fn create(&self, request: &CreateCustomField) -> AppResult<CustomField> {
        let field = sqlx::query_as::<_, CustomField>(
            r#"
            INSERT INTO custom_fields (name, label, field_type, required, options, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.label)
        .bind(&request.field_type)
        .bind(request.required)
        .bind(&request.options)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Custom field '{}' already exists", request.name))
            }
            _ => AppError::from(e),
        })?;

        Ok(field)
    }

    /// Update a custom field; the name key is immutable once values exist
    pub async fn update(&self, id: i32, update: &UpdateCustomField) -> AppResult<CustomField> {
        sqlx::query_as::<_, CustomField>(
            r#"
            UPDATE custom_fields
            SET label = COALESCE($2, label),
                field_type = COALESCE($3, field_type),
                required = COALESCE($4, required),
                options = COALESCE($5, options),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.label)
        .bind(&update.field_type)
        .bind(update.required)
        .bind(&update.options)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Custom field with id {} not found", id)))
    }

    /// Delete a custom field definition. Captured visitor values are kept;
    /// they are plain name-keyed rows and remain readable.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM custom_fields WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Custom field with id {} not found", id)));
        }
        Ok(())
    }
}
