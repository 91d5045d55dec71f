//! Role configurations repository: role name -> permission set + route set

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::role::{CreateRoleConfiguration, RoleConfiguration, RoleConfigurationDetails, UpdateRoleConfiguration},
};

#[derive(Clone)]
pub struct RolesRepository {
    pool: Pool<Postgres>,
}

impl RolesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get role configuration with its permission and route sets
    pub async fn get_details(&self, id: i32) -> AppResult<RoleConfigurationDetails> {
        let configuration = sqlx::query_as::<_, RoleConfiguration>(
            "SELECT * FROM role_configurations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role configuration with id {} not found", id)))?;

        let permissions = self.get_permissions(id).await?;
        let routes = self.get_routes(id).await?;

        Ok(RoleConfigurationDetails { configuration, permissions, routes })
    }

    /// Look up a configuration by role name (pure data lookup)
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<RoleConfigurationDetails>> {
        let configuration = sqlx::query_as::<_, RoleConfiguration>(
            "SELECT * FROM role_configurations WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        match configuration {
            Some(configuration) => {
                let permissions = self.get_permissions(configuration.id).await?;
                let routes = self.get_routes(configuration.id).await?;
                Ok(Some(RoleConfigurationDetails { configuration, permissions, routes }))
            }
            None => Ok(None),
        }
    }

    async fn get_permissions(&self, configuration_id: i32) -> AppResult<Vec<String>> {
        let rows = sqlx::query(
            "SELECT permission FROM role_permissions WHERE role_configuration_id = $1 ORDER BY permission",
        )
        .bind(configuration_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|row| row.get("permission")).collect())
    }

    async fn get_routes(&self, configuration_id: i32) -> AppResult<Vec<String>> {
        let rows = sqlx::query(
            "SELECT route FROM role_routes WHERE role_configuration_id = $1 ORDER BY route",
        )
        .bind(configuration_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|row| row.get("route")).collect())
    }

    /// List all configurations with their sets
    pub async fn list(&self) -> AppResult<Vec<RoleConfigurationDetails>> {
        let configurations = sqlx::query_as::<_, RoleConfiguration>(
            "SELECT * FROM role_configurations ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut details = Vec::with_capacity(configurations.len());
        for configuration in configurations {
            let permissions = self.get_permissions(configuration.id).await?;
            let routes = self.get_routes(configuration.id).await?;
            details.push(RoleConfigurationDetails { configuration, permissions, routes });
        }
        Ok(details)
    }

    pub async fn name_exists(&self, name: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM role_configurations WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a configuration with its permission and route rows
    pub async fn create(&self, request: &CreateRoleConfiguration) -> AppResult<RoleConfigurationDetails> {
        let mut tx = self.pool.begin().await?;

        let configuration = sqlx::query_as::<_, RoleConfiguration>(
            r#"
            INSERT INTO role_configurations (name, description, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Role '{}' already exists", request.name))
            }
            _ => AppError::from(e),
        })?;

        for permission in &request.permissions {
            sqlx::query(
                "INSERT INTO role_permissions (role_configuration_id, permission) VALUES ($1, $2)",
            )
            .bind(configuration.id)
            .bind(permission)
            .execute(&mut *tx)
            .await?;
        }

        for route in &request.routes {
            sqlx::query("INSERT INTO role_routes (role_configuration_id, route) VALUES ($1, $2)")
                .bind(configuration.id)
                .bind(route)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(RoleConfigurationDetails {
            configuration,
            permissions: request.permissions.clone(),
            routes: request.routes.clone(),
        })
    }

    /// Update a configuration; provided sets replace the stored ones
    pub async fn update(&self, id: i32, update: &UpdateRoleConfiguration) -> AppResult<RoleConfigurationDetails> {
        let mut tx = self.pool.begin().await?;

        let configuration = sqlx::query_as::<_, RoleConfiguration>(
            r#"
            UPDATE role_configurations
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.description)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role configuration with id {} not found", id)))?;

        if let Some(ref permissions) = update.permissions {
            sqlx::query("DELETE FROM role_permissions WHERE role_configuration_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for permission in permissions {
                sqlx::query(
                    "INSERT INTO role_permissions (role_configuration_id, permission) VALUES ($1, $2)",
                )
                .bind(id)
                .bind(permission)
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(ref routes) = update.routes {
            sqlx::query("DELETE FROM role_routes WHERE role_configuration_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for route in routes {
                sqlx::query("INSERT INTO role_routes (role_configuration_id, route) VALUES ($1, $2)")
                    .bind(id)
                    .bind(route)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        let permissions = match &update.permissions {
            Some(permissions) => permissions.clone(),
            None => self.get_permissions(id).await?,
        };
        let routes = match &update.routes {
            Some(routes) => routes.clone(),
            None => self.get_routes(id).await?,
        };

        Ok(RoleConfigurationDetails { configuration, permissions, routes })
    }

    /// Delete a configuration; users referencing it fall back to their
    /// built-in role (FK is ON DELETE SET NULL)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM role_configurations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Role configuration with id {} not found", id)));
        }
        Ok(())
    }
}
