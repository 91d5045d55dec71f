//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, Role, UpdateUser, User, UserClaims, UserQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_password(user: &User, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Authenticate by username and password, returning a JWT and the user
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !Self::verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.create_token(&user)?;
        Ok((token, user))
    }

    fn create_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role,
            location_id: user.location_id,
            email: user.email.clone(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    pub async fn get(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        self.repository.users.list(query).await
    }

    /// Create a user account (admin operation)
    pub async fn create(&self, request: &CreateUser) -> AppResult<User> {
        if self.repository.users.username_exists(&request.username).await? {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }
        if let Some(location_id) = request.location_id {
            self.repository.locations.get_by_id(location_id).await?;
        }

        let password_hash = Self::hash_password(&request.password)?;
        self.repository
            .users
            .create(
                &request.username,
                &password_hash,
                &request.display_name,
                request.email.as_deref(),
                request.role,
                request.role_configuration_id,
                request.location_id,
            )
            .await
    }

    pub async fn update(&self, id: i32, update: &UpdateUser) -> AppResult<User> {
        let password_hash = match &update.password {
            Some(password) => Some(Self::hash_password(password)?),
            None => None,
        };
        self.repository
            .users
            .update(id, update, password_hash.as_deref())
            .await
    }

    /// Delete a user; the last remaining admin cannot be removed
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let user = self.repository.users.get_by_id(id).await?;
        if user.role == Role::Admin {
            let admins = self.repository.users.count_by_role(Role::Admin).await?;
            if admins <= 1 {
                return Err(AppError::Conflict(
                    "Cannot delete the last administrator account".to_string(),
                ));
            }
        }
        self.repository.users.delete(id).await
    }
}
