//! User management service

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create a new user. Email must be unused.
    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        if self.repository.users.email_exists(&user.email, None).await? {
            tracing::warn!("Signup rejected, email {} already exists", user.email);
            return Err(AppError::Conflict(format!("Email {} already exists", user.email)));
        }

        let created = self.repository.users.create(&user).await?;
        tracing::info!("User {} created", created.id);
        Ok(created)
    }

    /// Partial update: blank fields are ignored, a new email must not belong to another user
    pub async fn update_user(&self, id: i64, update: UpdateUser) -> AppResult<User> {
        let mut user = self.repository.users.get_by_id(id).await?;

        if let Some(email) = update.email() {
            if email != user.email && self.repository.users.email_exists(email, Some(id)).await? {
                tracing::warn!("User {} update rejected, email {} already exists", id, email);
                return Err(AppError::Conflict(format!("Email {} already exists", email)));
            }
        }

        update.apply(&mut user);
        let updated = self.repository.users.update(&user).await?;
        tracing::info!("User {} updated", id);
        Ok(updated)
    }

    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.repository.users.delete(id).await?;
        tracing::info!("User {} deleted", id);
        Ok(())
    }
}
