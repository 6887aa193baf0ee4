//! PostgreSQL-backed `UserRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{BlogId, DisplayName, PasswordHash, User, UserId, Username};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_failure(error: super::pool::PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn query_failure(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn blog_uuids(user: &User) -> Vec<Uuid> {
    user.blogs().iter().map(|id| *id.as_uuid()).collect()
}

/// Rebuild a domain user from a stored row.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored username fails validation");
        UserPersistenceError::query(format!("corrupt user row: {err}"))
    })?;
    let name = DisplayName::new(&row.name)
        .map_err(|err| UserPersistenceError::query(format!("corrupt user row: {err}")))?;
    let blogs = row.blog_ids.into_iter().map(BlogId::from_uuid).collect();
    Ok(User::new(
        UserId::from_uuid(row.id),
        username,
        name,
        PasswordHash::from_encoded(row.password_hash),
    )
    .with_blogs(blogs))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_failure)?;
        let blog_ids = blog_uuids(user);
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            name: user.name().as_ref(),
            password_hash: user.password_hash().as_str(),
            blog_ids: &blog_ids,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_username(user.username().to_string())
                } else {
                    query_failure(err)
                }
            })
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_failure)?;
        let blog_ids = blog_uuids(user);
        let changes = UserUpdate {
            username: user.username().as_ref(),
            name: user.name().as_ref(),
            password_hash: user.password_hash().as_str(),
            blog_ids: &blog_ids,
        };

        let updated = diesel::update(users::table.find(user.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_username(user.username().to_string())
                } else {
                    query_failure(err)
                }
            })?;
        if updated == 0 {
            return Err(UserPersistenceError::query("user not found for update"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_failure)?;
        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_failure)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_failure)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.to_string()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_failure)?;
        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_failure)?;
        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_failure)?;
        rows.into_iter().map(row_to_user).collect()
    }
}
