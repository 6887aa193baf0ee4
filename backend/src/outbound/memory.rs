//! In-process document store backing both repositories.
//!
//! Used when no database URL is configured and throughout the HTTP tests.
//! Users and blogs are kept in insertion order; the username uniqueness
//! check runs under the write lock so concurrent registrations of the same
//! name cannot both succeed. Nothing survives a restart.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    BlogPersistenceError, BlogRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Blog, BlogId, User, UserId, Username};

#[derive(Debug, Default)]
struct Documents {
    users: Vec<User>,
    blogs: Vec<Blog>,
}

/// Shared in-memory store. Wrap it in an `Arc` and hand the same instance to
/// every service that needs either repository.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Documents>,
}

fn poisoned<T>(_: PoisonError<T>) -> String {
    "in-memory store lock poisoned".to_owned()
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Documents>, String> {
        self.documents.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Documents>, String> {
        self.documents.write().map_err(poisoned)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut docs = self.write().map_err(UserPersistenceError::query)?;
        if docs.users.iter().any(|u| u.username() == user.username()) {
            return Err(UserPersistenceError::duplicate_username(
                user.username().to_string(),
            ));
        }
        docs.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut docs = self.write().map_err(UserPersistenceError::query)?;
        if docs
            .users
            .iter()
            .any(|u| u.username() == user.username() && u.id() != user.id())
        {
            return Err(UserPersistenceError::duplicate_username(
                user.username().to_string(),
            ));
        }
        let slot = docs
            .users
            .iter_mut()
            .find(|u| u.id() == user.id())
            .ok_or_else(|| UserPersistenceError::query("user not found for update"))?;
        *slot = user.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let docs = self.read().map_err(UserPersistenceError::query)?;
        Ok(docs.users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let docs = self.read().map_err(UserPersistenceError::query)?;
        Ok(docs.users.iter().find(|u| u.username() == username).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let docs = self.read().map_err(UserPersistenceError::query)?;
        Ok(docs.users.clone())
    }
}

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn insert(&self, blog: &Blog) -> Result<(), BlogPersistenceError> {
        let mut docs = self.write().map_err(BlogPersistenceError::query)?;
        if docs.blogs.iter().any(|b| b.id() == blog.id()) {
            return Err(BlogPersistenceError::query("blog id already stored"));
        }
        docs.blogs.push(blog.clone());
        Ok(())
    }

    async fn update(&self, blog: &Blog) -> Result<(), BlogPersistenceError> {
        let mut docs = self.write().map_err(BlogPersistenceError::query)?;
        let slot = docs
            .blogs
            .iter_mut()
            .find(|b| b.id() == blog.id())
            .ok_or_else(|| BlogPersistenceError::query("blog not found for update"))?;
        *slot = blog.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogPersistenceError> {
        let docs = self.read().map_err(BlogPersistenceError::query)?;
        Ok(docs.blogs.iter().find(|b| b.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Blog>, BlogPersistenceError> {
        let docs = self.read().map_err(BlogPersistenceError::query)?;
        Ok(docs.blogs.clone())
    }

    async fn delete(&self, id: &BlogId) -> Result<bool, BlogPersistenceError> {
        let mut docs = self.write().map_err(BlogPersistenceError::query)?;
        let before = docs.blogs.len();
        docs.blogs.retain(|b| b.id() != id);
        Ok(docs.blogs.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlogDraft, DisplayName, PasswordHash};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> MemoryStore {
        MemoryStore::new()
    }

    fn user(username: &str) -> User {
        User::new(
            UserId::random(),
            Username::new(username).expect("username"),
            DisplayName::new("Name").expect("name"),
            PasswordHash::from_encoded("$argon2id$x"),
        )
    }

    fn blog(title: &str) -> Blog {
        let draft = BlogDraft::try_new(Some(title), None, Some("U"), None).expect("draft");
        Blog::new(BlogId::random(), UserId::random(), draft)
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_username_is_rejected(store: MemoryStore) {
        UserRepository::insert(&store, &user("IWMor"))
            .await
            .expect("first insert");
        let error = UserRepository::insert(&store, &user("IWMor"))
            .await
            .expect_err("second insert");
        assert_eq!(error, UserPersistenceError::duplicate_username("IWMor"));
        assert_eq!(UserRepository::list(&store).await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_whole_document(store: MemoryStore) {
        let stored = user("Bret");
        UserRepository::insert(&store, &stored).await.expect("insert");
        let mut changed = stored.clone();
        changed.attach_blog(BlogId::random());
        UserRepository::update(&store, &changed)
            .await
            .expect("update");
        let found = UserRepository::find_by_id(&store, stored.id())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(found.blogs().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn blogs_list_in_insertion_order_and_delete_reports_presence(store: MemoryStore) {
        let first = blog("first");
        let second = blog("second");
        BlogRepository::insert(&store, &first).await.expect("insert");
        BlogRepository::insert(&store, &second).await.expect("insert");

        let titles: Vec<_> = BlogRepository::list(&store)
            .await
            .expect("list")
            .iter()
            .map(|b| b.title().to_owned())
            .collect();
        assert_eq!(titles, ["first", "second"]);

        assert!(BlogRepository::delete(&store, first.id()).await.expect("delete"));
        assert!(!BlogRepository::delete(&store, first.id()).await.expect("delete"));
    }
}
