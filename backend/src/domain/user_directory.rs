//! User listing with owned blogs expanded.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{BlogRepository, UserRepository, UsersQuery};
use crate::domain::{
    Blog, BlogId, BlogSummary, Error, UserView, map_blog_persistence_error,
    map_user_persistence_error,
};

/// Directory service implementing [`UsersQuery`].
#[derive(Clone)]
pub struct UserDirectoryService<U, B> {
    users: Arc<U>,
    blogs: Arc<B>,
}

impl<U, B> UserDirectoryService<U, B> {
    /// Create a new directory over the given repositories.
    pub fn new(users: Arc<U>, blogs: Arc<B>) -> Self {
        Self { users, blogs }
    }
}

#[async_trait]
impl<U, B> UsersQuery for UserDirectoryService<U, B>
where
    U: UserRepository,
    B: BlogRepository,
{
    async fn list_users(&self) -> Result<Vec<UserView>, Error> {
        let users = self
            .users
            .list()
            .await
            .map_err(map_user_persistence_error)?;
        let blogs: HashMap<BlogId, Blog> = self
            .blogs
            .list()
            .await
            .map_err(map_blog_persistence_error)?
            .into_iter()
            .map(|blog| (blog.id().clone(), blog))
            .collect();

        // Dangling ids (blog deleted, owner update lost) are skipped.
        Ok(users
            .iter()
            .map(|user| {
                let owned = user
                    .blogs()
                    .iter()
                    .filter_map(|id| blogs.get(id))
                    .map(BlogSummary::from)
                    .collect();
                UserView::new(user, owned)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockBlogRepository, MockUserRepository};
    use crate::domain::{BlogDraft, DisplayName, PasswordHash, User, UserId, Username};

    #[tokio::test]
    async fn expands_owned_blogs_in_list_order_and_skips_dangling_ids() {
        let owner_id = UserId::random();
        let first = Blog::new(
            BlogId::random(),
            owner_id.clone(),
            BlogDraft::try_new(Some("first"), None, Some("U1"), None).expect("draft"),
        );
        let second = Blog::new(
            BlogId::random(),
            owner_id.clone(),
            BlogDraft::try_new(Some("second"), None, Some("U2"), None).expect("draft"),
        );
        let owner = User::new(
            owner_id,
            Username::new("Bret").expect("username"),
            DisplayName::new("Leanne").expect("name"),
            PasswordHash::from_encoded("$argon2id$x"),
        )
        .with_blogs(vec![
            second.id().clone(),
            BlogId::random(),
            first.id().clone(),
        ]);

        let mut users = MockUserRepository::new();
        users.expect_list().return_once(move || Ok(vec![owner]));
        let mut blogs = MockBlogRepository::new();
        blogs
            .expect_list()
            .return_once(move || Ok(vec![first, second]));

        let views = UserDirectoryService::new(Arc::new(users), Arc::new(blogs))
            .list_users()
            .await
            .expect("list succeeds");
        let titles: Vec<_> = views[0].blogs.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["second", "first"]);
    }
}
