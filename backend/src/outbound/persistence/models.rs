//! Internal Diesel row structs.
//!
//! These types satisfy Diesel's query requirements and never cross into the
//! domain; repositories convert them at the boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{blogs, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub blog_ids: Vec<Uuid>,
    #[expect(dead_code, reason = "read for ordering; not surfaced to the domain")]
    pub created_at: DateTime<Utc>,
}

/// Insertable user record. `created_at` takes the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub blog_ids: &'a [Uuid],
}

/// Full-document replacement for an existing user.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub blog_ids: &'a [Uuid],
}

/// Row read from `blogs`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blogs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BlogRow {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user_id: Uuid,
    #[expect(dead_code, reason = "read for ordering; not surfaced to the domain")]
    pub created_at: DateTime<Utc>,
}

/// Insertable blog record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blogs)]
pub(crate) struct NewBlogRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub author: Option<&'a str>,
    pub url: &'a str,
    pub likes: i64,
    pub user_id: Uuid,
}

/// Mutable blog fields. `author` is always written so a cleared author
/// becomes `NULL` instead of being skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = blogs)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BlogUpdate<'a> {
    pub title: &'a str,
    pub author: Option<&'a str>,
    pub url: &'a str,
    pub likes: i64,
}
