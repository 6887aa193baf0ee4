//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    ///
    /// `blog_ids` is the owner-side copy of the ownership relation, kept in
    /// creation order. It is not enforced against `blogs`.
    users (id) {
        id -> Uuid,
        /// Unique (`users_username_key`).
        username -> Varchar,
        name -> Varchar,
        /// Encoded password hash; never leaves the persistence layer unmasked.
        password_hash -> Varchar,
        blog_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog bookmarks. `user_id` names the creator and never changes.
    blogs (id) {
        id -> Uuid,
        title -> Varchar,
        author -> Nullable<Varchar>,
        url -> Varchar,
        likes -> Int8,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}
