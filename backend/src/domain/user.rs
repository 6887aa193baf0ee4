//! User accounts and their owned-blog references.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Blog, BlogId};

/// Minimum length for usernames.
pub const USERNAME_MIN: usize = 3;

/// Validation errors for user primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Username was missing or blank.
    #[error("username: is required")]
    EmptyUsername,
    /// Username shorter than [`USERNAME_MIN`].
    #[error("username: must be at least {min} characters")]
    UsernameTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// Display name was missing or blank.
    #[error("name: is required")]
    EmptyDisplayName,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique login name.
///
/// ## Invariants
/// - Trimmed and at least [`USERNAME_MIN`] characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human readable name shown next to a user's blogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One-way password verification secret in PHC string format.
///
/// Deliberately not `Serialize`; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::PasswordHasher`].
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string for storage and verification.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Registered user.
///
/// ## Invariants
/// - `blogs` lists the ids of blogs this user owns in creation order.
/// - `password_hash` is set once at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    name: DisplayName,
    password_hash: PasswordHash,
    blogs: Vec<BlogId>,
}

impl User {
    /// Build a freshly registered user with no blogs.
    pub fn new(id: UserId, username: Username, name: DisplayName, hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            name,
            password_hash: hash,
            blogs: Vec::new(),
        }
    }

    /// Replace the owned-blog list, used when rehydrating stored records.
    #[must_use]
    pub fn with_blogs(mut self, blogs: Vec<BlogId>) -> Self {
        self.blogs = blogs;
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Ids of owned blogs in creation order.
    pub fn blogs(&self) -> &[BlogId] {
        &self.blogs
    }

    /// Whether `blog` names this user as its owner.
    pub fn owns(&self, blog: &Blog) -> bool {
        blog.owner() == &self.id
    }

    /// Append a blog reference, ignoring ids already present.
    pub fn attach_blog(&mut self, blog_id: BlogId) {
        if !self.blogs.contains(&blog_id) {
            self.blogs.push(blog_id);
        }
    }

    /// Remove every reference to `blog_id`. Returns whether anything changed.
    pub fn detach_blog(&mut self, blog_id: &BlogId) -> bool {
        let before = self.blogs.len();
        self.blogs.retain(|id| id != blog_id);
        self.blogs.len() != before
    }
}
