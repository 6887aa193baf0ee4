//! Blog records and their validated inputs.
//!
//! A [`Blog`] is always built from a [`BlogDraft`], so the required-field and
//! non-negative-likes rules hold for every stored record. Updates go through
//! [`BlogPatch`], which has no way to express an owner change.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Validation failures for blog payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlogValidationError {
    /// Identifier was not a UUID.
    #[error("id: must be a valid UUID")]
    InvalidId,
    /// Title was missing or blank.
    #[error("title: is required")]
    MissingTitle,
    /// Url was missing or blank.
    #[error("url: is required")]
    MissingUrl,
    /// Likes could not be read as a non-negative integer.
    #[error("likes: must be a non-negative integer")]
    InvalidLikes,
}

/// Stable blog identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlogId(Uuid);

impl BlogId {
    /// Parse a [`BlogId`] from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, BlogValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| BlogValidationError::InvalidId)
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

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<BlogId> for String {
    fn from(value: BlogId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for BlogId {
    type Error = BlogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Like counter; never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Likes(u64);

impl Likes {
    /// Validate a signed count coming from an untyped source.
    pub fn new(value: i64) -> Result<Self, BlogValidationError> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| BlogValidationError::InvalidLikes)
    }

    /// Count as an unsigned integer.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Likes {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

fn required(
    value: Option<&str>,
    missing: BlogValidationError,
) -> Result<String, BlogValidationError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_owned()),
        _ => Err(missing),
    }
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// Validated input for a new blog.
///
/// # Examples
/// ```
/// use bloglist::domain::BlogDraft;
///
/// let draft = BlogDraft::try_new(Some("T"), None, Some("U"), None).unwrap();
/// assert_eq!(draft.likes().get(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDraft {
    title: String,
    author: Option<String>,
    url: String,
    likes: Likes,
}

impl BlogDraft {
    /// Validate raw payload fields. Absent likes default to zero.
    pub fn try_new(
        title: Option<&str>,
        author: Option<&str>,
        url: Option<&str>,
        likes: Option<i64>,
    ) -> Result<Self, BlogValidationError> {
        let title = required(title, BlogValidationError::MissingTitle)?;
        let url = required(url, BlogValidationError::MissingUrl)?;
        let likes = likes.map(Likes::new).transpose()?.unwrap_or_default();
        Ok(Self {
            title,
            author: optional(author),
            url,
            likes,
        })
    }

    /// Title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional author.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Target url.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Initial like count.
    pub fn likes(&self) -> Likes {
        self.likes
    }
}

/// Partial update of the mutable blog fields.
///
/// A provided blank `author` clears it; provided blank `title` or `url` is
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPatch {
    title: Option<String>,
    author: Option<Option<String>>,
    url: Option<String>,
    likes: Option<Likes>,
}

impl BlogPatch {
    /// Validate the supplied fields; `None` leaves a field unchanged.
    pub fn try_new(
        title: Option<&str>,
        author: Option<&str>,
        url: Option<&str>,
        likes: Option<i64>,
    ) -> Result<Self, BlogValidationError> {
        let title = title
            .map(|raw| required(Some(raw), BlogValidationError::MissingTitle))
            .transpose()?;
        let url = url
            .map(|raw| required(Some(raw), BlogValidationError::MissingUrl))
            .transpose()?;
        let likes = likes.map(Likes::new).transpose()?;
        Ok(Self {
            title,
            author: author.map(|raw| optional(Some(raw))),
            url,
            likes,
        })
    }
}

/// Stored blog.
///
/// ## Invariants
/// - `title` and `url` are non-blank.
/// - `owner` never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    id: BlogId,
    title: String,
    author: Option<String>,
    url: String,
    likes: Likes,
    owner: UserId,
}

impl Blog {
    /// Build a blog owned by `owner` from a validated draft.
    pub fn new(id: BlogId, owner: UserId, draft: BlogDraft) -> Self {
        let BlogDraft {
            title,
            author,
            url,
            likes,
        } = draft;
        Self {
            id,
            title,
            author,
            url,
            likes,
            owner,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &BlogId {
        &self.id
    }

    /// Title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional author.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Target url.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current like count.
    pub fn likes(&self) -> Likes {
        self.likes
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Apply a partial update. The owner is untouched.
    pub fn apply(&mut self, patch: BlogPatch) {
        let BlogPatch {
            title,
            author,
            url,
            likes,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(author) = author {
            self.author = author;
        }
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(likes) = likes {
            self.likes = likes;
        }
    }
}
