//! Authentication primitives: credentials, registrations, tokens.
//!
//! Inbound payload parsing stays outside the domain; handlers call the
//! constructors here before talking to a port.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{DisplayName, UserId, UserValidationError, Username};

/// Minimum length for passwords accepted at registration.
pub const PASSWORD_MIN: usize = 3;

/// Prefix expected on the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was missing or empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use bloglist::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Bret", "JKF35k!_3").unwrap();
/// assert_eq!(creds.username(), "Bret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Raw password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation failures for registrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Username or display name failed validation.
    #[error(transparent)]
    User(#[from] UserValidationError),
    /// Password was missing.
    #[error("password: is required")]
    MissingPassword,
    /// Password shorter than [`PASSWORD_MIN`].
    #[error("password: must be at least {min} characters")]
    PasswordTooShort {
        /// Required minimum length.
        min: usize,
    },
}

/// Validated request to create a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    name: DisplayName,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration fields.
    ///
    /// # Examples
    /// ```
    /// use bloglist::domain::Registration;
    ///
    /// assert!(Registration::try_from_parts(Some("IWMor"), Some("Corey"), Some("jr*29gW")).is_ok());
    /// assert!(Registration::try_from_parts(Some("IWMor"), Some("Corey"), Some("p")).is_err());
    /// ```
    pub fn try_from_parts(
        username: Option<&str>,
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username.unwrap_or_default())?;
        let name = DisplayName::new(name.unwrap_or_default())?;
        let password = match password {
            None | Some("") => return Err(RegistrationValidationError::MissingPassword),
            Some(raw) if raw.chars().count() < PASSWORD_MIN => {
                return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
            }
            Some(raw) => Zeroizing::new(raw.to_owned()),
        };
        Ok(Self {
            username,
            name,
            password,
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Raw password, hashed exactly once by the credential service.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Opaque signed token presented as `Authorization: Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap an encoded token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// Read the token from an `Authorization` header value.
    ///
    /// Returns `None` when the header is absent, lacks the `Bearer ` prefix,
    /// or carries an empty token. Absence is not an error: read-only routes
    /// accept anonymous requests.
    ///
    /// # Examples
    /// ```
    /// use bloglist::domain::BearerToken;
    ///
    /// assert!(BearerToken::from_authorization(Some("Bearer abc")).is_some());
    /// assert!(BearerToken::from_authorization(Some("Basic abc")).is_none());
    /// assert!(BearerToken::from_authorization(None).is_none());
    /// ```
    pub fn from_authorization(header: Option<&str>) -> Option<Self> {
        header
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(Self::new)
    }

    /// Encoded token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Identity asserted by a signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    username: String,
    id: UserId,
}

impl TokenClaims {
    /// Claims for `id` known as `username`.
    pub fn new(username: impl Into<String>, id: UserId) -> Self {
        Self {
            username: username.into(),
            id,
        }
    }

    /// Username at issuance time.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Subject identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }
}

/// Successful login payload returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginSession {
    /// Signed bearer token.
    pub token: String,
    /// Username of the authenticated user.
    pub username: String,
    /// Display name of the authenticated user.
    pub name: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(None, Some("Corey"), Some("jr*29gW"))]
    #[case(Some("IWMor"), Some("Corey"), None)]
    #[case(None, Some("Corey"), None)]
    #[case(Some("kf"), Some("Corey"), Some("jr*29gW"))]
    #[case(Some("IWMor"), Some("Corey"), Some("p"))]
    #[case(Some("IWMor"), None, Some("jr*29gW"))]
    fn registration_rejects_missing_or_short_fields(
        #[case] username: Option<&str>,
        #[case] name: Option<&str>,
        #[case] password: Option<&str>,
    ) {
        assert!(Registration::try_from_parts(username, name, password).is_err());
    }

    #[rstest]
    fn registration_reports_password_minimum() {
        let err = Registration::try_from_parts(Some("IWMor"), Some("Corey"), Some("ab"))
            .expect_err("short password");
        assert_eq!(err.to_string(), "password: must be at least 3 characters");
    }

    #[rstest]
    #[case(Some("Bearer abc.def.ghi"), Some("abc.def.ghi"))]
    #[case(Some("Bearer "), None)]
    #[case(Some("bearer abc"), None)]
    #[case(Some("Token abc"), None)]
    #[case(None, None)]
    fn bearer_extraction(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
        let token = BearerToken::from_authorization(header);
        assert_eq!(token.as_ref().map(BearerToken::as_str), expected);
    }
}
