//! Mapping of request validation failures onto domain errors.

use serde_json::Value;
use tracing::debug;

use crate::domain::{
    BlogId, BlogValidationError, Error, INVALID_LOGIN_MESSAGE, LoginValidationError,
    RegistrationValidationError,
};

/// Message returned when a path id is not a valid identifier.
pub const MALFORMED_ID_MESSAGE: &str = "malformatted id";

pub(crate) fn blog_validation_error(err: BlogValidationError) -> Error {
    Error::invalid_request(format!("Blog validation failed: {err}"))
}

pub(crate) fn registration_validation_error(err: RegistrationValidationError) -> Error {
    Error::invalid_request(format!("User validation failed: {err}"))
}

/// Blank login fields fail like any other bad login, with no detail.
pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    debug!(error = %err, "login rejected before lookup");
    Error::unauthorized(INVALID_LOGIN_MESSAGE)
}

/// Coerce a JSON `likes` value to an integer.
///
/// Absent and `null` mean "not supplied". Integral numbers and numeric
/// strings are accepted; anything else is `InvalidLikes`. The sign is left
/// for [`crate::domain::Likes`] to check.
pub(crate) fn coerce_likes(value: Option<&Value>) -> Result<Option<i64>, BlogValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral))
            .map(Some)
            .ok_or(BlogValidationError::InvalidLikes),
        Some(Value::String(raw)) => {
            let raw = raw.trim();
            raw.parse::<i64>()
                .ok()
                .or_else(|| raw.parse::<f64>().ok().and_then(integral))
                .map(Some)
                .ok_or(BlogValidationError::InvalidLikes)
        }
        Some(_) => Err(BlogValidationError::InvalidLikes),
    }
}

const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

// Integral and inside the i64 range, so the cast is exact.
fn integral(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value >= -I64_BOUND && value < I64_BOUND)
        .then(|| value as i64)
}

/// Parse a blog id taken from the request path.
pub(crate) fn parse_blog_id(raw: &str) -> Result<BlogId, Error> {
    BlogId::new(raw).map_err(|_| Error::invalid_request(MALFORMED_ID_MESSAGE))
}
