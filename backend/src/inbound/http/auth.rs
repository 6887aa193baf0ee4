//! Bearer token extraction for HTTP handlers.
//!
//! Extraction never fails: a request without a usable token yields
//! `MaybeBearerToken(None)`, and handlers that need a caller pass it to the
//! identity resolver, which produces the 401.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::{BearerToken, Error, User, extract_token};
use crate::inbound::http::state::HttpState;

/// Optional bearer token read from the `Authorization` header.
#[derive(Debug, Clone, Default)]
pub struct MaybeBearerToken(pub Option<BearerToken>);

impl MaybeBearerToken {
    /// Borrow the token, if one was presented.
    pub fn token(&self) -> Option<&BearerToken> {
        self.0.as_ref()
    }
}

impl FromRequest for MaybeBearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        ready(Ok(Self(extract_token(header))))
    }
}

/// Resolve the caller or fail with 401.
pub async fn require_user(state: &HttpState, token: &MaybeBearerToken) -> Result<User, Error> {
    state.identity.resolve_user(token.token()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case::absent(None, None)]
    #[case::bearer(Some("Bearer abc.def.ghi"), Some("abc.def.ghi"))]
    #[case::basic(Some("Basic dXNlcjpwYXNz"), None)]
    #[actix_web::test]
    async fn reads_bearer_tokens_from_authorization(
        #[case] header: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let mut request = TestRequest::default();
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let (req, mut payload) = request.to_http_parts();
        let extracted = MaybeBearerToken::from_request(&req, &mut payload)
            .await
            .expect("extraction never fails");
        assert_eq!(extracted.token().map(BearerToken::as_str), expected);
    }
}
