//! HS256 compact tokens implementing the `TokenCodec` port.
//!
//! Layout is `base64url(header).base64url(payload).base64url(mac)` without
//! padding, where the MAC is HMAC-SHA256 over the first two segments. The
//! payload carries `username`, `id`, `iat` and, when a lifetime is
//! configured, `exp` (all times in Unix seconds).
//!
//! Verification checks the MAC before reading the header, so the `alg`
//! field of an unauthenticated token is never trusted. Checking `alg` first
//! would let a forged header steer verification.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::ports::{TokenCodec, TokenError};
use crate::domain::{BearerToken, TokenClaims, UserId};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Payload {
    #[serde(default)]
    username: String,
    #[serde(default)]
    id: Option<String>,
    iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Token codec keyed by the server secret.
pub struct HmacTokenCodec {
    key: Zeroizing<Vec<u8>>,
    ttl: Option<Duration>,
}

impl HmacTokenCodec {
    /// Codec signing with `secret`. Tokens never expire when `ttl` is `None`.
    ///
    /// # Errors
    ///
    /// [`TokenError::Signing`] when the secret is empty.
    pub fn new(secret: &[u8], ttl: Option<Duration>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::signing("signing secret is empty"));
        }
        Ok(Self {
            key: Zeroizing::new(secret.to_vec()),
            ttl,
        })
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.key).map_err(|err| TokenError::signing(err.to_string()))
    }

    fn issue_at(
        &self,
        claims: &TokenClaims,
        now: DateTime<Utc>,
    ) -> Result<BearerToken, TokenError> {
        let header = Header {
            alg: ALGORITHM.to_owned(),
            typ: "JWT".to_owned(),
        };
        let exp = self
            .ttl
            .map(|ttl| {
                now.checked_add_signed(ttl)
                    .map(|expiry| expiry.timestamp())
                    .ok_or_else(|| TokenError::signing("token lifetime overflows the clock"))
            })
            .transpose()?;
        let payload = Payload {
            username: claims.username().to_owned(),
            id: Some(claims.id().to_string()),
            iat: now.timestamp(),
            exp,
        };
        let header =
            serde_json::to_vec(&header).map_err(|err| TokenError::signing(err.to_string()))?;
        let payload =
            serde_json::to_vec(&payload).map_err(|err| TokenError::signing(err.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(BearerToken::new(format!("{signing_input}.{signature}")))
    }

    fn verify_at(
        &self,
        token: &BearerToken,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, TokenError> {
        let mut segments = token.as_str().split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::malformed("expected three segments"));
        };

        let signature = decode_segment(signature)?;
        let mut mac = self.mac()?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::bad_signature())?;

        let header: Header = decode_json(header)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::malformed(format!(
                "unsupported algorithm {}",
                header.alg
            )));
        }
        let payload: Payload = decode_json(payload)?;
        if payload.exp.is_some_and(|exp| exp <= now.timestamp()) {
            return Err(TokenError::expired());
        }
        let id = payload
            .id
            .as_deref()
            .and_then(|id| UserId::new(id).ok())
            .ok_or_else(TokenError::missing_subject)?;
        Ok(TokenClaims::new(payload.username, id))
    }
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|err| TokenError::malformed(err.to_string()))
}

fn decode_json<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = decode_segment(segment)?;
    serde_json::from_slice(&bytes).map_err(|err| TokenError::malformed(err.to_string()))
}

impl TokenCodec for HmacTokenCodec {
    fn issue(&self, claims: &TokenClaims) -> Result<BearerToken, TokenError> {
        self.issue_at(claims, Utc::now())
    }

    fn verify(&self, token: &BearerToken) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn codec() -> HmacTokenCodec {
        HmacTokenCodec::new(b"test-secret", None).expect("codec")
    }

    fn claims() -> TokenClaims {
        TokenClaims::new("IWMor", UserId::random())
    }

    fn sign_raw(secret: &[u8], payload: &str) -> BearerToken {
        sign_with_header(secret, r#"{"alg":"HS256","typ":"JWT"}"#, payload)
    }

    fn sign_with_header(secret: &[u8], header: &str, payload: &str) -> BearerToken {
        let header = URL_SAFE_NO_PAD.encode(header);
        let body = URL_SAFE_NO_PAD.encode(payload);
        let input = format!("{header}.{body}");
        let mut mac = HmacSha256::new_from_slice(secret).expect("key");
        mac.update(input.as_bytes());
        let sig = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        BearerToken::new(format!("{input}.{sig}"))
    }

    #[rstest]
    fn issued_tokens_verify_to_the_same_claims(codec: HmacTokenCodec) {
        let claims = claims();
        let token = codec.issue(&claims).expect("issue");
        assert_eq!(token.as_str().split('.').count(), 3);
        assert_eq!(codec.verify(&token).expect("verify"), claims);
    }

    #[rstest]
    fn tokens_from_another_secret_fail_signature_check(codec: HmacTokenCodec) {
        let other = HmacTokenCodec::new(b"other-secret", None).expect("codec");
        let token = other.issue(&claims()).expect("issue");
        assert_eq!(codec.verify(&token), Err(TokenError::bad_signature()));
    }

    #[rstest]
    fn tampered_payload_fails_signature_check(codec: HmacTokenCodec) {
        let token = codec.issue(&claims()).expect("issue");
        let mut parts: Vec<_> = token.as_str().split('.').map(str::to_owned).collect();
        parts[1] = URL_SAFE_NO_PAD.encode(br#"{"username":"root","id":null,"iat":0}"#);
        let forged = BearerToken::new(parts.join("."));
        assert_eq!(codec.verify(&forged), Err(TokenError::bad_signature()));
    }

    #[rstest]
    fn unsigned_tokens_fail_the_mac_before_the_header_is_read(codec: HmacTokenCodec) {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(br#"{"username":"root","id":null,"iat":0}"#);
        let forged = BearerToken::new(format!("{header}.{body}."));
        assert_eq!(codec.verify(&forged), Err(TokenError::bad_signature()));
    }

    #[rstest]
    fn authenticated_tokens_with_another_algorithm_are_rejected(codec: HmacTokenCodec) {
        let id = UserId::random();
        let payload = format!(r#"{{"username":"IWMor","id":"{id}","iat":0}}"#);
        let token = sign_with_header(b"test-secret", r#"{"alg":"HS512","typ":"JWT"}"#, &payload);
        let error = codec.verify(&token).expect_err("algorithm");
        assert!(matches!(error, TokenError::Malformed { .. }));
    }

    #[rstest]
    #[case("not-a-token")]
    #[case("a.b")]
    #[case("a.b.c.d")]
    #[case("a.b.!!!")]
    fn malformed_tokens_are_rejected(codec: HmacTokenCodec, #[case] raw: &str) {
        let error = codec.verify(&BearerToken::new(raw)).expect_err("malformed");
        assert!(matches!(error, TokenError::Malformed { .. }));
    }

    #[rstest]
    fn payload_without_id_has_no_subject() {
        let token = sign_raw(b"test-secret", r#"{"username":"IWMor","iat":0}"#);
        let codec = HmacTokenCodec::new(b"test-secret", None).expect("codec");
        assert_eq!(codec.verify(&token), Err(TokenError::missing_subject()));
    }

    #[rstest]
    fn expired_tokens_are_rejected() {
        let codec =
            HmacTokenCodec::new(b"test-secret", Some(Duration::seconds(60))).expect("codec");
        let issued = Utc::now() - Duration::seconds(120);
        let token = codec.issue_at(&claims(), issued).expect("issue");
        assert_eq!(codec.verify(&token), Err(TokenError::expired()));
        assert!(codec.verify_at(&token, issued + Duration::seconds(30)).is_ok());
    }

    #[rstest]
    fn oversized_lifetime_fails_to_issue() {
        let codec = HmacTokenCodec::new(b"s", Some(Duration::seconds(10_000_000_000_000)))
            .expect("codec");
        let error = codec.issue(&claims()).expect_err("overflow");
        assert!(matches!(error, TokenError::Signing { .. }));
    }

    #[rstest]
    fn empty_secret_is_rejected() {
        assert!(HmacTokenCodec::new(b"", None).is_err());
    }
}
