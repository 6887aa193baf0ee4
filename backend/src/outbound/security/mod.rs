//! Credential primitives: password hashing and signed identity tokens.

mod argon2_hasher;
mod hmac_token_codec;

pub use argon2_hasher::Argon2PasswordHasher;
pub use hmac_token_codec::HmacTokenCodec;
