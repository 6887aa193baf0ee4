//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashing is deliberately expensive, so both operations run on tokio's
//! blocking pool. Verification reads its parameters from the stored PHC
//! string, which keeps old hashes valid after the cost settings change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PhcError, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _,
    SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with configurable memory and time cost.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Build a hasher using `memory_kib` KiB of memory and `iterations`
    /// passes, single lane.
    ///
    /// # Errors
    ///
    /// [`PasswordHashError::Hashing`] when argon2 rejects the parameters.
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

fn join_failure(err: tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::hashing(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let params = self.params.clone();
        let encoded = tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Self::argon2(params)
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| PasswordHashError::hashing(err.to_string()))
        })
        .await
        .map_err(join_failure)??;
        Ok(PasswordHash::from_encoded(encoded))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PhcHash::new(&encoded)
                .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
            match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(PhcError::Password) => Ok(false),
                Err(err) => Err(PasswordHashError::hashing(err.to_string())),
            }
        })
        .await
        .map_err(join_failure)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(8, 1).expect("cheap test params")
    }

    #[rstest]
    #[tokio::test]
    async fn hash_then_verify_accepts_the_password(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("secret").await.expect("hash");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("secret", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_is_a_mismatch_not_an_error(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("secret").await.expect("hash");
        assert!(!hasher.verify("Secret", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_hashes(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("secret").await.expect("hash");
        let second = hasher.hash("secret").await.expect("hash");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[tokio::test]
    async fn unparseable_stored_hash_is_malformed(hasher: Argon2PasswordHasher) {
        let error = hasher
            .verify("secret", &PasswordHash::from_encoded("not-a-phc-string"))
            .await
            .expect_err("malformed");
        assert!(matches!(error, PasswordHashError::MalformedHash { .. }));
    }

    #[rstest]
    fn zero_iterations_are_rejected() {
        assert!(Argon2PasswordHasher::new(8, 0).is_err());
    }
}
