//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`)
//! with a fresh random salt per password. Verification re-derives the hash
//! with the parameters recorded in the digest, so cost changes never lock
//! out existing accounts. Both operations are CPU-bound and run on Tokio's
//! blocking pool.

use argon2::password_hash::{self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::domain::PasswordDigest;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id password hasher.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Hasher with the library's recommended Argon2id cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters.
    ///
    /// # Errors
    /// Returns [`PasswordHashError::Hash`] when the parameters are outside
    /// Argon2's accepted ranges.
    pub fn with_cost(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

fn hash_blocking(params: Params, password: &[u8]) -> Result<PasswordDigest, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let encoded = Argon2PasswordHasher::argon2(params)
        .hash_password(password, &salt)
        .map_err(|err| PasswordHashError::hash(err.to_string()))?
        .to_string();
    PasswordDigest::new(encoded).map_err(|err| PasswordHashError::hash(err.to_string()))
}

fn verify_blocking(
    params: Params,
    password: &[u8],
    digest: &str,
) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|err| PasswordHashError::malformed_digest(err.to_string()))?;
    match Argon2PasswordHasher::argon2(params).verify_password(password, &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::malformed_digest(err.to_string())),
    }
}

fn join_error(err: tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::hash(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        let params = self.params.clone();
        let password = Zeroizing::new(password.as_bytes().to_vec());
        tokio::task::spawn_blocking(move || hash_blocking(params, &password))
            .await
            .map_err(join_error)?
    }

    async fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError> {
        let params = self.params.clone();
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let digest = digest.as_str().to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(params, &password, &digest))
            .await
            .map_err(join_error)?
    }
}
