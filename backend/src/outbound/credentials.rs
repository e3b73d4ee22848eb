//! Credential digests derived with Argon2id.
//!
//! Digests are stored as PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`)
//! so the work factors travel with each digest. A configured pepper is fed to
//! Argon2 as its secret input and never stored.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialHasher, CredentialHasherError};
use crate::domain::{CredentialHash, Password};

/// Peppered Argon2id implementation of [`CredentialHasher`].
///
/// # Examples
/// ```
/// use wishlist::domain::Password;
/// use wishlist::domain::ports::CredentialHasher;
/// use wishlist::outbound::credentials::Argon2CredentialHasher;
///
/// let hasher = Argon2CredentialHasher::new("pepper");
/// let password = Password::new("correct horse").expect("valid password");
/// let stored = hasher.hash(&password).expect("digest");
/// assert!(stored.as_str().starts_with("$argon2id$"));
/// assert!(hasher.verify(&password, &stored));
/// ```
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    pepper: Zeroizing<Vec<u8>>,
    params: Params,
}

impl Argon2CredentialHasher {
    /// Create a hasher with Argon2's default work factors.
    pub fn new(pepper: impl AsRef<[u8]>) -> Self {
        Self::with_params(pepper, Params::default())
    }

    /// Create a hasher with explicit work factors for new digests.
    ///
    /// Existing digests keep verifying under the factors they were made
    /// with.
    pub fn with_params(pepper: impl AsRef<[u8]>, params: Params) -> Self {
        Self {
            pepper: Zeroizing::new(pepper.as_ref().to_vec()),
            params,
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, argon2::Error> {
        Argon2::new_with_secret(
            &self.pepper,
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
    }
}

impl std::fmt::Debug for Argon2CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2CredentialHasher")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &Password) -> Result<CredentialHash, CredentialHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = self
            .argon2()
            .map_err(|err| CredentialHasherError::derivation(err.to_string()))?;
        let encoded = argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| CredentialHasherError::derivation(err.to_string()))?
            .to_string();
        CredentialHash::new(encoded)
            .map_err(|err| CredentialHasherError::derivation(err.to_string()))
    }

    fn verify(&self, password: &Password, stored: &CredentialHash) -> bool {
        if stored.is_placeholder() {
            return false;
        }
        let Ok(parsed) = PasswordHash::new(stored.as_str()) else {
            return false;
        };
        self.argon2().is_ok_and(|argon2| {
            argon2
                .verify_password(password.expose().as_bytes(), &parsed)
                .is_ok()
        })
    }
}
