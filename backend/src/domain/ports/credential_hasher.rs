//! Port for turning passwords into stored credential digests.

use crate::domain::{CredentialHash, Password};

use super::define_port_error;

define_port_error! {
    /// Failures raised while deriving a credential digest.
    pub enum CredentialHasherError {
        /// The key derivation function rejected its inputs.
        Derivation { message: String } => "credential derivation failed: {message}",
    }
}

/// One-way credential digest.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Digest a password for storage.
    fn hash(&self, password: &Password) -> Result<CredentialHash, CredentialHasherError>;

    /// Whether `password` matches the stored digest. The placeholder held by
    /// pending users never verifies, nor does a digest that fails to parse.
    fn verify(&self, password: &Password, stored: &CredentialHash) -> bool;
}
