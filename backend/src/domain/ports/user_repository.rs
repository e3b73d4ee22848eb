//! Port abstraction for the identity store.
use async_trait::async_trait;

use crate::domain::{ActivationToken, Email, User, UserId};

use super::RepositoryError;

/// Identity store. Emails are unique across activated and pending users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Fetch the user `token` was issued to. Tokens stay resolvable after
    /// activation so a replay finds the activated user.
    async fn find_by_activation_token(
        &self,
        token: &ActivationToken,
    ) -> Result<Option<User>, RepositoryError>;

    /// Insert a new user; `Duplicate` when the email is taken.
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;

    /// Replace a stored user; `Missing` when absent, `Duplicate` when the
    /// new email belongs to someone else.
    async fn update(&self, user: &User) -> Result<(), RepositoryError>;
}
