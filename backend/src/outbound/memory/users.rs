//! Identity store backed by [`MemoryStore`].

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{ActivationToken, Email, User, UserId};

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .emails
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_activation_token(
        &self,
        token: &ActivationToken,
    ) -> Result<Option<User>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .tokens
            .get(token)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if tables.emails.contains_key(user.email()) {
            return Err(RepositoryError::duplicate("email already registered"));
        }
        if tables.users.contains_key(user.id()) {
            return Err(RepositoryError::duplicate("user id already exists"));
        }
        tables.emails.insert(user.email().clone(), *user.id());
        if let Some(token) = user.activation_token() {
            tables.tokens.insert(*token, *user.id());
        }
        tables.users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        let Some(previous_email) = tables.users.get(user.id()).map(|u| u.email().clone()) else {
            return Err(RepositoryError::missing("user"));
        };
        if tables
            .emails
            .get(user.email())
            .is_some_and(|holder| holder != user.id())
        {
            return Err(RepositoryError::duplicate("email already registered"));
        }
        tables.emails.remove(&previous_email);
        tables.emails.insert(user.email().clone(), *user.id());
        tables.users.insert(*user.id(), user.clone());
        Ok(())
    }
}
