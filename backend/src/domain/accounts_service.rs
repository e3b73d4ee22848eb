//! Account lifecycle: registration, activation, profile edits and login.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{
    AccountsCommand, ActivationRequest, CredentialHasher, Invitation, InvitationKind,
    InvitationNotifier, ProfileUpdate, RegistrationOutcome, UserRepository,
};
use super::service_support::found;
use super::{
    ActivationError, ActivationToken, Email, Error, LoginCredentials, User, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Service implementing [`AccountsCommand`].
#[derive(Clone)]
pub struct AccountsService<U> {
    users: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
    notifier: Arc<dyn InvitationNotifier>,
}

impl<U> AccountsService<U> {
    /// Create a service over the identity store.
    pub fn new(
        users: Arc<U>,
        hasher: Arc<dyn CredentialHasher>,
        notifier: Arc<dyn InvitationNotifier>,
    ) -> Self {
        Self {
            users,
            hasher,
            notifier,
        }
    }
}

fn activation_error(error: ActivationError) -> Error {
    match error {
        ActivationError::AlreadyActivated => Error::conflict("already activated"),
        ActivationError::TokenMismatch => Error::not_found("activation token not found"),
    }
}

#[async_trait]
impl<U> AccountsCommand for AccountsService<U>
where
    U: UserRepository,
{
    async fn register(&self, email: Email) -> Result<RegistrationOutcome, Error> {
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(Error::conflict("email already registered"));
        }
        let token = ActivationToken::random();
        let user = User::pending(UserId::random(), email.clone(), token);
        self.users.insert(&user).await?;
        info!(user_id = %user.id(), "user registered");

        let invitation = Invitation {
            email,
            token,
            kind: InvitationKind::Registration,
        };
        let invitation_sent = match self.notifier.send_invitation(&invitation).await {
            Ok(()) => true,
            Err(err) => {
                warn!(user_id = %user.id(), error = %err, "activation delivery failed");
                false
            }
        };
        Ok(RegistrationOutcome {
            user_id: *user.id(),
            invitation_sent,
        })
    }

    async fn activate(&self, request: ActivationRequest) -> Result<User, Error> {
        let mut user = found(
            self.users.find_by_activation_token(&request.token).await?,
            "activation token",
        )?;
        let credential = self.hasher.hash(&request.password)?;
        user.activate(&request.token, request.display_name, credential)
            .map_err(activation_error)?;
        self.users.update(&user).await?;
        info!(user_id = %user.id(), "user activated");
        Ok(user)
    }

    async fn change_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        let mut user = found(self.users.find_by_id(user_id).await?, "user")?;
        let holder = self.users.find_by_email(&update.email).await?;
        if holder.is_some_and(|holder| holder.id() != user_id) {
            return Err(Error::conflict("email already registered"));
        }
        user.change_profile(update.email, update.display_name);
        self.users.update(&user).await?;
        info!(user_id = %user_id, "profile updated");
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(user) = self.users.find_by_email(credentials.email()).await? else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        if !user.is_activated()
            || !self
                .hasher
                .verify(credentials.password(), user.credential())
        {
            warn!(user_id = %user.id(), "login rejected");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(*user.id())
    }
}

#[cfg(test)]
#[path = "accounts_service_tests.rs"]
mod tests;
