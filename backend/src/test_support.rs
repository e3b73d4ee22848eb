//! Test utilities for the wishlist crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled only for tests or with the `test-support` feature.

pub mod clock {
    //! Deterministic [`Clock`] implementations.

    use std::sync::Mutex;

    use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    /// Fixed start instant used by fixtures.
    pub fn fixture_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    /// Clock that advances by one second on every reading, so entities
    /// created in sequence get strictly increasing timestamps.
    pub struct SteppingClock(Mutex<DateTime<Utc>>);

    impl SteppingClock {
        /// Start at `start`.
        pub fn new(start: DateTime<Utc>) -> Self {
            Self(Mutex::new(start))
        }

        /// Start at [`fixture_timestamp`].
        pub fn from_fixture() -> Self {
            Self::new(fixture_timestamp())
        }
    }

    impl Default for SteppingClock {
        fn default() -> Self {
            Self::from_fixture()
        }
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            let mut guard = match self.0.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let now = *guard;
            *guard += TimeDelta::seconds(1);
            now
        }
    }
}

pub mod notifier {
    //! Notifier that keeps every invitation for later inspection.

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::ports::{Invitation, InvitationNotifier, InvitationNotifierError};
    use crate::domain::{ActivationToken, Email};

    /// [`InvitationNotifier`] recording deliveries in memory.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        sent: Mutex<Vec<Invitation>>,
    }

    impl RecordingNotifier {
        /// Create an empty recorder.
        pub fn new() -> Self {
            Self::default()
        }

        /// Every invitation delivered so far.
        pub fn sent(&self) -> Vec<Invitation> {
            match self.sent.lock() {
                Ok(guard) => guard.clone(),
                Err(poisoned) => poisoned.into_inner().clone(),
            }
        }

        /// Token of the latest invitation addressed to `email`.
        pub fn token_for(&self, email: &Email) -> Option<ActivationToken> {
            self.sent()
                .into_iter()
                .rev()
                .find(|invitation| &invitation.email == email)
                .map(|invitation| invitation.token)
        }
    }

    #[async_trait]
    impl InvitationNotifier for RecordingNotifier {
        async fn send_invitation(
            &self,
            invitation: &Invitation,
        ) -> Result<(), InvitationNotifierError> {
            let mut guard = match self.sent.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.push(invitation.clone());
            Ok(())
        }
    }
}

pub mod credentials {
    //! Argon2 hashing with the smallest work factors, for fast suites.

    use argon2::Params;

    use crate::outbound::credentials::Argon2CredentialHasher;

    /// Hasher using minimal memory and a single pass.
    pub fn fast_hasher(pepper: &str) -> Argon2CredentialHasher {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid argon2 params");
        Argon2CredentialHasher::with_params(pepper, params)
    }
}

pub mod services {
    //! Every service wired over one [`MemoryStore`].

    use std::sync::Arc;

    use super::clock::SteppingClock;
    use super::credentials::fast_hasher;
    use super::notifier::RecordingNotifier;
    use crate::domain::ports::GroupsCommand;
    use crate::domain::{
        AccountsService, CommentsService, Email, GroupDetails, GroupId, GroupName,
        GroupsService, ItemsService, ListsService, UserId,
    };
    use crate::outbound::memory::MemoryStore;

    /// Services sharing a store, a recording notifier and a stepping clock.
    pub struct Services {
        /// Backing store, for direct inspection.
        pub store: Arc<MemoryStore>,
        /// Captures invitations so tests can read activation tokens.
        pub notifier: Arc<RecordingNotifier>,
        /// Account lifecycle.
        pub accounts: AccountsService<MemoryStore>,
        /// Lists and sharing.
        pub lists: ListsService<MemoryStore, MemoryStore>,
        /// Items.
        pub items: ItemsService<MemoryStore, MemoryStore>,
        /// Comments.
        pub comments: CommentsService<MemoryStore, MemoryStore, MemoryStore>,
        /// Groups and membership.
        pub groups: GroupsService<MemoryStore, MemoryStore>,
    }

    impl Default for Services {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Services {
        /// Wire everything over an empty store.
        pub fn new() -> Self {
            let store = Arc::new(MemoryStore::new());
            let notifier = Arc::new(RecordingNotifier::new());
            let clock = Arc::new(SteppingClock::from_fixture());
            Self {
                accounts: AccountsService::new(
                    store.clone(),
                    Arc::new(fast_hasher("test-pepper")),
                    notifier.clone(),
                ),
                lists: ListsService::new(store.clone(), store.clone(), clock.clone()),
                items: ItemsService::new(store.clone(), store.clone(), clock.clone()),
                comments: CommentsService::new(
                    store.clone(),
                    store.clone(),
                    store.clone(),
                    clock.clone(),
                ),
                groups: GroupsService::new(store.clone(), store.clone(), notifier.clone(), clock),
                store,
                notifier,
            }
        }

        /// Create a group named `name` owned by `owner`.
        pub async fn group_named(&self, owner: &UserId, name: &str) -> GroupId {
            let details = GroupDetails::named(GroupName::new(name).expect("valid group name"));
            let group = self
                .groups
                .create_group(owner, details)
                .await
                .expect("group created");
            *group.id()
        }

        /// Add `email` to the group as its owner, returning the member's id.
        pub async fn join(&self, owner: &UserId, group: &GroupId, email: &str) -> UserId {
            let email = Email::new(email).expect("valid email");
            self.groups
                .add_member(owner, group, email)
                .await
                .expect("member added")
                .user_id
        }
    }
}
