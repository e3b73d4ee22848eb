//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountsCommand, CommentRepository, CommentsCommand, CommentsQuery, CredentialHasher,
    GroupRepository, GroupsCommand, GroupsQuery, InvitationNotifier, ItemRepository, ItemsCommand,
    ItemsQuery, ListRepository, ListsCommand, ListsQuery, UserRepository,
};
use crate::domain::{
    AccountsService, CommentsService, GroupsService, ItemsService, ListsService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountsCommand>,
    pub lists: Arc<dyn ListsCommand>,
    pub lists_query: Arc<dyn ListsQuery>,
    pub items: Arc<dyn ItemsCommand>,
    pub items_query: Arc<dyn ItemsQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub comments_query: Arc<dyn CommentsQuery>,
    pub groups: Arc<dyn GroupsCommand>,
    pub groups_query: Arc<dyn GroupsQuery>,
}

/// Collaborators shared by every service built over one store.
#[derive(Clone)]
pub struct ServiceDeps {
    pub hasher: Arc<dyn CredentialHasher>,
    pub notifier: Arc<dyn InvitationNotifier>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Wire every service over a single store implementing all repository
    /// ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use wishlist::inbound::http::state::{HttpState, ServiceDeps};
    /// use wishlist::outbound::credentials::Argon2CredentialHasher;
    /// use wishlist::outbound::memory::MemoryStore;
    /// use wishlist::outbound::notifier::TracingInvitationNotifier;
    ///
    /// let state = HttpState::over_store(
    ///     Arc::new(MemoryStore::new()),
    ///     ServiceDeps {
    ///         hasher: Arc::new(Argon2CredentialHasher::new("pepper")),
    ///         notifier: Arc::new(TracingInvitationNotifier::new()),
    ///         clock: Arc::new(DefaultClock),
    ///     },
    /// );
    /// let _lists = state.lists_query.clone();
    /// ```
    pub fn over_store<S>(store: Arc<S>, deps: ServiceDeps) -> Self
    where
        S: UserRepository
            + GroupRepository
            + ListRepository
            + ItemRepository
            + CommentRepository
            + 'static,
    {
        let ServiceDeps {
            hasher,
            notifier,
            clock,
        } = deps;
        let accounts = Arc::new(AccountsService::new(
            store.clone(),
            hasher,
            notifier.clone(),
        ));
        let lists = Arc::new(ListsService::new(store.clone(), store.clone(), clock.clone()));
        let items = Arc::new(ItemsService::new(store.clone(), store.clone(), clock.clone()));
        let comments = Arc::new(CommentsService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            clock.clone(),
        ));
        let groups = Arc::new(GroupsService::new(store.clone(), store, notifier, clock));
        Self {
            accounts,
            lists: lists.clone(),
            lists_query: lists,
            items: items.clone(),
            items_query: items,
            comments: comments.clone(),
            comments_query: comments,
            groups: groups.clone(),
            groups_query: groups,
        }
    }
}
