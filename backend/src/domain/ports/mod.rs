//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (repositories, notifier, hasher) describe what the services
//! need from adapters. Driving ports (`*Command`, `*Query`) are what inbound
//! adapters call. Every driven port reports failures as a typed enum so
//! services can map them onto the error taxonomy without string matching.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_command;
mod comment_repository;
mod comments_command;
mod comments_query;
mod credential_hasher;
mod group_repository;
mod groups_command;
mod groups_query;
mod invitation_notifier;
mod item_repository;
mod items_command;
mod items_query;
mod list_repository;
mod lists_command;
mod lists_query;
mod repository_error;
mod user_repository;

#[cfg(test)]
pub use accounts_command::MockAccountsCommand;
pub use accounts_command::{
    AccountsCommand, ActivationRequest, ProfileUpdate, RegistrationOutcome,
};
pub use comment_repository::CommentRepository;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comments_command::CommentsCommand;
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
pub use comments_query::CommentsQuery;
#[cfg(test)]
pub use comments_query::MockCommentsQuery;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use group_repository::GroupRepository;
#[cfg(test)]
pub use group_repository::MockGroupRepository;
#[cfg(test)]
pub use groups_command::MockGroupsCommand;
pub use groups_command::{GroupsCommand, MemberAdded};
pub use groups_query::GroupsQuery;
#[cfg(test)]
pub use groups_query::MockGroupsQuery;
#[cfg(test)]
pub use invitation_notifier::MockInvitationNotifier;
pub use invitation_notifier::{
    Invitation, InvitationKind, InvitationNotifier, InvitationNotifierError,
};
pub use item_repository::ItemRepository;
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use items_command::ItemsCommand;
#[cfg(test)]
pub use items_command::MockItemsCommand;
pub use items_query::ItemsQuery;
#[cfg(test)]
pub use items_query::MockItemsQuery;
pub use list_repository::ListRepository;
#[cfg(test)]
pub use list_repository::MockListRepository;
pub use lists_command::ListsCommand;
#[cfg(test)]
pub use lists_command::MockListsCommand;
#[cfg(test)]
pub use lists_query::MockListsQuery;
pub use lists_query::{ListRole, ListView, ListsQuery};
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
mod tests;
