//! Domain primitives, the access engine and the services built on them.
//!
//! Purpose: define strongly typed entities, decide who may see or change
//! them, and orchestrate the ports. Nothing here knows about HTTP or the
//! storage backend.
//!
//! Public surface:
//! - [`access`]: pure visibility and authority decisions.
//! - [`ports`]: driven and driving port traits.
//! - Entities: [`User`], [`Group`], [`GiftList`], [`Item`], [`Comment`].
//! - Services implementing the driving ports, one per resource.
//! - [`Error`] and [`ErrorCode`]: the error taxonomy shared by every layer.

pub mod access;
pub mod auth;
pub mod comment;
pub mod error;
pub mod group;
pub mod ids;
pub mod item;
pub mod limits;
pub mod list;
pub mod ports;
pub mod text;
pub mod user;

mod accounts_service;
mod comments_service;
mod groups_service;
mod items_service;
mod lists_service;
mod service_support;

pub use self::accounts_service::AccountsService;
pub use self::auth::{LoginCredentials, Password};
pub use self::comment::Comment;
pub use self::comments_service::CommentsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::group::{Group, GroupDetails};
pub use self::groups_service::GroupsService;
pub use self::ids::{CommentId, GroupId, IdParseError, ItemId, ListId, UserId};
pub use self::item::{Item, ItemContent};
pub use self::items_service::ItemsService;
pub use self::limits::{Limit, LimitExceeded, LimitKind};
pub use self::list::GiftList;
pub use self::lists_service::ListsService;
pub use self::text::{
    CommentText, DisplayName, FieldValidationError, FieldViolation, GroupDescription, GroupName,
    ItemDescription, ItemTitle, ListTitle,
};
pub use self::user::{ActivationError, ActivationToken, CredentialHash, Email, Role, User};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use wishlist::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
