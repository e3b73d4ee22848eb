//! Shared plumbing for the domain services: port error mapping, snapshot
//! loading and decision enforcement with logging.

use tracing::warn;

use super::access::{self, Decision, ListSnapshot, Visibility};
use super::ports::{CredentialHasherError, ListRepository, RepositoryError};
use super::{Error, ListId, UserId};

impl From<RepositoryError> for Error {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Connection { message } => {
                Self::service_unavailable(format!("store unavailable: {message}"))
            }
            RepositoryError::Query { message } => {
                Self::internal(format!("store query failed: {message}"))
            }
            RepositoryError::LimitExceeded { kind } => Self::limit_exceeded(kind),
            RepositoryError::ParentMissing { resource } => Self::parent_deleted(&resource),
            RepositoryError::Missing { resource } => access::not_found(&resource),
            RepositoryError::Duplicate { message } => Self::conflict(message),
        }
    }
}

impl From<CredentialHasherError> for Error {
    fn from(error: CredentialHasherError) -> Self {
        Self::internal(error.to_string())
    }
}

/// Apply `decision`, logging denials with their reason code.
pub(super) fn enforce(
    decision: Decision,
    visibility: Visibility,
    requester: &UserId,
    action: &'static str,
    resource: &'static str,
) -> Result<(), Error> {
    if let Some(reason) = decision.reason() {
        warn!(
            requester = %requester,
            action,
            resource,
            reason = reason.code(),
            "access denied"
        );
    }
    decision.into_result(visibility, resource)
}

/// Load a list with its sharing groups, or report `resource` as not found.
pub(super) async fn load_snapshot<L>(
    lists: &L,
    list_id: &ListId,
    resource: &'static str,
) -> Result<ListSnapshot, Error>
where
    L: ListRepository + ?Sized,
{
    lists
        .find_snapshot(list_id)
        .await?
        .ok_or_else(|| access::not_found(resource))
}

/// Unwrap a lookup, reporting absence as `resource` not found.
pub(super) fn found<T>(value: Option<T>, resource: &str) -> Result<T, Error> {
    value.ok_or_else(|| access::not_found(resource))
}
