//! Fixed creation caps.
//!
//! Caps apply to creation-type operations only. Store adapters count the
//! current rows for the owning entity and call [`Limit::admit`] inside the
//! same critical section as the insert, so two racing creations can never
//! both observe `max - 1`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Error;

/// Maximum lists a single user may own.
pub const MAX_LISTS_PER_USER: usize = 100;
/// Maximum items in a single list.
pub const MAX_ITEMS_PER_LIST: usize = 1000;
/// Maximum comments on a single item.
pub const MAX_COMMENTS_PER_ITEM: usize = 100;
/// Maximum groups a single list may be shared with.
pub const MAX_SHARED_GROUPS_PER_LIST: usize = 100;
/// Maximum explicit members of a single group.
pub const MAX_MEMBERS_PER_GROUP: usize = 100;

/// Capped resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    /// Lists per owning user.
    Lists,
    /// Items per owning list.
    Items,
    /// Comments per owning item.
    Comments,
    /// Sharing edges per list.
    SharedGroups,
    /// Members per group.
    GroupMembers,
}

impl LimitKind {
    /// Upper bound on the number of rows for this kind.
    pub const fn max(self) -> usize {
        match self {
            Self::Lists => MAX_LISTS_PER_USER,
            Self::Items => MAX_ITEMS_PER_LIST,
            Self::Comments => MAX_COMMENTS_PER_ITEM,
            Self::SharedGroups => MAX_SHARED_GROUPS_PER_LIST,
            Self::GroupMembers => MAX_MEMBERS_PER_GROUP,
        }
    }

    /// Stable identifier used in error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lists => "lists",
            Self::Items => "items",
            Self::Comments => "comments",
            Self::SharedGroups => "shared_groups",
            Self::GroupMembers => "group_members",
        }
    }

    /// Human-readable label used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lists => "list",
            Self::Items => "item",
            Self::Comments => "comment",
            Self::SharedGroups => "shared group",
            Self::GroupMembers => "group member",
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A creation rejected by [`Limit::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitExceeded {
    /// The capped resource.
    pub kind: LimitKind,
    /// Count observed when the creation was attempted.
    pub current: usize,
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} limit of {} reached (current {})",
            self.kind.label(),
            self.kind.max(),
            self.current
        )
    }
}

impl std::error::Error for LimitExceeded {}

impl From<LimitExceeded> for Error {
    fn from(value: LimitExceeded) -> Self {
        Self::limit_exceeded(value.kind)
    }
}

/// Creation guard for one capped resource.
///
/// # Examples
/// ```
/// use wishlist::domain::{Limit, LimitKind};
///
/// let limit = Limit::new(LimitKind::Comments);
/// assert!(limit.admit(99).is_ok());
/// assert!(limit.admit(100).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    kind: LimitKind,
}

impl Limit {
    /// Guard for `kind`.
    pub const fn new(kind: LimitKind) -> Self {
        Self { kind }
    }

    /// Guarded resource kind.
    pub const fn kind(self) -> LimitKind {
        self.kind
    }

    /// Accept one more row when `current` rows already exist.
    pub fn admit(self, current: usize) -> Result<(), LimitExceeded> {
        if current < self.kind.max() {
            Ok(())
        } else {
            Err(LimitExceeded {
                kind: self.kind,
                current,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    //! Boundary coverage for the limits table.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LimitKind::Lists)]
    #[case(LimitKind::Items)]
    #[case(LimitKind::Comments)]
    #[case(LimitKind::SharedGroups)]
    #[case(LimitKind::GroupMembers)]
    fn last_slot_is_admitted_and_the_next_is_not(#[case] kind: LimitKind) {
        let limit = Limit::new(kind);
        assert!(limit.admit(0).is_ok());
        assert!(limit.admit(kind.max() - 1).is_ok());
        assert_eq!(
            limit.admit(kind.max()),
            Err(LimitExceeded {
                kind,
                current: kind.max()
            })
        );
    }

    #[rstest]
    fn counts_beyond_the_cap_are_still_rejected() {
        assert!(Limit::new(LimitKind::Items).admit(5_000).is_err());
    }

    #[rstest]
    fn converts_into_limit_exceeded_error() {
        let err: Error = LimitExceeded {
            kind: LimitKind::GroupMembers,
            current: 100,
        }
        .into();
        assert_eq!(err.code(), crate::domain::ErrorCode::LimitExceeded);
    }
}
