//! Access-control and visibility decisions.
//!
//! Every function here is pure: it receives the requester's id and fully
//! materialised snapshots, and returns a [`Decision`]. Callers run the store
//! operation only on [`Decision::Allow`].
//!
//! Visibility flows user → group → shared list → items → comments. Two rules
//! shape the rest:
//!
//! - write authority over lists and items belongs to the list owner alone;
//!   group membership never grants it;
//! - list owners are blind to comments on their own items, even when they are
//!   also members of a group the list is shared with. Ownership suppresses.

use serde_json::json;

use super::{Comment, Error, GiftList, Group, Item, UserId};

/// Why a decision denied access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// Neither owner of the list nor a member of a group it is shared with.
    NotOwnerOrShared,
    /// Only the list owner may perform this action.
    NotOwner,
    /// The list is not shared with any group the requester belongs to.
    NotShared,
    /// List owners cannot see or add comments on their own items.
    OwnerCommentBlind,
    /// Only the author may change a comment.
    NotAuthor,
    /// Not the owner nor a member of the group.
    NotMember,
    /// Only the group owner may perform this action.
    NotGroupOwner,
}

impl DenyReason {
    /// Stable machine-readable code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotOwnerOrShared => "not_owner_or_shared",
            Self::NotOwner => "not_owner",
            Self::NotShared => "not_shared",
            Self::OwnerCommentBlind => "owner_comment_blind",
            Self::NotAuthor => "not_author",
            Self::NotMember => "not_member",
            Self::NotGroupOwner => "not_group_owner",
        }
    }

    /// Human-readable explanation.
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotOwnerOrShared => "not owner or shared",
            Self::NotOwner => "not owner",
            Self::NotShared => "list not shared with you",
            Self::OwnerCommentBlind => "owners cannot view comments on their own lists",
            Self::NotAuthor => "only the author may change this comment",
            Self::NotMember => "not a member of this group",
            Self::NotGroupOwner => "only the group owner may do this",
        }
    }
}

/// Whether the requester may learn that the target exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// The requester can read the target; denials surface as `Forbidden`.
    Visible,
    /// The requester cannot read the target; denials surface as `NotFound`.
    Hidden,
}

impl From<Decision> for Visibility {
    fn from(read: Decision) -> Self {
        if read.is_allowed() {
            Self::Visible
        } else {
            Self::Hidden
        }
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Decision {
    /// Proceed with the operation.
    Allow,
    /// Refuse, with the reason.
    Deny(DenyReason),
}

impl Decision {
    fn allow_if(condition: bool, reason: DenyReason) -> Self {
        if condition {
            Self::Allow
        } else {
            Self::Deny(reason)
        }
    }

    /// `true` for [`Decision::Allow`].
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The deny reason, if any.
    pub const fn reason(self) -> Option<DenyReason> {
        match self {
            Self::Allow => None,
            Self::Deny(reason) => Some(reason),
        }
    }

    /// Convert into the error taxonomy.
    ///
    /// A denial on a hidden target reads as "`resource` not found" so the
    /// requester cannot confirm it exists; on a visible target it is
    /// `Forbidden` carrying the deny code.
    ///
    /// # Examples
    /// ```
    /// use wishlist::domain::access::{Decision, DenyReason, Visibility};
    /// use wishlist::domain::ErrorCode;
    ///
    /// let denied = Decision::Deny(DenyReason::NotOwner);
    /// let hidden = denied.into_result(Visibility::Hidden, "list").expect_err("denied");
    /// assert_eq!(hidden.code(), ErrorCode::NotFound);
    /// let visible = denied.into_result(Visibility::Visible, "list").expect_err("denied");
    /// assert_eq!(visible.code(), ErrorCode::Forbidden);
    /// ```
    pub fn into_result(self, visibility: Visibility, resource: &str) -> Result<(), Error> {
        match (self, visibility) {
            (Self::Allow, _) => Ok(()),
            (Self::Deny(_), Visibility::Hidden) => Err(not_found(resource)),
            (Self::Deny(reason), Visibility::Visible) => Err(Error::forbidden(reason.message())
                .with_details(json!({ "reason": reason.code() }))),
        }
    }
}

/// Uniform "missing or hidden" error.
pub fn not_found(resource: &str) -> Error {
    Error::not_found(format!("{resource} not found"))
}

/// A list together with the groups it is shared with.
#[derive(Debug, Clone, Copy)]
pub struct ListAccess<'a> {
    list: &'a GiftList,
    shared_with: &'a [Group],
}

impl<'a> ListAccess<'a> {
    /// Bundle a list with its materialised sharing edges.
    pub const fn new(list: &'a GiftList, shared_with: &'a [Group]) -> Self {
        Self { list, shared_with }
    }

    /// The list.
    pub const fn list(&self) -> &'a GiftList {
        self.list
    }

    /// Groups the list is shared with.
    pub const fn shared_with(&self) -> &'a [Group] {
        self.shared_with
    }

    /// Whether some shared group has `user_id` as owner or member.
    pub fn grants_via_group(&self, user_id: &UserId) -> bool {
        self.shared_with
            .iter()
            .any(|group| group.has_access(user_id))
    }
}

/// Owned counterpart of [`ListAccess`], as loaded from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    /// The list.
    pub list: GiftList,
    /// Groups the list is shared with, members materialised.
    pub shared_with: Vec<Group>,
}

impl ListSnapshot {
    /// Borrow as a [`ListAccess`].
    pub fn access(&self) -> ListAccess<'_> {
        ListAccess::new(&self.list, &self.shared_with)
    }
}

/// Owner, or member/owner of a group the list is shared with.
pub fn can_read_list(user_id: &UserId, access: ListAccess<'_>) -> Decision {
    Decision::allow_if(
        access.list().is_owner(user_id) || access.grants_via_group(user_id),
        DenyReason::NotOwnerOrShared,
    )
}

/// Only the owner edits a list.
pub fn can_write_list(user_id: &UserId, list: &GiftList) -> Decision {
    Decision::allow_if(list.is_owner(user_id), DenyReason::NotOwner)
}

/// Only the owner deletes a list.
pub fn can_delete_list(user_id: &UserId, list: &GiftList) -> Decision {
    can_write_list(user_id, list)
}

/// Only the owner adds or removes sharing edges.
pub fn can_manage_sharing(user_id: &UserId, list: &GiftList) -> Decision {
    can_write_list(user_id, list)
}

/// Item visibility follows list visibility.
pub fn can_read_item(user_id: &UserId, item: &Item, access: ListAccess<'_>) -> Decision {
    if item.list_id() != access.list().id() {
        return Decision::Deny(DenyReason::NotOwnerOrShared);
    }
    can_read_list(user_id, access)
}

/// Items inherit write authority from their list owner, never from groups.
pub fn can_write_item(user_id: &UserId, item: &Item, list: &GiftList) -> Decision {
    if item.list_id() != list.id() {
        return Decision::Deny(DenyReason::NotOwner);
    }
    can_write_list(user_id, list)
}

/// Same predicate as [`can_write_item`].
pub fn can_delete_item(user_id: &UserId, item: &Item, list: &GiftList) -> Decision {
    can_write_item(user_id, item, list)
}

/// Comments are visible only to non-owners with access through a group.
///
/// The ownership check runs first, so a list owner who is also a member of
/// a sharing group is still denied.
pub fn can_read_comments(user_id: &UserId, item: &Item, access: ListAccess<'_>) -> Decision {
    if item.list_id() != access.list().id() {
        return Decision::Deny(DenyReason::NotOwnerOrShared);
    }
    if access.list().is_owner(user_id) {
        return Decision::Deny(DenyReason::OwnerCommentBlind);
    }
    Decision::allow_if(access.grants_via_group(user_id), DenyReason::NotShared)
}

/// Identical to [`can_read_comments`]: whoever cannot see comments cannot
/// add one.
pub fn can_create_comment(user_id: &UserId, item: &Item, access: ListAccess<'_>) -> Decision {
    can_read_comments(user_id, item, access)
}

/// Authorship is the sole authority over a comment.
pub fn can_edit_comment(user_id: &UserId, comment: &Comment) -> Decision {
    Decision::allow_if(comment.is_author(user_id), DenyReason::NotAuthor)
}

/// Same predicate as [`can_edit_comment`].
pub fn can_delete_comment(user_id: &UserId, comment: &Comment) -> Decision {
    can_edit_comment(user_id, comment)
}

/// Owner or member.
pub fn can_read_group(user_id: &UserId, group: &Group) -> Decision {
    Decision::allow_if(group.has_access(user_id), DenyReason::NotMember)
}

/// Only the owner edits group fields.
pub fn can_manage_group(user_id: &UserId, group: &Group) -> Decision {
    Decision::allow_if(group.is_owner(user_id), DenyReason::NotGroupOwner)
}

/// Only the owner deletes a group.
pub fn can_delete_group(user_id: &UserId, group: &Group) -> Decision {
    can_manage_group(user_id, group)
}

/// Only the owner adds members.
pub fn can_add_member(user_id: &UserId, group: &Group) -> Decision {
    can_manage_group(user_id, group)
}

/// The owner may remove anyone; anyone may remove themselves.
pub fn can_remove_member(user_id: &UserId, group: &Group, target: &UserId) -> Decision {
    Decision::allow_if(
        group.is_owner(user_id) || user_id == target,
        DenyReason::NotGroupOwner,
    )
}

#[cfg(test)]
mod tests;
