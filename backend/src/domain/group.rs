//! Groups: one immutable owner plus an explicit member set.
//!
//! The owner need not appear in `members`; ownership alone grants
//! member-equivalent access.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::{GroupDescription, GroupId, GroupName, UserId};

/// Editable group fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDetails {
    /// Group name (1–255 characters).
    pub name: GroupName,
    /// Optional description (up to 1000 characters).
    pub description: Option<GroupDescription>,
}

impl GroupDetails {
    /// Details with only a name.
    pub fn named(name: GroupName) -> Self {
        Self {
            name,
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: GroupDescription) -> Self {
        self.description = Some(description);
        self
    }
}

/// A group snapshot with its membership materialised.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use wishlist::domain::{Group, GroupDetails, GroupId, GroupName, UserId};
///
/// let owner = UserId::random();
/// let details = GroupDetails::named(GroupName::new("Family").expect("valid name"));
/// let group = Group::new(GroupId::random(), owner, details, Utc::now());
/// assert!(group.has_access(&owner));
/// assert!(group.members().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    owner_id: UserId,
    details: GroupDetails,
    members: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Group {
    /// Create a group owned by `owner_id` with no explicit members.
    pub fn new(id: GroupId, owner_id: UserId, details: GroupDetails, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            details,
            members: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields.
    pub fn update_details(&mut self, details: GroupDetails, now: DateTime<Utc>) {
        self.details = details;
        self.updated_at = now;
    }

    /// Insert a member; returns `false` when already present.
    pub fn add_member(&mut self, user_id: UserId) -> bool {
        self.members.insert(user_id)
    }

    /// Remove a member; returns `false` when absent.
    pub fn remove_member(&mut self, user_id: &UserId) -> bool {
        self.members.remove(user_id)
    }

    /// Identifier.
    pub fn id(&self) -> &GroupId {
        &self.id
    }

    /// Creating user.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Editable fields.
    pub fn details(&self) -> &GroupDetails {
        &self.details
    }

    /// Group name.
    pub fn name(&self) -> &GroupName {
        &self.details.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&GroupDescription> {
        self.details.description.as_ref()
    }

    /// Explicit members, excluding the owner unless added.
    pub fn members(&self) -> &BTreeSet<UserId> {
        &self.members
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user_id` created the group.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Whether `user_id` is an explicit member.
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.contains(user_id)
    }

    /// Owner or member.
    pub fn has_access(&self, user_id: &UserId) -> bool {
        self.is_owner(user_id) || self.is_member(user_id)
    }
}
