//! Decision tables for the visibility engine.

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    CommentId, CommentText, ErrorCode, GroupDetails, GroupId, GroupName, ItemContent, ItemId,
    ItemTitle, ListId, ListTitle,
};

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Alice owns "Birthday", shared with "Family" (owner Carol, member Bob).
/// Dave is a stranger.
struct World {
    alice: UserId,
    bob: UserId,
    carol: UserId,
    dave: UserId,
    family: Group,
    birthday: GiftList,
    bike: Item,
}

impl World {
    fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            list: self.birthday.clone(),
            shared_with: vec![self.family.clone()],
        }
    }

    fn unshared(&self) -> ListSnapshot {
        ListSnapshot {
            list: self.birthday.clone(),
            shared_with: Vec::new(),
        }
    }

    fn comment_by(&self, author: UserId) -> Comment {
        Comment::new(
            CommentId::random(),
            *self.bike.id(),
            author,
            CommentText::new("I'll get this").expect("valid text"),
            at(),
        )
    }
}

#[fixture]
fn world() -> World {
    let alice = UserId::random();
    let bob = UserId::random();
    let carol = UserId::random();
    let dave = UserId::random();
    let mut family = Group::new(
        GroupId::random(),
        carol,
        GroupDetails::named(GroupName::new("Family").expect("valid name")),
        at(),
    );
    family.add_member(bob);
    let birthday = GiftList::new(
        ListId::random(),
        alice,
        ListTitle::new("Birthday").expect("valid title"),
        at(),
    );
    let bike = Item::new(
        ItemId::random(),
        *birthday.id(),
        ItemContent::titled(ItemTitle::new("Bike").expect("valid title")),
        at(),
    );
    World {
        alice,
        bob,
        carol,
        dave,
        family,
        birthday,
        bike,
    }
}

#[rstest]
fn owner_and_group_participants_read_list(world: World) {
    let snapshot = world.snapshot();
    for user in [world.alice, world.bob, world.carol] {
        assert_eq!(can_read_list(&user, snapshot.access()), Decision::Allow);
    }
    assert_eq!(
        can_read_list(&world.dave, snapshot.access()),
        Decision::Deny(DenyReason::NotOwnerOrShared)
    );
}

#[rstest]
fn unsharing_revokes_read_access(world: World) {
    let snapshot = world.unshared();
    assert!(!can_read_list(&world.bob, snapshot.access()).is_allowed());
    assert!(can_read_list(&world.alice, snapshot.access()).is_allowed());
}

#[rstest]
fn membership_never_grants_write(world: World) {
    for user in [world.bob, world.carol, world.dave] {
        assert_eq!(
            can_write_list(&user, &world.birthday),
            Decision::Deny(DenyReason::NotOwner)
        );
        assert!(!can_delete_list(&user, &world.birthday).is_allowed());
        assert!(!can_manage_sharing(&user, &world.birthday).is_allowed());
        assert!(!can_write_item(&user, &world.bike, &world.birthday).is_allowed());
        assert!(!can_delete_item(&user, &world.bike, &world.birthday).is_allowed());
    }
    assert!(can_write_list(&world.alice, &world.birthday).is_allowed());
    assert!(can_delete_item(&world.alice, &world.bike, &world.birthday).is_allowed());
}

#[rstest]
fn item_reads_follow_the_list(world: World) {
    let snapshot = world.snapshot();
    assert!(can_read_item(&world.bob, &world.bike, snapshot.access()).is_allowed());
    assert!(can_read_item(&world.alice, &world.bike, snapshot.access()).is_allowed());
    assert!(!can_read_item(&world.dave, &world.bike, snapshot.access()).is_allowed());
}

#[rstest]
fn item_from_another_list_is_denied(world: World) {
    let stray = Item::new(
        ItemId::random(),
        ListId::random(),
        ItemContent::titled(ItemTitle::new("Kite").expect("valid title")),
        at(),
    );
    let snapshot = world.snapshot();
    assert!(!can_read_item(&world.alice, &stray, snapshot.access()).is_allowed());
    assert!(!can_write_item(&world.alice, &stray, &world.birthday).is_allowed());
    assert!(!can_read_comments(&world.bob, &stray, snapshot.access()).is_allowed());
}

#[rstest]
fn owner_is_blind_to_comments(world: World) {
    let snapshot = world.snapshot();
    assert_eq!(
        can_read_comments(&world.alice, &world.bike, snapshot.access()),
        Decision::Deny(DenyReason::OwnerCommentBlind)
    );
    assert_eq!(
        can_create_comment(&world.alice, &world.bike, snapshot.access()),
        Decision::Deny(DenyReason::OwnerCommentBlind)
    );
}

#[rstest]
fn owner_stays_blind_when_also_a_member(mut world: World) {
    world.family.add_member(world.alice);
    let snapshot = world.snapshot();
    assert_eq!(
        can_read_comments(&world.alice, &world.bike, snapshot.access()),
        Decision::Deny(DenyReason::OwnerCommentBlind)
    );
    assert!(can_read_list(&world.alice, snapshot.access()).is_allowed());
}

#[rstest]
fn group_participants_see_and_create_comments(world: World) {
    let snapshot = world.snapshot();
    for user in [world.bob, world.carol] {
        assert!(can_read_comments(&user, &world.bike, snapshot.access()).is_allowed());
        assert!(can_create_comment(&user, &world.bike, snapshot.access()).is_allowed());
    }
    assert_eq!(
        can_read_comments(&world.dave, &world.bike, snapshot.access()),
        Decision::Deny(DenyReason::NotShared)
    );
}

#[rstest]
fn only_authors_change_comments(world: World) {
    let comment = world.comment_by(world.bob);
    assert!(can_edit_comment(&world.bob, &comment).is_allowed());
    assert!(can_delete_comment(&world.bob, &comment).is_allowed());
    for user in [world.alice, world.carol, world.dave] {
        assert_eq!(
            can_edit_comment(&user, &comment),
            Decision::Deny(DenyReason::NotAuthor)
        );
        assert!(!can_delete_comment(&user, &comment).is_allowed());
    }
}

#[rstest]
fn group_rules(world: World) {
    let group = &world.family;
    assert!(can_read_group(&world.bob, group).is_allowed());
    assert!(can_read_group(&world.carol, group).is_allowed());
    assert_eq!(
        can_read_group(&world.dave, group),
        Decision::Deny(DenyReason::NotMember)
    );
    assert!(can_manage_group(&world.carol, group).is_allowed());
    assert_eq!(
        can_manage_group(&world.bob, group),
        Decision::Deny(DenyReason::NotGroupOwner)
    );
    assert!(!can_delete_group(&world.bob, group).is_allowed());
    assert!(!can_add_member(&world.bob, group).is_allowed());
}

#[rstest]
fn members_may_leave_but_not_evict(world: World) {
    let group = &world.family;
    assert!(can_remove_member(&world.bob, group, &world.bob).is_allowed());
    assert!(can_remove_member(&world.carol, group, &world.bob).is_allowed());
    assert!(!can_remove_member(&world.bob, group, &world.dave).is_allowed());
}

#[rstest]
#[case(Visibility::Hidden, ErrorCode::NotFound)]
#[case(Visibility::Visible, ErrorCode::Forbidden)]
fn denials_map_by_visibility(#[case] visibility: Visibility, #[case] expected: ErrorCode) {
    let err = Decision::Deny(DenyReason::OwnerCommentBlind)
        .into_result(visibility, "item")
        .expect_err("denied");
    assert_eq!(err.code(), expected);
}

#[rstest]
fn hidden_denial_does_not_leak_reason() {
    let err = Decision::Deny(DenyReason::NotShared)
        .into_result(Visibility::Hidden, "item")
        .expect_err("denied");
    assert_eq!(err.message(), "item not found");
    assert!(err.details().is_none());
}

#[rstest]
fn visible_denial_carries_reason_code() {
    let err = Decision::Deny(DenyReason::OwnerCommentBlind)
        .into_result(Visibility::Visible, "comments")
        .expect_err("denied");
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({ "reason": "owner_comment_blind" }))
    );
}

#[rstest]
fn visibility_follows_read_decision() {
    assert_eq!(Visibility::from(Decision::Allow), Visibility::Visible);
    assert_eq!(
        Visibility::from(Decision::Deny(DenyReason::NotOwner)),
        Visibility::Hidden
    );
}
