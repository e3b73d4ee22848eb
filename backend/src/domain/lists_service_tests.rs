//! Tests for the lists service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockGroupRepository, MockListRepository, RepositoryError};
use crate::domain::{ErrorCode, GroupDetails, GroupName};
use crate::test_support::clock::{SteppingClock, fixture_timestamp};
use chrono::TimeDelta;
use rstest::rstest;

struct Cast {
    owner: UserId,
    member: UserId,
    stranger: UserId,
    group: Group,
    list: GiftList,
}

fn cast() -> Cast {
    let owner = UserId::random();
    let member = UserId::random();
    let mut group = Group::new(
        GroupId::random(),
        UserId::random(),
        GroupDetails::named(GroupName::new("Family").expect("valid name")),
        fixture_timestamp(),
    );
    group.add_member(member);
    let list = GiftList::new(
        ListId::random(),
        owner,
        ListTitle::new("Birthday").expect("valid title"),
        fixture_timestamp(),
    );
    Cast {
        owner,
        member,
        stranger: UserId::random(),
        group,
        list,
    }
}

fn shared_snapshot(cast: &Cast) -> ListSnapshot {
    ListSnapshot {
        list: cast.list.clone(),
        shared_with: vec![cast.group.clone()],
    }
}

fn make_service(
    lists: MockListRepository,
    groups: MockGroupRepository,
) -> ListsService<MockListRepository, MockGroupRepository> {
    ListsService::new(
        Arc::new(lists),
        Arc::new(groups),
        Arc::new(SteppingClock::from_fixture()),
    )
}

fn title(raw: &str) -> ListTitle {
    ListTitle::new(raw).expect("valid title")
}

#[rstest]
#[tokio::test]
async fn create_list_applies_the_list_cap() {
    let mut lists = MockListRepository::new();
    lists
        .expect_insert()
        .withf(|_, limit| limit.kind() == LimitKind::Lists)
        .times(1)
        .return_once(|_, _| Err(RepositoryError::limit_exceeded(LimitKind::Lists)));
    let service = make_service(lists, MockGroupRepository::new());

    let err = service
        .create_list(&UserId::random(), title("Birthday"))
        .await
        .expect_err("cap reached");
    assert_eq!(err.code(), ErrorCode::LimitExceeded);
    assert_eq!(
        err.details()
            .and_then(|details| details.get("resource"))
            .and_then(serde_json::Value::as_str),
        Some("lists")
    );
}

#[rstest]
#[tokio::test]
async fn rename_by_owner_updates_title_and_timestamp() {
    let cast = cast();
    let snapshot = shared_snapshot(&cast);
    let mut lists = MockListRepository::new();
    lists
        .expect_find_snapshot()
        .return_once(move |_| Ok(Some(snapshot)));
    lists
        .expect_update()
        .withf(|list| list.title().as_str() == "Christmas")
        .times(1)
        .return_once(|_| Ok(()));
    let service = make_service(lists, MockGroupRepository::new());

    let renamed = service
        .rename_list(&cast.owner, cast.list.id(), title("Christmas"))
        .await
        .expect("owner may rename");
    assert_eq!(renamed.title().as_str(), "Christmas");
    assert!(renamed.updated_at() >= cast.list.created_at());
}

#[rstest]
#[case::member(true, ErrorCode::Forbidden)]
#[case::stranger(false, ErrorCode::NotFound)]
#[tokio::test]
async fn rename_by_non_owner_is_refused(#[case] as_member: bool, #[case] expected: ErrorCode) {
    let cast = cast();
    let requester = if as_member { cast.member } else { cast.stranger };
    let snapshot = shared_snapshot(&cast);
    let mut lists = MockListRepository::new();
    lists
        .expect_find_snapshot()
        .return_once(move |_| Ok(Some(snapshot)));
    lists.expect_update().never();
    let service = make_service(lists, MockGroupRepository::new());

    let err = service
        .rename_list(&requester, cast.list.id(), title("Mine now"))
        .await
        .expect_err("not the owner");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn sharing_with_an_unreadable_group_reads_as_missing() {
    let cast = cast();
    let snapshot = shared_snapshot(&cast);
    let foreign = Group::new(
        GroupId::random(),
        UserId::random(),
        GroupDetails::named(GroupName::new("Strangers").expect("valid name")),
        fixture_timestamp(),
    );
    let foreign_id = *foreign.id();
    let mut lists = MockListRepository::new();
    lists
        .expect_find_snapshot()
        .return_once(move |_| Ok(Some(snapshot)));
    lists.expect_share().never();
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(foreign)));
    let service = make_service(lists, groups);

    let err = service
        .share_list(&cast.owner, cast.list.id(), &foreign_id)
        .await
        .expect_err("group hidden");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "group not found");
}

#[rstest]
#[tokio::test]
async fn sharing_after_the_group_vanished_reports_parent_deleted() {
    let mut cast = cast();
    let owned_group = Group::new(
        GroupId::random(),
        cast.owner,
        GroupDetails::named(GroupName::new("Friends").expect("valid name")),
        fixture_timestamp(),
    );
    let group_id = *owned_group.id();
    cast.group = owned_group.clone();
    let snapshot = shared_snapshot(&cast);
    let mut lists = MockListRepository::new();
    lists
        .expect_find_snapshot()
        .return_once(move |_| Ok(Some(snapshot)));
    lists
        .expect_share()
        .withf(|_, _, limit| limit.kind() == LimitKind::SharedGroups)
        .return_once(|_, _, _| Err(RepositoryError::parent_missing("group")));
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(owned_group)));
    let service = make_service(lists, groups);

    let err = service
        .share_list(&cast.owner, cast.list.id(), &group_id)
        .await
        .expect_err("group deleted concurrently");
    assert_eq!(err.code(), ErrorCode::ParentDeleted);
}

#[rstest]
#[tokio::test]
async fn visible_lists_deduplicate_and_sort_by_creation() {
    let cast = cast();
    let requester = cast.owner;
    let own = cast.list.clone();
    let older_shared = GiftList::new(
        ListId::random(),
        UserId::random(),
        title("Wedding"),
        fixture_timestamp() - TimeDelta::days(1),
    );
    let group_a = Group::new(
        GroupId::random(),
        requester,
        GroupDetails::named(GroupName::new("A").expect("valid name")),
        fixture_timestamp(),
    );
    let group_b = Group::new(
        GroupId::random(),
        requester,
        GroupDetails::named(GroupName::new("B").expect("valid name")),
        fixture_timestamp(),
    );

    let mut lists = MockListRepository::new();
    let owned = vec![own.clone()];
    lists
        .expect_find_by_owner()
        .return_once(move |_| Ok(owned));
    let shared = vec![older_shared.clone(), own.clone(), older_shared.clone()];
    lists
        .expect_find_shared_with()
        .withf(|ids| ids.len() == 2)
        .return_once(move |_| Ok(shared));
    let mut groups = MockGroupRepository::new();
    groups
        .expect_find_for_user()
        .return_once(move |_| Ok(vec![group_a, group_b]));
    let service = make_service(lists, groups);

    let views = service
        .visible_lists(&requester)
        .await
        .expect("lists resolve");
    let ids: Vec<ListId> = views.iter().map(|view| *view.list.id()).collect();
    assert_eq!(ids, vec![*older_shared.id(), *own.id()]);
    assert_eq!(views.first().map(|view| view.role), Some(ListRole::Viewer));
    assert_eq!(views.get(1).map(|view| view.role), Some(ListRole::Owner));
}

#[rstest]
#[tokio::test]
async fn users_without_groups_skip_the_shared_lookup() {
    let mut lists = MockListRepository::new();
    lists.expect_find_by_owner().return_once(|_| Ok(Vec::new()));
    lists.expect_find_shared_with().never();
    let mut groups = MockGroupRepository::new();
    groups.expect_find_for_user().return_once(|_| Ok(Vec::new()));
    let service = make_service(lists, groups);

    let views = service
        .visible_lists(&UserId::random())
        .await
        .expect("lists resolve");
    assert!(views.is_empty());
}

#[rstest]
#[tokio::test]
async fn viewers_only_see_their_own_sharing_groups() {
    let cast = cast();
    let unrelated = Group::new(
        GroupId::random(),
        cast.owner,
        GroupDetails::named(GroupName::new("Work").expect("valid name")),
        fixture_timestamp(),
    );
    let snapshot = ListSnapshot {
        list: cast.list.clone(),
        shared_with: vec![cast.group.clone(), unrelated],
    };
    let owner_snapshot = snapshot.clone();
    let mut lists = MockListRepository::new();
    let mut calls = vec![owner_snapshot, snapshot];
    lists
        .expect_find_snapshot()
        .times(2)
        .returning(move |_| Ok(calls.pop()));
    let service = make_service(lists, MockGroupRepository::new());

    let viewer_groups = service
        .shared_groups(&cast.member, cast.list.id())
        .await
        .expect("member can read");
    assert_eq!(viewer_groups.len(), 1);
    let owner_groups = service
        .shared_groups(&cast.owner, cast.list.id())
        .await
        .expect("owner can read");
    assert_eq!(owner_groups.len(), 2);
}

#[rstest]
#[tokio::test]
async fn store_outages_surface_as_service_unavailable() {
    let mut lists = MockListRepository::new();
    lists
        .expect_find_snapshot()
        .return_once(|_| Err(RepositoryError::connection("refused")));
    let service = make_service(lists, MockGroupRepository::new());

    let err = service
        .get_list(&UserId::random(), &ListId::random())
        .await
        .expect_err("store down");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn deleting_a_list_that_vanished_reads_as_missing() {
    let cast = cast();
    let snapshot = shared_snapshot(&cast);
    let mut lists = MockListRepository::new();
    lists
        .expect_find_snapshot()
        .return_once(move |_| Ok(Some(snapshot)));
    lists.expect_delete().return_once(|_| Ok(false));
    let service = make_service(lists, MockGroupRepository::new());

    let err = service
        .delete_list(&cast.owner, cast.list.id())
        .await
        .expect_err("already gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
