//! Access and limit properties exercised through the services over the
//! in-memory store.

use rstest::{fixture, rstest};
use serde_json::json;
use wishlist::domain::ports::{
    AccountsCommand, ActivationRequest, CommentRepository, CommentsCommand, CommentsQuery,
    GroupsCommand, GroupsQuery, ItemRepository, ItemsCommand, ItemsQuery, ListRepository,
    ListsCommand, ListsQuery, UserRepository,
};
use wishlist::domain::{
    CommentText, DisplayName, Email, Error, ErrorCode, GiftList, Item, ItemContent, ItemId,
    ItemTitle, Limit, LimitKind, ListTitle, LoginCredentials, Password, UserId,
};
use wishlist::test_support::clock::fixture_timestamp;
use wishlist::test_support::services::Services;

#[fixture]
fn services() -> Services {
    Services::new()
}

fn title(raw: &str) -> ListTitle {
    ListTitle::new(raw).expect("valid title")
}

fn bike() -> ItemContent {
    ItemContent::titled(ItemTitle::new("Bike").expect("valid title"))
}

fn comment(raw: &str) -> CommentText {
    CommentText::new(raw).expect("valid comment")
}

async fn shared_list(services: &Services, owner: &UserId, member_email: &str) -> (GiftList, UserId) {
    let group = services.group_named(owner, "Family").await;
    let member = services.join(owner, &group, member_email).await;
    let list = services
        .lists
        .create_list(owner, title("Birthday"))
        .await
        .expect("list created");
    services
        .lists
        .share_list(owner, list.id(), &group)
        .await
        .expect("shared");
    (list, member)
}

#[rstest]
#[tokio::test]
async fn the_hundred_and_first_list_is_refused(services: Services) {
    let owner = UserId::random();
    for n in 0..LimitKind::Lists.max() {
        services
            .lists
            .create_list(&owner, title(&format!("List {n}")))
            .await
            .expect("within the cap");
    }

    let err = services
        .lists
        .create_list(&owner, title("One too many"))
        .await
        .expect_err("over the cap");
    assert_eq!(err.code(), ErrorCode::LimitExceeded);
    assert_eq!(
        err.details(),
        Some(&json!({ "resource": "lists", "limit": 100, "code": "limit_exceeded" }))
    );

    // The cap is per owner.
    services
        .lists
        .create_list(&UserId::random(), title("Someone else's"))
        .await
        .expect("other owners are unaffected");
}

#[rstest]
#[tokio::test]
async fn the_hundred_and_first_comment_is_refused(services: Services) {
    let owner = UserId::random();
    let (list, member) = shared_list(&services, &owner, "bob@example.com").await;
    let item = services
        .items
        .create_item(&owner, list.id(), bike())
        .await
        .expect("item created");

    for n in 0..LimitKind::Comments.max() {
        services
            .comments
            .create_comment(&member, item.id(), comment(&format!("note {n}")))
            .await
            .expect("within the cap");
    }
    let err = services
        .comments
        .create_comment(&member, item.id(), comment("one more"))
        .await
        .expect_err("over the cap");
    assert_eq!(err.code(), ErrorCode::LimitExceeded);
}

#[rstest]
#[tokio::test]
async fn full_groups_refuse_new_members(services: Services) {
    let owner = UserId::random();
    let group = services.group_named(&owner, "Crowd").await;
    for n in 0..LimitKind::GroupMembers.max() {
        services
            .join(&owner, &group, &format!("guest{n}@example.com"))
            .await;
    }

    let err = services
        .groups
        .add_member(
            &owner,
            &group,
            Email::new("late@example.com").expect("valid email"),
        )
        .await
        .expect_err("group full");
    assert_eq!(err.code(), ErrorCode::LimitExceeded);
    let late = services
        .store
        .find_by_email(&Email::new("late@example.com").expect("valid email"))
        .await
        .expect("lookup");
    assert!(late.is_none(), "no pending user for a refused invite");
}

#[rstest]
#[tokio::test]
async fn deleting_a_group_revokes_access_but_keeps_the_list(services: Services) {
    let owner = UserId::random();
    let (list, member) = shared_list(&services, &owner, "bob@example.com").await;
    let item = services
        .items
        .create_item(&owner, list.id(), bike())
        .await
        .expect("item created");
    services
        .comments
        .create_comment(&member, item.id(), comment("I'll get this"))
        .await
        .expect("member comments");
    let group = *services
        .lists
        .shared_groups(&owner, list.id())
        .await
        .expect("owner sees shares")
        .first()
        .expect("one share")
        .id();

    services
        .groups
        .delete_group(&owner, &group)
        .await
        .expect("owner deletes group");

    let err = services
        .lists
        .get_list(&member, list.id())
        .await
        .expect_err("access revoked");
    assert_eq!(err.code(), ErrorCode::NotFound);
    services
        .lists
        .rename_list(&owner, list.id(), title("Still mine"))
        .await
        .expect("owner keeps write authority");
    let items = services
        .items
        .list_items(&owner, list.id())
        .await
        .expect("items remain");
    assert_eq!(items.len(), 1);
    assert_eq!(
        services.store.count_by_item(item.id()).await.expect("count"),
        1,
        "comments remain"
    );
}

#[rstest]
#[tokio::test]
async fn deleting_a_list_removes_items_comments_and_shares(services: Services) {
    let owner = UserId::random();
    let (list, member) = shared_list(&services, &owner, "bob@example.com").await;
    let item = services
        .items
        .create_item(&owner, list.id(), bike())
        .await
        .expect("item created");
    services
        .comments
        .create_comment(&member, item.id(), comment("I'll get this"))
        .await
        .expect("member comments");

    services
        .lists
        .delete_list(&owner, list.id())
        .await
        .expect("owner deletes list");

    let err = services
        .items
        .get_item(&owner, item.id())
        .await
        .expect_err("item gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(
        services.store.count_by_item(item.id()).await.expect("count"),
        0
    );
    assert!(
        services
            .lists
            .visible_lists(&member)
            .await
            .expect("listing")
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn resharing_is_idempotent(services: Services) {
    let owner = UserId::random();
    let group = services.group_named(&owner, "Family").await;
    let list = services
        .lists
        .create_list(&owner, title("Birthday"))
        .await
        .expect("list created");

    let first = services
        .lists
        .share_list(&owner, list.id(), &group)
        .await
        .expect("shared");
    let second = services
        .lists
        .share_list(&owner, list.id(), &group)
        .await
        .expect("shared again");

    assert!(first);
    assert!(!second);
    assert_eq!(
        services
            .store
            .count_shared_groups(list.id())
            .await
            .expect("count"),
        1
    );
}

#[rstest]
#[tokio::test]
async fn strangers_cannot_tell_hidden_from_missing(services: Services) {
    let owner = UserId::random();
    let stranger = UserId::random();
    let list = services
        .lists
        .create_list(&owner, title("Birthday"))
        .await
        .expect("list created");
    let item = services
        .items
        .create_item(&owner, list.id(), bike())
        .await
        .expect("item created");

    let hidden = services
        .items
        .get_item(&stranger, item.id())
        .await
        .expect_err("hidden");
    let missing = services
        .items
        .get_item(&stranger, &ItemId::random())
        .await
        .expect_err("missing");
    assert_eq!(hidden, missing);

    let hidden = services
        .comments
        .list_comments(&stranger, item.id())
        .await
        .expect_err("hidden");
    assert_eq!(hidden.code(), ErrorCode::NotFound);
    assert_eq!(hidden.message(), "item not found");
}

#[rstest]
#[tokio::test]
async fn writes_under_a_deleted_list_report_the_parent(services: Services) {
    let owner = UserId::random();
    let list = services
        .lists
        .create_list(&owner, title("Birthday"))
        .await
        .expect("list created");
    ListRepository::delete(services.store.as_ref(), list.id())
        .await
        .expect("deleted");

    let orphan = Item::new(ItemId::random(), *list.id(), bike(), fixture_timestamp());
    let err: Error = ItemRepository::insert(
        services.store.as_ref(),
        &orphan,
        Limit::new(LimitKind::Items),
    )
    .await
    .expect_err("parent gone")
    .into();
    assert_eq!(err.code(), ErrorCode::ParentDeleted);
}

#[rstest]
#[tokio::test]
async fn lists_reached_through_two_groups_appear_once(services: Services) {
    let owner = UserId::random();
    let family = services.group_named(&owner, "Family").await;
    let friends = services.group_named(&owner, "Friends").await;
    let member = services.join(&owner, &family, "bob@example.com").await;
    services.join(&owner, &friends, "bob@example.com").await;
    let list = services
        .lists
        .create_list(&owner, title("Birthday"))
        .await
        .expect("list created");
    for group in [family, friends] {
        services
            .lists
            .share_list(&owner, list.id(), &group)
            .await
            .expect("shared");
    }

    let visible = services
        .lists
        .visible_lists(&member)
        .await
        .expect("listing");
    assert_eq!(visible.len(), 1);
    assert_eq!(
        services
            .groups
            .groups_for_user(&member)
            .await
            .expect("groups")
            .len(),
        2
    );
}

#[rstest]
#[tokio::test]
async fn invited_members_activate_and_log_in(services: Services) {
    let owner = UserId::random();
    let group = services.group_named(&owner, "Family").await;
    let member = services.join(&owner, &group, "Bob@Example.com").await;
    let email = Email::new("bob@example.com").expect("valid email");
    let token = services.notifier.token_for(&email).expect("invitation sent");

    let user = services
        .accounts
        .activate(ActivationRequest {
            token,
            display_name: DisplayName::new("Bob").expect("valid name"),
            password: Password::new("correct horse").expect("valid password"),
        })
        .await
        .expect("activation succeeds");
    assert_eq!(user.id(), &member);

    let credentials = LoginCredentials::try_from_parts("bob@example.com", "correct horse")
        .expect("valid shape");
    let logged_in = services
        .accounts
        .authenticate(&credentials)
        .await
        .expect("login succeeds");
    assert_eq!(logged_in, member);

    let registered = services
        .accounts
        .register(email)
        .await
        .expect_err("email already held by the invite");
    assert_eq!(registered.code(), ErrorCode::Conflict);
}
