//! Tests for the comments service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MockCommentRepository, MockItemRepository, MockListRepository, RepositoryError,
};
use crate::domain::{
    ErrorCode, GiftList, Group, GroupDetails, GroupId, GroupName, ItemContent, ItemTitle, ListId,
    ListTitle,
};
use crate::test_support::clock::{SteppingClock, fixture_timestamp};
use rstest::{fixture, rstest};

/// Alice owns the list; the Family group (owner Carol, member Bob) can see it.
struct Cast {
    alice: UserId,
    bob: UserId,
    carol: UserId,
    snapshot: ListSnapshot,
    item: Item,
}

#[fixture]
fn cast() -> Cast {
    let alice = UserId::random();
    let bob = UserId::random();
    let carol = UserId::random();
    let mut family = Group::new(
        GroupId::random(),
        carol,
        GroupDetails::named(GroupName::new("Family").expect("valid name")),
        fixture_timestamp(),
    );
    family.add_member(bob);
    let list = GiftList::new(
        ListId::random(),
        alice,
        ListTitle::new("Birthday").expect("valid title"),
        fixture_timestamp(),
    );
    let item = Item::new(
        ItemId::random(),
        *list.id(),
        ItemContent::titled(ItemTitle::new("Bike").expect("valid title")),
        fixture_timestamp(),
    );
    Cast {
        alice,
        bob,
        carol,
        snapshot: ListSnapshot {
            list,
            shared_with: vec![family],
        },
        item,
    }
}

impl Cast {
    fn comment_by(&self, author: UserId) -> Comment {
        Comment::new(
            CommentId::random(),
            *self.item.id(),
            author,
            text("I'll get this"),
            fixture_timestamp(),
        )
    }
}

fn text(raw: &str) -> CommentText {
    CommentText::new(raw).expect("valid text")
}

struct Stores {
    lists: MockListRepository,
    items: MockItemRepository,
    comments: MockCommentRepository,
}

impl Stores {
    fn with_item(cast: &Cast) -> Self {
        let snapshot = cast.snapshot.clone();
        let mut lists = MockListRepository::new();
        lists
            .expect_find_snapshot()
            .returning(move |_| Ok(Some(snapshot.clone())));
        let item = cast.item.clone();
        let mut items = MockItemRepository::new();
        items
            .expect_find_by_id()
            .returning(move |_| Ok(Some(item.clone())));
        Self {
            lists,
            items,
            comments: MockCommentRepository::new(),
        }
    }

    fn with_comment(cast: &Cast, comment: Comment) -> Self {
        let mut stores = Self::with_item(cast);
        stores
            .comments
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(comment)));
        stores
    }

    fn service(
        self,
    ) -> CommentsService<MockListRepository, MockItemRepository, MockCommentRepository> {
        CommentsService::new(
            Arc::new(self.lists),
            Arc::new(self.items),
            Arc::new(self.comments),
            Arc::new(SteppingClock::from_fixture()),
        )
    }
}

#[rstest]
#[tokio::test]
async fn owner_listing_comments_is_forbidden(cast: Cast) {
    let mut stores = Stores::with_item(&cast);
    stores.comments.expect_find_by_item().never();
    let service = stores.service();

    let err = service
        .list_comments(&cast.alice, cast.item.id())
        .await
        .expect_err("owners are blind");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({ "reason": "owner_comment_blind" }))
    );
}

#[rstest]
#[tokio::test]
async fn strangers_listing_comments_see_nothing(cast: Cast) {
    let service = Stores::with_item(&cast).service();

    let err = service
        .list_comments(&UserId::random(), cast.item.id())
        .await
        .expect_err("item hidden");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "item not found");
}

#[rstest]
#[tokio::test]
async fn members_read_comments(cast: Cast) {
    let mut stores = Stores::with_item(&cast);
    let thread = vec![cast.comment_by(cast.bob)];
    let expected = thread.clone();
    stores
        .comments
        .expect_find_by_item()
        .return_once(move |_| Ok(thread));
    let service = stores.service();

    let listed = service
        .list_comments(&cast.carol, cast.item.id())
        .await
        .expect("group owner can read");
    assert_eq!(listed, expected);
}

#[rstest]
#[tokio::test]
async fn members_comment_under_the_comment_cap(cast: Cast) {
    let mut stores = Stores::with_item(&cast);
    stores
        .comments
        .expect_insert()
        .withf(|_, limit| limit.kind() == LimitKind::Comments)
        .times(1)
        .return_once(|_, _| Ok(()));
    let service = stores.service();

    let comment = service
        .create_comment(&cast.bob, cast.item.id(), text("I'll get this"))
        .await
        .expect("member may comment");
    assert!(comment.is_author(&cast.bob));
    assert_eq!(comment.item_id(), cast.item.id());
}

#[rstest]
#[tokio::test]
async fn owner_cannot_comment(cast: Cast) {
    let mut stores = Stores::with_item(&cast);
    stores.comments.expect_insert().never();
    let service = stores.service();

    let err = service
        .create_comment(&cast.alice, cast.item.id(), text("Hint hint"))
        .await
        .expect_err("owners are blind");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn comment_cap_is_reported(cast: Cast) {
    let mut stores = Stores::with_item(&cast);
    stores
        .comments
        .expect_insert()
        .return_once(|_, _| Err(RepositoryError::limit_exceeded(LimitKind::Comments)));
    let service = stores.service();

    let err = service
        .create_comment(&cast.bob, cast.item.id(), text("One too many"))
        .await
        .expect_err("cap reached");
    assert_eq!(err.code(), ErrorCode::LimitExceeded);
}

#[rstest]
#[tokio::test]
async fn commenting_on_a_vanished_item_reports_parent_deleted(cast: Cast) {
    let mut stores = Stores::with_item(&cast);
    stores
        .comments
        .expect_insert()
        .return_once(|_, _| Err(RepositoryError::parent_missing("item")));
    let service = stores.service();

    let err = service
        .create_comment(&cast.bob, cast.item.id(), text("Too late"))
        .await
        .expect_err("item deleted concurrently");
    assert_eq!(err.code(), ErrorCode::ParentDeleted);
}

#[rstest]
#[tokio::test]
async fn authors_edit_their_comments(cast: Cast) {
    let comment = cast.comment_by(cast.bob);
    let mut stores = Stores::with_comment(&cast, comment.clone());
    stores
        .comments
        .expect_update()
        .withf(|comment| comment.text().as_str() == "Actually, Carol has it")
        .times(1)
        .return_once(|_| Ok(()));
    let service = stores.service();

    let edited = service
        .edit_comment(&cast.bob, comment.id(), text("Actually, Carol has it"))
        .await
        .expect("author may edit");
    assert_eq!(edited.text().as_str(), "Actually, Carol has it");
}

#[rstest]
#[tokio::test]
async fn fellow_members_cannot_edit_others_comments(cast: Cast) {
    let comment = cast.comment_by(cast.bob);
    let mut stores = Stores::with_comment(&cast, comment.clone());
    stores.comments.expect_update().never();
    let service = stores.service();

    let err = service
        .edit_comment(&cast.carol, comment.id(), text("Edited"))
        .await
        .expect_err("not the author");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn owner_cannot_learn_comments_exist(cast: Cast) {
    let comment = cast.comment_by(cast.bob);
    let mut stores = Stores::with_comment(&cast, comment.clone());
    stores.comments.expect_delete().never();
    let service = stores.service();

    let err = service
        .delete_comment(&cast.alice, comment.id())
        .await
        .expect_err("owner is blind");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
