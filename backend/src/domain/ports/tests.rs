//! Port error formatting and mock wiring.
use super::*;
use crate::domain::{GroupId, Limit, LimitKind, ListId};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[case(RepositoryError::connection("refused"), "repository connection failed: refused")]
#[case(RepositoryError::query("poisoned"), "repository query failed: poisoned")]
#[case(RepositoryError::limit_exceeded(LimitKind::SharedGroups), "shared_groups limit reached")]
#[case(RepositoryError::parent_missing("list"), "parent list no longer exists")]
#[case(RepositoryError::missing("item"), "item no longer exists")]
#[case(RepositoryError::duplicate("email"), "duplicate record: email")]
fn repository_errors_render(#[case] err: RepositoryError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn limit_rejections_convert_to_repository_errors() {
    let rejected = Limit::new(LimitKind::Items)
        .admit(LimitKind::Items.max())
        .expect_err("at capacity");
    assert_eq!(
        RepositoryError::from(rejected),
        RepositoryError::LimitExceeded {
            kind: LimitKind::Items
        }
    );
}

#[rstest]
#[tokio::test]
async fn mocks_stand_in_for_trait_objects() {
    let mut mock = MockListRepository::new();
    mock.expect_share()
        .times(1)
        .returning(|_, _, _| Err(RepositoryError::parent_missing("group")));
    let repo: Arc<dyn ListRepository> = Arc::new(mock);

    let err = repo
        .share(
            &ListId::random(),
            &GroupId::random(),
            Limit::new(LimitKind::SharedGroups),
        )
        .await
        .expect_err("parent missing");
    assert_eq!(err, RepositoryError::parent_missing("group"));
}
