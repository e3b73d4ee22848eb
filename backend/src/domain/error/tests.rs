//! Tests for domain error construction and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn invalid_request_constructor_sets_code() {
    let err = Error::invalid_request("bad");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "bad");
    assert!(err.details().is_none());
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
#[case(LimitKind::Lists, "lists", 100)]
#[case(LimitKind::Items, "items", 1000)]
#[case(LimitKind::Comments, "comments", 100)]
#[case(LimitKind::SharedGroups, "shared_groups", 100)]
#[case(LimitKind::GroupMembers, "group_members", 100)]
fn limit_exceeded_names_resource_and_cap(
    #[case] kind: LimitKind,
    #[case] resource: &str,
    #[case] limit: usize,
) {
    let err = Error::limit_exceeded(kind);
    assert_eq!(err.code(), ErrorCode::LimitExceeded);
    assert_eq!(
        err.details(),
        Some(&json!({ "resource": resource, "limit": limit, "code": "limit_exceeded" }))
    );
    assert!(err.message().contains(&limit.to_string()));
}

#[rstest]
fn parent_deleted_mentions_the_parent() {
    let err = Error::parent_deleted("list");
    assert_eq!(err.code(), ErrorCode::ParentDeleted);
    assert_eq!(err.message(), "the list has been deleted");
}

#[rstest]
fn serialises_without_empty_details() {
    let value = serde_json::to_value(Error::not_found("list not found")).expect("serialise");
    assert_eq!(
        value,
        json!({ "code": "not_found", "message": "list not found" })
    );
}

#[rstest]
fn deserialisation_rejects_blank_messages() {
    let payload = json!({ "code": "forbidden", "message": "  " });
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn round_trips_details() {
    let err = Error::conflict("taken").with_details(json!({ "field": "email" }));
    let value = serde_json::to_value(&err).expect("serialise");
    let decoded: Error = serde_json::from_value(value).expect("deserialise");
    assert_eq!(decoded, err);
}
