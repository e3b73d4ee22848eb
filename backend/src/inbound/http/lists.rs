//! Gift list HTTP handlers.
//!
//! ```text
//! GET    /api/v1/lists
//! POST   /api/v1/lists {"title":"Birthday"}
//! GET    /api/v1/lists/{list_id}
//! PUT    /api/v1/lists/{list_id} {"title":"Birthday 2025"}
//! DELETE /api/v1/lists/{list_id}
//! GET    /api/v1/lists/{list_id}/groups
//! PUT    /api/v1/lists/{list_id}/groups/{group_id}
//! DELETE /api/v1/lists/{list_id}/groups/{group_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ListRole, ListView};
use crate::domain::{GiftList, GroupId, ListId, ListTitle};
use crate::inbound::http::ApiResult;
use crate::inbound::http::groups::GroupResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

pub(crate) const LIST_ID: FieldName = FieldName::new("listId");
const GROUP_ID: FieldName = FieldName::new("groupId");

/// Request body for creating or renaming a list.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    #[schema(example = "Birthday")]
    pub title: String,
}

/// A list as seen by the requester.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    /// `owner` or `viewer`.
    #[schema(example = "owner")]
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

fn role_label(role: ListRole) -> &'static str {
    match role {
        ListRole::Owner => "owner",
        ListRole::Viewer => "viewer",
    }
}

impl ListResponse {
    fn new(list: &GiftList, role: ListRole) -> Self {
        Self {
            id: list.id().to_string(),
            owner_id: list.owner_id().to_string(),
            title: list.title().as_str().to_owned(),
            role: role_label(role).to_owned(),
            created_at: list.created_at().to_rfc3339(),
            updated_at: list.updated_at().to_rfc3339(),
        }
    }

    fn owned(list: &GiftList) -> Self {
        Self::new(list, ListRole::Owner)
    }
}

impl From<ListView> for ListResponse {
    fn from(value: ListView) -> Self {
        Self::new(&value.list, value.role)
    }
}

/// Whether a share call changed anything.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    /// `false` when the list was already shared with the group.
    pub shared: bool,
}

/// Lists owned by or shared with the requester, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/lists",
    responses(
        (status = 200, description = "Visible lists", body = [ListResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "listLists"
)]
#[get("/lists")]
pub async fn visible_lists(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ListResponse>>> {
    let user_id = session.require_user_id()?;
    let views = state.lists_query.visible_lists(&user_id).await?;
    Ok(web::Json(views.into_iter().map(ListResponse::from).collect()))
}

/// Create a list owned by the requester.
#[utoipa::path(
    post,
    path = "/api/v1/lists",
    request_body = ListRequest,
    responses(
        (status = 201, description = "List created", body = ListResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 422, description = "List limit reached", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "createList"
)]
#[post("/lists")]
pub async fn create_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ListRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let title = ListTitle::new(&payload.title)?;
    let list = state.lists.create_list(&user_id, title).await?;
    Ok(HttpResponse::Created().json(ListResponse::owned(&list)))
}

/// Fetch one readable list.
#[utoipa::path(
    get,
    path = "/api/v1/lists/{list_id}",
    params(("list_id" = String, Path, description = "List identifier")),
    responses(
        (status = 200, description = "List", body = ListResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "getList"
)]
#[get("/lists/{list_id}")]
pub async fn get_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListResponse>> {
    let user_id = session.require_user_id()?;
    let list_id: ListId = parse_id(&path, LIST_ID)?;
    let view = state.lists_query.get_list(&user_id, &list_id).await?;
    Ok(web::Json(ListResponse::from(view)))
}

/// Rename a list. Owner only.
#[utoipa::path(
    put,
    path = "/api/v1/lists/{list_id}",
    params(("list_id" = String, Path, description = "List identifier")),
    request_body = ListRequest,
    responses(
        (status = 200, description = "Renamed list", body = ListResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "renameList"
)]
#[put("/lists/{list_id}")]
pub async fn rename_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ListRequest>,
) -> ApiResult<web::Json<ListResponse>> {
    let user_id = session.require_user_id()?;
    let list_id: ListId = parse_id(&path, LIST_ID)?;
    let title = ListTitle::new(&payload.title)?;
    let list = state.lists.rename_list(&user_id, &list_id, title).await?;
    Ok(web::Json(ListResponse::owned(&list)))
}

/// Delete a list with its items, comments and sharing edges. Owner only.
#[utoipa::path(
    delete,
    path = "/api/v1/lists/{list_id}",
    params(("list_id" = String, Path, description = "List identifier")),
    responses(
        (status = 204, description = "List deleted"),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "deleteList"
)]
#[delete("/lists/{list_id}")]
pub async fn delete_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let list_id: ListId = parse_id(&path, LIST_ID)?;
    state.lists.delete_list(&user_id, &list_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Groups the list is shared with, filtered to the requester's view.
#[utoipa::path(
    get,
    path = "/api/v1/lists/{list_id}/groups",
    params(("list_id" = String, Path, description = "List identifier")),
    responses(
        (status = 200, description = "Sharing groups", body = [GroupResponse]),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "listSharedGroups"
)]
#[get("/lists/{list_id}/groups")]
pub async fn shared_groups(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<GroupResponse>>> {
    let user_id = session.require_user_id()?;
    let list_id: ListId = parse_id(&path, LIST_ID)?;
    let groups = state.lists_query.shared_groups(&user_id, &list_id).await?;
    Ok(web::Json(groups.into_iter().map(GroupResponse::from).collect()))
}

fn share_path(path: &(String, String)) -> ApiResult<(ListId, GroupId)> {
    Ok((parse_id(&path.0, LIST_ID)?, parse_id(&path.1, GROUP_ID)?))
}

/// Share a list with a group the owner can see. Idempotent.
#[utoipa::path(
    put,
    path = "/api/v1/lists/{list_id}/groups/{group_id}",
    params(
        ("list_id" = String, Path, description = "List identifier"),
        ("group_id" = String, Path, description = "Group identifier")
    ),
    responses(
        (status = 200, description = "List shared", body = ShareResponse),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Group deleted concurrently", body = ErrorSchema),
        (status = 422, description = "Share limit reached", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "shareList"
)]
#[put("/lists/{list_id}/groups/{group_id}")]
pub async fn share_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<ShareResponse>> {
    let user_id = session.require_user_id()?;
    let (list_id, group_id) = share_path(&path)?;
    let shared = state
        .lists
        .share_list(&user_id, &list_id, &group_id)
        .await?;
    Ok(web::Json(ShareResponse { shared }))
}

/// Stop sharing a list with a group. Idempotent.
#[utoipa::path(
    delete,
    path = "/api/v1/lists/{list_id}/groups/{group_id}",
    params(
        ("list_id" = String, Path, description = "List identifier"),
        ("group_id" = String, Path, description = "Group identifier")
    ),
    responses(
        (status = 204, description = "List no longer shared with the group"),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "unshareList"
)]
#[delete("/lists/{list_id}/groups/{group_id}")]
pub async fn unshare_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let (list_id, group_id) = share_path(&path)?;
    state
        .lists
        .unshare_list(&user_id, &list_id, &group_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
