//! Group and membership HTTP handlers.
//!
//! ```text
//! GET    /api/v1/groups
//! POST   /api/v1/groups {"name":"Family","description":"…"}
//! GET    /api/v1/groups/{group_id}
//! PUT    /api/v1/groups/{group_id} {"name":"Family"}
//! DELETE /api/v1/groups/{group_id}
//! POST   /api/v1/groups/{group_id}/members {"email":"bob@example.com"}
//! DELETE /api/v1/groups/{group_id}/members/{user_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::MemberAdded;
use crate::domain::{
    Email, Error, Group, GroupDescription, GroupDetails, GroupId, GroupName, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const GROUP_ID: FieldName = FieldName::new("groupId");
const USER_ID: FieldName = FieldName::new("userId");

/// Request body for creating or replacing a group.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupRequest {
    #[schema(example = "Family")]
    pub name: String,
    pub description: Option<String>,
}

impl TryFrom<GroupRequest> for GroupDetails {
    type Error = Error;

    fn try_from(value: GroupRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: GroupName::new(&value.name)?,
            description: GroupDescription::optional(value.description.as_deref())?,
        })
    }
}

/// A group and its membership.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Member ids; the owner is listed only when explicitly added.
    pub members: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Group> for GroupResponse {
    fn from(value: Group) -> Self {
        Self {
            id: value.id().to_string(),
            owner_id: value.owner_id().to_string(),
            name: value.name().as_str().to_owned(),
            description: value.description().map(|text| text.as_str().to_owned()),
            members: value.members().iter().map(ToString::to_string).collect(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

/// Request body for adding a member by email.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    #[schema(example = "bob@example.com")]
    pub email: String,
}

/// Outcome of adding a member.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberAddedResponse {
    pub user_id: String,
    pub email: String,
    /// A pending user was created and an invitation sent.
    pub invited: bool,
    /// `false` when the user already belonged to the group.
    pub added: bool,
}

impl From<MemberAdded> for MemberAddedResponse {
    fn from(value: MemberAdded) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            email: value.email.to_string(),
            invited: value.invited,
            added: value.added,
        }
    }
}

/// Groups the requester owns or belongs to.
#[utoipa::path(
    get,
    path = "/api/v1/groups",
    responses(
        (status = 200, description = "Groups", body = [GroupResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "listGroups"
)]
#[get("/groups")]
pub async fn list_groups(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<GroupResponse>>> {
    let user_id = session.require_user_id()?;
    let groups = state.groups_query.groups_for_user(&user_id).await?;
    Ok(web::Json(groups.into_iter().map(GroupResponse::from).collect()))
}

/// Create a group owned by the requester.
#[utoipa::path(
    post,
    path = "/api/v1/groups",
    request_body = GroupRequest,
    responses(
        (status = 201, description = "Group created", body = GroupResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "createGroup"
)]
#[post("/groups")]
pub async fn create_group(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GroupRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let details = GroupDetails::try_from(payload.into_inner())?;
    let group = state.groups.create_group(&user_id, details).await?;
    Ok(HttpResponse::Created().json(GroupResponse::from(group)))
}

/// Fetch a group the requester owns or belongs to.
#[utoipa::path(
    get,
    path = "/api/v1/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group identifier")),
    responses(
        (status = 200, description = "Group", body = GroupResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "getGroup"
)]
#[get("/groups/{group_id}")]
pub async fn get_group(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<GroupResponse>> {
    let user_id = session.require_user_id()?;
    let group_id: GroupId = parse_id(&path, GROUP_ID)?;
    let group = state.groups_query.get_group(&user_id, &group_id).await?;
    Ok(web::Json(GroupResponse::from(group)))
}

/// Replace a group's name and description. Owner only.
#[utoipa::path(
    put,
    path = "/api/v1/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group identifier")),
    request_body = GroupRequest,
    responses(
        (status = 200, description = "Updated group", body = GroupResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "updateGroup"
)]
#[put("/groups/{group_id}")]
pub async fn update_group(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<GroupRequest>,
) -> ApiResult<web::Json<GroupResponse>> {
    let user_id = session.require_user_id()?;
    let group_id: GroupId = parse_id(&path, GROUP_ID)?;
    let details = GroupDetails::try_from(payload.into_inner())?;
    let group = state
        .groups
        .update_group(&user_id, &group_id, details)
        .await?;
    Ok(web::Json(GroupResponse::from(group)))
}

/// Delete a group and every list share pointing at it. Owner only.
#[utoipa::path(
    delete,
    path = "/api/v1/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group identifier")),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "deleteGroup"
)]
#[delete("/groups/{group_id}")]
pub async fn delete_group(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let group_id: GroupId = parse_id(&path, GROUP_ID)?;
    state.groups.delete_group(&user_id, &group_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Add a member by email, inviting addresses without an account.
#[utoipa::path(
    post,
    path = "/api/v1/groups/{group_id}/members",
    params(("group_id" = String, Path, description = "Group identifier")),
    request_body = MemberRequest,
    responses(
        (status = 201, description = "Member added", body = MemberAddedResponse),
        (status = 200, description = "Already a member", body = MemberAddedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 422, description = "Member limit reached", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "addMember"
)]
#[post("/groups/{group_id}/members")]
pub async fn add_member(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<MemberRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let group_id: GroupId = parse_id(&path, GROUP_ID)?;
    let email = Email::new(&payload.email)?;
    let outcome = state.groups.add_member(&user_id, &group_id, email).await?;
    let mut response = if outcome.added {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(MemberAddedResponse::from(outcome)))
}

/// Remove a member; members may remove themselves.
#[utoipa::path(
    delete,
    path = "/api/v1/groups/{group_id}/members/{user_id}",
    params(
        ("group_id" = String, Path, description = "Group identifier"),
        ("user_id" = String, Path, description = "Member identifier")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "removeMember"
)]
#[delete("/groups/{group_id}/members/{user_id}")]
pub async fn remove_member(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;
    let group_id: GroupId = parse_id(&path.0, GROUP_ID)?;
    let member_id: UserId = parse_id(&path.1, USER_ID)?;
    state
        .groups
        .remove_member(&requester, &group_id, &member_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
