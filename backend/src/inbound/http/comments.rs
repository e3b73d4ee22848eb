//! Comment HTTP handlers.
//!
//! The list owner never sees comments on their own items; the service
//! answers `403 owner_comment_blind` for them.
//!
//! ```text
//! GET    /api/v1/items/{item_id}/comments
//! POST   /api/v1/items/{item_id}/comments {"text":"I'll get the bell"}
//! PUT    /api/v1/comments/{comment_id} {"text":"…"}
//! DELETE /api/v1/comments/{comment_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Comment, CommentId, CommentText, ItemId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::items::ITEM_ID;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const COMMENT_ID: FieldName = FieldName::new("commentId");

/// Request body for creating or editing a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[schema(example = "I'll get the bell")]
    pub text: String,
}

/// A comment visible to the requester.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub item_id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id().to_string(),
            item_id: value.item_id().to_string(),
            author_id: value.author_id().to_string(),
            text: value.text().as_str().to_owned(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

/// Comments on an item, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/items/{item_id}/comments",
    params(("item_id" = String, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Comments", body = [CommentResponse]),
        (status = 403, description = "The list owner cannot read comments", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/items/{item_id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let user_id = session.require_user_id()?;
    let item_id: ItemId = parse_id(&path, ITEM_ID)?;
    let comments = state.comments_query.list_comments(&user_id, &item_id).await?;
    Ok(web::Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

/// Comment on an item reached through a shared group.
#[utoipa::path(
    post,
    path = "/api/v1/items/{item_id}/comments",
    params(("item_id" = String, Path, description = "Item identifier")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Item deleted concurrently", body = ErrorSchema),
        (status = 422, description = "Comment limit reached", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/items/{item_id}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let item_id: ItemId = parse_id(&path, ITEM_ID)?;
    let text = CommentText::new(&payload.text)?;
    let comment = state
        .comments
        .create_comment(&user_id, &item_id, text)
        .await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// Edit a comment. Author only.
#[utoipa::path(
    put,
    path = "/api/v1/comments/{comment_id}",
    params(("comment_id" = String, Path, description = "Comment identifier")),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "editComment"
)]
#[put("/comments/{comment_id}")]
pub async fn edit_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let user_id = session.require_user_id()?;
    let comment_id: CommentId = parse_id(&path, COMMENT_ID)?;
    let text = CommentText::new(&payload.text)?;
    let comment = state
        .comments
        .edit_comment(&user_id, &comment_id, text)
        .await?;
    Ok(web::Json(CommentResponse::from(comment)))
}

/// Delete a comment. Author only.
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{comment_id}",
    params(("comment_id" = String, Path, description = "Comment identifier")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let comment_id: CommentId = parse_id(&path, COMMENT_ID)?;
    state
        .comments
        .delete_comment(&user_id, &comment_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
