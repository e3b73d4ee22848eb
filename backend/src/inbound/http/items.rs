//! Item HTTP handlers.
//!
//! ```text
//! GET    /api/v1/lists/{list_id}/items
//! POST   /api/v1/lists/{list_id}/items {"title":"Bike","description":"Red"}
//! GET    /api/v1/items/{item_id}
//! PUT    /api/v1/items/{item_id} {"title":"Bike","description":null}
//! DELETE /api/v1/items/{item_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Item, ItemContent, ItemDescription, ItemId, ItemTitle, ListId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::lists::LIST_ID;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

pub(crate) const ITEM_ID: FieldName = FieldName::new("itemId");

/// Request body for creating or replacing an item.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    #[schema(example = "Bike")]
    pub title: String,
    pub description: Option<String>,
}

impl TryFrom<ItemRequest> for ItemContent {
    type Error = Error;

    fn try_from(value: ItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: ItemTitle::new(&value.title)?,
            description: ItemDescription::optional(value.description.as_deref()),
        })
    }
}

/// An item on a readable list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: String,
    pub list_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Item> for ItemResponse {
    fn from(value: Item) -> Self {
        Self {
            id: value.id().to_string(),
            list_id: value.list_id().to_string(),
            title: value.title().as_str().to_owned(),
            description: value.description().map(|text| text.as_str().to_owned()),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

/// Items on a readable list, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/lists/{list_id}/items",
    params(("list_id" = String, Path, description = "List identifier")),
    responses(
        (status = 200, description = "Items", body = [ItemResponse]),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/lists/{list_id}/items")]
pub async fn list_items(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ItemResponse>>> {
    let user_id = session.require_user_id()?;
    let list_id: ListId = parse_id(&path, LIST_ID)?;
    let items = state.items_query.list_items(&user_id, &list_id).await?;
    Ok(web::Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Add an item to a list. Owner only.
#[utoipa::path(
    post,
    path = "/api/v1/lists/{list_id}/items",
    params(("list_id" = String, Path, description = "List identifier")),
    request_body = ItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "List deleted concurrently", body = ErrorSchema),
        (status = 422, description = "Item limit reached", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "createItem"
)]
#[post("/lists/{list_id}/items")]
pub async fn create_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ItemRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let list_id: ListId = parse_id(&path, LIST_ID)?;
    let content = ItemContent::try_from(payload.into_inner())?;
    let item = state.items.create_item(&user_id, &list_id, content).await?;
    Ok(HttpResponse::Created().json(ItemResponse::from(item)))
}

/// Fetch one readable item.
#[utoipa::path(
    get,
    path = "/api/v1/items/{item_id}",
    params(("item_id" = String, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Item", body = ItemResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "getItem"
)]
#[get("/items/{item_id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ItemResponse>> {
    let user_id = session.require_user_id()?;
    let item_id: ItemId = parse_id(&path, ITEM_ID)?;
    let item = state.items_query.get_item(&user_id, &item_id).await?;
    Ok(web::Json(ItemResponse::from(item)))
}

/// Replace an item's title and description. Owner only.
#[utoipa::path(
    put,
    path = "/api/v1/items/{item_id}",
    params(("item_id" = String, Path, description = "Item identifier")),
    request_body = ItemRequest,
    responses(
        (status = 200, description = "Updated item", body = ItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "updateItem"
)]
#[put("/items/{item_id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ItemRequest>,
) -> ApiResult<web::Json<ItemResponse>> {
    let user_id = session.require_user_id()?;
    let item_id: ItemId = parse_id(&path, ITEM_ID)?;
    let content = ItemContent::try_from(payload.into_inner())?;
    let item = state.items.update_item(&user_id, &item_id, content).await?;
    Ok(web::Json(ItemResponse::from(item)))
}

/// Delete an item and its comments. Owner only.
#[utoipa::path(
    delete,
    path = "/api/v1/items/{item_id}",
    params(("item_id" = String, Path, description = "Item identifier")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "deleteItem"
)]
#[delete("/items/{item_id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let item_id: ItemId = parse_id(&path, ITEM_ID)?;
    state.items.delete_item(&user_id, &item_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
