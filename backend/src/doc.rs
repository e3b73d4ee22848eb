//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health endpoints, the
//! error schema wrappers and the session cookie security scheme.

use crate::inbound::http::accounts::{
    ActivateRequest, LoginRequest, LoginResponse, ProfileRequest, RegisterRequest,
    RegistrationResponse, UserResponse,
};
use crate::inbound::http::comments::{CommentRequest, CommentResponse};
use crate::inbound::http::groups::{
    GroupRequest, GroupResponse, MemberAddedResponse, MemberRequest,
};
use crate::inbound::http::items::{ItemRequest, ItemResponse};
use crate::inbound::http::lists::{ListRequest, ListResponse, ShareResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Wishlist backend API",
        description = "Gift lists shared through groups, with comments hidden from list owners."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::activate,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::update_profile,
        crate::inbound::http::lists::visible_lists,
        crate::inbound::http::lists::create_list,
        crate::inbound::http::lists::get_list,
        crate::inbound::http::lists::rename_list,
        crate::inbound::http::lists::delete_list,
        crate::inbound::http::lists::shared_groups,
        crate::inbound::http::lists::share_list,
        crate::inbound::http::lists::unshare_list,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::create_item,
        crate::inbound::http::items::get_item,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::delete_item,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::edit_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::groups::list_groups,
        crate::inbound::http::groups::create_group,
        crate::inbound::http::groups::get_group,
        crate::inbound::http::groups::update_group,
        crate::inbound::http::groups::delete_group,
        crate::inbound::http::groups::add_member,
        crate::inbound::http::groups::remove_member,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        RegistrationResponse,
        ActivateRequest,
        LoginRequest,
        LoginResponse,
        ProfileRequest,
        UserResponse,
        ListRequest,
        ListResponse,
        ShareResponse,
        ItemRequest,
        ItemResponse,
        CommentRequest,
        CommentResponse,
        GroupRequest,
        GroupResponse,
        MemberRequest,
        MemberAddedResponse,
    )),
    tags(
        (name = "accounts", description = "Registration, activation and sessions"),
        (name = "lists", description = "Gift lists and sharing"),
        (name = "items", description = "Items on gift lists"),
        (name = "comments", description = "Comments hidden from the list owner"),
        (name = "groups", description = "Groups and membership"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/v1/register")]
    #[case("/api/v1/lists/{list_id}/groups/{group_id}")]
    #[case("/api/v1/items/{item_id}/comments")]
    #[case("/api/v1/groups/{group_id}/members/{user_id}")]
    #[case("/health/ready")]
    fn document_lists_routes(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
        assert!(components.schemas.contains_key("crate.domain.Error"));
    }
}
