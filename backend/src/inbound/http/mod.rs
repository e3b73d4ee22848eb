//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod comments;
pub mod error;
pub mod groups;
pub mod health;
pub mod items;
pub mod lists;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

use crate::domain::Error;

/// Register every `/api/v1` handler on `cfg`.
///
/// JSON extraction failures are reported with the standard error envelope
/// rather than Actix's plain-text default.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid path: {err}")).into()
    }))
    .service(accounts::register)
    .service(accounts::activate)
    .service(accounts::login)
    .service(accounts::logout)
    .service(accounts::update_profile)
    .service(lists::visible_lists)
    .service(lists::create_list)
    .service(lists::get_list)
    .service(lists::rename_list)
    .service(lists::delete_list)
    .service(lists::shared_groups)
    .service(lists::share_list)
    .service(lists::unshare_list)
    .service(items::list_items)
    .service(items::create_item)
    .service(items::get_item)
    .service(items::update_item)
    .service(items::delete_item)
    .service(comments::list_comments)
    .service(comments::create_comment)
    .service(comments::edit_comment)
    .service(comments::delete_comment)
    .service(groups::list_groups)
    .service(groups::create_group)
    .service(groups::get_group)
    .service(groups::update_group)
    .service(groups::delete_group)
    .service(groups::add_member)
    .service(groups::remove_member);
}
