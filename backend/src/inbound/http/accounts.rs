//! Account HTTP handlers.
//!
//! ```text
//! POST /api/v1/register {"email":"ada@example.com"}
//! POST /api/v1/activate {"token":"…","displayName":"Ada","password":"…"}
//! POST /api/v1/login {"email":"ada@example.com","password":"…"}
//! POST /api/v1/logout
//! PUT  /api/v1/me {"email":"ada@example.com","displayName":"Ada"}
//! ```

use actix_web::{HttpResponse, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ActivationRequest, ProfileUpdate, RegistrationOutcome};
use crate::domain::{
    ActivationToken, DisplayName, Email, Error, LoginCredentials, Password, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Response body for a successful registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub user_id: String,
    /// `false` when the activation token could not be delivered.
    pub invitation_sent: bool,
}

impl From<RegistrationOutcome> for RegistrationResponse {
    fn from(value: RegistrationOutcome) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            invitation_sent: value.invitation_sent,
        }
    }
}

/// Request body for `POST /api/v1/activate`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivateRequest {
    pub token: String,
    #[schema(example = "Ada Lovelace")]
    pub display_name: String,
    pub password: String,
}

impl TryFrom<ActivateRequest> for ActivationRequest {
    type Error = Error;

    fn try_from(value: ActivateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            token: ActivationToken::new(&value.token)?,
            display_name: DisplayName::new(&value.display_name)?,
            password: Password::new(&value.password)?,
        })
    }
}

/// Request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /api/v1/me`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub email: String,
    pub display_name: Option<String>,
}

impl TryFrom<ProfileRequest> for ProfileUpdate {
    type Error = Error;

    fn try_from(value: ProfileRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            email: Email::new(&value.email)?,
            display_name: value
                .display_name
                .as_deref()
                .map(DisplayName::new)
                .transpose()?,
        })
    }
}

/// Public view of a user account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub activated: bool,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id().to_string(),
            email: value.email().to_string(),
            display_name: value.display_name().map(|name| name.as_str().to_owned()),
            activated: value.is_activated(),
        }
    }
}

/// Response body for a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
}

/// Register a pending account and send the activation token.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Pending user created", body = RegistrationResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let email = Email::new(&payload.email)?;
    let outcome = state.accounts.register(email).await?;
    Ok(HttpResponse::Created().json(RegistrationResponse::from(outcome)))
}

/// Consume an activation token and set the account's name and password.
#[utoipa::path(
    post,
    path = "/api/v1/activate",
    request_body = ActivateRequest,
    responses(
        (status = 200, description = "Account activated", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown token", body = ErrorSchema),
        (status = 409, description = "Already activated", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "activate",
    security([])
)]
#[post("/activate")]
pub async fn activate(
    state: web::Data<HttpState>,
    payload: web::Json<ActivateRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let request = ActivationRequest::try_from(payload.into_inner())?;
    let user = state.accounts.activate(request).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)?;
    let user_id = state.accounts.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(web::Json(LoginResponse {
        user_id: user_id.to_string(),
    }))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Change the authenticated user's email and display name.
#[utoipa::path(
    put,
    path = "/api/v1/me",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "updateProfile"
)]
#[put("/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let update = ProfileUpdate::try_from(payload.into_inner())?;
    let user = state.accounts.change_profile(&user_id, update).await?;
    Ok(web::Json(UserResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn activation_payload_validates_every_field() {
        let err = ActivationRequest::try_from(ActivateRequest {
            token: "not-a-token".into(),
            display_name: "Ada".into(),
            password: "secret".into(),
        })
        .expect_err("bad token");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().expect("details")["field"], "token");

        let err = ActivationRequest::try_from(ActivateRequest {
            token: ActivationToken::random().to_string(),
            display_name: "   ".into(),
            password: "secret".into(),
        })
        .expect_err("blank name");
        assert_eq!(err.details().expect("details")["field"], "displayName");
    }

    #[rstest]
    fn profile_payload_keeps_missing_names_absent() {
        let update = ProfileUpdate::try_from(ProfileRequest {
            email: " Ada@Example.com ".into(),
            display_name: None,
        })
        .expect("valid profile");
        assert_eq!(update.email.as_ref(), "ada@example.com");
        assert!(update.display_name.is_none());
    }
}
