//! Account handlers: registration, login, and the current-user lookup.
//!
//! ```text
//! POST /api/v1/users {"username":"ada","password":"analytical engine"}
//! POST /api/v1/login {"username":"ada","password":"analytical engine"}
//! GET /api/v1/users/me
//! ```
//!
//! A successful registration signs the new user in, so both `POST` routes
//! finish by writing the username into the session cookie.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Credentials, CredentialsValidationError, Error, UserValidationError, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Username and password pair accepted by registration and login.
///
/// Example JSON:
/// `{"username":"ada","password":"analytical engine"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    /// Login name; surrounding whitespace is ignored.
    pub username: String,
    /// Cleartext password, used verbatim.
    pub password: String,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Signed-in account as returned to clients.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Normalised login name.
    #[schema(example = "ada")]
    pub username: String,
}

impl From<&Username> for UserResponse {
    fn from(value: &Username) -> Self {
        Self {
            username: value.to_string(),
        }
    }
}

fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    let (field, code) = match &err {
        CredentialsValidationError::Username(UserValidationError::UsernameTooLong { .. }) => {
            ("username", "username_too_long")
        }
        CredentialsValidationError::Username(_) => ("username", "empty_username"),
        CredentialsValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn parse_credentials(payload: web::Json<CredentialsRequest>) -> Result<Credentials, Error> {
    Credentials::try_from(payload.into_inner()).map_err(map_credentials_validation_error)
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username already registered", body = ErrorSchema),
        (status = 503, description = "Credential storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = parse_credentials(payload)?;
    state.credentials.register(&credentials).await?;
    session.persist_user(credentials.username())?;
    Ok(HttpResponse::Created().json(UserResponse::from(credentials.username())))
}

/// Check a username and password and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Credential storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = parse_credentials(payload)?;
    if !state.credentials.validate(&credentials).await? {
        info!(username = %credentials.username(), "login rejected");
        return Err(Error::unauthorized("invalid credentials"));
    }
    session.persist_user(credentials.username())?;
    Ok(HttpResponse::Ok().json(UserResponse::from(credentials.username())))
}

/// Return the signed-in account.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(session: SessionContext) -> ApiResult<web::Json<UserResponse>> {
    let username = session.require_username()?;
    Ok(web::Json(UserResponse::from(&username)))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
