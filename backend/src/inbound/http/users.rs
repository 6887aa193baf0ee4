//! User and login API handlers.
//!
//! ```text
//! POST /api/login {"username":"IWMor","password":"jr*29gW"}
//! POST /api/users {"username":"IWMor","name":"Corey","password":"jr*29gW"}
//! GET  /api/users
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginSession, LoginValidationError, Registration, UserView,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    login_validation_error, registration_validation_error,
};

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "IWMor")]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Registration request body for `POST /api/users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "IWMor")]
    pub username: Option<String>,
    #[schema(example = "Corey")]
    pub name: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.username.as_deref(),
            value.name.as_deref(),
            value.password.as_deref(),
        )
        .map_err(registration_validation_error)
    }
}

/// Exchange credentials for a signed bearer token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginSession),
        (status = 401, description = "Blank, unknown or wrong credentials", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginSession>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(login_validation_error)?;
    Ok(web::Json(state.login.authenticate(&credentials).await?))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Created", body = UserView),
        (status = 400, description = "Invalid request or username taken", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let view = state.registration.register(registration).await?;
    Ok(HttpResponse::Created().json(view))
}

/// List users with their blogs.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserView]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserView>>> {
    Ok(web::Json(state.users.list_users().await?))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
