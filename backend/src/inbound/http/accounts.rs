//! Account registration and login handlers.
//!
//! ```text
//! POST /register {"username":"ada","password":"pw","bio":"","location_x":0,"location_y":0}
//! POST /login {"username":"ada","password":"pw"}
//! ```
//!
//! Both return `{"valid": true, "token": "<key>"}`. Clients send the key
//! back as `Authorization: Token <key>`.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{AuthToken, CredentialsValidationError, Error, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, RawNumber, parse_required_number, require};

const USERNAME: FieldName = FieldName::new("username");
const PASSWORD: FieldName = FieldName::new("password");
const LOCATION_X: FieldName = FieldName::new("location_x");
const LOCATION_Y: FieldName = FieldName::new("location_y");

/// Login request body for `POST /login`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Registration request body for `POST /register`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub location_x: Option<RawNumber>,
    #[schema(value_type = Option<f64>)]
    pub location_y: Option<RawNumber>,
}

/// Token issued on registration or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TokenBody {
    pub valid: bool,
    #[schema(example = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    pub token: String,
}

impl From<AuthToken> for TokenBody {
    fn from(value: AuthToken) -> Self {
        Self {
            valid: true,
            token: value.as_str().to_owned(),
        }
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let (field, code) = match err {
        CredentialsValidationError::EmptyUsername => ("username", "empty_username"),
        CredentialsValidationError::UsernameTooLong => ("username", "username_too_long"),
        CredentialsValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<LoginCredentials, Error> {
    let username = require(username, USERNAME)?;
    let password = require(password, PASSWORD)?;
    LoginCredentials::try_from_parts(&username, &password).map_err(map_credentials_error)
}

fn optional_number(value: Option<RawNumber>, field: FieldName) -> Result<f64, Error> {
    match value {
        Some(raw) => parse_required_number(Some(raw), field),
        None => Ok(0.0),
    }
}

fn parse_registration(body: RegisterRequest) -> Result<Registration, Error> {
    Ok(Registration {
        credentials: credentials(body.username, body.password)?,
        bio: body.bio.unwrap_or_default(),
        location_x: optional_number(body.location_x, LOCATION_X)?,
        location_y: optional_number(body.location_y, LOCATION_Y)?,
    })
}

/// Create an account and profile, returning a token.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = TokenBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username already taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
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
    let registration = parse_registration(payload.into_inner())?;
    let token = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(TokenBody::from(token)))
}

/// Exchange credentials for the account's token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenBody>> {
    let body = payload.into_inner();
    let credentials = credentials(body.username, body.password)?;
    let token = state.accounts.login(credentials).await?;
    Ok(web::Json(token.into()))
}
