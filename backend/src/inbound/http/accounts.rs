//! Account API handlers.
//!
//! ```text
//! POST /signup {"username":"alice","email":"a@x.com","password":"Passw0rd",
//!               "role":"customer","phone":"+919876543210",
//!               "whatsappNumber":"+919876543210"}
//! POST /login {"email":"a@x.com","password":"Passw0rd"}
//! DELETE /alice
//! ```
//!
//! The same routes are mounted under `/api/users`.

use actix_web::{HttpResponse, delete, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Account, Error, LoginCredentials, LoginValidationError, Registration, RegistrationField,
    RegistrationParts, RegistrationValidationError, Role, Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Read a string field, treating JSON `null` like an absent key.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Signup request body.
///
/// Absent and `null` fields deserialise as empty strings so they are reported
/// as missing rather than as a malformed body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub role: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub whatsapp_number: String,
}

impl SignupRequest {
    fn parts(&self) -> RegistrationParts<'_> {
        RegistrationParts {
            username: &self.username,
            email: &self.email,
            password: &self.password,
            role: &self.role,
            phone: &self.phone,
            whatsapp_number: &self.whatsapp_number,
        }
    }
}

/// Login request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

/// Public projection of an account. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "a@x.com")]
    pub email: String,
    pub role: Role,
    #[schema(example = "+919876543210")]
    pub phone: String,
    #[schema(example = "+919876543210")]
    pub whatsapp_number: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: *account.id().as_uuid(),
            username: account.username().to_string(),
            email: account.email().to_string(),
            role: account.role(),
            phone: account.phone().to_string(),
            whatsapp_number: account.whatsapp_number().to_string(),
            created_at: account.created_at(),
        }
    }
}

/// Confirmation message plus the affected account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountEnvelope {
    #[schema(example = "User created successfully")]
    pub message: String,
    pub user: AccountResponse,
}

impl AccountEnvelope {
    fn new(message: &str, account: &Account) -> Self {
        Self {
            message: message.to_owned(),
            user: account.into(),
        }
    }
}

/// Confirmation returned after a delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "User deleted")]
    pub message: String,
    #[schema(example = "alice")]
    pub username: String,
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    let (message, code, field) = match err {
        RegistrationValidationError::MissingField(field) => {
            ("All fields are required", "missing_field", field)
        }
        RegistrationValidationError::InvalidRole => (
            "Invalid role. It must be either landlord or customer",
            "invalid_role",
            RegistrationField::Role,
        ),
        RegistrationValidationError::InvalidPhoneFormat(field) => (
            "Both Phone number and WhatsApp number must follow the format +91XXXXXXXXXX.",
            "invalid_phone_format",
            field,
        ),
        RegistrationValidationError::WeakPassword(_) => (
            "Password must be at least 8 characters long and contain both alphabets and numbers.",
            "weak_password",
            RegistrationField::Password,
        ),
    };
    Error::invalid_request(message).with_details(json!({ "field": field.as_str(), "code": code }))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyEmail => "email",
        LoginValidationError::EmptyPassword => "password",
    };
    Error::invalid_request("Email and password are required")
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AccountEnvelope),
        (status = 400, description = "Validation failure or duplicate account", body = Error),
        (status = 500, description = "Server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let registration =
        Registration::try_from_parts(payload.parts()).map_err(map_registration_error)?;
    let account = state.signup.register(registration).await?;
    Ok(HttpResponse::Created().json(AccountEnvelope::new("User created successfully", &account)))
}

/// Check credentials and return the account.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountEnvelope),
        (status = 400, description = "Missing fields or invalid credentials", body = Error),
        (status = 500, description = "Server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_login_validation_error)?;
    let account = state.login.authenticate(&credentials).await?;
    Ok(HttpResponse::Ok().json(AccountEnvelope::new("Logged in successfully", &account)))
}

/// Delete the account registered under the path username.
#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = String, Path, description = "Username of the account to delete")),
    responses(
        (status = 200, description = "Account deleted", body = DeleteResponse),
        (status = 400, description = "No such account", body = Error),
        (status = 500, description = "Server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "deleteAccount"
)]
#[delete("/{id}")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let raw = path.into_inner();
    // Stored usernames are trimmed, so a padded key can never match one.
    let username = Username::new(raw.as_str())
        .ok()
        .filter(|username| username.as_ref() == raw)
        .ok_or_else(|| {
            Error::invalid_request("User not found")
                .with_details(json!({ "code": "account_not_found" }))
        })?;
    state.removal.remove(&username).await?;
    Ok(web::Json(DeleteResponse {
        message: "User deleted".to_owned(),
        username: username.to_string(),
    }))
}

/// Register the account handlers on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::accounts;
///
/// let app = App::new()
///     .service(web::scope("/api/users").configure(accounts::configure))
///     .configure(accounts::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(signup).service(login).service(delete_account);
}
