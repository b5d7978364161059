//! OpenAPI document for the account API.
//!
//! Served through Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Role};
use crate::inbound::http::accounts::{
    AccountEnvelope, AccountResponse, DeleteResponse, LoginRequest, SignupRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rentals account API",
        description = "Signup, login and account removal for the rentals listing application."
    ),
    servers(
        (url = "/", description = "Routes are also mounted under /api/users")
    ),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::delete_account,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        AccountResponse,
        AccountEnvelope,
        DeleteResponse,
        Role,
        Error,
        ErrorCode
    )),
    tags(
        (name = "accounts", description = "Account lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
