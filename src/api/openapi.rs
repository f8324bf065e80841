use super::handlers::{health, login, register, Message};
use crate::{auth::Credentials, store::PublicAccount};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(health::health, register::register, login::login),
    components(schemas(health::Health, Credentials, PublicAccount, Message)),
    tags(
        (name = "gatekeep", description = "Username and password registration and login"),
        (name = "register", description = "Account creation"),
        (name = "login", description = "Credential verification")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = env!("CARGO_PKG_NAME").to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc
}
