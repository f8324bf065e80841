use super::Message;
use crate::{
    auth::{AuthHandler, Credentials},
    store::PublicAccount,
};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path= "/register",
    request_body = Credentials,
    responses (
        (status = 200, description = "Account created", body = PublicAccount, content_type = "application/json"),
        (status = 400, description = "Missing username or password", body = Message),
        (status = 409, description = "Username already exists", body = Message),
        (status = 503, description = "Credential store unavailable", body = Message),
    ),
    tag= "register"
)]
// axum handler for register
#[instrument(skip(auth))]
pub async fn register(
    auth: Extension<Arc<AuthHandler>>,
    payload: Option<Json<Credentials>>,
) -> impl IntoResponse {
    // an unreadable body is the same as missing fields
    let credentials = payload.map(|Json(payload)| payload).unwrap_or_default();

    match auth.register(&credentials).await {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => e.into_response(),
    }
}
