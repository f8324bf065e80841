use super::{Message, LOGIN_SUCCESS};
use crate::auth::{AuthHandler, Credentials};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path= "/login",
    request_body = Credentials,
    responses (
        (status = 200, description = "Login successful", body = Message, content_type = "application/json"),
        (status = 400, description = "Missing username or password", body = Message),
        (status = 401, description = "Invalid credentials", body = Message),
        (status = 503, description = "Credential store unavailable", body = Message),
    ),
    tag= "login"
)]
// axum handler for login
#[instrument(skip(auth))]
pub async fn login(
    auth: Extension<Arc<AuthHandler>>,
    payload: Option<Json<Credentials>>,
) -> impl IntoResponse {
    let credentials = payload.map(|Json(payload)| payload).unwrap_or_default();

    match auth.login(&credentials).await {
        Ok(_) => (StatusCode::OK, Json(Message::new(LOGIN_SUCCESS))).into_response(),
        Err(e) => e.into_response(),
    }
}
