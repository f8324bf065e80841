use axum::response::Html;

const INDEX_HTML: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/index.html"));

// axum handler for the login page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
