use axum::{
    http::header::CACHE_CONTROL,
    response::IntoResponse,
    Json,
};
use common::types::{AppInfo, Health};

pub const APP_NAME: &str = "file-repo-api";

pub async fn welcome() -> impl IntoResponse {
    ([(CACHE_CONTROL, "no-cache")], "Welcome to the file repository API")
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn info() -> impl IntoResponse {
    (
        [(CACHE_CONTROL, "private, max-age=600")],
        Json(AppInfo::new(APP_NAME, env!("CARGO_PKG_VERSION"))),
    )
}
