use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use service::{repository::Repository, FavoritesService};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod favorites;
pub mod files;
pub mod meta;

/// Shared handler state. Collaborators are injected at startup.
#[derive(Clone)]
pub struct ServerState {
    pub favorites: FavoritesService,
    pub repository: Repository,
}

impl ServerState {
    pub fn new(favorites: FavoritesService) -> Self {
        let repository = favorites.repository().clone();
        Self { favorites, repository }
    }
}

/// Build the full application router: meta, static assets, files, favorites
pub fn build_router(state: ServerState, assets_dir: &Path, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(meta::welcome))
        .route("/health", get(meta::health))
        .route("/info", get(meta::info))
        .nest_service("/assets", ServeDir::new(assets_dir));

    let file_routes = Router::new()
        .route("/search", get(files::search))
        .route("/download", get(files::download));

    let favorite_routes = Router::new()
        .route("/favorites/:user_id", get(favorites::list_favorites))
        .route("/favorites/:user_id/add", post(favorites::add_favorite))
        .route("/favorites/:user_id/remove", post(favorites::remove_favorite));

    public
        .merge(file_routes)
        .merge(favorite_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
