use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{
    oracle::FsFileOracle,
    repository::Repository,
    runtime,
    storage::JsonFileFavoritesStore,
    FavoritesService,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let s = &cfg.server;
    format!("{}:{}", s.host, s.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {e}", s.host, s.port)))
}

/// Wire the file-backed store and filesystem oracle into the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let repo_cfg = &cfg.repository;
    runtime::ensure_env(&repo_cfg.root, &repo_cfg.assets_dir, &repo_cfg.favorites_file)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let store = JsonFileFavoritesStore::new(&repo_cfg.favorites_file)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    let favorites = FavoritesService::new(
        Arc::new(store),
        Arc::new(FsFileOracle),
        Repository::new(&repo_cfg.root),
    );

    let state = ServerState::new(favorites);
    Ok(routes::build_router(state, &repo_cfg.assets_dir, build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(
        %addr,
        repository_root = %cfg.repository.root.display(),
        favorites_file = %cfg.repository.favorites_file.display(),
        "starting file repository server"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let mut cfg = AppConfig::default();
        assert!(bind_addr(&cfg).is_ok());
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
