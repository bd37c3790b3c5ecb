use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub repository: RepositoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Where the browsed files, the favorites document, and static assets live.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_favorites_file")]
    pub favorites_file: PathBuf,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self { root: default_root(), favorites_file: default_favorites_file(), assets_dir: default_assets_dir() }
    }
}

fn default_root() -> PathBuf { PathBuf::from("repository") }
fn default_favorites_file() -> PathBuf { PathBuf::from("data/favorites.json") }
fn default_assets_dir() -> PathBuf { PathBuf::from("assets") }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file first; when it is missing or unreadable, build one from env vars.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_else(|_| Self::from_env());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: env("SERVER_HOST").unwrap_or(defaults.host),
            port: env("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()).unwrap_or(defaults.port),
            worker_threads: env("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()),
        };
        let repository = RepositoryConfig {
            root: env("REPOSITORY_ROOT").map(PathBuf::from).unwrap_or_else(default_root),
            favorites_file: env("FAVORITES_FILE").map(PathBuf::from).unwrap_or_else(default_favorites_file),
            assets_dir: env("ASSETS_DIR").map(PathBuf::from).unwrap_or_else(default_assets_dir),
        };
        Self { server, repository }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.repository.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl RepositoryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(anyhow!("repository.root is empty; set it in config.toml or REPOSITORY_ROOT"));
        }
        if self.favorites_file.as_os_str().is_empty() {
            return Err(anyhow!("repository.favorites_file is empty; set it in config.toml or FAVORITES_FILE"));
        }
        if self.favorites_file.file_name().is_none() {
            return Err(anyhow!("repository.favorites_file must name a file"));
        }
        Ok(())
    }
}
