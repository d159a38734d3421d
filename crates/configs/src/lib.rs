use std::path::{Component, Path, PathBuf};

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub blog_api: BlogApiJsonSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }

/// Where the JSON-file blog store keeps its data.
///
/// Each kind lives in `<data_path>/<folder>/<Id>.json`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BlogApiJsonSettings {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default = "default_blog_posts_folder")]
    pub blog_posts_folder: String,
    #[serde(default = "default_categories_folder")]
    pub categories_folder: String,
    #[serde(default = "default_tags_folder")]
    pub tags_folder: String,
}

impl Default for BlogApiJsonSettings {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            blog_posts_folder: default_blog_posts_folder(),
            categories_folder: default_categories_folder(),
            tags_folder: default_tags_folder(),
        }
    }
}

fn default_data_path() -> PathBuf { PathBuf::from("data") }
fn default_blog_posts_folder() -> String { "Blogposts".into() }
fn default_categories_folder() -> String { "Categories".into() }
fn default_tags_folder() -> String { "Tags".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Like [`AppConfig::load_and_validate`], but a missing config file falls
    /// back to defaults overlaid with `SERVER_HOST`/`SERVER_PORT`. A file that
    /// exists but does not parse is still an error.
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_env_from(&path)
    }

    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => {
                let mut cfg = AppConfig::default();
                if let Ok(host) = std::env::var("SERVER_HOST") {
                    cfg.server.host = host;
                }
                if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
                    cfg.server.port = port;
                }
                cfg
            }
            Err(e) => return Err(e.context(format!("reading {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.blog_api.normalize_from_env();
        self.blog_api.validate()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl BlogApiJsonSettings {
    /// Build settings rooted at `data_path` with the default folder names.
    pub fn with_data_path(data_path: impl Into<PathBuf>) -> Self {
        Self { data_path: data_path.into(), ..Self::default() }
    }

    pub fn normalize_from_env(&mut self) {
        if let Ok(path) = std::env::var("BLOG_DATA_PATH") {
            if !path.trim().is_empty() {
                self.data_path = PathBuf::from(path);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(anyhow!("blog_api.data_path is empty"));
        }
        let folders = [
            ("blog_posts_folder", &self.blog_posts_folder),
            ("categories_folder", &self.categories_folder),
            ("tags_folder", &self.tags_folder),
        ];
        for (name, folder) in folders {
            if folder.trim().is_empty() {
                return Err(anyhow!("blog_api.{name} is empty"));
            }
            let relative = Path::new(folder)
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
            if !relative {
                return Err(anyhow!("blog_api.{name} must be a plain relative folder name: {folder}"));
            }
        }
        if self.blog_posts_folder == self.categories_folder
            || self.blog_posts_folder == self.tags_folder
            || self.categories_folder == self.tags_folder
        {
            return Err(anyhow!("blog_api folders must be distinct"));
        }
        Ok(())
    }

    pub fn blog_posts_dir(&self) -> PathBuf { self.data_path.join(&self.blog_posts_folder) }
    pub fn categories_dir(&self) -> PathBuf { self.data_path.join(&self.categories_folder) }
    pub fn tags_dir(&self) -> PathBuf { self.data_path.join(&self.tags_folder) }
}
