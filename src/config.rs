//! Application configuration.
//!
//! Settings are layered with priority: config.toml > environment (.env) > default.
//! Constants below are the defaults and fixed tuning values.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::media::MediaSettings;

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const SERVER_PORT: u16 = 3000;

// ==================== Session Configuration ====================

/// Quiz session expiration after inactivity, in hours
pub const SESSION_EXPIRY_HOURS: i64 = 2;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

/// Cookie carrying the quiz session id
pub const SESSION_COOKIE: &str = "style_quiz_session";

// ==================== Quiz Configuration ====================

/// Number of styles in the ranked result
pub const TOP_STYLES: usize = 3;

// ==================== Media Configuration ====================

pub const DEFAULT_STORAGE_URL: &str = "http://localhost:54321";
pub const DEFAULT_IMAGES_BUCKET: &str = "styledmyhome.images";
pub const DEFAULT_VIDEOS_BUCKET: &str = "styledmyhome.videos";
pub const DEFAULT_PDFS_BUCKET: &str = "styledmyhome.pdfs";
pub const DEFAULT_PLACEHOLDER_URL: &str = "/placeholder.svg";
pub const DEFAULT_VIDEO_URL: &str = "https://www.w3schools.com/html/mov_bbb.mp4";

/// Timeout for a single storage existence probe
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5000;

// ==================== Settings ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSourceKind {
    Static,
    Database,
}

impl std::str::FromStr for ContentSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(ContentSourceKind::Static),
            "database" | "db" => Ok(ContentSourceKind::Database),
            _ => Err(format!("Invalid content source: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub content_source: ContentSourceKind,
    pub database_path: PathBuf,
    pub storage_url: String,
    pub media: MediaSettings,
    pub probe_timeout: Duration,
    /// 0 disables the resolution cache
    pub cache_capacity: usize,
}

impl Settings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", SERVER_ADDR, self.port)
    }
}

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    server: Option<ServerConfig>,
    content: Option<ContentConfig>,
    storage: Option<StorageConfig>,
    media: Option<MediaConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerConfig {
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentConfig {
    source: Option<String>,
    database_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StorageConfig {
    url: Option<String>,
    images_bucket: Option<String>,
    videos_bucket: Option<String>,
    pdfs_bucket: Option<String>,
    probe_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct MediaConfig {
    placeholder_url: Option<String>,
    default_video_url: Option<String>,
    cache_capacity: Option<usize>,
}

/// Load settings from ./config.toml and the environment.
pub fn load_settings() -> Settings {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let contents = std::fs::read_to_string("config.toml").ok();
    let settings = settings_from(contents.as_deref(), |key| std::env::var(key).ok());
    tracing::info!(
        port = settings.port,
        content = ?settings.content_source,
        storage = %settings.storage_url,
        "Loaded settings"
    );
    settings
}

/// Env values that fail to parse are treated as unset
fn env_parse<T, F>(env: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    env(key).and_then(|v| v.trim().parse().ok())
}

/// Resolve settings from config file contents and an environment lookup.
pub fn settings_from<F>(config_toml: Option<&str>, env: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let file = match config_toml.map(toml::from_str::<AppConfig>) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            tracing::warn!("Ignoring malformed config.toml: {}", e);
            AppConfig::default()
        }
        None => AppConfig::default(),
    };
    let server = file.server.unwrap_or_default();
    let content = file.content.unwrap_or_default();
    let storage = file.storage.unwrap_or_default();
    let media = file.media.unwrap_or_default();

    let port = server.port.or_else(|| env_parse(&env, "PORT")).unwrap_or(SERVER_PORT);

    let content_source = content
        .source
        .or_else(|| env("CONTENT_SOURCE"))
        .and_then(|s| match s.parse::<ContentSourceKind>() {
            Ok(kind) => Some(kind),
            Err(e) => {
                tracing::warn!("{}, using static content", e);
                None
            }
        })
        .unwrap_or(ContentSourceKind::Static);

    let database_path = content
        .database_path
        .or_else(|| env("DATABASE_PATH"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(crate::paths::content_db_path()));

    let text = |file_value: Option<String>, key: &str, default: &str| {
        file_value.or_else(|| env(key)).unwrap_or_else(|| default.to_string())
    };

    Settings {
        port,
        content_source,
        database_path,
        storage_url: text(storage.url, "STORAGE_URL", DEFAULT_STORAGE_URL),
        media: MediaSettings {
            images_bucket: text(storage.images_bucket, "IMAGES_BUCKET", DEFAULT_IMAGES_BUCKET),
            videos_bucket: text(storage.videos_bucket, "VIDEOS_BUCKET", DEFAULT_VIDEOS_BUCKET),
            pdfs_bucket: text(storage.pdfs_bucket, "PDFS_BUCKET", DEFAULT_PDFS_BUCKET),
            placeholder_url: text(media.placeholder_url, "PLACEHOLDER_URL", DEFAULT_PLACEHOLDER_URL),
            default_video_url: text(media.default_video_url, "DEFAULT_VIDEO_URL", DEFAULT_VIDEO_URL),
        },
        probe_timeout: Duration::from_millis(
            storage
                .probe_timeout_ms
                .or_else(|| env_parse(&env, "PROBE_TIMEOUT_MS"))
                .unwrap_or(DEFAULT_PROBE_TIMEOUT_MS),
        ),
        cache_capacity: media
            .cache_capacity
            .or_else(|| env_parse(&env, "MEDIA_CACHE_CAPACITY"))
            .unwrap_or(0),
    }
}
