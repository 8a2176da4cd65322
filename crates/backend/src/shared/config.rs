use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub geo: GeoConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub workbook_path: String,
    #[serde(default = "default_orders_sheet")]
    pub orders_sheet: String,
    #[serde(default = "default_returns_sheet")]
    pub returns_sheet: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeoConfig {
    pub url: String,
    /// Local GeoJSON file; takes precedence over `url` when set
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_orders_sheet() -> String {
    "Orders".to_string()
}

fn default_returns_sheet() -> String {
    "Returns".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 8051

[data]
workbook_path = "data/Superstore.xlsx"
orders_sheet = "Orders"
returns_sheet = "Returns"

[geo]
url = "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json"
timeout_secs = 30
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory
/// 3. Falls back to embedded default config
///
/// The `PORT` environment variable overrides `server.port`.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match find_config_file() {
        Some(config_path) => {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            toml::from_str(DEFAULT_CONFIG)?
        }
    };

    apply_port_override(&mut config, std::env::var("PORT").ok().as_deref())?;
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }
            tracing::warn!("config.toml not found at: {}", config_path.display());
        }
    }

    let cwd_config = PathBuf::from("config.toml");
    cwd_config.exists().then_some(cwd_config)
}

fn apply_port_override(config: &mut Config, port: Option<&str>) -> anyhow::Result<()> {
    if let Some(raw) = port {
        let port: u16 = raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT value '{}': {}", raw, e))?;
        tracing::info!("Port overridden by PORT environment variable: {}", port);
        config.server.port = port;
    }
    Ok(())
}

/// Resolve a configured path.
/// Absolute paths are used as is; relative paths are looked up next to the
/// executable first, then taken relative to the current directory.
pub fn resolve_path(path_str: &str) -> PathBuf {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(path);
            if resolved_path.exists() {
                return resolved_path;
            }
        }
    }

    PathBuf::from(path_str)
}
