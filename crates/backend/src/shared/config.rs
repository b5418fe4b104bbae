use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::sheets::DEFAULT_HEADER_SCAN_ROWS;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub google: GoogleConfig,
    pub sheets: SheetsSettings,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Pre-built UI served for non-API paths, if the directory exists
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: Some("dist".to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct GoogleConfig {
    /// Path to the service-account JSON key
    pub credentials_path: Option<String>,
    /// Inline service-account JSON; only ever set from the environment
    #[serde(skip)]
    pub credentials_json: Option<String>,
}

/// Where auction data lives in Drive
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SheetsSettings {
    /// One spreadsheet with a tab per auction
    pub spreadsheet_id: Option<String>,
    /// A folder with one spreadsheet per auction
    pub auctions_folder_id: Option<String>,
    pub invoices_folder_id: Option<String>,
    pub default_tab: String,
    pub header_scan_rows: usize,
}

impl Default for SheetsSettings {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            auctions_folder_id: None,
            invoices_folder_id: None,
            default_tab: "Sheet1".to_string(),
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// argon2 PHC string of the staff password
    pub password_hash: Option<String>,
    /// Plain staff password, hashed at startup; only ever set from the environment
    #[serde(skip)]
    pub password: Option<String>,
    #[serde(skip)]
    pub jwt_secret: Option<String>,
    pub session_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_hash: None,
            password: None,
            jwt_secret: None,
            session_hours: 12,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[sheets]
default_tab = "Sheet1"
header_scan_rows = 15

[auth]
session_hours = 12
"#;

/// Load configuration from config.toml, then apply environment overrides
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Environment wins over the file; blank values are ignored
fn apply_env_overrides<F>(config: &mut Config, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |keys: &[&str]| {
        keys.iter()
            .filter_map(|k| env(*k))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    };

    if let Some(json) = get(&["GOOGLE_SERVICE_ACCOUNT_JSON"]) {
        config.google.credentials_json = Some(json);
    }
    if let Some(path) = get(&["GOOGLE_SERVICE_ACCOUNT_FILE"]) {
        config.google.credentials_path = Some(path);
    }
    if let Some(id) = get(&["GOOGLE_SHEET_ID"]) {
        config.sheets.spreadsheet_id = Some(id);
    }
    if let Some(id) = get(&["AUCTION_SHEETS_FOLDER_ID", "AUCTIONS_FOLDER_ID"]) {
        config.sheets.auctions_folder_id = Some(id);
    }
    if let Some(id) = get(&["INVOICE_PDF_FOLDER_ID", "AUCTION_INVOICES_FOLDER_ID"]) {
        config.sheets.invoices_folder_id = Some(id);
    }
    if let Some(tab) = get(&["SHEET_TAB_NAME"]) {
        config.sheets.default_tab = tab;
    }
    if let Some(hash) = get(&["STAFF_PASSWORD_HASH"]) {
        config.auth.password_hash = Some(hash);
    }
    if let Some(password) = get(&["STAFF_PASSWORD"]) {
        config.auth.password = Some(password);
    }
    if let Some(secret) = get(&["JWT_SECRET"]) {
        config.auth.jwt_secret = Some(secret);
    }
    match get(&["PORT"]).map(|p| p.parse::<u16>()) {
        Some(Ok(port)) => config.server.port = port,
        Some(Err(e)) => tracing::warn!("Ignoring invalid PORT: {}", e),
        None => {}
    }

    // Empty strings in config.toml mean "not set"
    for value in [
        &mut config.google.credentials_path,
        &mut config.sheets.spreadsheet_id,
        &mut config.sheets.auctions_folder_id,
        &mut config.sheets.invoices_folder_id,
        &mut config.auth.password_hash,
        &mut config.server.static_dir,
    ] {
        if value.as_deref().map(str::trim) == Some("") {
            *value = None;
        }
    }
}

/// Install the process-wide configuration (first call wins)
pub fn init(config: Config) {
    if CONFIG.set(config).is_err() {
        tracing::warn!("Configuration already initialized, ignoring");
    }
}

pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Resolve a path relative to the executable directory
pub fn resolve_path(path_str: &str) -> PathBuf {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved = exe_dir.join(path);
            if resolved.exists() {
                return resolved;
            }
        }
    }

    // Fallback: relative to current directory
    PathBuf::from(path_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.sheets.default_tab, "Sheet1");
        assert_eq!(config.sheets.header_scan_rows, 15);
        assert_eq!(config.auth.session_hours, 12);
        assert!(config.sheets.auctions_folder_id.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[sheets]\nauctions_folder_id = \"abc\"\n").unwrap();
        assert_eq!(config.sheets.auctions_folder_id.as_deref(), Some("abc"));
        assert_eq!(config.sheets.default_tab, "Sheet1");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("AUCTIONS_FOLDER_ID", "folder-1"),
            ("INVOICE_PDF_FOLDER_ID", "  "),
            ("AUCTION_INVOICES_FOLDER_ID", "invoices-1"),
            ("SHEET_TAB_NAME", "Bidders"),
            ("GOOGLE_SERVICE_ACCOUNT_JSON", "{}"),
            ("PORT", "8080"),
        ]
        .into_iter()
        .collect();

        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        config.sheets.spreadsheet_id = Some(String::new());
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.sheets.auctions_folder_id.as_deref(), Some("folder-1"));
        assert_eq!(config.sheets.invoices_folder_id.as_deref(), Some("invoices-1"));
        assert_eq!(config.sheets.default_tab, "Bidders");
        assert_eq!(config.google.credentials_json.as_deref(), Some("{}"));
        assert_eq!(config.server.port, 8080);
        assert!(config.sheets.spreadsheet_id.is_none());
    }
}
