pub mod auth;
pub mod client;
pub mod drive_api;
pub mod gateway;
pub mod sheets_api;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use thiserror::Error;

pub use gateway::{
    DriveFile, DriveGateway, DriveQuery, RangeWrite, SheetsGateway, Workspace, MIME_FOLDER,
    MIME_SPREADSHEET,
};

use self::auth::{ServiceAccountKey, TokenSource, SCOPE_DRIVE_READONLY, SCOPE_SPREADSHEETS};
use self::client::GoogleClient;
use self::drive_api::DriveApi;
use self::sheets_api::SheetsApi;
use super::config::{self, GoogleConfig};
use super::error::ApiError;

#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("Google credentials error: {0}")]
    Credentials(String),

    #[error("Google authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited by Google API. Please try again later.")]
    RateLimited,

    #[error("Failed to decode Google response: {0}")]
    Decode(String),
}

static WORKSPACE: OnceCell<GoogleWorkspace> = OnceCell::new();

/// Sheets and Drive backed by one service account
pub struct GoogleWorkspace {
    pub sheets: SheetsApi,
    pub drive: DriveApi,
}

impl GoogleWorkspace {
    pub fn from_config(google: &GoogleConfig) -> Result<Self, GoogleError> {
        let key = load_key(google)?;
        let http = GoogleClient::http_client()?;
        let email = key.client_email.clone();

        let sheets_tokens =
            TokenSource::new(key.clone(), &[SCOPE_SPREADSHEETS], http.clone());
        let drive_tokens = TokenSource::new(key, &[SCOPE_DRIVE_READONLY], http.clone());

        tracing::info!("Google workspace ready for service account {}", email);
        Ok(Self {
            sheets: SheetsApi::new(GoogleClient::new(http.clone(), sheets_tokens)),
            drive: DriveApi::new(GoogleClient::new(http, drive_tokens)),
        })
    }
}

#[async_trait]
impl SheetsGateway for GoogleWorkspace {
    async fn spreadsheet_title(&self, spreadsheet_id: &str) -> Result<String, GoogleError> {
        self.sheets.spreadsheet_title(spreadsheet_id).await
    }

    async fn tab_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, GoogleError> {
        self.sheets.tab_titles(spreadsheet_id).await
    }

    async fn read_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, GoogleError> {
        self.sheets.read_values(spreadsheet_id, range).await
    }

    async fn write_values(
        &self,
        spreadsheet_id: &str,
        writes: &[RangeWrite],
    ) -> Result<(), GoogleError> {
        self.sheets.write_values(spreadsheet_id, writes).await
    }
}

#[async_trait]
impl DriveGateway for GoogleWorkspace {
    async fn list_files(&self, query: &DriveQuery) -> Result<Vec<DriveFile>, GoogleError> {
        self.drive.list_files(query).await
    }
}

fn load_key(google: &GoogleConfig) -> Result<ServiceAccountKey, GoogleError> {
    if let Some(json) = google.credentials_json.as_deref() {
        return ServiceAccountKey::from_json(json);
    }
    if let Some(path) = google.credentials_path.as_deref() {
        return ServiceAccountKey::from_file(&config::resolve_path(path));
    }
    Err(GoogleError::Credentials(
        "Missing GOOGLE_SERVICE_ACCOUNT_JSON".to_string(),
    ))
}

/// The process-wide workspace, built on first use from the loaded config
pub fn workspace() -> Result<&'static GoogleWorkspace, ApiError> {
    WORKSPACE
        .get_or_try_init(|| GoogleWorkspace::from_config(&config::get().google))
        .map_err(ApiError::from)
}
