use async_trait::async_trait;
use serde::Deserialize;

use super::GoogleError;

pub const MIME_SPREADSHEET: &str = "application/vnd.google-apps.spreadsheet";
pub const MIME_FOLDER: &str = "application/vnd.google-apps.folder";

/// A Drive file as returned by `files.list`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

/// Structured `files.list` filter, rendered to Drive's `q` syntax
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveQuery {
    pub parent: Option<String>,
    pub mime_type: Option<String>,
    pub name: Option<String>,
    pub include_trashed: bool,
    pub page_size: u32,
}

impl Default for DriveQuery {
    fn default() -> Self {
        Self {
            parent: None,
            mime_type: None,
            name: None,
            include_trashed: false,
            page_size: 200,
        }
    }
}

impl DriveQuery {
    pub fn in_folder(folder_id: &str) -> Self {
        Self {
            parent: Some(folder_id.to_string()),
            ..Self::default()
        }
    }

    pub fn mime_type(mut self, mime_type: &str) -> Self {
        self.mime_type = Some(mime_type.to_string());
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// `'folder' in parents and mimeType='...' and trashed=false`
    pub fn to_q(&self) -> String {
        let mut clauses = Vec::new();
        if let Some(parent) = &self.parent {
            clauses.push(format!("'{}' in parents", escape_q(parent)));
        }
        if let Some(mime) = &self.mime_type {
            clauses.push(format!("mimeType='{}'", escape_q(mime)));
        }
        if let Some(name) = &self.name {
            clauses.push(format!("name='{}'", escape_q(name)));
        }
        if !self.include_trashed {
            clauses.push("trashed=false".to_string());
        }
        clauses.join(" and ")
    }

    /// Whether `file` in `parent` satisfies this query (used by in-memory gateways)
    pub fn matches(&self, file: &DriveFile, parent: &str, trashed: bool) -> bool {
        self.parent.as_deref().map_or(true, |p| p == parent)
            && self.mime_type.as_deref().map_or(true, |m| m == file.mime_type)
            && self.name.as_deref().map_or(true, |n| n == file.name)
            && (self.include_trashed || !trashed)
    }
}

/// Drive query literals escape `\` and `'`
fn escape_q(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// One cell (or range) to overwrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeWrite {
    pub range: String,
    pub value: String,
}

#[async_trait]
pub trait SheetsGateway: Send + Sync {
    /// Spreadsheet file title
    async fn spreadsheet_title(&self, spreadsheet_id: &str) -> Result<String, GoogleError>;

    /// Tab titles in display order
    async fn tab_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, GoogleError>;

    /// Cell text for an A1 range; rows may be ragged
    async fn read_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, GoogleError>;

    /// Write all ranges in one request (RAW input)
    async fn write_values(
        &self,
        spreadsheet_id: &str,
        writes: &[RangeWrite],
    ) -> Result<(), GoogleError>;
}

#[async_trait]
pub trait DriveGateway: Send + Sync {
    async fn list_files(&self, query: &DriveQuery) -> Result<Vec<DriveFile>, GoogleError>;
}

/// Everything the domain services need from Google
pub trait Workspace: SheetsGateway + DriveGateway {}

impl<T: SheetsGateway + DriveGateway> Workspace for T {}
