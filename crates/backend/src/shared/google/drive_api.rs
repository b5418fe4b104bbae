use async_trait::async_trait;
use serde::Deserialize;

use super::client::GoogleClient;
use super::gateway::{DriveFile, DriveGateway, DriveQuery};
use super::GoogleError;

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const FILE_FIELDS: &str = "nextPageToken, files(id, name, mimeType, webViewLink)";
/// Guards against a server that keeps handing back page tokens
const MAX_PAGES: usize = 50;

pub struct DriveApi {
    client: GoogleClient,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl DriveApi {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }
}

/// Token for the page after `pages_fetched`, or `None` to stop.
/// Stopping at `MAX_PAGES` with results pending is logged as a warning.
fn next_page_token(next: Option<String>, pages_fetched: usize, q: &str) -> Option<String> {
    let token = next.filter(|t| !t.is_empty())?;
    if pages_fetched >= MAX_PAGES {
        tracing::warn!(
            "Drive query [{}] still had results after {} pages, listing truncated",
            q,
            MAX_PAGES
        );
        return None;
    }
    Some(token)
}

#[async_trait]
impl DriveGateway for DriveApi {
    async fn list_files(&self, query: &DriveQuery) -> Result<Vec<DriveFile>, GoogleError> {
        let q = query.to_q();
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        for pages_fetched in 1.. {
            let mut params = vec![
                ("q", q.clone()),
                ("fields", FILE_FIELDS.to_string()),
                ("pageSize", query.page_size.to_string()),
                ("supportsAllDrives", "true".to_string()),
                ("includeItemsFromAllDrives", "true".to_string()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            let page: FileList = self.client.get(DRIVE_FILES_URL, &params).await?;
            files.extend(page.files);

            page_token = next_page_token(page.next_page_token, pages_fetched, &q);
            if page_token.is_none() {
                break;
            }
        }

        tracing::debug!("Drive query [{}] returned {} file(s)", q, files.len());
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_list_page() {
        let page: FileList = serde_json::from_str(
            r#"{
                "nextPageToken": "abc",
                "files": [{"id": "1", "name": "Auction 12", "mimeType": "application/vnd.google-apps.spreadsheet"}]
            }"#,
        )
        .unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));
        assert_eq!(page.files[0].name, "Auction 12");
        assert!(page.files[0].web_view_link.is_none());
    }

    #[test]
    fn test_paging_stops_at_cap() {
        let token = || Some("more".to_string());
        assert_eq!(next_page_token(token(), 1, "q"), token());
        assert_eq!(next_page_token(token(), MAX_PAGES - 1, "q"), token());
        assert_eq!(next_page_token(token(), MAX_PAGES, "q"), None);
        assert_eq!(next_page_token(Some(String::new()), 1, "q"), None);
        assert_eq!(next_page_token(None, 1, "q"), None);
    }
}
