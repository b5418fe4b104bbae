//! In-memory Sheets/Drive used by service tests.

use async_trait::async_trait;
use std::sync::Mutex;

use super::gateway::{
    DriveFile, DriveGateway, DriveQuery, RangeWrite, SheetsGateway, MIME_SPREADSHEET,
};
use super::GoogleError;
use crate::shared::sheets::a1::{letter_to_index, tab_of_range};

struct FakeTab {
    title: String,
    rows: Vec<Vec<String>>,
}

struct FakeSpreadsheet {
    id: String,
    name: String,
    parent: String,
    tabs: Vec<FakeTab>,
}

struct FakeFile {
    file: DriveFile,
    parent: String,
    trashed: bool,
}

#[derive(Default)]
pub struct FakeWorkspace {
    spreadsheets: Mutex<Vec<FakeSpreadsheet>>,
    files: Vec<FakeFile>,
    writes: Mutex<Vec<(String, RangeWrite)>>,
    /// Spreadsheets whose reads fail with a rate limit
    failing_reads: Vec<String>,
}

pub fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

impl FakeWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a spreadsheet with the given tabs to `folder`
    pub fn spreadsheet(
        self,
        folder: &str,
        id: &str,
        name: &str,
        tabs: Vec<(&str, Vec<Vec<String>>)>,
    ) -> Self {
        let sheet = FakeSpreadsheet {
            id: id.to_string(),
            name: name.to_string(),
            parent: folder.to_string(),
            tabs: tabs
                .into_iter()
                .map(|(title, rows)| FakeTab {
                    title: title.to_string(),
                    rows,
                })
                .collect(),
        };
        if let Ok(mut sheets) = self.spreadsheets.lock() {
            sheets.push(sheet);
        }
        self
    }

    /// Add a plain Drive file (PDF, folder) to `folder`
    pub fn file(mut self, folder: &str, file: DriveFile, trashed: bool) -> Self {
        self.files.push(FakeFile {
            file,
            parent: folder.to_string(),
            trashed,
        });
        self
    }

    /// Make every value read of `id` fail
    pub fn failing_reads(mut self, id: &str) -> Self {
        self.failing_reads.push(id.to_string());
        self
    }

    pub fn writes(&self) -> Vec<(String, RangeWrite)> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    fn not_found(what: &str) -> GoogleError {
        GoogleError::Api {
            status: 404,
            message: format!("Requested entity was not found: {}", what),
        }
    }
}

/// "C7" -> (2, 6)
fn parse_cell(cell: &str) -> Option<(usize, usize)> {
    let split = cell.find(|c: char| c.is_ascii_digit())?;
    let column = letter_to_index(&cell[..split])?;
    let row: usize = cell[split..].parse().ok()?;
    Some((column, row.checked_sub(1)?))
}

#[async_trait]
impl SheetsGateway for FakeWorkspace {
    async fn spreadsheet_title(&self, spreadsheet_id: &str) -> Result<String, GoogleError> {
        let sheets = self.spreadsheets.lock().map_err(|_| Self::not_found("lock"))?;
        sheets
            .iter()
            .find(|s| s.id == spreadsheet_id)
            .map(|s| s.name.clone())
            .ok_or_else(|| Self::not_found(spreadsheet_id))
    }

    async fn tab_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, GoogleError> {
        let sheets = self.spreadsheets.lock().map_err(|_| Self::not_found("lock"))?;
        sheets
            .iter()
            .find(|s| s.id == spreadsheet_id)
            .map(|s| s.tabs.iter().map(|t| t.title.clone()).collect())
            .ok_or_else(|| Self::not_found(spreadsheet_id))
    }

    async fn read_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, GoogleError> {
        if self.failing_reads.iter().any(|id| id == spreadsheet_id) {
            return Err(GoogleError::RateLimited);
        }
        let tab = tab_of_range(range);
        let sheets = self.spreadsheets.lock().map_err(|_| Self::not_found("lock"))?;
        let sheet = sheets
            .iter()
            .find(|s| s.id == spreadsheet_id)
            .ok_or_else(|| Self::not_found(spreadsheet_id))?;
        sheet
            .tabs
            .iter()
            .find(|t| t.title == tab)
            .map(|t| t.rows.clone())
            .ok_or_else(|| GoogleError::Api {
                status: 400,
                message: format!("Unable to parse range: {}", range),
            })
    }

    async fn write_values(
        &self,
        spreadsheet_id: &str,
        writes: &[RangeWrite],
    ) -> Result<(), GoogleError> {
        let mut sheets = self.spreadsheets.lock().map_err(|_| Self::not_found("lock"))?;
        let sheet = sheets
            .iter_mut()
            .find(|s| s.id == spreadsheet_id)
            .ok_or_else(|| Self::not_found(spreadsheet_id))?;

        for write in writes {
            let tab_title = tab_of_range(&write.range);
            let cell = write.range.rsplit('!').next().unwrap_or_default();
            let (column, row) = parse_cell(cell).ok_or_else(|| GoogleError::Api {
                status: 400,
                message: format!("Unable to parse range: {}", write.range),
            })?;
            if let Some(tab) = sheet.tabs.iter_mut().find(|t| t.title == tab_title) {
                if tab.rows.len() <= row {
                    tab.rows.resize(row + 1, Vec::new());
                }
                let cells = &mut tab.rows[row];
                if cells.len() <= column {
                    cells.resize(column + 1, String::new());
                }
                cells[column] = write.value.clone();
            }
        }

        if let Ok(mut log) = self.writes.lock() {
            log.extend(
                writes
                    .iter()
                    .map(|w| (spreadsheet_id.to_string(), w.clone())),
            );
        }
        Ok(())
    }
}

#[async_trait]
impl DriveGateway for FakeWorkspace {
    async fn list_files(&self, query: &DriveQuery) -> Result<Vec<DriveFile>, GoogleError> {
        let sheets = self.spreadsheets.lock().map_err(|_| Self::not_found("lock"))?;
        let spreadsheets = sheets.iter().map(|s| {
            (
                DriveFile {
                    id: s.id.clone(),
                    name: s.name.clone(),
                    mime_type: MIME_SPREADSHEET.to_string(),
                    ..Default::default()
                },
                s.parent.as_str(),
                false,
            )
        });
        let others = self
            .files
            .iter()
            .map(|f| (f.file.clone(), f.parent.as_str(), f.trashed));

        Ok(spreadsheets
            .chain(others)
            .filter(|(file, parent, trashed)| query.matches(file, parent, *trashed))
            .map(|(file, _, _)| file)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read() {
        let fake = FakeWorkspace::new().spreadsheet(
            "folder",
            "s1",
            "Auction 1",
            vec![("Auction 1", rows(&[&["Bidder Number", "Paid"], &["1001"]]))],
        );
        fake.write_values(
            "s1",
            &[RangeWrite {
                range: "'Auction 1'!B2".into(),
                value: "Y".into(),
            }],
        )
        .await
        .unwrap();

        let values = fake.read_values("s1", "'Auction 1'!A:ZZ").await.unwrap();
        assert_eq!(values[1], vec!["1001".to_string(), "Y".to_string()]);
        assert_eq!(fake.writes().len(), 1);
    }
}
