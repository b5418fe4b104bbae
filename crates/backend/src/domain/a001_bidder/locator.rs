//! Finds the spreadsheet and tab holding an auction's bidder rows.
//!
//! Two layouts are supported: one spreadsheet with a tab per auction
//! (`sheets.spreadsheet_id`), or a Drive folder with one spreadsheet per
//! auction (`sheets.auctions_folder_id`). The single spreadsheet wins when
//! both are configured.

use contracts::domain::a001_bidder::AuctionSheet;

use crate::shared::config::SheetsSettings;
use crate::shared::error::ApiError;
use crate::shared::google::{DriveFile, DriveQuery, Workspace, MIME_SPREADSHEET};
use crate::shared::sheets::a1::tab_range;
use crate::shared::sheets::{
    auction_matches, extract_auction_number, find_header_row, normalize_auction_name,
    normalize_header, HeaderIndex,
};

/// Columns read for every tab
pub const FULL_RANGE: &str = "A:ZZ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionTab {
    pub sheet_id: String,
    /// Spreadsheet file name (or the tab title in single-spreadsheet mode)
    pub sheet_name: String,
    pub tab_name: String,
    pub auction_number: Option<u32>,
}

/// A tab's values with its header row located
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    pub tab: AuctionTab,
    pub rows: Vec<Vec<String>>,
    /// 0-based index into `rows`
    pub header_row: usize,
}

impl LoadedSheet {
    pub fn headers(&self) -> &[String] {
        self.rows
            .get(self.header_row)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn header_index(&self) -> HeaderIndex {
        HeaderIndex::new(self.headers())
    }

    /// Rows below the header, paired with their 1-based sheet row number
    pub fn data_rows(&self) -> impl Iterator<Item = (u32, &[String])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .skip(self.header_row + 1)
            .map(|(i, row)| (i as u32 + 1, row.as_slice()))
    }

    pub fn row(&self, row_number: u32) -> Option<&[String]> {
        let index = (row_number as usize).checked_sub(1)?;
        if index <= self.header_row {
            return None;
        }
        self.rows.get(index).map(Vec::as_slice)
    }
}

pub async fn read_tab(
    ws: &dyn Workspace,
    sheet_id: &str,
    tab_name: &str,
) -> Result<Vec<Vec<String>>, ApiError> {
    Ok(ws
        .read_values(sheet_id, &tab_range(tab_name, FULL_RANGE))
        .await?)
}

/// Spreadsheets in the auctions folder, not trashed
pub async fn list_folder_spreadsheets(
    ws: &dyn Workspace,
    folder_id: &str,
) -> Result<Vec<DriveFile>, ApiError> {
    let query = DriveQuery::in_folder(folder_id).mime_type(MIME_SPREADSHEET);
    Ok(ws.list_files(&query).await?)
}

pub fn auctions_folder(settings: &SheetsSettings) -> Result<&str, ApiError> {
    settings
        .auctions_folder_id
        .as_deref()
        .ok_or_else(|| ApiError::config("Missing AUCTION_SHEETS_FOLDER_ID"))
}

/// Every auction staff can pick, ordered by auction number then name
pub async fn list_auction_sheets(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
) -> Result<Vec<AuctionSheet>, ApiError> {
    let mut auctions: Vec<AuctionSheet> = if let Some(sheet_id) = &settings.spreadsheet_id {
        ws.tab_titles(sheet_id)
            .await?
            .into_iter()
            .map(|title| AuctionSheet {
                sheet_id: sheet_id.clone(),
                auction_number: tab_auction_number(settings, &title),
                name: title,
            })
            .collect()
    } else {
        list_folder_spreadsheets(ws, auctions_folder(settings)?)
            .await?
            .into_iter()
            .map(|file| AuctionSheet {
                auction_number: extract_auction_number(&file.name),
                sheet_id: file.id,
                name: file.name,
            })
            .collect()
    };

    auctions.sort_by(|a, b| {
        let key = |s: &AuctionSheet| s.auction_number.unwrap_or(u32::MAX);
        key(a).cmp(&key(b)).then_with(|| a.name.cmp(&b.name))
    });
    Ok(auctions)
}

/// Auction number of a tab in single-spreadsheet mode. The default tab holds
/// no particular auction, whatever digits its title carries.
fn tab_auction_number(settings: &SheetsSettings, title: &str) -> Option<u32> {
    if title == settings.default_tab {
        return None;
    }
    extract_auction_number(title)
}

fn find_exact<'a, T>(
    items: &'a [T],
    wanted: &str,
    name_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    let wanted_name = normalize_header(wanted);
    items
        .iter()
        .find(|item| normalize_header(&normalize_auction_name(name_of(item))) == wanted_name)
}

/// Exact normalized name first, then matching auction number
pub fn pick_by_name<'a, T>(
    items: &'a [T],
    wanted: &str,
    name_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    find_exact(items, wanted, &name_of)
        .or_else(|| items.iter().find(|item| auction_matches(name_of(item), wanted)))
}

/// Whether the caller will write to the located tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetAccess {
    Read,
    Write,
}

/// Tab of the single spreadsheet holding `wanted`. The default tab matches
/// only by name, and stands in for unknown auctions on reads only.
fn pick_tab<'a>(
    titles: &'a [String],
    wanted: &str,
    settings: &SheetsSettings,
    access: SheetAccess,
) -> Option<&'a String> {
    let picked = find_exact(titles, wanted, |t| t.as_str()).or_else(|| {
        titles
            .iter()
            .filter(|t| **t != settings.default_tab)
            .find(|t| auction_matches(t, wanted))
    });
    match (picked, access) {
        (Some(tab), _) => Some(tab),
        (None, SheetAccess::Read) => titles.iter().find(|t| **t == settings.default_tab),
        (None, SheetAccess::Write) => None,
    }
}

/// Locate the auction and read its tab, with the header row found.
///
/// A tab without a recognizable header row is NotFound rather than read
/// from row 1.
pub async fn load_auction_sheet(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
    auction: &str,
    access: SheetAccess,
) -> Result<LoadedSheet, ApiError> {
    let wanted = normalize_auction_name(auction);
    if wanted.is_empty() {
        return Err(ApiError::bad_request("Missing auction"));
    }

    if let Some(sheet_id) = &settings.spreadsheet_id {
        let titles = ws.tab_titles(sheet_id).await?;
        let tab_name = pick_tab(&titles, &wanted, settings, access)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("Auction not found: {}", wanted)))?;

        let rows = read_tab(ws, sheet_id, &tab_name).await?;
        let header_row = find_header_row(&rows, settings.header_scan_rows).ok_or_else(|| {
            ApiError::not_found(format!("Header row not found in tab {}", tab_name))
        })?;
        return Ok(LoadedSheet {
            tab: AuctionTab {
                sheet_id: sheet_id.clone(),
                sheet_name: tab_name.clone(),
                auction_number: tab_auction_number(settings, &tab_name),
                tab_name,
            },
            rows,
            header_row,
        });
    }

    let files = list_folder_spreadsheets(ws, auctions_folder(settings)?).await?;
    let file = pick_by_name(&files, &wanted, |f| f.name.as_str())
        .ok_or_else(|| ApiError::not_found(format!("Auction not found: {}", wanted)))?;

    tracing::debug!("Auction {} -> spreadsheet {} ({})", wanted, file.name, file.id);
    let titles = ws.tab_titles(&file.id).await?;
    first_tab_with_header(ws, settings, file, &titles)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Header row not found in {}", file.name)))
}

/// First tab of `file`, in display order, with a header row
async fn first_tab_with_header(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
    file: &DriveFile,
    titles: &[String],
) -> Result<Option<LoadedSheet>, ApiError> {
    for tab_name in titles {
        let rows = read_tab(ws, &file.id, tab_name).await?;
        if let Some(header_row) = find_header_row(&rows, settings.header_scan_rows) {
            return Ok(Some(LoadedSheet {
                tab: AuctionTab {
                    sheet_id: file.id.clone(),
                    sheet_name: file.name.clone(),
                    tab_name: tab_name.clone(),
                    auction_number: extract_auction_number(&file.name),
                },
                rows,
                header_row,
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::google::fake::{rows, FakeWorkspace};

    fn folder_settings() -> SheetsSettings {
        SheetsSettings {
            auctions_folder_id: Some("auctions".into()),
            ..Default::default()
        }
    }

    fn bidder_tab() -> Vec<Vec<String>> {
        rows(&[
            &["Mad Bids Auction 22"],
            &[],
            &["Bidder Number", "Buyer First Name", "Payment Status"],
            &["1001", "Ada", "Y"],
        ])
    }

    #[tokio::test]
    async fn test_folder_mode_matches_by_number_and_skips_title_rows() {
        let ws = FakeWorkspace::new()
            .spreadsheet("auctions", "s21", "Auction 21", vec![("Sheet1", bidder_tab())])
            .spreadsheet(
                "auctions",
                "s22",
                "mad bids auction-22",
                vec![("Notes", rows(&[&["misc"]])), ("Bidders", bidder_tab())],
            );

        let loaded = load_auction_sheet(&ws, &folder_settings(), "22", SheetAccess::Read).await.unwrap();
        assert_eq!(loaded.tab.sheet_id, "s22");
        assert_eq!(loaded.tab.tab_name, "Bidders");
        assert_eq!(loaded.tab.auction_number, Some(22));
        assert_eq!(loaded.header_row, 2);
        let data: Vec<_> = loaded.data_rows().map(|(n, _)| n).collect();
        assert_eq!(data, vec![4]);
    }

    #[tokio::test]
    async fn test_exact_name_beats_number() {
        let ws = FakeWorkspace::new()
            .spreadsheet("auctions", "a", "Auction 5 (old)", vec![("Sheet1", bidder_tab())])
            .spreadsheet("auctions", "b", "Auction 5", vec![("Sheet1", bidder_tab())]);
        let loaded = load_auction_sheet(&ws, &folder_settings(), "auction   5", SheetAccess::Read)
            .await
            .unwrap();
        assert_eq!(loaded.tab.sheet_id, "b");
    }

    #[tokio::test]
    async fn test_unknown_auction_and_missing_header_are_not_found() {
        let ws = FakeWorkspace::new().spreadsheet(
            "auctions",
            "s1",
            "Auction 1",
            vec![("Sheet1", rows(&[&["Name", "Total"], &["Ada", "10"]]))],
        );
        let settings = folder_settings();

        let err = load_auction_sheet(&ws, &settings, "9", SheetAccess::Read).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "Auction not found: Auction 9");

        let err = load_auction_sheet(&ws, &settings, "1", SheetAccess::Read).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    fn master_settings() -> SheetsSettings {
        SheetsSettings {
            spreadsheet_id: Some("master".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_single_spreadsheet_mode_uses_tabs() {
        let ws = FakeWorkspace::new().spreadsheet(
            "root",
            "master",
            "Master",
            vec![("Auction 7", bidder_tab()), ("Sheet1", bidder_tab())],
        );
        let settings = master_settings();

        let loaded = load_auction_sheet(&ws, &settings, "7", SheetAccess::Read)
            .await
            .unwrap();
        assert_eq!(loaded.tab.tab_name, "Auction 7");
        assert_eq!(loaded.tab.auction_number, Some(7));

        // Unknown auctions fall back to the default tab for reads
        let loaded = load_auction_sheet(&ws, &settings, "8", SheetAccess::Read)
            .await
            .unwrap();
        assert_eq!(loaded.tab.tab_name, "Sheet1");
        assert_eq!(loaded.tab.auction_number, None);

        let listed = list_auction_sheets(&ws, &settings).await.unwrap();
        let names: Vec<_> = listed
            .iter()
            .map(|a| (a.name.as_str(), a.auction_number))
            .collect();
        assert_eq!(names, vec![("Auction 7", Some(7)), ("Sheet1", None)]);
    }

    #[tokio::test]
    async fn test_default_tab_is_never_matched_by_number() {
        let ws = FakeWorkspace::new().spreadsheet(
            "root",
            "master",
            "Master",
            vec![("Sheet1", bidder_tab()), ("Mad Bids 1", bidder_tab())],
        );
        let settings = master_settings();

        let loaded = load_auction_sheet(&ws, &settings, "1", SheetAccess::Write)
            .await
            .unwrap();
        assert_eq!(loaded.tab.tab_name, "Mad Bids 1");

        // By name it is still reachable
        let loaded = load_auction_sheet(&ws, &settings, "sheet1", SheetAccess::Write)
            .await
            .unwrap();
        assert_eq!(loaded.tab.tab_name, "Sheet1");
    }

    #[tokio::test]
    async fn test_unknown_auction_is_not_found_for_writes() {
        let ws = FakeWorkspace::new().spreadsheet(
            "root",
            "master",
            "Master",
            vec![("Auction 7", bidder_tab()), ("Sheet1", bidder_tab())],
        );
        let err = load_auction_sheet(&ws, &master_settings(), "99", SheetAccess::Write)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "Auction not found: Auction 99");
    }

    #[tokio::test]
    async fn test_missing_folder_is_config_error() {
        let ws = FakeWorkspace::new();
        let err = list_auction_sheets(&ws, &SheetsSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[tokio::test]
    async fn test_list_orders_by_auction_number() {
        let ws = FakeWorkspace::new()
            .spreadsheet("auctions", "s10", "Auction 10", vec![])
            .spreadsheet("auctions", "s2", "Auction 2", vec![])
            .spreadsheet("auctions", "x", "Inventory", vec![])
            .spreadsheet("elsewhere", "s1", "Auction 1", vec![]);
        let listed = list_auction_sheets(&ws, &folder_settings()).await.unwrap();
        let names: Vec<_> = listed.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Auction 2", "Auction 10", "Inventory"]);
    }
}
