use contracts::domain::a001_bidder::{AuctionSheet, CellWrite};
use contracts::domain::a002_shipment::{
    DiagCounts, DiagIndexes, FlagInput, SheetScanInfo, ShipmentCandidate, ShipmentDiagnostics,
    ShipmentItem, ShipmentItemUpdateRequest, ShipmentListResponse,
};
use contracts::enums::{SheetField, ShipmentSort};

use super::filter::{
    apply_query, filter_outstanding, sort_shipments, to_candidate, ShipmentColumns,
};
use crate::domain::a001_bidder::locator::{
    auctions_folder, list_folder_spreadsheets, read_tab, AuctionTab, LoadedSheet,
};
use crate::domain::a003_invoice::service::find_invoice;
use crate::shared::config::SheetsSettings;
use crate::shared::error::ApiError;
use crate::shared::google::{DriveFile, RangeWrite, Workspace};
use crate::shared::sheets::a1::{cell_ref, tab_range};
use crate::shared::sheets::{
    cell_at, extract_auction_number, find_header_row, find_header_row_or_first, flag_cell,
    is_blank, is_yes, ResolvedColumns,
};

/// Rows shown by the diagnostics endpoint
const DIAG_SAMPLE_ROWS: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub debug: bool,
    pub query: Option<String>,
    pub sort: Option<ShipmentSort>,
}

fn missing_columns_error(tab: &AuctionTab, missing: &[SheetField]) -> ApiError {
    let names: Vec<&str> = missing.iter().map(|f| f.display_name()).collect();
    ApiError::not_found(format!(
        "Missing columns in {} / {}: {}",
        tab.sheet_name,
        tab.tab_name,
        names.join(", ")
    ))
}

/// First tab, in display order, with a header row and every required
/// shipment column. The list and the item routes both pick tabs this way, so
/// a listed (sheetId, rowNumber) always points into the same tab.
async fn find_shipment_tab(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
    file: &DriveFile,
    titles: Vec<String>,
    scanned: &mut Vec<String>,
) -> Result<Option<(LoadedSheet, ShipmentColumns)>, ApiError> {
    for tab_name in titles {
        let rows = read_tab(ws, &file.id, &tab_name).await?;
        scanned.push(tab_name.clone());

        let Some(header_row) = find_header_row(&rows, settings.header_scan_rows) else {
            continue;
        };
        let resolved = ResolvedColumns::resolve(&rows[header_row]);
        let columns = match ShipmentColumns::from_resolved(&resolved) {
            Ok(columns) => columns,
            Err(missing) => {
                tracing::debug!("{} / {} lacks {:?}", file.name, tab_name, missing);
                continue;
            }
        };

        let loaded = LoadedSheet {
            tab: AuctionTab {
                sheet_id: file.id.clone(),
                sheet_name: file.name.clone(),
                auction_number: extract_auction_number(&file.name)
                    .or_else(|| extract_auction_number(&tab_name)),
                tab_name,
            },
            rows,
            header_row,
        };
        return Ok(Some((loaded, columns)));
    }
    Ok(None)
}

/// Outstanding shipments from the first usable tab of one spreadsheet
async fn scan_spreadsheet(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
    file: &DriveFile,
    info: &mut SheetScanInfo,
) -> Result<Vec<ShipmentCandidate>, ApiError> {
    let titles = ws.tab_titles(&file.id).await?;
    let found = find_shipment_tab(ws, settings, file, titles, &mut info.tabs_scanned).await?;
    let Some((loaded, columns)) = found else {
        return Ok(Vec::new());
    };

    info.matched_tab = Some(loaded.tab.tab_name.clone());
    info.matched_header_row = Some(loaded.header_row);
    info.headers = Some(loaded.headers().to_vec());

    // One tab per spreadsheet, or the same bidder shows up twice
    Ok(filter_outstanding(&loaded.tab, &columns, loaded.data_rows()))
}

/// The shipment tab of a spreadsheet by id. `tab_name` pins the tab, which
/// must then carry the shipment columns itself.
async fn load_shipment_sheet(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
    sheet_id: &str,
    tab_name: Option<&str>,
) -> Result<(LoadedSheet, ShipmentColumns), ApiError> {
    let titles = ws.tab_titles(sheet_id).await?;
    let file = DriveFile {
        id: sheet_id.to_string(),
        name: ws.spreadsheet_title(sheet_id).await?,
        ..Default::default()
    };

    let titles = match tab_name {
        Some(tab) if titles.iter().any(|t| t == tab) => vec![tab.to_string()],
        Some(tab) => return Err(ApiError::not_found(format!("Tab not found: {}", tab))),
        None => titles,
    };
    let mut scanned = Vec::new();
    find_shipment_tab(ws, settings, &file, titles, &mut scanned)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "No tab with shipment columns in {} (checked {})",
                file.name,
                scanned.join(", ")
            ))
        })
}

/// Every outstanding shipment across the auctions folder
pub async fn list_shipments(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
    options: &ListOptions,
) -> Result<ShipmentListResponse, ApiError> {
    let folder_id = auctions_folder(settings)?;
    let files = list_folder_spreadsheets(ws, folder_id).await?;

    let mut shipments = Vec::new();
    let mut debug_info = Vec::with_capacity(files.len());
    for file in &files {
        let mut info = SheetScanInfo {
            file_name: file.name.clone(),
            spreadsheet_id: file.id.clone(),
            ..Default::default()
        };
        // A failed read fails the whole list rather than hiding a sheet
        shipments.extend(scan_spreadsheet(ws, settings, file, &mut info).await?);
        debug_info.push(info);
    }

    if let Some(query) = options.query.as_deref() {
        apply_query(&mut shipments, query);
    }
    sort_shipments(&mut shipments, options.sort);

    tracing::info!(
        "Found {} outstanding shipment(s) in {} spreadsheet(s)",
        shipments.len(),
        files.len()
    );
    Ok(ShipmentListResponse {
        count: shipments.len(),
        shipments,
        sheets_found: Some(files.len()),
        debug_info: options.debug.then_some(debug_info),
    })
}

fn check_row_number(row_number: u32) -> Result<(), ApiError> {
    if row_number < 2 {
        return Err(ApiError::bad_request("rowNumber must be 2 or greater"));
    }
    Ok(())
}

/// One row of a spreadsheet as a shipment, with its invoice link when one exists
pub async fn get_item(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
    sheet_id: &str,
    row_number: u32,
    tab_name: Option<&str>,
) -> Result<ShipmentItem, ApiError> {
    if sheet_id.trim().is_empty() {
        return Err(ApiError::bad_request("Missing sheetId"));
    }
    check_row_number(row_number)?;

    let (loaded, columns) = load_shipment_sheet(ws, settings, sheet_id.trim(), tab_name).await?;
    let row = loaded
        .row(row_number)
        .ok_or_else(|| ApiError::not_found(format!("Row {} not found", row_number)))?;
    let shipment = to_candidate(&loaded.tab, &columns, row_number, row)
        .ok_or_else(|| ApiError::not_found(format!("Row {} has no bidder number", row_number)))?;

    // A missing invoice never fails the item
    let invoice_url = if settings.invoices_folder_id.is_some() {
        match find_invoice(ws, settings, &shipment.auction_name, &shipment.bidder_number).await {
            Ok(link) => Some(link.invoice_url),
            Err(e) => {
                tracing::debug!("No invoice for bidder {}: {}", shipment.bidder_number, e);
                None
            }
        }
    } else {
        None
    };

    Ok(ShipmentItem {
        shipment,
        invoice_url,
    })
}

fn flag_value(input: &FlagInput) -> bool {
    match input {
        FlagInput::Bool(value) => *value,
        FlagInput::Text(text) => is_yes(text),
    }
}

/// Write the status flags present in `request` as "Y" / ""
pub async fn update_item(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
    request: &ShipmentItemUpdateRequest,
) -> Result<Vec<CellWrite>, ApiError> {
    if request.sheet_id.trim().is_empty() {
        return Err(ApiError::bad_request("Missing sheetId"));
    }
    check_row_number(request.row_number)?;

    let flags: Vec<(SheetField, bool)> = [
        (SheetField::PaymentStatus, &request.payment_status),
        (SheetField::ShippingRequired, &request.shipping_required),
        (SheetField::ShippedStatus, &request.shipped_status),
    ]
    .into_iter()
    .filter_map(|(field, input)| input.as_ref().map(|i| (field, flag_value(i))))
    .collect();
    if flags.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let (loaded, columns) = load_shipment_sheet(
        ws,
        settings,
        request.sheet_id.trim(),
        request.tab_name.as_deref(),
    )
    .await?;
    if loaded.row(request.row_number).is_none() {
        return Err(ApiError::not_found(format!(
            "Row {} not found",
            request.row_number
        )));
    }
    let mut cells = Vec::with_capacity(flags.len());
    for (field, value) in flags {
        let column = columns
            .flag_column(field)
            .ok_or_else(|| missing_columns_error(&loaded.tab, &[field]))?;
        cells.push(CellWrite {
            field: field.display_name().to_string(),
            range: tab_range(&loaded.tab.tab_name, &cell_ref(column, request.row_number)),
            value: flag_cell(value).to_string(),
        });
    }

    let writes: Vec<RangeWrite> = cells
        .iter()
        .map(|c| RangeWrite {
            range: c.range.clone(),
            value: c.value.clone(),
        })
        .collect();
    ws.write_values(&loaded.tab.sheet_id, &writes).await?;

    tracing::info!(
        "Updated shipment flags in {} / {} row {}",
        loaded.tab.sheet_name,
        loaded.tab.tab_name,
        request.row_number
    );
    Ok(cells)
}

/// What the filter sees in the first spreadsheet of the auctions folder.
///
/// Unlike the list, a sheet without a recognizable header row is read from
/// row 1 so the detected headers can be inspected.
pub async fn diagnostics(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
) -> Result<ShipmentDiagnostics, ApiError> {
    let folder_id = auctions_folder(settings)?;
    let files = list_folder_spreadsheets(ws, folder_id).await?;

    let mut diag = ShipmentDiagnostics {
        folder_id: folder_id.to_string(),
        sheets_found: files.len(),
        ..Default::default()
    };
    let Some(file) = files.first() else {
        diag.note = Some("No spreadsheets found in the auctions folder".to_string());
        return Ok(diag);
    };
    diag.first_sheet = Some(AuctionSheet {
        sheet_id: file.id.clone(),
        name: file.name.clone(),
        auction_number: extract_auction_number(&file.name),
    });

    let Some(tab_name) = ws.tab_titles(&file.id).await?.into_iter().next() else {
        diag.note = Some(format!("{} has no tabs", file.name));
        return Ok(diag);
    };
    let rows = read_tab(ws, &file.id, &tab_name).await?;
    diag.tab_name = Some(tab_name);
    diag.row_count = rows.len();

    let detected = find_header_row(&rows, settings.header_scan_rows);
    let header_row = find_header_row_or_first(&rows, settings.header_scan_rows);
    diag.header_row_detected = detected.is_some();
    if rows.is_empty() {
        diag.note = Some("Sheet is empty".to_string());
        return Ok(diag);
    }
    diag.header_row = Some(header_row);

    let headers = &rows[header_row];
    let columns = ResolvedColumns::resolve(headers);
    diag.detected_headers = headers.clone();
    diag.indexes = DiagIndexes {
        bidder: columns.get(SheetField::BidderNumber),
        payment: columns.get(SheetField::PaymentStatus),
        shipping_required: columns.get(SheetField::ShippingRequired),
        shipped: columns.get(SheetField::ShippedStatus),
    };

    let data = &rows[header_row + 1..];
    diag.sample_rows = data.iter().take(DIAG_SAMPLE_ROWS).cloned().collect();
    diag.counts = count_rows(&diag.indexes, data);

    if detected.is_none() {
        diag.note = Some("No header row found; showing row 1 as headers".to_string());
    }
    Ok(diag)
}

/// Per-condition counts over rows that carry a bidder number
fn count_rows(indexes: &DiagIndexes, rows: &[Vec<String>]) -> DiagCounts {
    let mut counts = DiagCounts::default();
    for row in rows {
        if is_blank(cell_at(row, indexes.bidder)) {
            continue;
        }
        counts.has_bidder += 1;

        let paid = is_yes(cell_at(row, indexes.payment));
        let ship_req = is_yes(cell_at(row, indexes.shipping_required));
        let shipped_blank = is_blank(cell_at(row, indexes.shipped));
        counts.paid_yes += paid as usize;
        counts.ship_req_yes += ship_req as usize;
        counts.shipped_blank += shipped_blank as usize;
        counts.final_match += (paid && ship_req && shipped_blank) as usize;
    }
    counts
}
