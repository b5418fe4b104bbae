use contracts::domain::a001_bidder::{
    BidderRecord, BidderUpdateRequest, CellWrite, RecordCell, StatusFlags,
};
use contracts::enums::SheetField;

use super::locator::{load_auction_sheet, LoadedSheet, SheetAccess};
use crate::shared::config::SheetsSettings;
use crate::shared::error::ApiError;
use crate::shared::google::{RangeWrite, Workspace};
use crate::shared::sheets::a1::{cell_ref, tab_range};
use crate::shared::sheets::{is_yes, resolve_update_column, ResolvedColumns};

/// Typed record for one data row of a loaded sheet
pub fn build_record(
    loaded: &LoadedSheet,
    columns: &ResolvedColumns,
    row_number: u32,
    row: &[String],
) -> BidderRecord {
    let value = |field| columns.value(row, field).map(str::to_string);
    let flag = |field| columns.value(row, field).map(is_yes).unwrap_or(false);

    let cells = loaded
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, header)| !header.trim().is_empty())
        .map(|(i, header)| RecordCell {
            header: header.trim().to_string(),
            value: row.get(i).cloned().unwrap_or_default(),
        })
        .collect();

    BidderRecord {
        sheet_id: loaded.tab.sheet_id.clone(),
        tab_name: loaded.tab.tab_name.clone(),
        row_number,
        auction_name: loaded.tab.sheet_name.clone(),
        auction_number: loaded.tab.auction_number,
        bidder_number: columns.text(row, SheetField::BidderNumber),
        first_name: value(SheetField::FirstName),
        last_name: value(SheetField::LastName),
        phone: value(SheetField::Phone),
        lots_bought: value(SheetField::LotsBought),
        balance: value(SheetField::Balance),
        payment_status: value(SheetField::PaymentStatus),
        shipping_required: value(SheetField::ShippingRequired),
        pickup_status: value(SheetField::PickupStatus),
        shipped_status: value(SheetField::ShippedStatus),
        refund: value(SheetField::Refund),
        notes: value(SheetField::Notes),
        flags: StatusFlags {
            paid: flag(SheetField::PaymentStatus),
            shipping_required: flag(SheetField::ShippingRequired),
            shipped: flag(SheetField::ShippedStatus),
            picked_up: flag(SheetField::PickupStatus),
        },
        cells,
    }
}

/// Row number and cells of the bidder's row
fn find_bidder_row<'a>(
    loaded: &'a LoadedSheet,
    columns: &ResolvedColumns,
    bidder: &str,
) -> Result<(u32, &'a [String]), ApiError> {
    if columns.get(SheetField::BidderNumber).is_none() {
        return Err(ApiError::not_found(format!(
            "Bidder Number column not found in {}",
            loaded.tab.tab_name
        )));
    }
    loaded
        .data_rows()
        .find(|(_, row)| columns.value(row, SheetField::BidderNumber) == Some(bidder))
        .ok_or_else(|| ApiError::not_found(format!("Bidder not found: {}", bidder)))
}

pub async fn lookup_bidder(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
    auction: &str,
    bidder: &str,
) -> Result<BidderRecord, ApiError> {
    let bidder = bidder.trim();
    if bidder.is_empty() {
        return Err(ApiError::bad_request("Missing bidder number"));
    }

    let loaded = load_auction_sheet(ws, settings, auction, SheetAccess::Read).await?;
    let columns = ResolvedColumns::from_index(&loaded.header_index());
    let (row_number, row) = find_bidder_row(&loaded, &columns, bidder)?;

    tracing::info!(
        "Bidder {} found in {} / {} row {}",
        bidder,
        loaded.tab.sheet_name,
        loaded.tab.tab_name,
        row_number
    );
    Ok(build_record(&loaded, &columns, row_number, row))
}

/// Write `updates` into the bidder's row, one cell per entry, in one request
pub async fn update_bidder(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
    request: &BidderUpdateRequest,
) -> Result<Vec<CellWrite>, ApiError> {
    let bidder = request.bidder.trim();
    if bidder.is_empty() {
        return Err(ApiError::bad_request("Missing bidder number"));
    }
    if request.updates.is_empty() {
        return Err(ApiError::bad_request("No updates provided"));
    }
    if request.updates.keys().any(|k| k.trim().is_empty()) {
        return Err(ApiError::bad_request("Empty field name in updates"));
    }

    let loaded = load_auction_sheet(ws, settings, &request.auction, SheetAccess::Write).await?;
    let index = loaded.header_index();
    let columns = ResolvedColumns::from_index(&index);
    let (row_number, _) = find_bidder_row(&loaded, &columns, bidder)?;
    let bidder_column = columns.get(SheetField::BidderNumber);

    let mut cells = Vec::with_capacity(request.updates.len());
    for (field, value) in &request.updates {
        let column = resolve_update_column(&index, field)
            .ok_or_else(|| ApiError::not_found(format!("Column not found: {}", field.trim())))?;
        if Some(column) == bidder_column {
            return Err(ApiError::bad_request("Bidder Number cannot be changed"));
        }
        cells.push(CellWrite {
            field: field.trim().to_string(),
            range: tab_range(&loaded.tab.tab_name, &cell_ref(column, row_number)),
            value: value.clone(),
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
        "Updated {} cell(s) for bidder {} in {}",
        cells.len(),
        bidder,
        loaded.tab.sheet_name
    );
    Ok(cells)
}
