use contracts::domain::a003_invoice::InvoiceLink;

use crate::domain::a001_bidder::locator::pick_by_name;
use crate::shared::config::SheetsSettings;
use crate::shared::error::ApiError;
use crate::shared::google::{DriveFile, DriveQuery, Workspace, MIME_FOLDER};
use crate::shared::sheets::normalize_auction_name;

fn invoices_folder(settings: &SheetsSettings) -> Result<&str, ApiError> {
    settings
        .invoices_folder_id
        .as_deref()
        .ok_or_else(|| ApiError::config("Missing INVOICE_PDF_FOLDER_ID"))
}

fn view_url(file: &DriveFile) -> String {
    file.web_view_link
        .clone()
        .filter(|link| !link.trim().is_empty())
        .unwrap_or_else(|| format!("https://drive.google.com/file/d/{}/view", file.id))
}

async fn find_named(
    ws: &dyn Workspace,
    folder_id: &str,
    file_name: &str,
) -> Result<Option<DriveFile>, ApiError> {
    let query = DriveQuery::in_folder(folder_id).named(file_name).page_size(10);
    Ok(ws.list_files(&query).await?.into_iter().next())
}

/// Drive link to `{bidcard}.pdf`.
///
/// When the invoices folder has a subfolder for the auction it is searched
/// first, then the invoices folder itself.
pub async fn find_invoice(
    ws: &dyn Workspace,
    settings: &SheetsSettings,
    auction: &str,
    bidcard: &str,
) -> Result<InvoiceLink, ApiError> {
    let bidcard = bidcard.trim();
    if bidcard.is_empty() {
        return Err(ApiError::bad_request("Missing bidcard"));
    }
    let root = invoices_folder(settings)?;
    let file_name = format!("{}.pdf", bidcard);

    let mut search_in = Vec::with_capacity(2);
    let auction = normalize_auction_name(auction);
    if !auction.is_empty() {
        let folders = ws
            .list_files(&DriveQuery::in_folder(root).mime_type(MIME_FOLDER))
            .await?;
        if let Some(folder) = pick_by_name(&folders, &auction, |f| f.name.as_str()) {
            search_in.push(folder.id.clone());
        }
    }
    search_in.push(root.to_string());

    for folder_id in &search_in {
        if let Some(file) = find_named(ws, folder_id, &file_name).await? {
            tracing::debug!("Invoice {} found in folder {}", file_name, folder_id);
            return Ok(InvoiceLink {
                invoice_url: view_url(&file),
                file_id: file.id,
                file_name: file.name,
            });
        }
    }

    Err(ApiError::not_found(format!("Invoice not found: {}", file_name)))
}
