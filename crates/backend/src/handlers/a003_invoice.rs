use axum::Json;
use contracts::domain::a003_invoice::InvoiceLinkResponse;
use contracts::shared::ApiEnvelope;
use serde::Deserialize;

use crate::domain::a003_invoice::service;
use crate::shared::config;
use crate::shared::error::ApiError;
use crate::shared::extract::ApiQuery;
use crate::shared::google;

#[derive(Debug, Deserialize)]
pub struct InvoiceQuery {
    #[serde(default)]
    pub auction: String,
    #[serde(default, alias = "bidder", alias = "bidderNumber")]
    pub bidcard: String,
}

/// GET /api/auctions/invoice?auction=..&bidcard=..
pub async fn get_invoice(
    ApiQuery(query): ApiQuery<InvoiceQuery>,
) -> Result<Json<ApiEnvelope<InvoiceLinkResponse>>, ApiError> {
    let ws = google::workspace()?;
    let invoice =
        service::find_invoice(ws, &config::get().sheets, &query.auction, &query.bidcard).await?;
    Ok(Json(ApiEnvelope::ok(invoice.into())))
}
