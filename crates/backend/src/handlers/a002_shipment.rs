use axum::Json;
use contracts::domain::a001_bidder::BidderUpdateResponse;
use contracts::domain::a002_shipment::{
    ShipmentDiagnostics, ShipmentItemResponse, ShipmentItemUpdateRequest, ShipmentListResponse,
};
use contracts::enums::ShipmentSort;
use contracts::shared::ApiEnvelope;
use serde::Deserialize;

use crate::domain::a002_shipment::service::{self, ListOptions};
use crate::shared::config;
use crate::shared::error::ApiError;
use crate::shared::extract::{ApiJson, ApiQuery};
use crate::shared::google;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub debug: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn into_options(self) -> Result<ListOptions, ApiError> {
        let debug = self
            .debug
            .as_deref()
            .map(str::trim)
            .map(|d| d == "1" || d.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) => Some(ShipmentSort::from_code(code).ok_or_else(|| {
                ApiError::bad_request(format!("Unknown sort mode: {}", code))
            })?),
        };
        Ok(ListOptions {
            debug,
            query: self.q.filter(|q| !q.trim().is_empty()),
            sort,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    #[serde(default)]
    pub sheet_id: String,
    #[serde(alias = "row")]
    pub row_number: Option<u32>,
    pub tab_name: Option<String>,
}

/// GET /api/shipments/list?debug=1&q=..&sort=AUCTION_DESC
pub async fn list(
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<ApiEnvelope<ShipmentListResponse>>, ApiError> {
    let options = query.into_options()?;
    let ws = google::workspace()?;
    let response = service::list_shipments(ws, &config::get().sheets, &options).await?;
    Ok(Json(ApiEnvelope::ok(response)))
}

/// GET /api/shipments/item?sheetId=..&rowNumber=..
pub async fn get_item(
    ApiQuery(query): ApiQuery<ItemQuery>,
) -> Result<Json<ApiEnvelope<ShipmentItemResponse>>, ApiError> {
    let row_number = query
        .row_number
        .ok_or_else(|| ApiError::bad_request("Missing rowNumber"))?;
    let ws = google::workspace()?;
    let item = service::get_item(
        ws,
        &config::get().sheets,
        &query.sheet_id,
        row_number,
        query.tab_name.as_deref(),
    )
    .await?;
    Ok(Json(ApiEnvelope::ok(ShipmentItemResponse { item })))
}

/// POST /api/shipments/item/update
pub async fn update_item(
    ApiJson(request): ApiJson<ShipmentItemUpdateRequest>,
) -> Result<Json<ApiEnvelope<BidderUpdateResponse>>, ApiError> {
    let ws = google::workspace()?;
    let updated = service::update_item(ws, &config::get().sheets, &request).await?;
    Ok(Json(ApiEnvelope::ok(BidderUpdateResponse { updated })))
}

/// GET /api/shipments/diag
pub async fn diag() -> Result<Json<ApiEnvelope<ShipmentDiagnostics>>, ApiError> {
    let ws = google::workspace()?;
    let report = service::diagnostics(ws, &config::get().sheets).await?;
    Ok(Json(ApiEnvelope::ok(report)))
}
