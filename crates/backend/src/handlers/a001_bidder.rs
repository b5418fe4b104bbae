use axum::Json;
use contracts::domain::a001_bidder::{
    AuctionListResponse, BidderLookupResponse, BidderUpdateRequest, BidderUpdateResponse,
};
use contracts::shared::ApiEnvelope;
use serde::Deserialize;

use crate::domain::a001_bidder::{locator, service};
use crate::shared::config;
use crate::shared::error::ApiError;
use crate::shared::extract::{ApiJson, ApiQuery};
use crate::shared::google;

#[derive(Debug, Deserialize)]
pub struct BidderQuery {
    #[serde(default)]
    pub auction: String,
    #[serde(default, alias = "bidderNumber", alias = "bidcard")]
    pub bidder: String,
}

/// GET /api/auctions
pub async fn list_auctions() -> Result<Json<ApiEnvelope<AuctionListResponse>>, ApiError> {
    let ws = google::workspace()?;
    let auctions = locator::list_auction_sheets(ws, &config::get().sheets).await?;
    Ok(Json(ApiEnvelope::ok(AuctionListResponse {
        count: auctions.len(),
        auctions,
    })))
}

/// GET /api/auctions/bidder?auction=..&bidder=..
pub async fn get_bidder(
    ApiQuery(query): ApiQuery<BidderQuery>,
) -> Result<Json<ApiEnvelope<BidderLookupResponse>>, ApiError> {
    let ws = google::workspace()?;
    let record =
        service::lookup_bidder(ws, &config::get().sheets, &query.auction, &query.bidder).await?;
    Ok(Json(ApiEnvelope::ok(BidderLookupResponse { record })))
}

/// POST /api/auctions/update
pub async fn update_bidder(
    ApiJson(request): ApiJson<BidderUpdateRequest>,
) -> Result<Json<ApiEnvelope<BidderUpdateResponse>>, ApiError> {
    let ws = google::workspace()?;
    let updated = service::update_bidder(ws, &config::get().sheets, &request).await?;
    Ok(Json(ApiEnvelope::ok(BidderUpdateResponse { updated })))
}
