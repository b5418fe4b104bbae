//! The outstanding-shipment rule: paid, shipping requested, not yet shipped.

use std::cmp::Ordering;

use contracts::domain::a002_shipment::ShipmentCandidate;
use contracts::enums::{SheetField, ShipmentSort};

use crate::domain::a001_bidder::locator::AuctionTab;
use crate::shared::sheets::{cell_at, is_blank, is_yes, ResolvedColumns};

/// Column indexes the filter reads; the first four are mandatory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipmentColumns {
    pub bidder: usize,
    pub payment: usize,
    pub shipping_required: usize,
    pub shipped: usize,
    pub first_name: Option<usize>,
    pub last_name: Option<usize>,
    pub lots_bought: Option<usize>,
    pub balance: Option<usize>,
}

impl ShipmentColumns {
    /// `Err` lists the mandatory fields the sheet lacks
    pub fn from_resolved(columns: &ResolvedColumns) -> Result<Self, Vec<SheetField>> {
        let missing = columns.missing(&SheetField::shipment_required());
        match (
            columns.get(SheetField::BidderNumber),
            columns.get(SheetField::PaymentStatus),
            columns.get(SheetField::ShippingRequired),
            columns.get(SheetField::ShippedStatus),
        ) {
            (Some(bidder), Some(payment), Some(shipping_required), Some(shipped)) => Ok(Self {
                bidder,
                payment,
                shipping_required,
                shipped,
                first_name: columns.get(SheetField::FirstName),
                last_name: columns.get(SheetField::LastName),
                lots_bought: columns.get(SheetField::LotsBought),
                balance: columns.get(SheetField::Balance),
            }),
            _ => Err(missing),
        }
    }

    /// Column of a writable status flag
    pub fn flag_column(&self, field: SheetField) -> Option<usize> {
        match field {
            SheetField::PaymentStatus => Some(self.payment),
            SheetField::ShippingRequired => Some(self.shipping_required),
            SheetField::ShippedStatus => Some(self.shipped),
            _ => None,
        }
    }
}

/// Row as a candidate with flags computed; `None` when the bidder cell is empty
pub fn to_candidate(
    tab: &AuctionTab,
    columns: &ShipmentColumns,
    row_number: u32,
    row: &[String],
) -> Option<ShipmentCandidate> {
    let text = |index: Option<usize>| cell_at(row, index).trim().to_string();

    let bidder_number = text(Some(columns.bidder));
    if bidder_number.is_empty() {
        return None;
    }
    let payment_status = text(Some(columns.payment));
    let shipping_required = text(Some(columns.shipping_required));
    let shipped_status = text(Some(columns.shipped));

    Some(ShipmentCandidate {
        auction_number: tab.auction_number,
        auction_name: tab.sheet_name.clone(),
        sheet_id: tab.sheet_id.clone(),
        tab_name: tab.tab_name.clone(),
        row_number,
        bidder_number,
        first_name: text(columns.first_name),
        last_name: text(columns.last_name),
        lots_bought: text(columns.lots_bought),
        balance: text(columns.balance),
        paid: is_yes(&payment_status),
        shipping_requested: is_yes(&shipping_required),
        shipped: !is_blank(&shipped_status),
        payment_status,
        shipping_required,
        shipped_status,
    })
}

pub fn is_outstanding(candidate: &ShipmentCandidate) -> bool {
    candidate.paid && candidate.shipping_requested && !candidate.shipped
}

/// Outstanding shipments among `rows`, in scan order
pub fn filter_outstanding<'a>(
    tab: &AuctionTab,
    columns: &ShipmentColumns,
    rows: impl IntoIterator<Item = (u32, &'a [String])>,
) -> Vec<ShipmentCandidate> {
    rows.into_iter()
        .filter_map(|(row_number, row)| to_candidate(tab, columns, row_number, row))
        .filter(is_outstanding)
        .collect()
}

/// Keep candidates whose name, bidder or auction number contains `query`
pub fn apply_query(shipments: &mut Vec<ShipmentCandidate>, query: &str) {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return;
    }
    shipments.retain(|s| {
        s.full_name().to_lowercase().contains(&query)
            || s.bidder_number.to_lowercase().contains(&query)
            || s
                .auction_number
                .map(|n| n.to_string().contains(&query))
                .unwrap_or(false)
    });
}

/// Numeric when both parse, lexical otherwise
fn compare_bidders(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Sheets without an auction number sort after numbered ones
fn compare_auctions(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `None` is the default order: auction ascending, then bidder
pub fn sort_shipments(shipments: &mut [ShipmentCandidate], sort: Option<ShipmentSort>) {
    let by_auction_then_bidder = |a: &ShipmentCandidate, b: &ShipmentCandidate| {
        compare_auctions(a.auction_number, b.auction_number)
            .then_with(|| compare_bidders(&a.bidder_number, &b.bidder_number))
    };

    match sort.unwrap_or(ShipmentSort::AuctionAsc) {
        ShipmentSort::AuctionAsc => shipments.sort_by(by_auction_then_bidder),
        ShipmentSort::AuctionDesc => shipments.sort_by(|a, b| {
            let auctions = match (a.auction_number, b.auction_number) {
                (Some(x), Some(y)) => y.cmp(&x),
                (x, y) => compare_auctions(x, y),
            };
            auctions.then_with(|| compare_bidders(&a.bidder_number, &b.bidder_number))
        }),
        ShipmentSort::LotsAsc => shipments.sort_by(|a, b| {
            a.lots_count()
                .cmp(&b.lots_count())
                .then_with(|| by_auction_then_bidder(a, b))
        }),
        ShipmentSort::LotsDesc => shipments.sort_by(|a, b| {
            b.lots_count()
                .cmp(&a.lots_count())
                .then_with(|| by_auction_then_bidder(a, b))
        }),
    }
}
