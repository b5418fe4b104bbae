pub mod a001_bidder;
pub mod a002_shipment;
pub mod a003_invoice;
