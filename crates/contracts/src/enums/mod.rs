pub mod sheet_field;
pub mod shipment_sort;

pub use sheet_field::SheetField;
pub use shipment_sort::ShipmentSort;
