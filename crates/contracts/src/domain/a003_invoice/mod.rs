use serde::{Deserialize, Serialize};

/// Drive link to a bidder's invoice PDF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLink {
    pub file_id: String,
    pub file_name: String,
    pub invoice_url: String,
}

/// GET /api/auctions/invoice
///
/// `link` duplicates `invoiceUrl`; older screens read one, newer the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLinkResponse {
    #[serde(flatten)]
    pub invoice: InvoiceLink,
    pub link: String,
}

impl From<InvoiceLink> for InvoiceLinkResponse {
    fn from(invoice: InvoiceLink) -> Self {
        let link = invoice.invoice_url.clone();
        Self { invoice, link }
    }
}
