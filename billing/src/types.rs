use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use store::{ClaimType, InvoiceStatus};

/// Client-supplied fields for a new invoice. Number, creation date, paid
/// amount and balance are filled in by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub patient_id: u64,
    pub patient_name: String,
    pub payer_id: String,
    pub payer_name: String,
    pub service_date: String,
    pub due_date: String,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub claim_type: ClaimType,
    pub cpt_codes: Vec<String>,
    pub icd_codes: Vec<String>,
    pub description: String,
}

/// All criteria combine as a logical AND; `None` means "don't care".
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub claim_type: Option<ClaimType>,
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub draft: usize,
    pub pending: usize,
    pub submitted: usize,
    pub paid: usize,
    pub partial: usize,
    pub denied: usize,
    pub appealed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStats {
    pub total_invoices: usize,
    pub total_outstanding: f64,
    pub overdue_count: usize,
    pub paid_this_month: f64,
    pub by_status: StatusCounts,
}
