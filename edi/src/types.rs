use serde::{Deserialize, Serialize};
use store::InvoiceStatus;

/// One synthesized remittance line matched to an open invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemittancePayment {
    pub trace_id: String,
    pub invoice_id: u64,
    pub invoice_number: String,
    pub patient_name: String,
    pub charged_amount: f64,
    pub allowed_amount: f64,
    pub paid_amount: f64,
    pub adjustment_amount: f64,
    pub patient_responsibility: f64,
    pub adjustment_reasons: Vec<String>,
    pub status: InvoiceStatus,
}

/// Result of applying a remittance payment to an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedPayment {
    pub invoice_id: u64,
    pub paid_amount: f64,
    pub balance: f64,
    pub status: InvoiceStatus,
}
