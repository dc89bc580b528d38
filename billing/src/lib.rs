pub mod types;

pub use types::*;

use chrono::{Datelike, NaiveDate, Utc};
use store::{Invoice, InvoicePatch, InvoiceStatus, Store, StoreError};

/// Invoice service: CRUD plus the filter and aggregate views the billing UI
/// drives. Every call is a full linear scan of the store.
pub struct Billing<S> {
    invoices: S,
}

impl<S: Store<Invoice>> Billing<S> {
    pub fn new(invoices: S) -> Self {
        Billing { invoices }
    }

    /// Matching subset, newest creation date first.
    pub fn list(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, StoreError> {
        let mut invoices = self.invoices.find_all()?;

        if let Some(status) = filter.status {
            invoices.retain(|inv| inv.status == status);
        }
        if let Some(claim_type) = filter.claim_type {
            invoices.retain(|inv| inv.claim_type == claim_type);
        }
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            invoices.retain(|inv| {
                inv.invoice_number.to_lowercase().contains(&needle)
                    || inv.patient_name.to_lowercase().contains(&needle)
                    || inv.payer_name.to_lowercase().contains(&needle)
            });
        }
        if let Some(start) = filter.start_date {
            invoices.retain(|inv| parse_date(&inv.service_date).is_some_and(|d| d >= start));
        }
        if let Some(end) = filter.end_date {
            invoices.retain(|inv| parse_date(&inv.service_date).is_some_and(|d| d <= end));
        }

        invoices.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
        Ok(invoices)
    }

    pub fn get(&self, id: u64) -> Result<Option<Invoice>, StoreError> {
        self.invoices.find_by_id(id)
    }

    pub fn for_patient(&self, patient_id: u64) -> Result<Vec<Invoice>, StoreError> {
        Ok(self
            .invoices
            .find_all()?
            .into_iter()
            .filter(|inv| inv.patient_id == patient_id)
            .collect())
    }

    pub fn create(&self, new: NewInvoice) -> Result<Invoice, StoreError> {
        let now = Utc::now();
        let invoice = Invoice {
            id: 0,
            invoice_number: format!(
                "INV-{}-{:04}",
                now.year(),
                now.timestamp_millis().rem_euclid(10_000)
            ),
            patient_id: new.patient_id,
            patient_name: new.patient_name,
            payer_id: new.payer_id,
            payer_name: new.payer_name,
            service_date: new.service_date,
            due_date: new.due_date,
            created_at: now.format("%Y-%m-%d").to_string(),
            amount: new.amount,
            paid_amount: 0.0,
            balance: new.amount,
            status: new.status,
            claim_type: new.claim_type,
            cpt_codes: new.cpt_codes,
            icd_codes: new.icd_codes,
            description: new.description,
        };
        self.invoices.create(invoice)
    }

    pub fn update(&self, id: u64, patch: InvoicePatch) -> Result<Option<Invoice>, StoreError> {
        self.invoices.update(id, patch)
    }

    pub fn delete(&self, id: u64) -> Result<bool, StoreError> {
        self.invoices.delete(id)
    }

    /// Summary numbers for the dashboard, computed against "today".
    pub fn stats(&self) -> Result<InvoiceStats, StoreError> {
        let invoices = self.invoices.find_all()?;
        let today = Utc::now().date_naive();

        let mut by_status = StatusCounts::default();
        let mut total_outstanding = 0.0;
        let mut overdue_count = 0;
        let mut paid_this_month = 0.0;

        for inv in &invoices {
            match inv.status {
                InvoiceStatus::Draft => by_status.draft += 1,
                InvoiceStatus::Pending => by_status.pending += 1,
                InvoiceStatus::Submitted => by_status.submitted += 1,
                InvoiceStatus::Paid => by_status.paid += 1,
                InvoiceStatus::Partial => by_status.partial += 1,
                InvoiceStatus::Denied => by_status.denied += 1,
                InvoiceStatus::Appealed => by_status.appealed += 1,
            }

            total_outstanding += inv.balance;

            if inv.balance > 0.0 && parse_date(&inv.due_date).is_some_and(|due| due < today) {
                overdue_count += 1;
            }

            if inv.status == InvoiceStatus::Paid {
                if let Some(created) = parse_date(&inv.created_at) {
                    if created.month() == today.month() && created.year() == today.year() {
                        paid_this_month += inv.paid_amount;
                    }
                }
            }
        }

        Ok(InvoiceStats {
            total_invoices: invoices.len(),
            total_outstanding,
            overdue_count,
            paid_this_month,
            by_status,
        })
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

// Unparsable creation dates sort last.
fn sort_key(inv: &Invoice) -> NaiveDate {
    parse_date(&inv.created_at).unwrap_or(NaiveDate::MIN)
}
