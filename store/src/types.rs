use serde::{Deserialize, Serialize};

use crate::{Record, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
}

impl Record for Patient {
    type Patch = PatientPatch;

    const FILE_NAME: &'static str = "patients.json";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn merge(&mut self, patch: PatientPatch) {
        if let Some(v) = patch.first_name {
            self.first_name = v;
        }
        if let Some(v) = patch.last_name {
            self.last_name = v;
        }
        if let Some(v) = patch.dob {
            self.dob = v;
        }
        if patch.email.is_some() {
            self.email = patch.email;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if let Some(v) = patch.gender {
            self.gender = v;
        }
    }

    fn validate(&self) -> Result<(), StoreError> {
        non_empty("first_name", &self.first_name)?;
        non_empty("last_name", &self.last_name)?;
        non_empty("dob", &self.dob)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insurance {
    pub id: u64,
    pub payer: String,
    pub plan: String,
    pub eligible: bool,
    #[serde(rename = "coPay")]
    pub co_pay: Option<f64>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsurancePatch {
    pub payer: Option<String>,
    pub plan: Option<String>,
    pub eligible: Option<bool>,
    #[serde(rename = "coPay")]
    pub co_pay: Option<f64>,
    pub reason: Option<String>,
}

impl Record for Insurance {
    type Patch = InsurancePatch;

    const FILE_NAME: &'static str = "insurances.json";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn merge(&mut self, patch: InsurancePatch) {
        if let Some(v) = patch.payer {
            self.payer = v;
        }
        if let Some(v) = patch.plan {
            self.plan = v;
        }
        if let Some(v) = patch.eligible {
            self.eligible = v;
        }
        if patch.co_pay.is_some() {
            self.co_pay = patch.co_pay;
        }
        if patch.reason.is_some() {
            self.reason = patch.reason;
        }
    }

    fn validate(&self) -> Result<(), StoreError> {
        non_empty("payer", &self.payer)?;
        non_empty("plan", &self.plan)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Booked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u64,
    pub start: String,
    pub slot_duration: u32,
    pub status: SlotStatus,
    pub patient_id: Option<u64>,
}

/// `patient_id` is doubly optional: the outer level means "field present in
/// the patch", the inner level is the stored value, so a cancellation can
/// clear the patient from the slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentPatch {
    pub start: Option<String>,
    pub slot_duration: Option<u32>,
    pub status: Option<SlotStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<Option<u64>>,
}

impl Record for Appointment {
    type Patch = AppointmentPatch;

    const FILE_NAME: &'static str = "appointments.json";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn merge(&mut self, patch: AppointmentPatch) {
        if let Some(v) = patch.start {
            self.start = v;
        }
        if let Some(v) = patch.slot_duration {
            self.slot_duration = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.patient_id {
            self.patient_id = v;
        }
    }

    fn validate(&self) -> Result<(), StoreError> {
        non_empty("start", &self.start)?;
        if self.slot_duration == 0 {
            return Err(StoreError::Validation(
                "slot_duration must be at least 1 minute".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Submitted,
    Paid,
    Partial,
    Denied,
    Appealed,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Submitted => "submitted",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Partial => "partial",
            InvoiceStatus::Denied => "denied",
            InvoiceStatus::Appealed => "appealed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    Medical,
    Dental,
    Vision,
}

impl ClaimType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Medical => "medical",
            ClaimType::Dental => "dental",
            ClaimType::Vision => "vision",
        }
    }
}

// Field names stay camelCase on the wire; the flat files and the billing UI
// both read them that way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: u64,
    pub invoice_number: String,
    pub patient_id: u64,
    pub patient_name: String,
    pub payer_id: String,
    pub payer_name: String,
    pub service_date: String,
    pub due_date: String,
    pub created_at: String,
    pub amount: f64,
    pub paid_amount: f64,
    pub balance: f64,
    pub status: InvoiceStatus,
    pub claim_type: ClaimType,
    pub cpt_codes: Vec<String>,
    pub icd_codes: Vec<String>,
    pub description: String,
}

/// Partial invoice update. There is deliberately no `balance` field: the
/// balance is recomputed from `amount - paid_amount` on every merge so the
/// invariant holds after any update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    pub patient_id: Option<u64>,
    pub patient_name: Option<String>,
    pub payer_id: Option<String>,
    pub payer_name: Option<String>,
    pub service_date: Option<String>,
    pub due_date: Option<String>,
    pub amount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub status: Option<InvoiceStatus>,
    pub claim_type: Option<ClaimType>,
    pub cpt_codes: Option<Vec<String>>,
    pub icd_codes: Option<Vec<String>>,
    pub description: Option<String>,
}

impl Record for Invoice {
    type Patch = InvoicePatch;

    const FILE_NAME: &'static str = "invoices.json";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn merge(&mut self, patch: InvoicePatch) {
        if let Some(v) = patch.patient_id {
            self.patient_id = v;
        }
        if let Some(v) = patch.patient_name {
            self.patient_name = v;
        }
        if let Some(v) = patch.payer_id {
            self.payer_id = v;
        }
        if let Some(v) = patch.payer_name {
            self.payer_name = v;
        }
        if let Some(v) = patch.service_date {
            self.service_date = v;
        }
        if let Some(v) = patch.due_date {
            self.due_date = v;
        }
        if let Some(v) = patch.amount {
            self.amount = v;
        }
        if let Some(v) = patch.paid_amount {
            self.paid_amount = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.claim_type {
            self.claim_type = v;
        }
        if let Some(v) = patch.cpt_codes {
            self.cpt_codes = v;
        }
        if let Some(v) = patch.icd_codes {
            self.icd_codes = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        self.balance = self.amount - self.paid_amount;
    }

    fn validate(&self) -> Result<(), StoreError> {
        non_empty("invoice_number", &self.invoice_number)?;
        non_empty("patient_name", &self.patient_name)?;
        non_empty("payer_name", &self.payer_name)?;
        if !(self.amount > 0.0) {
            return Err(StoreError::Validation(
                "amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_empty(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        Err(StoreError::Validation(format!("{} cannot be empty", field)))
    } else {
        Ok(())
    }
}
