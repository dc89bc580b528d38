pub mod types;

pub use types::*;

use chrono::{NaiveDate, Utc};
use store::{ClaimType, Invoice, InvoiceStatus};
use uuid::Uuid;

// Demo flavor text only: these routines template and fabricate EDI-looking
// strings for the UI. Nothing here parses or round-trips real X12.

const SUBMITTER: &str = "BEAMHEALTH";
const SUBMITTER_NAME: &str = "BEAMHEALTH MEDICAL CENTER";
const SUBMITTER_NPI: &str = "1234567890";

/// Multi-line string resembling an 837P professional claim for the invoice.
pub fn generate_837p(invoice: &Invoice) -> String {
    let now = Utc::now();
    let date = now.format("%m%d%Y").to_string();
    let time = now.format("%H%M").to_string();
    let control_number = format!(
        "{}{:04}",
        now.format("%Y%m%d"),
        rand::random_range(0..10_000u32)
    );

    let payer = invoice.payer_name.to_uppercase();
    let payer_padded = format!("{:<15}", truncate(&payer, 15));
    let (first, last) = split_name(&invoice.patient_name);
    let service_date = edi_date(&invoice.service_date);
    let place_of_service = match invoice.claim_type {
        ClaimType::Medical => "11",
        _ => "21",
    };

    let mut segments = vec![
        format!(
            "ISA*00*          *00*          *ZZ*{:<15}*ZZ*{}*{}*{}*^*00501*{}*0*P*:~",
            SUBMITTER, payer_padded, date, time, control_number
        ),
        format!(
            "GS*HC*{}*{}*{}*{}*{}*X*005010X222A1~",
            SUBMITTER, invoice.payer_id, date, time, control_number
        ),
        "ST*837*0001*005010X222A1~".to_string(),
        format!(
            "BHT*0019*00*{}*{}*{}*CH~",
            invoice.invoice_number, date, time
        ),
        format!("NM1*41*2*{}*****46*{}~", SUBMITTER_NAME, SUBMITTER_NPI),
        "PER*IC*BILLING DEPT*TE*5551234567~".to_string(),
        format!("NM1*40*2*{}*****46*{}~", payer, invoice.payer_id),
        "HL*1**20*1~".to_string(),
        format!("NM1*85*2*{}*****XX*{}~", SUBMITTER_NAME, SUBMITTER_NPI),
        "N3*123 HEALTHCARE AVE~".to_string(),
        "N4*MEDICAL CITY*MC*12345~".to_string(),
        "REF*EI*123456789~".to_string(),
        "HL*2*1*22*0~".to_string(),
        "SBR*P*18*******CI~".to_string(),
        format!(
            "NM1*IL*1*{}*{}****MI*{}~",
            last.to_uppercase(),
            first.to_uppercase(),
            invoice.patient_id
        ),
        "N3*123 PATIENT STREET~".to_string(),
        "N4*PATIENT CITY*PC*54321~".to_string(),
        "DMG*D8*19800101*M~".to_string(),
        format!("NM1*PR*2*{}*****PI*{}~", payer, invoice.payer_id),
        format!(
            "CLM*{}*{}***{}:B:1*Y*A*Y*Y~",
            invoice.invoice_number, invoice.amount, place_of_service
        ),
        format!("DTP*431*D8*{}~", service_date),
    ];

    if invoice.icd_codes.is_empty() {
        segments.push("HI*ABK:Z0000~".to_string());
    } else {
        for (i, code) in invoice.icd_codes.iter().enumerate() {
            let qualifier = if i == 0 { "ABK" } else { "ABF" };
            segments.push(format!("HI*{}:{}~", qualifier, code.replace('.', "")));
        }
    }

    let line_amount = invoice.amount / invoice.cpt_codes.len().max(1) as f64;
    for (i, code) in invoice.cpt_codes.iter().enumerate() {
        segments.push(format!("LX*{}~", i + 1));
        segments.push(format!("SV1*HC:{}:*{}*UN*1***1~", code, line_amount));
        segments.push(format!("DTP*472*D8*{}~", service_date));
    }

    segments.push("SE*26*0001~".to_string());
    segments.push(format!("GE*1*{}~", control_number));
    segments.push(format!("IEA*1*{}~", control_number));

    segments.join("\n")
}

/// Canned 835 remittance text for the "load sample data" button.
pub fn sample_835() -> String {
    [
        "ISA*00*          *00*          *ZZ*PAYER          *ZZ*BEAMHEALTH     *231207*1200*^*00501*000000001*0*P*:~",
        "GS*HP*PAYER*BEAMHEALTH*20231207*1200*1*X*005010X221A1~",
        "ST*835*0001*005010X221A1~",
        "BPR*I*1250.00*C*ACH*CCP*01*123456789*DA*987654321*1234567890**01*123456789*DA*111111111*20231207~",
        "TRN*1*TRACE123456*1234567890~",
        "DTM*405*20231207~",
        "N1*PR*SAMPLE PAYER~",
        "N1*PE*BEAMHEALTH MEDICAL CENTER*XX*1234567890~",
        "CLP*INV-2024-002*1*1250.00*937.50*312.50*12*CLM123456~",
        "SVC*HC:99214*500.00*375.00**1~",
        "CAS*CO*45*125.00~",
        "DTM*472*20231120~",
        "SE*15*0001~",
        "GE*1*1~",
        "IEA*1*000000001~",
    ]
    .join("\n")
}

/// Fabricates remittance payments for up to three open (submitted or
/// pending) invoices. The pasted text is accepted but never segment-parsed;
/// the amounts come from fixed percentage splits of each invoice's charge.
pub fn match_remittance(_era_text: &str, invoices: &[Invoice]) -> Vec<RemittancePayment> {
    invoices
        .iter()
        .filter(|inv| {
            inv.status == InvoiceStatus::Submitted || inv.status == InvoiceStatus::Pending
        })
        .take(3)
        .map(|inv| RemittancePayment {
            trace_id: Uuid::new_v4().to_string(),
            invoice_id: inv.id,
            invoice_number: inv.invoice_number.clone(),
            patient_name: inv.patient_name.clone(),
            charged_amount: inv.amount,
            allowed_amount: inv.amount * 0.85,
            paid_amount: inv.amount * 0.75,
            adjustment_amount: inv.amount * 0.10,
            patient_responsibility: inv.amount * 0.15,
            adjustment_reasons: vec!["CO-45: Charges exceed fee schedule".to_string()],
            status: InvoiceStatus::Paid,
        })
        .collect()
}

/// Applies one payment on top of the invoice's current paid amount. Balance
/// never goes below zero; a cleared balance means `paid`, anything left
/// means `partial`.
pub fn post_payment(invoice: &Invoice, amount_paid: f64) -> PostedPayment {
    let paid_amount = invoice.paid_amount + amount_paid;
    let balance = (invoice.amount - paid_amount).max(0.0);
    let status = if balance <= 0.0 {
        InvoiceStatus::Paid
    } else {
        InvoiceStatus::Partial
    };

    PostedPayment {
        invoice_id: invoice.id,
        paid_amount,
        balance,
        status,
    }
}

fn truncate(value: &str, len: usize) -> String {
    value.chars().take(len).collect()
}

fn split_name(name: &str) -> (&str, &str) {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or("");
    let last = parts.next_back().unwrap_or(first);
    (first, last)
}

// MMDDYYYY, matching the rest of the fake interchange.
fn edi_date(value: &str) -> String {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date.format("%m%d%Y").to_string(),
        Err(_) => value.replace('-', "").replace('/', ""),
    }
}
