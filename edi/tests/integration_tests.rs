use edi::*;
use store::*;

fn sample_invoice(id: u64, status: InvoiceStatus, amount: f64) -> Invoice {
    Invoice {
        id,
        invoice_number: format!("INV-2025-{:04}", id),
        patient_id: 10 + id,
        patient_name: "Maria Lopez".to_string(),
        payer_id: "BS001".to_string(),
        payer_name: "Blue Shield".to_string(),
        service_date: "2025-11-05".to_string(),
        due_date: "2025-12-05".to_string(),
        created_at: "2025-11-06".to_string(),
        amount,
        paid_amount: 0.0,
        balance: amount,
        status,
        claim_type: ClaimType::Medical,
        cpt_codes: vec!["99213".to_string(), "99214".to_string()],
        icd_codes: vec!["M54.5".to_string()],
        description: "Office visit".to_string(),
    }
}

#[test]
fn test_generate_837p_contains_envelope_segments() {
    let text = generate_837p(&sample_invoice(1, InvoiceStatus::Draft, 500.0));

    assert!(text.starts_with("ISA*00*"));
    assert!(text.contains("ST*837*0001*005010X222A1~"));
    assert!(text.contains("BHT*0019*00*INV-2025-0001*"));
    assert!(text.contains("GE*1*"));
    assert!(text.lines().last().unwrap().starts_with("IEA*1*"));
}

#[test]
fn test_generate_837p_claim_segment_carries_number_and_amount() {
    let text = generate_837p(&sample_invoice(7, InvoiceStatus::Draft, 500.0));
    // medical claims bill as place of service 11
    assert!(text.contains("CLM*INV-2025-0007*500***11:B:1*Y*A*Y*Y~"));
    assert!(text.contains("DTP*431*D8*11052025~"));
}

#[test]
fn test_generate_837p_non_medical_uses_place_of_service_21() {
    let mut invoice = sample_invoice(2, InvoiceStatus::Draft, 300.0);
    invoice.claim_type = ClaimType::Dental;
    let text = generate_837p(&invoice);
    assert!(text.contains("***21:B:1*"));
}

#[test]
fn test_generate_837p_subscriber_name_is_last_then_first() {
    let text = generate_837p(&sample_invoice(3, InvoiceStatus::Draft, 100.0));
    assert!(text.contains("NM1*IL*1*LOPEZ*MARIA****MI*13~"));
}

#[test]
fn test_generate_837p_diagnosis_codes_lose_their_dots() {
    let mut invoice = sample_invoice(4, InvoiceStatus::Draft, 100.0);
    invoice.icd_codes = vec!["M54.5".to_string(), "E11.9".to_string()];
    let text = generate_837p(&invoice);
    assert!(text.contains("HI*ABK:M545~"));
    assert!(text.contains("HI*ABF:E119~"));
}

#[test]
fn test_generate_837p_falls_back_to_z0000_without_diagnoses() {
    let mut invoice = sample_invoice(5, InvoiceStatus::Draft, 100.0);
    invoice.icd_codes = vec![];
    let text = generate_837p(&invoice);
    assert!(text.contains("HI*ABK:Z0000~"));
}

#[test]
fn test_generate_837p_one_service_line_group_per_cpt_code() {
    let text = generate_837p(&sample_invoice(6, InvoiceStatus::Draft, 500.0));
    assert!(text.contains("LX*1~"));
    assert!(text.contains("LX*2~"));
    // 500 split evenly across two procedure codes
    assert!(text.contains("SV1*HC:99213:*250*UN*1***1~"));
    assert!(text.contains("SV1*HC:99214:*250*UN*1***1~"));
}

#[test]
fn test_match_remittance_only_takes_open_invoices() {
    let invoices = vec![
        sample_invoice(1, InvoiceStatus::Paid, 100.0),
        sample_invoice(2, InvoiceStatus::Submitted, 400.0),
        sample_invoice(3, InvoiceStatus::Draft, 200.0),
        sample_invoice(4, InvoiceStatus::Pending, 300.0),
    ];

    let payments = match_remittance(&sample_835(), &invoices);
    let ids: Vec<u64> = payments.iter().map(|p| p.invoice_id).collect();
    assert_eq!(ids, vec![2, 4]);
}

#[test]
fn test_match_remittance_caps_at_three_payments() {
    let invoices: Vec<Invoice> = (1..=5)
        .map(|id| sample_invoice(id, InvoiceStatus::Submitted, 100.0))
        .collect();
    let payments = match_remittance("", &invoices);
    assert_eq!(payments.len(), 3);
}

#[test]
fn test_match_remittance_uses_fixed_percentage_splits() {
    let invoices = vec![sample_invoice(1, InvoiceStatus::Submitted, 400.0)];
    let payments = match_remittance("", &invoices);
    let payment = &payments[0];

    assert_eq!(payment.charged_amount, 400.0);
    assert_eq!(payment.allowed_amount, 340.0);
    assert_eq!(payment.paid_amount, 300.0);
    assert_eq!(payment.adjustment_amount, 40.0);
    assert_eq!(payment.patient_responsibility, 60.0);
    assert_eq!(
        payment.adjustment_reasons,
        vec!["CO-45: Charges exceed fee schedule".to_string()]
    );
    assert!(!payment.trace_id.is_empty());
}

#[test]
fn test_post_payment_partial_leaves_balance() {
    let invoice = sample_invoice(1, InvoiceStatus::Submitted, 400.0);
    let posted = post_payment(&invoice, 300.0);
    assert_eq!(posted.paid_amount, 300.0);
    assert_eq!(posted.balance, 100.0);
    assert_eq!(posted.status, InvoiceStatus::Partial);
}

#[test]
fn test_post_payment_clearing_balance_marks_paid() {
    let mut invoice = sample_invoice(1, InvoiceStatus::Partial, 400.0);
    invoice.paid_amount = 300.0;
    invoice.balance = 100.0;
    let posted = post_payment(&invoice, 100.0);
    assert_eq!(posted.balance, 0.0);
    assert_eq!(posted.status, InvoiceStatus::Paid);
}

#[test]
fn test_post_payment_overpayment_clamps_balance_at_zero() {
    let invoice = sample_invoice(1, InvoiceStatus::Submitted, 400.0);
    let posted = post_payment(&invoice, 500.0);
    assert_eq!(posted.balance, 0.0);
    assert_eq!(posted.status, InvoiceStatus::Paid);
}

#[test]
fn test_sample_835_looks_like_a_remittance() {
    let text = sample_835();
    assert!(text.contains("ST*835*0001*005010X221A1~"));
    assert!(text.contains("CLP*INV-2024-002*"));
    assert!(text.contains("CAS*CO*45*125.00~"));
}
