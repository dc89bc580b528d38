use app::ApiResponse;
use billing::{Billing, InvoiceFilter};
use store::*;
use tempfile::{tempdir, TempDir};
use workflow::Workflow;

type FileWorkflow =
    Workflow<JsonFileStore<Patient>, JsonFileStore<Insurance>, JsonFileStore<Appointment>>;

// Seeds a data directory the way the demo ships it and opens file-backed
// stores over it.
fn seeded_env() -> (TempDir, FileWorkflow, Billing<JsonFileStore<Invoice>>) {
    let dir = tempdir().unwrap();

    let patients = JsonFileStore::<Patient>::open(dir.path().join(Patient::FILE_NAME));
    patients
        .seed(&[Patient {
            id: 1,
            first_name: "Maria".to_string(),
            last_name: "Lopez".to_string(),
            dob: "1988-04-12".to_string(),
            email: Some("maria.lopez@example.com".to_string()),
            phone: Some("555-0142".to_string()),
            gender: "F".to_string(),
        }])
        .unwrap();

    let insurances = JsonFileStore::<Insurance>::open(dir.path().join(Insurance::FILE_NAME));
    insurances
        .seed(&[
            Insurance {
                id: 1,
                payer: "Blue Shield".to_string(),
                plan: "Silver PPO".to_string(),
                eligible: true,
                co_pay: Some(25.0),
                reason: None,
            },
            Insurance {
                id: 2,
                payer: "Blue Shield".to_string(),
                plan: "Bronze HMO".to_string(),
                eligible: false,
                co_pay: None,
                reason: Some("Plan lapsed".to_string()),
            },
        ])
        .unwrap();

    let appointments = JsonFileStore::<Appointment>::open(dir.path().join(Appointment::FILE_NAME));
    appointments
        .seed(&[Appointment {
            id: 1,
            start: "2025-12-03T09:00:00+00:00".to_string(),
            slot_duration: 30,
            status: SlotStatus::Available,
            patient_id: None,
        }])
        .unwrap();

    let invoices = JsonFileStore::<Invoice>::open(dir.path().join(Invoice::FILE_NAME));
    invoices
        .seed(&[Invoice {
            id: 1,
            invoice_number: "INV-2025-0001".to_string(),
            patient_id: 1,
            patient_name: "Maria Lopez".to_string(),
            payer_id: "BS001".to_string(),
            payer_name: "Blue Shield".to_string(),
            service_date: "2025-11-05".to_string(),
            due_date: "2099-12-05".to_string(),
            created_at: "2025-11-06".to_string(),
            amount: 400.0,
            paid_amount: 0.0,
            balance: 400.0,
            status: InvoiceStatus::Submitted,
            claim_type: ClaimType::Medical,
            cpt_codes: vec!["99213".to_string()],
            icd_codes: vec!["M54.5".to_string()],
            description: "Office visit".to_string(),
        }])
        .unwrap();

    let flow = Workflow::new(patients, insurances, appointments);
    let billing = Billing::new(invoices);
    (dir, flow, billing)
}

#[test]
fn test_end_to_end_workflow_and_booking_against_files() {
    let (_dir, flow, _billing) = seeded_env();

    let run = flow.run_unified_flow(1, 2).unwrap();
    assert!(run.intake.is_some());
    assert!(run.routing.is_some());
    assert_eq!(run.available_slots.len(), 1);

    let outcome = flow.book_and_follow_up(1, 1, 2).unwrap();
    assert_eq!(outcome.booked_slot.status, SlotStatus::Booked);
    assert_eq!(outcome.booked_slot.patient_id, Some(1));

    // booking was persisted: no slots remain on a fresh read
    assert!(flow.available_slots().unwrap().is_empty());
}

#[test]
fn test_end_to_end_remittance_posting_updates_invoice_file() {
    let (_dir, _flow, billing) = seeded_env();

    let invoices = billing.list(&InvoiceFilter::default()).unwrap();
    let payments = edi::match_remittance(&edi::sample_835(), &invoices);
    assert_eq!(payments.len(), 1);

    let invoice = billing.get(payments[0].invoice_id).unwrap().unwrap();
    let posted = edi::post_payment(&invoice, payments[0].paid_amount);
    billing
        .update(
            invoice.id,
            InvoicePatch {
                paid_amount: Some(posted.paid_amount),
                status: Some(posted.status),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

    let reread = billing.get(invoice.id).unwrap().unwrap();
    assert_eq!(reread.paid_amount, 300.0);
    assert_eq!(reread.balance, 100.0);
    assert_eq!(reread.status, InvoiceStatus::Partial);
}

#[test]
fn test_success_envelope_shape() {
    let response = ApiResponse::ok(vec![1, 2, 3], "Records retrieved successfully");
    let json: serde_json::Value = serde_json::from_str(&response.to_json()).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    assert_eq!(json["message"], "Records retrieved successfully");
    assert!(json.get("error").is_none());
    assert!(json.get("statusCode").is_none());
}

#[test]
fn test_error_envelope_maps_not_found_to_404() {
    let response = ApiResponse::<()>::err(&StoreError::NotFound("patient"));
    let json: serde_json::Value = serde_json::from_str(&response.to_json()).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "patient not found");
    assert_eq!(json["statusCode"], 404);
    assert!(json.get("data").is_none());
}

#[test]
fn test_error_envelope_maps_validation_to_400() {
    let err = StoreError::Validation("amount must be positive".to_string());
    let response = ApiResponse::<()>::err(&err);
    let json: serde_json::Value = serde_json::from_str(&response.to_json()).unwrap();

    assert_eq!(json["statusCode"], 400);
    assert_eq!(json["error"], "Validation failed: amount must be positive");
}
