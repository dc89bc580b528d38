use app::ApiResponse;
use billing::{Billing, InvoiceFilter};
use std::env;
use std::path::PathBuf;
use store::{Appointment, Insurance, Invoice, InvoicePatch, JsonFileStore, Patient, Record};
use workflow::Workflow;

#[derive(Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub patient_id: u64,
    pub insurance_id: u64,
    pub appointment_id: Option<u64>,
}

impl Config {
    pub fn build(mut args: impl Iterator<Item = String>) -> Result<Config, String> {
        args.next();

        let data_dir = match args.next() {
            Some(arg) => PathBuf::from(arg),
            None => return Err("Didn't get a data directory".to_string()),
        };

        let patient_id = match args.next() {
            Some(arg) => arg.parse().map_err(|e| format!("Invalid patient id: {}", e))?,
            None => return Err("Didn't get a patient id".to_string()),
        };

        let insurance_id = match args.next() {
            Some(arg) => arg
                .parse()
                .map_err(|e| format!("Invalid insurance id: {}", e))?,
            None => return Err("Didn't get an insurance id".to_string()),
        };

        let appointment_id = match args.next() {
            Some(arg) => Some(
                arg.parse()
                    .map_err(|e| format!("Invalid appointment id: {}", e))?,
            ),
            None => {
                eprintln!("No appointment id provided, booking the first open slot");
                None
            }
        };

        Ok(Config {
            data_dir,
            patient_id,
            insurance_id,
            appointment_id,
        })
    }
}

fn main() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    let config = Config::build(args.into_iter()).map_err(|e| format!("Config error: {}", e))?;

    let patients = JsonFileStore::<Patient>::open(config.data_dir.join(Patient::FILE_NAME));
    let insurances = JsonFileStore::<Insurance>::open(config.data_dir.join(Insurance::FILE_NAME));
    let appointments =
        JsonFileStore::<Appointment>::open(config.data_dir.join(Appointment::FILE_NAME));
    let invoices = JsonFileStore::<Invoice>::open(config.data_dir.join(Invoice::FILE_NAME));

    let flow = Workflow::new(patients, insurances, appointments);
    let billing = Billing::new(invoices);

    // 1. Unified intake -> eligibility -> routing -> slots
    println!("Running unified workflow for patient {}", config.patient_id);
    let run = flow
        .run_unified_flow(config.patient_id, config.insurance_id)
        .map_err(|e| e.to_string())?;
    let slot_id = config
        .appointment_id
        .or_else(|| run.available_slots.first().map(|s| s.id));
    println!(
        "{}",
        ApiResponse::ok(&run, "Workflow completed successfully").to_json()
    );

    // 2. Book the slot and print the follow-up summary
    if let Some(slot_id) = slot_id {
        println!("Booking appointment {}", slot_id);
        match flow.book_and_follow_up(slot_id, config.patient_id, config.insurance_id) {
            Ok(outcome) => println!(
                "{}",
                ApiResponse::ok(&outcome, "Appointment booked successfully").to_json()
            ),
            Err(e) => println!("{}", ApiResponse::<()>::err(&e).to_json()),
        }
    } else {
        eprintln!("No open slots to book");
    }

    // 3. Billing dashboard numbers
    let stats = billing.stats().map_err(|e| e.to_string())?;
    println!(
        "{}",
        ApiResponse::ok(&stats, "Invoice stats retrieved successfully").to_json()
    );

    // 4. Claim preview, then remittance posting against the open subset
    let invoices = billing
        .list(&InvoiceFilter::default())
        .map_err(|e| e.to_string())?;
    if let Some(invoice) = invoices.first() {
        println!("837P preview for {}:", invoice.invoice_number);
        println!("{}", edi::generate_837p(invoice));
    }

    let payments = edi::match_remittance(&edi::sample_835(), &invoices);
    println!("Matched {} remittance payment(s)", payments.len());
    for payment in &payments {
        let Some(invoice) = billing.get(payment.invoice_id).map_err(|e| e.to_string())? else {
            continue;
        };
        let posted = edi::post_payment(&invoice, payment.paid_amount);
        let patch = InvoicePatch {
            paid_amount: Some(posted.paid_amount),
            status: Some(posted.status),
            ..Default::default()
        };
        billing
            .update(payment.invoice_id, patch)
            .map_err(|e| e.to_string())?;
        println!(
            "Posted {:.2} to {} (new balance {:.2})",
            payment.paid_amount, payment.invoice_number, posted.balance
        );
    }

    println!("Demo complete!");
    Ok(())
}
