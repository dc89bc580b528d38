use serde::{Deserialize, Serialize};
use store::{Appointment, Insurance};

/// Intake form pre-filled from the patient record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intake {
    pub name: String,
    pub dob: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Eligibility {
    pub eligible: bool,
    #[serde(rename = "coPay")]
    pub co_pay: Option<f64>,
    pub reason: Option<String>,
}

/// Alternatives offered when the selected plan is denied: every eligible
/// plan under the same payer, plus a flat self-pay estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routing {
    pub message: String,
    pub alternative_plans: Vec<Insurance>,
    pub self_pay_estimate: u32,
    pub denial_explanation: Option<String>,
}

/// Outcome of a cancel/reschedule/confirm action on a booked slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleChange {
    pub appointment: Appointment,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRun {
    pub intake: Option<Intake>,
    pub eligibility: Option<Eligibility>,
    pub routing: Option<Routing>,
    pub available_slots: Vec<Appointment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub patient_name: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub appointment_id: u64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilitySummary {
    pub status: String,
    pub is_eligible: bool,
    pub copay: Option<f64>,
    pub reason: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub timing: String,
    pub includes: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostVisit {
    pub automated_tasks: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub confirmation: Confirmation,
    pub eligibility_summary: EligibilitySummary,
    pub reminder: Reminder,
    pub post_visit: PostVisit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingOutcome {
    pub booked_slot: Appointment,
    pub follow_up: FollowUp,
}
