pub mod types;

pub use types::*;

use chrono::{DateTime, Utc};
use store::{
    Appointment, AppointmentPatch, Insurance, Patient, SlotStatus, Store, StoreError,
};

// Static until real pricing exists.
const SELF_PAY_ESTIMATE: u32 = 120;

/// Front-desk workflow over injected stores: intake, eligibility, routing,
/// scheduling and follow-up, each a single lookup against one entity file.
pub struct Workflow<P, I, A> {
    patients: P,
    insurances: I,
    appointments: A,
}

impl<P, I, A> Workflow<P, I, A>
where
    P: Store<Patient>,
    I: Store<Insurance>,
    A: Store<Appointment>,
{
    pub fn new(patients: P, insurances: I, appointments: A) -> Self {
        Workflow {
            patients,
            insurances,
            appointments,
        }
    }

    /// Case-insensitive substring match over first and last name.
    pub fn search_patients(&self, term: &str) -> Result<Vec<Patient>, StoreError> {
        let needle = term.to_lowercase();
        Ok(self
            .patients
            .find_all()?
            .into_iter()
            .filter(|p| {
                p.first_name.to_lowercase().contains(&needle)
                    || p.last_name.to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub fn auto_fill_intake(&self, patient_id: u64) -> Result<Option<Intake>, StoreError> {
        let Some(patient) = self.patients.find_by_id(patient_id)? else {
            return Ok(None);
        };

        Ok(Some(Intake {
            name: format!("{} {}", patient.first_name, patient.last_name),
            dob: patient.dob,
            email: patient.email,
            phone: patient.phone,
            gender: patient.gender,
        }))
    }

    pub fn check_eligibility(&self, insurance_id: u64) -> Result<Option<Eligibility>, StoreError> {
        let Some(insurance) = self.insurances.find_by_id(insurance_id)? else {
            return Ok(None);
        };

        Ok(Some(Eligibility {
            eligible: insurance.eligible,
            co_pay: insurance.co_pay,
            reason: insurance.reason,
        }))
    }

    /// `None` when the plan is unknown or already eligible; alternatives are
    /// the eligible plans sharing the denied plan's payer.
    pub fn routing_options(&self, insurance_id: u64) -> Result<Option<Routing>, StoreError> {
        let all = self.insurances.find_all()?;
        let Some(current) = all.iter().find(|i| i.id == insurance_id) else {
            return Ok(None);
        };
        if current.eligible {
            return Ok(None);
        }

        let alternatives = all
            .iter()
            .filter(|i| i.payer == current.payer && i.eligible)
            .cloned()
            .collect();

        Ok(Some(Routing {
            message: "Insurance denied. Here are possible alternatives:".to_string(),
            alternative_plans: alternatives,
            self_pay_estimate: SELF_PAY_ESTIMATE,
            denial_explanation: current.reason.clone(),
        }))
    }

    pub fn available_slots(&self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self
            .appointments
            .find_all()?
            .into_iter()
            .filter(|a| a.status == SlotStatus::Available)
            .collect())
    }

    /// Marks the slot booked and attaches the patient. `None` when the slot
    /// id does not exist; nothing is written in that case.
    pub fn book_slot(
        &self,
        appointment_id: u64,
        patient_id: u64,
    ) -> Result<Option<Appointment>, StoreError> {
        let patch = AppointmentPatch {
            status: Some(SlotStatus::Booked),
            patient_id: Some(Some(patient_id)),
            ..Default::default()
        };
        self.appointments.update(appointment_id, patch)
    }

    pub fn appointments_for_patient(
        &self,
        patient_id: u64,
    ) -> Result<Vec<Appointment>, StoreError> {
        Ok(self
            .appointments
            .find_all()?
            .into_iter()
            .filter(|a| a.patient_id == Some(patient_id))
            .collect())
    }

    /// Booked appointments whose start time is still ahead of now.
    /// Unparsable start timestamps are skipped.
    pub fn upcoming_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        let now = Utc::now();
        Ok(self
            .appointments
            .find_all()?
            .into_iter()
            .filter(|a| {
                a.status == SlotStatus::Booked
                    && DateTime::parse_from_rfc3339(&a.start)
                        .map(|start| start > now)
                        .unwrap_or(false)
            })
            .collect())
    }

    /// Reopens a booked slot: status back to `available`, patient cleared.
    /// `None` when the id does not exist; cancelling a slot that was never
    /// booked is a validation failure.
    pub fn cancel_appointment(
        &self,
        appointment_id: u64,
        reason: &str,
    ) -> Result<Option<ScheduleChange>, StoreError> {
        let Some(current) = self.appointments.find_by_id(appointment_id)? else {
            return Ok(None);
        };
        if current.status != SlotStatus::Booked {
            return Err(StoreError::Validation(
                "only booked appointments can be cancelled".to_string(),
            ));
        }

        let patch = AppointmentPatch {
            status: Some(SlotStatus::Available),
            patient_id: Some(None),
            ..Default::default()
        };
        let appointment = self
            .appointments
            .update(appointment_id, patch)?
            .ok_or(StoreError::NotFound("appointment"))?;

        Ok(Some(ScheduleChange {
            appointment,
            message: format!("Appointment cancelled: {}", reason),
        }))
    }

    /// Moves a booked appointment to a new start time.
    pub fn reschedule_appointment(
        &self,
        appointment_id: u64,
        new_start: &str,
    ) -> Result<Option<ScheduleChange>, StoreError> {
        if new_start.trim().is_empty() {
            return Err(StoreError::Validation(
                "new start time is required".to_string(),
            ));
        }
        let Some(current) = self.appointments.find_by_id(appointment_id)? else {
            return Ok(None);
        };
        if current.status != SlotStatus::Booked {
            return Err(StoreError::Validation(
                "only booked appointments can be rescheduled".to_string(),
            ));
        }

        let patch = AppointmentPatch {
            start: Some(new_start.to_string()),
            ..Default::default()
        };
        let appointment = self
            .appointments
            .update(appointment_id, patch)?
            .ok_or(StoreError::NotFound("appointment"))?;

        Ok(Some(ScheduleChange {
            message: format!("Appointment rescheduled to {}", appointment.start),
            appointment,
        }))
    }

    /// Confirms a booked appointment. Read-only: nothing is written.
    pub fn confirm_appointment(
        &self,
        appointment_id: u64,
    ) -> Result<Option<ScheduleChange>, StoreError> {
        let Some(appointment) = self.appointments.find_by_id(appointment_id)? else {
            return Ok(None);
        };
        if appointment.status != SlotStatus::Booked {
            return Err(StoreError::Validation(
                "only booked appointments can be confirmed".to_string(),
            ));
        }

        Ok(Some(ScheduleChange {
            message: format!("Appointment {} confirmed", appointment.id),
            appointment,
        }))
    }

    /// intake -> eligibility -> routing (only on denial) -> open slots, all
    /// returned as one response object.
    pub fn run_unified_flow(
        &self,
        patient_id: u64,
        insurance_id: u64,
    ) -> Result<WorkflowRun, StoreError> {
        let intake = self.auto_fill_intake(patient_id)?;
        let eligibility = self.check_eligibility(insurance_id)?;

        let routing = match &eligibility {
            Some(e) if !e.eligible => self.routing_options(insurance_id)?,
            _ => None,
        };

        let available_slots = self.available_slots()?;

        Ok(WorkflowRun {
            intake,
            eligibility,
            routing,
            available_slots,
        })
    }

    /// Books the slot, then synthesizes the follow-up summary. There is no
    /// rollback: if the patient lookup fails after the slot was written, the
    /// slot stays booked.
    pub fn book_and_follow_up(
        &self,
        appointment_id: u64,
        patient_id: u64,
        insurance_id: u64,
    ) -> Result<BookingOutcome, StoreError> {
        let slot = self
            .book_slot(appointment_id, patient_id)?
            .ok_or(StoreError::NotFound("appointment"))?;
        let patient = self
            .patients
            .find_by_id(patient_id)?
            .ok_or(StoreError::NotFound("patient"))?;
        let eligibility = self.check_eligibility(insurance_id)?;

        let follow_up = generate_follow_up(&patient, &slot, eligibility.as_ref());

        Ok(BookingOutcome {
            booked_slot: slot,
            follow_up,
        })
    }
}

/// Confirmation text, eligibility recap and the static reminder/post-visit
/// task descriptions shown to the front desk after booking.
pub fn generate_follow_up(
    patient: &Patient,
    appointment: &Appointment,
    eligibility: Option<&Eligibility>,
) -> FollowUp {
    let (date, time) = match DateTime::parse_from_rfc3339(&appointment.start) {
        Ok(start) => (
            start.format("%A, %B %-d, %Y").to_string(),
            start.format("%-I:%M %p").to_string(),
        ),
        // keep the raw timestamp rather than dropping the confirmation
        Err(_) => (appointment.start.clone(), String::new()),
    };

    let eligible = eligibility.map(|e| e.eligible).unwrap_or(false);
    let reason = eligibility.and_then(|e| e.reason.clone());
    let notes = if eligible {
        "No additional issues reported".to_string()
    } else {
        reason
            .clone()
            .unwrap_or_else(|| "Coverage issue detected".to_string())
    };

    FollowUp {
        confirmation: Confirmation {
            patient_name: format!("{} {}", patient.first_name, patient.last_name),
            date,
            time,
            duration: appointment.slot_duration,
            appointment_id: appointment.id,
            message: "All details have been added to the patient chart, and the front desk has been notified."
                .to_string(),
        },
        eligibility_summary: EligibilitySummary {
            status: if eligible { "Eligible" } else { "Not Eligible" }.to_string(),
            is_eligible: eligible,
            copay: eligibility.and_then(|e| e.co_pay),
            reason,
            notes,
        },
        reminder: Reminder {
            timing: "24 hours before appointment".to_string(),
            includes: vec![
                "Date & time".to_string(),
                "Location / instructions".to_string(),
                "Copay information".to_string(),
                "Pre-visit checklist (if needed)".to_string(),
            ],
            message: "We'll send a reminder message to the patient automatically.".to_string(),
        },
        post_visit: PostVisit {
            automated_tasks: vec![
                "Generate a follow-up form".to_string(),
                "Tag the visit as pending documentation".to_string(),
                "Prepare the billing draft based on eligibility and visit type".to_string(),
                "Notify staff if any action is required".to_string(),
            ],
            message: "Everything flows straight into the EMR with no retyping and no extra clicks."
                .to_string(),
        },
    }
}
