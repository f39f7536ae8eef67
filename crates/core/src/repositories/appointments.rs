//! Appointment lifecycle.
//!
//! Appointments start `scheduled`. Reschedule may set any status; cancel sets `canceled`.
//! Neither checks the current status.

use super::found;
use crate::models::normalise_optional_text;
use crate::models::{Appointment, AppointmentStatus, AppointmentUpdate, NewAppointment};
use crate::store::{Collection, EntityKind, EntityStore, Filter};
use crate::validation::{validate_references, References};
use crate::MrasResult;
use chrono::Utc;
use mras_uuid::EntityId;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<dyn EntityStore>,
    appointments: Collection<Appointment>,
}

impl AppointmentService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            appointments: Collection::new(store.clone()),
            store,
        }
    }

    /// Schedules an appointment after confirming the patient, doctor and (if given) referral
    /// exist.
    pub async fn create(&self, req: NewAppointment) -> MrasResult<Appointment> {
        let refs = References::new()
            .require("patient", EntityKind::Patient, req.patient)
            .require("doctor", EntityKind::Doctor, req.doctor)
            .optional("referral", EntityKind::Referral, req.referral);
        validate_references(self.store.as_ref(), &refs).await?;

        let now = Utc::now();
        let appointment = Appointment {
            id: EntityId::new(),
            patient: req.patient,
            doctor: req.doctor,
            referral: req.referral,
            date: req.date,
            status: AppointmentStatus::Scheduled,
            notes: normalise_optional_text(req.notes),
            created_at: now,
            updated_at: now,
        };

        let stored = self.appointments.insert(&appointment).await?;
        tracing::info!(
            "scheduled appointment {} for patient {} with doctor {}",
            stored.id,
            stored.patient,
            stored.doctor
        );
        Ok(stored)
    }

    pub async fn list_all(&self) -> MrasResult<Vec<Appointment>> {
        Ok(self.appointments.find_many(&Filter::new()).await?)
    }

    pub async fn get(&self, id: EntityId) -> MrasResult<Appointment> {
        found(self.appointments.find_by_id(id).await?, "appointment")
    }

    /// Appointments for a doctor. Fails with `NotFound("doctor")` if the doctor does not exist,
    /// even when no appointment would match.
    pub async fn list_by_doctor(&self, doctor: EntityId) -> MrasResult<Vec<Appointment>> {
        let refs = References::new().require("doctor", EntityKind::Doctor, doctor);
        validate_references(self.store.as_ref(), &refs).await?;

        let filter = Filter::new().eq_id("doctor", doctor);
        Ok(self.appointments.find_many(&filter).await?)
    }

    pub async fn list_by_patient(&self, patient: EntityId) -> MrasResult<Vec<Appointment>> {
        let refs = References::new().require("patient", EntityKind::Patient, patient);
        validate_references(self.store.as_ref(), &refs).await?;

        let filter = Filter::new().eq_id("patient", patient);
        Ok(self.appointments.find_many(&filter).await?)
    }

    /// Partial update of date, status and notes.
    pub async fn reschedule(&self, id: EntityId, mut patch: AppointmentUpdate) -> MrasResult<Appointment> {
        patch.notes = normalise_optional_text(patch.notes);
        found(self.appointments.update_by_id(id, &patch).await?, "appointment")
    }

    pub async fn cancel(&self, id: EntityId) -> MrasResult<Appointment> {
        let patch = AppointmentUpdate {
            status: Some(AppointmentStatus::Canceled),
            ..Default::default()
        };
        let canceled = found(self.appointments.update_by_id(id, &patch).await?, "appointment")?;
        tracing::info!("canceled appointment {}", id);
        Ok(canceled)
    }
}
