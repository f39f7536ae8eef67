//! Referral lifecycle.
//!
//! A referral is created `pending` once the patient, referring doctor, optional specialist and
//! both hospitals resolve and the hospitals differ. Approve, reject and complete overwrite the
//! status unconditionally: the only precondition is that the referral exists.
//!
//! Listing by patient or by hospital returns `NoMatches` rather than an empty list when nothing
//! matches. Clients depend on the 404 this produces.

use super::found;
use crate::models::normalise_optional_text;
use crate::models::{NewReferral, Referral, ReferralStatus};
use crate::store::{Collection, EntityKind, EntityStore, Filter};
use crate::validation::{ensure_distinct_hospitals, validate_references, References};
use crate::{MrasError, MrasResult};
use chrono::Utc;
use mras_uuid::EntityId;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct StatusPatch {
    status: ReferralStatus,
}

#[derive(Serialize)]
struct AppointmentLink {
    appointment: EntityId,
}

#[derive(Clone)]
pub struct ReferralService {
    store: Arc<dyn EntityStore>,
    referrals: Collection<Referral>,
}

impl ReferralService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            referrals: Collection::new(store.clone()),
            store,
        }
    }

    /// Creates a pending referral.
    ///
    /// # Errors
    ///
    /// - `NotFound(role)` for the first reference that does not resolve, checked in the order
    ///   patient, referringDoctor, specialist, referringHospital, destinationHospital.
    /// - `InvalidReferral("same hospital")` if both hospitals are the same.
    pub async fn create(&self, req: NewReferral) -> MrasResult<Referral> {
        let refs = References::new()
            .require("patient", EntityKind::Patient, req.patient)
            .require("referringDoctor", EntityKind::Doctor, req.referring_doctor)
            .optional("specialist", EntityKind::Doctor, req.specialist)
            .require("referringHospital", EntityKind::Hospital, req.referring_hospital)
            .require("destinationHospital", EntityKind::Hospital, req.destination_hospital);
        validate_references(self.store.as_ref(), &refs).await?;
        ensure_distinct_hospitals(req.referring_hospital, req.destination_hospital)?;

        let now = Utc::now();
        let referral = Referral {
            id: EntityId::new(),
            patient: req.patient,
            referring_doctor: req.referring_doctor,
            specialist: req.specialist,
            referring_hospital: req.referring_hospital,
            destination_hospital: req.destination_hospital,
            reason: req.reason,
            notes: normalise_optional_text(req.notes),
            appointment: None,
            status: ReferralStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let stored = self.referrals.insert(&referral).await?;
        tracing::info!(
            "created referral {} from hospital {} to {}",
            stored.id,
            stored.referring_hospital,
            stored.destination_hospital
        );
        Ok(stored)
    }

    pub async fn list_all(&self) -> MrasResult<Vec<Referral>> {
        Ok(self.referrals.find_many(&Filter::new()).await?)
    }

    pub async fn get(&self, id: EntityId) -> MrasResult<Referral> {
        found(self.referrals.find_by_id(id).await?, "referral")
    }

    pub async fn list_by_patient(&self, patient: EntityId) -> MrasResult<Vec<Referral>> {
        let filter = Filter::new().eq_id("patient", patient);
        non_empty(
            self.referrals.find_many(&filter).await?,
            "No referrals found for this patient",
        )
    }

    /// Referrals whose destination is `hospital`.
    pub async fn list_by_hospital(&self, hospital: EntityId) -> MrasResult<Vec<Referral>> {
        let filter = Filter::new().eq_id("destinationHospital", hospital);
        non_empty(
            self.referrals.find_many(&filter).await?,
            "No referrals found for this hospital",
        )
    }

    pub async fn approve(&self, id: EntityId) -> MrasResult<Referral> {
        self.transition(id, ReferralStatus::Approved).await
    }

    pub async fn reject(&self, id: EntityId) -> MrasResult<Referral> {
        self.transition(id, ReferralStatus::Rejected).await
    }

    pub async fn complete(&self, id: EntityId) -> MrasResult<Referral> {
        self.transition(id, ReferralStatus::Completed).await
    }

    /// Records the appointment booked for this referral. Both must exist.
    pub async fn link_appointment(&self, id: EntityId, appointment: EntityId) -> MrasResult<Referral> {
        let refs = References::new()
            .require("referral", EntityKind::Referral, id)
            .require("appointment", EntityKind::Appointment, appointment);
        validate_references(self.store.as_ref(), &refs).await?;

        found(
            self.referrals
                .update_by_id(id, &AppointmentLink { appointment })
                .await?,
            "referral",
        )
    }

    async fn transition(&self, id: EntityId, status: ReferralStatus) -> MrasResult<Referral> {
        let current = self.get(id).await?;
        let updated = found(
            self.referrals
                .update_by_id(id, &StatusPatch { status })
                .await?,
            "referral",
        )?;
        tracing::info!(
            "referral {} moved from {} to {}",
            id,
            current.status.as_str(),
            status.as_str()
        );
        Ok(updated)
    }
}

fn non_empty(referrals: Vec<Referral>, message: &str) -> MrasResult<Vec<Referral>> {
    if referrals.is_empty() {
        return Err(MrasError::NoMatches(message.to_string()));
    }
    Ok(referrals)
}
