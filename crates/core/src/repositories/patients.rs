//! Patient profiles.

use super::found;
use crate::models::{NewPatient, Patient, PatientUpdate};
use crate::store::{Collection, EntityKind, EntityStore, Filter};
use crate::validation::{ensure_not_registered, validate_references, References};
use crate::{MrasError, MrasResult};
use chrono::Utc;
use mras_uuid::EntityId;
use std::sync::Arc;

#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn EntityStore>,
    patients: Collection<Patient>,
}

impl PatientService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            patients: Collection::new(store.clone()),
            store,
        }
    }

    /// Registers a patient profile for an existing user, optionally assigned to a doctor.
    pub async fn register(&self, req: NewPatient) -> MrasResult<Patient> {
        let refs = References::new()
            .require("user", EntityKind::User, req.user)
            .optional("assignedDoctor", EntityKind::Doctor, req.assigned_doctor);
        validate_references(self.store.as_ref(), &refs).await?;
        ensure_not_registered(self.store.as_ref(), EntityKind::Patient, req.user).await?;

        let now = Utc::now();
        let patient = Patient {
            id: EntityId::new(),
            user: req.user,
            date_of_birth: req.date_of_birth,
            gender: req.gender,
            blood_type: req.blood_type,
            medical_history: req.medical_history,
            emergency_contact: req.emergency_contact,
            assigned_doctor: req.assigned_doctor,
            created_at: now,
            updated_at: now,
        };

        let stored = self.patients.insert(&patient).await?;
        tracing::info!("registered patient {} for user {}", stored.id, stored.user);
        Ok(stored)
    }

    pub async fn list_all(&self) -> MrasResult<Vec<Patient>> {
        Ok(self.patients.find_many(&Filter::new()).await?)
    }

    pub async fn get(&self, id: EntityId) -> MrasResult<Patient> {
        found(self.patients.find_by_id(id).await?, "patient")
    }

    pub async fn update(&self, id: EntityId, patch: PatientUpdate) -> MrasResult<Patient> {
        self.get(id).await?;
        let refs =
            References::new().optional("assignedDoctor", EntityKind::Doctor, patch.assigned_doctor);
        validate_references(self.store.as_ref(), &refs).await?;

        found(self.patients.update_by_id(id, &patch).await?, "patient")
    }

    pub async fn delete(&self, id: EntityId) -> MrasResult<()> {
        if !self.patients.delete_by_id(id).await? {
            return Err(MrasError::NotFound("patient".into()));
        }
        tracing::info!("deleted patient {}", id);
        Ok(())
    }
}
