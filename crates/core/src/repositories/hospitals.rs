//! Hospital records.

use super::found;
use crate::models::{Hospital, HospitalUpdate, NewHospital};
use crate::store::{Collection, EntityKind, EntityStore, Filter};
use crate::validation::{validate_references, References};
use crate::{MrasError, MrasResult};
use chrono::Utc;
use mras_uuid::EntityId;
use std::sync::Arc;

#[derive(Clone)]
pub struct HospitalService {
    store: Arc<dyn EntityStore>,
    hospitals: Collection<Hospital>,
}

impl HospitalService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            hospitals: Collection::new(store.clone()),
            store,
        }
    }

    /// Creates a hospital.
    ///
    /// # Errors
    ///
    /// `AlreadyRegistered` if a hospital with the same name and location exists, or if the
    /// contact email is already used by another hospital.
    pub async fn create(&self, req: NewHospital) -> MrasResult<Hospital> {
        let same_site = Filter::new()
            .eq("name", req.name.as_str())
            .eq("location", req.location.as_str());
        if self.hospitals.find_one(&same_site).await?.is_some() {
            return Err(MrasError::AlreadyRegistered("Hospital".into()));
        }
        self.ensure_email_free(&req.contact.email, None).await?;

        let now = Utc::now();
        let hospital = Hospital {
            id: EntityId::new(),
            name: req.name,
            location: req.location,
            contact: req.contact,
            departments: req.departments,
            status: req.status,
            doctors: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let stored = self.hospitals.insert(&hospital).await?;
        tracing::info!("created hospital {}", stored.id);
        Ok(stored)
    }

    pub async fn list_all(&self) -> MrasResult<Vec<Hospital>> {
        Ok(self.hospitals.find_many(&Filter::new()).await?)
    }

    pub async fn get(&self, id: EntityId) -> MrasResult<Hospital> {
        found(self.hospitals.find_by_id(id).await?, "hospital")
    }

    /// Partial update. A replacement `doctors` list must reference existing doctors.
    ///
    /// A missing hospital is reported before any check on the patch.
    pub async fn update(&self, id: EntityId, mut patch: HospitalUpdate) -> MrasResult<Hospital> {
        self.get(id).await?;

        if let Some(contact) = &patch.contact {
            self.ensure_email_free(&contact.email, Some(id)).await?;
        }

        if let Some(doctors) = patch.doctors.take() {
            let mut unique: Vec<EntityId> = Vec::with_capacity(doctors.len());
            for doctor in doctors {
                if !unique.contains(&doctor) {
                    unique.push(doctor);
                }
            }
            let refs = unique
                .iter()
                .fold(References::new(), |refs, doctor| {
                    refs.require("doctor", EntityKind::Doctor, *doctor)
                });
            validate_references(self.store.as_ref(), &refs).await?;
            patch.doctors = Some(unique);
        }

        found(self.hospitals.update_by_id(id, &patch).await?, "hospital")
    }

    pub async fn delete(&self, id: EntityId) -> MrasResult<()> {
        if !self.hospitals.delete_by_id(id).await? {
            return Err(MrasError::NotFound("hospital".into()));
        }
        tracing::info!("deleted hospital {}", id);
        Ok(())
    }

    async fn ensure_email_free(
        &self,
        email: &mras_types::EmailAddress,
        except: Option<EntityId>,
    ) -> MrasResult<()> {
        let taken = self
            .hospitals
            .find_many(&Filter::new())
            .await?
            .into_iter()
            .any(|h| &h.contact.email == email && Some(h.id) != except);
        if taken {
            return Err(MrasError::AlreadyRegistered("Hospital email".into()));
        }
        Ok(())
    }
}
