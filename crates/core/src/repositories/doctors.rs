//! Doctor profiles.

use super::found;
use crate::models::doctor::dedup_weekdays;
use crate::models::{Doctor, DoctorUpdate, NewDoctor};
use crate::store::{Collection, EntityKind, EntityStore, Filter};
use crate::validation::{ensure_not_registered, validate_references, References};
use crate::MrasResult;
use chrono::Utc;
use mras_uuid::EntityId;
use std::sync::Arc;

#[derive(Clone)]
pub struct DoctorService {
    store: Arc<dyn EntityStore>,
    doctors: Collection<Doctor>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            doctors: Collection::new(store.clone()),
            store,
        }
    }

    /// Registers a doctor profile for an existing user.
    ///
    /// Checks the user, then the hospital, then that the user has no doctor profile yet.
    pub async fn register(&self, req: NewDoctor) -> MrasResult<Doctor> {
        let refs = References::new()
            .require("user", EntityKind::User, req.user)
            .require("hospital", EntityKind::Hospital, req.hospital);
        validate_references(self.store.as_ref(), &refs).await?;
        ensure_not_registered(self.store.as_ref(), EntityKind::Doctor, req.user).await?;

        let now = Utc::now();
        let doctor = Doctor {
            id: EntityId::new(),
            user: req.user,
            specialization: req.specialization,
            experience: req.experience,
            hospital: req.hospital,
            availability: dedup_weekdays(req.availability),
            phone: req.phone,
            status: Default::default(),
            created_at: now,
            updated_at: now,
        };

        let stored = self.doctors.insert(&doctor).await?;
        tracing::info!("registered doctor {} for user {}", stored.id, stored.user);
        Ok(stored)
    }

    pub async fn list_all(&self) -> MrasResult<Vec<Doctor>> {
        Ok(self.doctors.find_many(&Filter::new()).await?)
    }

    pub async fn get(&self, id: EntityId) -> MrasResult<Doctor> {
        found(self.doctors.find_by_id(id).await?, "doctor")
    }

    /// Doctors affiliated with a hospital. The hospital itself must exist.
    pub async fn list_by_hospital(&self, hospital: EntityId) -> MrasResult<Vec<Doctor>> {
        let refs = References::new().require("hospital", EntityKind::Hospital, hospital);
        validate_references(self.store.as_ref(), &refs).await?;

        let filter = Filter::new().eq_id("hospital", hospital);
        Ok(self.doctors.find_many(&filter).await?)
    }

    pub async fn update(&self, id: EntityId, mut patch: DoctorUpdate) -> MrasResult<Doctor> {
        self.get(id).await?;
        let refs = References::new().optional("hospital", EntityKind::Hospital, patch.hospital);
        validate_references(self.store.as_ref(), &refs).await?;

        patch.availability = patch.availability.map(dedup_weekdays);
        found(self.doctors.update_by_id(id, &patch).await?, "doctor")
    }

    /// Flips the doctor between active and inactive.
    pub async fn toggle_status(&self, id: EntityId) -> MrasResult<Doctor> {
        let current = self.get(id).await?;
        let patch = DoctorUpdate {
            status: Some(current.status.toggled()),
            ..Default::default()
        };
        let updated = found(self.doctors.update_by_id(id, &patch).await?, "doctor")?;
        tracing::info!("doctor {} is now {:?}", id, updated.status);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityStatus, Role, Weekday};
    use crate::repositories::test_support::*;
    use crate::store::MemoryStore;
    use crate::MrasError;

    fn new_doctor(user: EntityId, hospital: EntityId) -> NewDoctor {
        NewDoctor {
            user,
            specialization: text("Neurology"),
            experience: 4,
            hospital,
            availability: vec![Weekday::Tuesday, Weekday::Tuesday, Weekday::Friday],
            phone: text("07700 900002"),
        }
    }

    #[tokio::test]
    async fn registering_twice_for_same_user_is_already_registered() {
        let store = memory_store();
        let u = user(&store, "Drew", Role::Doctor).await;
        let h = hospital(&store, "Northside").await;
        let doctors = DoctorService::new(store);

        let first = doctors.register(new_doctor(u.id, h.id)).await.unwrap();
        assert_eq!(first.availability, vec![Weekday::Tuesday, Weekday::Friday]);
        assert_eq!(first.status, ActivityStatus::Active);

        let err = doctors.register(new_doctor(u.id, h.id)).await.unwrap_err();
        assert!(matches!(err, MrasError::AlreadyRegistered(what) if what == "Doctor"));
        assert_eq!(doctors.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn register_checks_user_before_hospital() {
        let store = memory_store();
        let doctors = DoctorService::new(store.clone());

        let err = doctors
            .register(new_doctor(EntityId::new(), EntityId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, MrasError::NotFound(role) if role == "user"));

        let u = user(&store, "Drew", Role::Doctor).await;
        let err = doctors
            .register(new_doctor(u.id, EntityId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, MrasError::NotFound(role) if role == "hospital"));
    }

    #[tokio::test]
    async fn list_by_hospital_requires_existing_hospital() {
        let s = scenario().await;
        let doctors = DoctorService::new(s.store.clone());

        assert_eq!(
            doctors.list_by_hospital(s.h1.id).await.unwrap(),
            vec![s.doctor.clone()]
        );
        assert!(doctors.list_by_hospital(s.h2.id).await.unwrap().is_empty());
        assert!(matches!(
            doctors.list_by_hospital(EntityId::new()).await.unwrap_err(),
            MrasError::NotFound(role) if role == "hospital"
        ));
    }

    #[tokio::test]
    async fn update_validates_new_hospital() {
        let s = scenario().await;
        let doctors = DoctorService::new(s.store.clone());

        let err = doctors
            .update(
                s.doctor.id,
                DoctorUpdate {
                    hospital: Some(EntityId::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, MrasError::NotFound(role) if role == "hospital"));

        let moved = doctors
            .update(
                s.doctor.id,
                DoctorUpdate {
                    hospital: Some(s.h2.id),
                    experience: Some(11),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.hospital, s.h2.id);
        assert_eq!(moved.experience, 11);
        assert_eq!(moved.specialization, s.doctor.specialization);
    }

    #[tokio::test]
    async fn toggle_status_flips_back_and_forth() {
        let s = scenario().await;
        let doctors = DoctorService::new(s.store.clone());

        let off = doctors.toggle_status(s.doctor.id).await.unwrap();
        assert_eq!(off.status, ActivityStatus::Inactive);
        let on = doctors.toggle_status(s.doctor.id).await.unwrap();
        assert_eq!(on.status, ActivityStatus::Active);

        assert!(matches!(
            doctors.toggle_status(EntityId::new()).await.unwrap_err(),
            MrasError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn missing_doctor_is_not_found() {
        let doctors = DoctorService::new(Arc::new(MemoryStore::new()));
        assert!(matches!(
            doctors.get(EntityId::new()).await.unwrap_err(),
            MrasError::NotFound(what) if what == "doctor"
        ));
    }

    #[tokio::test]
    async fn update_of_missing_doctor_is_not_found_before_hospital_check() {
        let doctors = DoctorService::new(memory_store());
        let err = doctors
            .update(
                EntityId::new(),
                DoctorUpdate {
                    hospital: Some(EntityId::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, MrasError::NotFound(what) if what == "doctor"));
    }
}
