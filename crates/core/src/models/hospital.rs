use super::ActivityStatus;
use crate::store::{Document, EntityKind};
use chrono::{DateTime, Utc};
use mras_types::{EmailAddress, NonEmptyText};
use mras_uuid::EntityId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HospitalContact {
    #[schema(value_type = String)]
    pub phone: NonEmptyText,
    #[schema(value_type = String)]
    pub email: EmailAddress,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    #[schema(value_type = String)]
    pub id: EntityId,
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    #[schema(value_type = String)]
    pub location: NonEmptyText,
    pub contact: HospitalContact,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub status: ActivityStatus,
    /// Doctors affiliated with this hospital. Maintained through hospital updates; doctor
    /// registration does not write to it.
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub doctors: Vec<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Hospital {
    const KIND: EntityKind = EntityKind::Hospital;

    fn id(&self) -> EntityId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewHospital {
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    #[schema(value_type = String)]
    pub location: NonEmptyText,
    pub contact: HospitalContact,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub status: ActivityStatus,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HospitalUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub name: Option<NonEmptyText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub location: Option<NonEmptyText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<HospitalContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<String>>)]
    pub doctors: Option<Vec<EntityId>>,
}
