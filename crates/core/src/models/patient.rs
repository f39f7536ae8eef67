use crate::store::{Document, EntityKind};
use chrono::{DateTime, NaiveDate, Utc};
use mras_types::NonEmptyText;
use mras_uuid::EntityId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmergencyContact {
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    #[schema(value_type = String)]
    pub phone: NonEmptyText,
    #[schema(value_type = String)]
    pub relationship: NonEmptyText,
}

/// Patient profile layered on a user account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[schema(value_type = String)]
    pub id: EntityId,
    #[schema(value_type = String)]
    pub user: EntityId,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<BloodType>,
    /// Conditions in the order they were recorded.
    #[serde(default)]
    pub medical_history: Vec<String>,
    pub emergency_contact: EmergencyContact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub assigned_doctor: Option<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Patient {
    const KIND: EntityKind = EntityKind::Patient;

    fn id(&self) -> EntityId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    #[serde(alias = "userId")]
    #[schema(value_type = String)]
    pub user: EntityId,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub blood_type: Option<BloodType>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    pub emergency_contact: EmergencyContact,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub assigned_doctor: Option<EntityId>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<BloodType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub assigned_doctor: Option<EntityId>,
}
