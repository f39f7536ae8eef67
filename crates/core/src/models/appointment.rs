use crate::store::{Document, EntityKind};
use chrono::{DateTime, Utc};
use mras_uuid::EntityId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Appointment state. Any value may be set from any other; there is no transition guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Canceled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[schema(value_type = String)]
    pub id: EntityId,
    #[schema(value_type = String)]
    pub patient: EntityId,
    #[schema(value_type = String)]
    pub doctor: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub referral: Option<EntityId>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Appointment {
    const KIND: EntityKind = EntityKind::Appointment;

    fn id(&self) -> EntityId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    #[schema(value_type = String)]
    pub patient: EntityId,
    #[schema(value_type = String)]
    pub doctor: EntityId,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub referral: Option<EntityId>,
}

/// Reschedule payload. Omitted fields keep their stored values.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
