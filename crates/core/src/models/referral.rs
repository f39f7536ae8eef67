use crate::store::{Document, EntityKind};
use chrono::{DateTime, Utc};
use mras_types::NonEmptyText;
use mras_uuid::EntityId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Referral state.
///
/// `Pending` is the initial state. The approve/reject/complete operations overwrite the status
/// regardless of its current value, so every state is reachable from every other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl ReferralStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferralStatus::Pending => "pending",
            ReferralStatus::Approved => "approved",
            ReferralStatus::Rejected => "rejected",
            ReferralStatus::Completed => "completed",
        }
    }
}

/// A request to move a patient's care from one hospital (and doctor) to another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    #[schema(value_type = String)]
    pub id: EntityId,
    #[schema(value_type = String)]
    pub patient: EntityId,
    #[schema(value_type = String)]
    pub referring_doctor: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub specialist: Option<EntityId>,
    #[schema(value_type = String)]
    pub referring_hospital: EntityId,
    #[schema(value_type = String)]
    pub destination_hospital: EntityId,
    #[schema(value_type = String)]
    pub reason: NonEmptyText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub appointment: Option<EntityId>,
    #[serde(default)]
    pub status: ReferralStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Referral {
    const KIND: EntityKind = EntityKind::Referral;

    fn id(&self) -> EntityId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewReferral {
    #[schema(value_type = String)]
    pub patient: EntityId,
    #[schema(value_type = String)]
    pub referring_doctor: EntityId,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub specialist: Option<EntityId>,
    #[schema(value_type = String)]
    pub referring_hospital: EntityId,
    #[schema(value_type = String)]
    pub destination_hospital: EntityId,
    #[schema(value_type = String)]
    pub reason: NonEmptyText,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReferralStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(ReferralStatus::default(), ReferralStatus::Pending);
        assert_eq!(ReferralStatus::Rejected.as_str(), "rejected");
    }

    #[test]
    fn new_referral_requires_reason() {
        let body = format!(
            r#"{{"patient": "{}", "referringDoctor": "{}", "referringHospital": "{}",
                "destinationHospital": "{}", "reason": "   "}}"#,
            EntityId::new(),
            EntityId::new(),
            EntityId::new(),
            EntityId::new()
        );
        assert!(serde_json::from_str::<NewReferral>(&body).is_err());
    }
}
