use super::ActivityStatus;
use crate::store::{Document, EntityKind};
use chrono::{DateTime, Utc};
use mras_types::NonEmptyText;
use mras_uuid::EntityId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Doctor profile layered on a user account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[schema(value_type = String)]
    pub id: EntityId,
    #[schema(value_type = String)]
    pub user: EntityId,
    #[schema(value_type = String)]
    pub specialization: NonEmptyText,
    /// Years in practice.
    pub experience: u32,
    #[schema(value_type = String)]
    pub hospital: EntityId,
    #[serde(default)]
    pub availability: Vec<Weekday>,
    #[schema(value_type = String)]
    pub phone: NonEmptyText,
    #[serde(default)]
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Doctor {
    const KIND: EntityKind = EntityKind::Doctor;

    fn id(&self) -> EntityId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    #[serde(alias = "userId")]
    #[schema(value_type = String)]
    pub user: EntityId,
    #[schema(value_type = String)]
    pub specialization: NonEmptyText,
    pub experience: u32,
    #[schema(value_type = String)]
    pub hospital: EntityId,
    #[serde(default)]
    pub availability: Vec<Weekday>,
    #[schema(value_type = String)]
    pub phone: NonEmptyText,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub specialization: Option<NonEmptyText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub hospital: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<Weekday>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<NonEmptyText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
}

/// Availability is a set of weekdays; repeated days are dropped, first occurrence wins.
pub(crate) fn dedup_weekdays(days: Vec<Weekday>) -> Vec<Weekday> {
    let mut seen = Vec::with_capacity(days.len());
    for day in days {
        if !seen.contains(&day) {
            seen.push(day);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekdays_use_capitalised_names() {
        let days: Vec<Weekday> = serde_json::from_str(r#"["Monday", "Friday"]"#).unwrap();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Friday]);
        assert!(serde_json::from_str::<Weekday>(r#""monday""#).is_err());
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let days = dedup_weekdays(vec![
            Weekday::Friday,
            Weekday::Monday,
            Weekday::Friday,
        ]);
        assert_eq!(days, vec![Weekday::Friday, Weekday::Monday]);
    }

    #[test]
    fn new_doctor_accepts_user_id_alias() {
        let user = EntityId::new();
        let hospital = EntityId::new();
        let body = format!(
            r#"{{"userId": "{user}", "specialization": "Cardiology", "experience": 7,
                "hospital": "{hospital}", "phone": "0123"}}"#
        );
        let req: NewDoctor = serde_json::from_str(&body).unwrap();
        assert_eq!(req.user, user);
        assert!(req.availability.is_empty());
    }
}
