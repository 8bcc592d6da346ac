//! Event entity for database operations.

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::EventSummary;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for events.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EventEntity> for EventSummary {
    fn from(entity: EventEntity) -> Self {
        EventSummary {
            id: entity.id,
            title: entity.title,
            date: entity.date,
            time: entity.time,
            location: entity.location,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_entity_to_domain() {
        let entity = EventEntity {
            id: Uuid::new_v4(),
            title: "Tech Summit".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 7),
            time: Some("10:00".to_string()),
            location: Some("Main Hall".to_string()),
            created_at: Utc::now(),
        };

        let event: EventSummary = entity.clone().into();
        assert_eq!(event.id, entity.id);
        assert_eq!(event.title, "Tech Summit");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2026, 3, 7));
    }
}
