//! Registration entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::Registration;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for event registrations.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub note: Option<String>,
    pub token: String,
    pub qr_code: Option<String>,
    pub checked_in: bool,
    pub check_in_time: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
}

impl From<RegistrationEntity> for Registration {
    fn from(entity: RegistrationEntity) -> Self {
        Registration {
            id: entity.id,
            event_id: entity.event_id,
            email: entity.email,
            name: entity.name,
            phone: entity.phone,
            note: entity.note,
            token: entity.token,
            qr_code: entity.qr_code,
            checked_in: entity.checked_in,
            check_in_time: entity.check_in_time,
            registered_at: entity.registered_at,
        }
    }
}
