//! Event repository for database operations.
//!
//! The registration subsystem only consumes an event lookup; catalog
//! management lives elsewhere. `create` exists for seeding and tests.

use chrono::NaiveDate;
use domain::models::EventSummary;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::event::EventEntity;

/// Repository for event lookups.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventSummary>, sqlx::Error> {
        let entity = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, title, date, time, location, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Create an event.
    pub async fn create(
        &self,
        title: &str,
        date: Option<NaiveDate>,
        time: Option<&str>,
        location: Option<&str>,
    ) -> Result<EventSummary, sqlx::Error> {
        let entity = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events (title, date, time, location)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, date, time, location, created_at
            "#,
        )
        .bind(title)
        .bind(date)
        .bind(time)
        .bind(location)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }
}
