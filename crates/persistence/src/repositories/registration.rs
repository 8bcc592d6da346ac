//! Registration repository for database operations.
//!
//! This is the only mutable shared state in the check-in subsystem. The two
//! writers, [`RegistrationRepository::insert`] and
//! [`RegistrationRepository::check_in`], rely on storage-level atomicity
//! (unique indexes and a conditional update keyed on the individual row), so
//! the guarantees hold across multiple processes behind a load balancer.

use chrono::{DateTime, Utc};
use domain::models::Registration;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::registration::RegistrationEntity;

const REGISTRATION_COLUMNS: &str =
    "id, event_id, email, name, phone, note, token, qr_code, checked_in, check_in_time, registered_at";

/// Repository for registration database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new registration.
    ///
    /// The duplicate check and the insert are a single atomic statement:
    /// `ON CONFLICT DO NOTHING` suppresses both unique indexes
    /// (`(event_id, email)` and `token`), and an empty `RETURNING` set means
    /// a duplicate was hit. Returns `None` in that case. The caller must
    /// pass an already-normalized email.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        event_id: Uuid,
        email: &str,
        name: &str,
        phone: Option<&str>,
        note: Option<&str>,
        token: &str,
        qr_code: Option<&str>,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let entity = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            INSERT INTO event_registrations (event_id, email, name, phone, note, token, qr_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT DO NOTHING
            RETURNING {REGISTRATION_COLUMNS}
            "#,
        ))
        .bind(event_id)
        .bind(email)
        .bind(name)
        .bind(phone)
        .bind(note)
        .bind(token)
        .bind(qr_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find registration by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Registration>, sqlx::Error> {
        let entity = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM event_registrations
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find registration by token.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<Registration>, sqlx::Error> {
        let entity = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM event_registrations
            WHERE token = $1
            "#,
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find registration by event and (normalized) email.
    pub async fn find_by_event_and_email(
        &self,
        event_id: Uuid,
        email: &str,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let entity = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM event_registrations
            WHERE event_id = $1 AND email = $2
            "#,
        ))
        .bind(event_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Perform the one-time check-in transition for a registration.
    ///
    /// Compare-and-set on the row: the update only applies while
    /// `checked_in` is still false, so concurrent attempts on the same
    /// registration produce exactly one success. `None` means no row
    /// transitioned (already checked in, or unknown id); the caller
    /// distinguishes via a follow-up read.
    pub async fn check_in(&self, id: Uuid) -> Result<Option<Registration>, sqlx::Error> {
        let entity = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            UPDATE event_registrations
            SET checked_in = TRUE, check_in_time = NOW()
            WHERE id = $1 AND checked_in = FALSE
            RETURNING {REGISTRATION_COLUMNS}
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Count registrations for an event.
    pub async fn count_by_event(&self, event_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM event_registrations
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Count checked-in registrations for an event.
    pub async fn count_checked_in(&self, event_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM event_registrations
            WHERE event_id = $1 AND checked_in = TRUE
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
    }

    /// List registrations for an event, newest first, with keyset
    /// pagination on `(registered_at, id)`.
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
        after: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let entities = match after {
            Some((registered_at, id)) => {
                sqlx::query_as::<_, RegistrationEntity>(&format!(
                    r#"
                    SELECT {REGISTRATION_COLUMNS}
                    FROM event_registrations
                    WHERE event_id = $1 AND (registered_at, id) < ($2, $3)
                    ORDER BY registered_at DESC, id DESC
                    LIMIT $4
                    "#,
                ))
                .bind(event_id)
                .bind(registered_at)
                .bind(id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, RegistrationEntity>(&format!(
                    r#"
                    SELECT {REGISTRATION_COLUMNS}
                    FROM event_registrations
                    WHERE event_id = $1
                    ORDER BY registered_at DESC, id DESC
                    LIMIT $2
                    "#,
                ))
                .bind(event_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(entities.into_iter().map(Into::into).collect())
    }
}
