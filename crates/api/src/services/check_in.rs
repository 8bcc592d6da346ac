//! Check-in service.
//!
//! Drives the one-way `REGISTERED -> CHECKED_IN` transition and computes
//! live statistics for staff dashboards. All four scan outcomes are
//! routine at an entrance, so they are modeled as values, never errors.

use chrono::Utc;
use domain::models::{CheckInOutcome, CheckInStatsResponse};
use persistence::repositories::{EventRepository, RegistrationRepository};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Errors surfaced by the check-in service.
#[derive(Debug, Error)]
pub enum CheckInError {
    #[error("Event not found")]
    EventNotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Service for check-in scans and statistics.
#[derive(Clone)]
pub struct CheckInService {
    events: EventRepository,
    registrations: RegistrationRepository,
}

impl CheckInService {
    /// Create a new service instance.
    pub fn new(pool: PgPool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool),
        }
    }

    /// Validate a scanned token against an event and perform the
    /// idempotent check-in transition.
    ///
    /// Concurrent calls with the same token resolve to exactly one
    /// `CheckedIn`; everyone else observes `AlreadyCheckedIn` with the
    /// stable, originally-stored time. A token issued for another event
    /// yields `WrongEvent` without mutating anything.
    pub async fn check_in(
        &self,
        event_id: Uuid,
        token: &str,
    ) -> Result<CheckInOutcome, CheckInError> {
        let Some(registration) = self.registrations.find_by_token(token).await? else {
            return Ok(CheckInOutcome::TokenNotFound);
        };

        if !registration.belongs_to(event_id) {
            return Ok(CheckInOutcome::WrongEvent);
        }

        match self.registrations.check_in(registration.id).await? {
            Some(updated) => {
                info!(
                    registration_id = %updated.id,
                    event_id = %event_id,
                    "Check-in successful"
                );
                Ok(CheckInOutcome::CheckedIn {
                    name: updated.name,
                    // Set by the conditional update in the same statement.
                    check_in_time: updated.check_in_time.unwrap_or_else(Utc::now),
                })
            }
            None => {
                // Lost the race or the flag was already set: report the
                // stored time so staff can see when the first scan happened.
                match self.registrations.find_by_id(registration.id).await? {
                    Some(current) => Ok(CheckInOutcome::AlreadyCheckedIn {
                        name: current.name,
                        check_in_time: current.check_in_time.unwrap_or_else(Utc::now),
                    }),
                    // Deleted out-of-band between the two reads.
                    None => Ok(CheckInOutcome::TokenNotFound),
                }
            }
        }
    }

    /// Compute live check-in statistics for an event.
    pub async fn stats(&self, event_id: Uuid) -> Result<CheckInStatsResponse, CheckInError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(CheckInError::EventNotFound)?;

        let total = self.registrations.count_by_event(event_id).await?;
        let checked_in = self.registrations.count_checked_in(event_id).await?;

        Ok(CheckInStatsResponse::from_counts(
            event.id,
            event.title,
            total,
            checked_in,
        ))
    }
}
