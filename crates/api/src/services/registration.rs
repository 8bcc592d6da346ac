//! Registration service.
//!
//! Orchestrates a registration request: event lookup, token issuance, QR
//! rendering, atomic persistence and best-effort notification dispatch.
//! Ordering is deliberate: the registration is persisted before any
//! notification is attempted, so a failed notification can never orphan a
//! registrant without a token, and a failed persist never produces a
//! notification for a record that does not exist.

use domain::models::{
    generate_token, EventSummary, ListRegistrationsQuery, ListRegistrationsResponse,
    RegisterRequest, Registration,
};
use persistence::repositories::{EventRepository, RegistrationRepository};
use shared::pagination::{decode_cursor, encode_cursor};
use shared::validation::normalize_email;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::services::{EmailService, SmsService};

/// Default page size for registration listings.
const DEFAULT_LIST_LIMIT: u32 = 50;

/// Maximum page size for registration listings.
const MAX_LIST_LIMIT: u32 = 100;

/// Errors surfaced by the registration service.
///
/// `DuplicateRegistration` is a normal business outcome: a caller retrying
/// `register` after a timeout can treat it as success-already-happened.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Event not found")]
    EventNotFound,

    #[error("Email is already registered for this event")]
    DuplicateRegistration,

    #[error("Registration not found")]
    RegistrationNotFound,

    #[error("Invalid pagination cursor")]
    InvalidCursor,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Service orchestrating registration flows.
#[derive(Clone)]
pub struct RegistrationService {
    events: EventRepository,
    registrations: RegistrationRepository,
    email: EmailService,
    sms: SmsService,
    app_base_url: String,
}

impl RegistrationService {
    /// Create a new service instance.
    pub fn new(
        pool: PgPool,
        email: EmailService,
        sms: SmsService,
        app_base_url: String,
    ) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool),
            email,
            sms,
            app_base_url,
        }
    }

    /// Register a participant for an event.
    ///
    /// The duplicate check is not performed here: the store's unique
    /// indexes are the single atomic arbiter, so concurrent requests for
    /// the same `(event, email)` resolve to exactly one success.
    pub async fn register(
        &self,
        event_id: Uuid,
        request: RegisterRequest,
    ) -> Result<Registration, RegistrationError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(RegistrationError::EventNotFound)?;

        let email = normalize_email(&request.email);
        let token = generate_token();

        // QR rendering is a convenience; the token is the source of truth.
        let qr_code = match shared::qr::encode_token(&token) {
            Ok(qr) => Some(qr),
            Err(e) => {
                warn!(
                    event_id = %event_id,
                    error = %e,
                    "QR rendering failed, proceeding without QR payload"
                );
                None
            }
        };

        let registration = self
            .registrations
            .insert(
                event_id,
                &email,
                request.name.trim(),
                request.phone.as_deref(),
                request.note.as_deref(),
                &token,
                qr_code.as_deref(),
            )
            .await?
            .ok_or(RegistrationError::DuplicateRegistration)?;

        info!(
            registration_id = %registration.id,
            event_id = %event_id,
            "Registration created"
        );

        self.dispatch_notifications(registration.clone(), event);

        Ok(registration)
    }

    /// Fetch a registration by its token.
    pub async fn get_by_token(&self, token: &str) -> Result<Registration, RegistrationError> {
        self.registrations
            .find_by_token(token)
            .await?
            .ok_or(RegistrationError::RegistrationNotFound)
    }

    /// List registrations for an event, newest first, cursor-paginated.
    pub async fn list(
        &self,
        event_id: Uuid,
        query: &ListRegistrationsQuery,
    ) -> Result<ListRegistrationsResponse, RegistrationError> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(RegistrationError::EventNotFound)?;

        let after = match query.cursor.as_deref() {
            Some(cursor) => {
                Some(decode_cursor(cursor).map_err(|_| RegistrationError::InvalidCursor)?)
            }
            None => None,
        };

        let limit = query
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);

        let registrations = self
            .registrations
            .list_by_event(event_id, after, limit as i64)
            .await?;

        let next_cursor = if registrations.len() == limit as usize {
            registrations
                .last()
                .map(|r| encode_cursor(r.registered_at, r.id))
        } else {
            None
        };

        Ok(ListRegistrationsResponse {
            data: registrations.into_iter().map(Into::into).collect(),
            next_cursor,
        })
    }

    /// Spawn fire-and-forget notification dispatch.
    ///
    /// Never awaited by the response path; failures are logged and do not
    /// affect the already-persisted registration.
    fn dispatch_notifications(&self, registration: Registration, event: EventSummary) {
        let email = self.email.clone();
        let sms = self.sms.clone();
        let ticket_url = format!(
            "{}/tickets/{}",
            self.app_base_url.trim_end_matches('/'),
            registration.token
        );

        tokio::spawn(async move {
            if let Err(e) = email
                .send_registration_confirmation(&registration, &event, &ticket_url)
                .await
            {
                error!(
                    registration_id = %registration.id,
                    error = %e,
                    "Failed to send registration confirmation email"
                );
            }

            if let Err(e) = sms.send_registration_sms(&registration, &event).await {
                error!(
                    registration_id = %registration.id,
                    error = %e,
                    "Failed to send registration confirmation SMS"
                );
            }
        });
    }
}
