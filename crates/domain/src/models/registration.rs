//! Registration domain model and check-in outcomes.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration token prefix.
pub const TOKEN_PREFIX: &str = "reg_";

/// Length of random bytes for token generation (256 bits of entropy).
const TOKEN_RANDOM_BYTES: usize = 32;

/// Event registration domain model.
///
/// A registration is created once, mutated exactly once (the check-in
/// transition) and never otherwise modified. The token is the bearer
/// credential proving the registration; it is never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub token: String,
    /// QR rendering of the token as a PNG data URI. `None` when rendering
    /// failed at registration time; the token is still valid for check-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    pub checked_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    /// Whether this registration was issued for the given event.
    pub fn belongs_to(&self, event_id: Uuid) -> bool {
        self.event_id == event_id
    }
}

/// Request to register a participant for an event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(custom(function = "shared::validation::validate_name"))]
    pub name: String,
    #[validate(custom(function = "shared::validation::validate_phone"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Response format for a registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrationResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    pub checked_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.id,
            event_id: registration.event_id,
            email: registration.email,
            name: registration.name,
            phone: registration.phone,
            note: registration.note,
            token: registration.token,
            qr_code: registration.qr_code,
            checked_in: registration.checked_in,
            check_in_time: registration.check_in_time,
            registered_at: registration.registered_at,
        }
    }
}

/// Request body for a check-in scan.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CheckInRequest {
    #[validate(length(min = 1, message = "Token must not be empty"))]
    pub token: String,
}

/// Outcome of a check-in attempt.
///
/// All four cases are routine at a real event entrance, so they are
/// returned as values rather than errors. A scanner must be able to tell
/// a forged token (`TokenNotFound`) from a legitimate token scanned at the
/// wrong gate (`WrongEvent`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckInOutcome {
    CheckedIn {
        name: String,
        check_in_time: DateTime<Utc>,
    },
    AlreadyCheckedIn {
        name: String,
        check_in_time: DateTime<Utc>,
    },
    WrongEvent,
    TokenNotFound,
}

impl CheckInOutcome {
    /// Whether this attempt performed the one-time transition.
    pub fn is_checked_in(&self) -> bool {
        matches!(self, CheckInOutcome::CheckedIn { .. })
    }
}

/// Live check-in statistics for a staff dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckInStatsResponse {
    pub event_id: Uuid,
    pub event_title: String,
    pub total: i64,
    pub checked_in: i64,
    pub pending: i64,
    pub percentage: f64,
}

impl CheckInStatsResponse {
    /// Builds a stats response from raw counts, rounding the percentage to
    /// one decimal and avoiding division by zero for empty events.
    pub fn from_counts(event_id: Uuid, event_title: String, total: i64, checked_in: i64) -> Self {
        let percentage = if total > 0 {
            (checked_in as f64 / total as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Self {
            event_id,
            event_title,
            total,
            checked_in,
            pending: total - checked_in,
            percentage,
        }
    }
}

/// Query parameters for listing registrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListRegistrationsQuery {
    pub cursor: Option<String>,
    pub limit: Option<u32>,
}

/// Response for listing registrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListRegistrationsResponse {
    pub data: Vec<RegistrationResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Generate a new registration token.
///
/// Tokens are bearer credentials for check-in: 256 bits from the OS-seeded
/// thread RNG, URL-safe base64. Nothing about the registrant or event is
/// encoded, so a token cannot be guessed from public data. An unavailable
/// entropy source panics, which is the intended fatal behavior.
pub fn generate_token() -> String {
    let mut random_bytes = [0u8; TOKEN_RANDOM_BYTES];
    rand::thread_rng().fill_bytes(&mut random_bytes);
    let encoded = URL_SAFE_NO_PAD.encode(random_bytes);
    format!("{}{}", TOKEN_PREFIX, encoded)
}
