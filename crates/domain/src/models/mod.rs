//! Domain models.

pub mod event;
pub mod registration;

pub use event::EventSummary;
pub use registration::{
    generate_token, CheckInOutcome, CheckInRequest, CheckInStatsResponse, ListRegistrationsQuery,
    ListRegistrationsResponse, RegisterRequest, Registration, RegistrationResponse, TOKEN_PREFIX,
};
