//! Application services.

pub mod check_in;
pub mod email;
pub mod registration;
pub mod sms;

pub use check_in::{CheckInError, CheckInService};
pub use email::{EmailError, EmailMessage, EmailService};
pub use registration::{RegistrationError, RegistrationService};
pub use sms::{SmsError, SmsService};
