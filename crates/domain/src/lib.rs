//! Domain layer for the Event Manager backend.
//!
//! This crate contains:
//! - Domain models (Registration, Event)
//! - Registration token generation
//! - Check-in outcome types

pub mod models;
