//! Shared utilities and common types for the Event Manager backend.
//!
//! This crate provides common functionality used across all other crates:
//! - QR code rendering for registration tokens
//! - Common validation logic
//! - Cursor-based pagination

pub mod pagination;
pub mod qr;
pub mod validation;
