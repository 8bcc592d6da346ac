//! Cursor-based pagination utilities.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Error type for cursor operations.
#[derive(Debug, Error)]
pub enum CursorError {
    #[error("Invalid cursor format")]
    InvalidFormat,
    #[error("Invalid cursor encoding")]
    InvalidEncoding,
    #[error("Invalid timestamp in cursor")]
    InvalidTimestamp,
    #[error("Invalid ID in cursor")]
    InvalidId,
}

/// Encodes a cursor from timestamp and ID.
///
/// The cursor format is: base64(RFC3339_timestamp:id)
/// The composite cursor keeps ordering stable when several registrations
/// share the same timestamp.
pub fn encode_cursor(registered_at: DateTime<Utc>, id: Uuid) -> String {
    let raw = format!(
        "{}:{}",
        registered_at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
        id
    );
    URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

/// Decodes a cursor into timestamp and ID.
///
/// Returns `(timestamp, id)` tuple on success.
pub fn decode_cursor(cursor: &str) -> Result<(DateTime<Utc>, Uuid), CursorError> {
    let decoded = URL_SAFE_NO_PAD
        .decode(cursor)
        .map_err(|_| CursorError::InvalidEncoding)?;

    let s = String::from_utf8(decoded).map_err(|_| CursorError::InvalidFormat)?;

    // Split on last colon (timestamp contains colons)
    let colon_pos = s.rfind(':').ok_or(CursorError::InvalidFormat)?;

    let timestamp_str = &s[..colon_pos];
    let id_str = &s[colon_pos + 1..];

    let id: Uuid = id_str.parse().map_err(|_| CursorError::InvalidId)?;

    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .map_err(|_| CursorError::InvalidTimestamp)?
        .with_timezone(&Utc);

    Ok((timestamp, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_roundtrip() {
        let ts = Utc::now();
        let id = Uuid::new_v4();
        let cursor = encode_cursor(ts, id);
        let (decoded_ts, decoded_id) = decode_cursor(&cursor).unwrap();
        assert_eq!(decoded_id, id);
        // Micros precision is preserved by the cursor format
        assert_eq!(decoded_ts.timestamp_micros(), ts.timestamp_micros());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_cursor("not base64 !!!").is_err());
    }

    #[test]
    fn test_decode_rejects_missing_separator() {
        let cursor = URL_SAFE_NO_PAD.encode(b"no-separator-here");
        assert!(decode_cursor(&cursor).is_err());
    }

    #[test]
    fn test_decode_rejects_bad_id() {
        let cursor = URL_SAFE_NO_PAD.encode(b"2024-01-01T00:00:00Z:not-a-uuid");
        assert!(decode_cursor(&cursor).is_err());
    }

    #[test]
    fn test_decode_rejects_bad_timestamp() {
        let id = Uuid::new_v4();
        let cursor = URL_SAFE_NO_PAD.encode(format!("yesterday:{}", id).as_bytes());
        assert!(decode_cursor(&cursor).is_err());
    }
}
