//! Event summary consumed by the registration subsystem.
//!
//! The event catalog itself is owned by another part of the system; the
//! registration core only needs the fields carried in confirmation
//! notifications and check-in displays.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary view of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EventSummary {
    /// Human-readable date for notifications, "TBA" when unscheduled.
    pub fn date_display(&self) -> String {
        self.date
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| "TBA".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_display_formats_date() {
        let event = EventSummary {
            id: Uuid::new_v4(),
            title: "Tech Summit".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 7),
            time: Some("10:00".to_string()),
            location: Some("Main Hall".to_string()),
            created_at: Utc::now(),
        };
        assert_eq!(event.date_display(), "Mar 7, 2026");
    }

    #[test]
    fn test_date_display_tba_when_unscheduled() {
        let event = EventSummary {
            id: Uuid::new_v4(),
            title: "Tech Summit".to_string(),
            date: None,
            time: None,
            location: None,
            created_at: Utc::now(),
        };
        assert_eq!(event.date_display(), "TBA");
    }
}
