//! Session summary records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One saved research session: enough to list it in the history and fetch
/// its transcript from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub company: String,
    pub created_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn new(session_id: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            company: company.into(),
            created_at: Utc::now(),
        }
    }

    /// Short prefix of the session id for display.
    pub fn short_id(&self) -> &str {
        let id = self.session_id.as_str();
        &id[..id.len().min(8)]
    }

    /// Human-readable age string (e.g. "2h ago", "3d ago").
    pub fn age(&self) -> String {
        let duration = Utc::now() - self.created_at;
        let minutes = duration.num_minutes();
        if minutes < 1 {
            "just now".to_string()
        } else if minutes < 60 {
            format!("{minutes}m ago")
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn short_id_truncates() {
        let s = SessionSummary::new("0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9", "Tesla");
        assert_eq!(s.short_id(), "0a1b2c3d");
    }

    #[test]
    fn short_id_handles_short_ids() {
        let s = SessionSummary::new("ab", "Tesla");
        assert_eq!(s.short_id(), "ab");
    }

    #[test]
    fn age_buckets() {
        let mut s = SessionSummary::new("id", "Tesla");
        assert_eq!(s.age(), "just now");
        s.created_at = Utc::now() - Duration::minutes(5);
        assert_eq!(s.age(), "5m ago");
        s.created_at = Utc::now() - Duration::hours(3);
        assert_eq!(s.age(), "3h ago");
        s.created_at = Utc::now() - Duration::days(2);
        assert_eq!(s.age(), "2d ago");
    }

    #[test]
    fn serde_field_names_match_local_key_format() {
        let s = SessionSummary::new("abc", "Tesla");
        let v = serde_json::to_value(&s).unwrap();
        assert!(v.get("session_id").is_some());
        assert!(v.get("company").is_some());
        assert!(v.get("created_at").is_some());
    }
}
