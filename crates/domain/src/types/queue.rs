//! Offline application queue records
//!
//! A [`QueuedApplication`] is one locally persisted submission that has not
//! yet been confirmed by the remote endpoint.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a queued application.
///
/// Records are created `Queued`; the sync engine moves them through
/// `Syncing` to either `Synced` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    Queued,
    Syncing,
    Synced,
    Failed,
}

crate::impl_domain_status_conversions!(QueueStatus {
    Queued => "queued",
    Syncing => "syncing",
    Synced => "synced",
    Failed => "failed",
});

impl QueueStatus {
    /// Whether the sync engine may move a record from `self` to `next`.
    ///
    /// `Failed -> Queued` is the explicit retry reset; every other edge
    /// follows `queued -> syncing -> synced | failed`.
    pub fn can_transition_to(self, next: QueueStatus) -> bool {
        matches!(
            (self, next),
            (Self::Queued, Self::Syncing)
                | (Self::Syncing, Self::Synced)
                | (Self::Syncing, Self::Failed)
                | (Self::Failed, Self::Queued)
        )
    }
}

/// Input for queueing an application. The store assigns id, timestamp and
/// status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub project_id: String,
    pub student_id: String,
    pub cover_letter: Option<String>,
}

impl NewApplication {
    pub fn new(
        project_id: impl Into<String>,
        student_id: impl Into<String>,
        cover_letter: Option<String>,
    ) -> Self {
        Self { project_id: project_id.into(), student_id: student_id.into(), cover_letter }
    }
}

/// One pending submission held in the offline queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedApplication {
    pub id: String,
    pub project_id: String,
    pub student_id: String,
    pub cover_letter: Option<String>,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub status: QueueStatus,
    /// Time of the last status write in milliseconds since the Unix epoch.
    pub status_changed_at: i64,
}

impl QueuedApplication {
    /// Build a freshly queued record from caller input.
    pub fn from_new(id: String, input: NewApplication, now_millis: i64) -> Self {
        Self {
            id,
            project_id: input.project_id,
            student_id: input.student_id,
            cover_letter: input.cover_letter,
            timestamp: now_millis,
            status: QueueStatus::Queued,
            status_changed_at: now_millis,
        }
    }
}

/// Per-status counts for UI badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSummary {
    pub queued: usize,
    pub syncing: usize,
    pub synced: usize,
    pub failed: usize,
}

impl QueueSummary {
    /// Tally a slice of records.
    pub fn from_records(records: &[QueuedApplication]) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            match record.status {
                QueueStatus::Queued => acc.queued += 1,
                QueueStatus::Syncing => acc.syncing += 1,
                QueueStatus::Synced => acc.synced += 1,
                QueueStatus::Failed => acc.failed += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.queued + self.syncing + self.synced + self.failed
    }

    /// Records still waiting for a successful delivery.
    pub fn pending(&self) -> usize {
        self.queued + self.syncing + self.failed
    }
}

/// Space consumed by the local durable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageUsage {
    pub used_bytes: u64,
    pub quota_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, status: QueueStatus) -> QueuedApplication {
        QueuedApplication {
            id: id.to_string(),
            project_id: "p1".to_string(),
            student_id: "s1".to_string(),
            cover_letter: None,
            timestamp: 1_700_000_000_000,
            status,
            status_changed_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_allowed_transitions() {
        assert!(QueueStatus::Queued.can_transition_to(QueueStatus::Syncing));
        assert!(QueueStatus::Syncing.can_transition_to(QueueStatus::Synced));
        assert!(QueueStatus::Syncing.can_transition_to(QueueStatus::Failed));
        assert!(QueueStatus::Failed.can_transition_to(QueueStatus::Queued));
    }

    #[test]
    fn test_forbidden_transitions() {
        assert!(!QueueStatus::Queued.can_transition_to(QueueStatus::Synced));
        assert!(!QueueStatus::Queued.can_transition_to(QueueStatus::Failed));
        assert!(!QueueStatus::Synced.can_transition_to(QueueStatus::Queued));
        assert!(!QueueStatus::Failed.can_transition_to(QueueStatus::Synced));
    }

    #[test]
    fn test_from_new_starts_queued() {
        let input = NewApplication::new("p1", "s1", Some("Hello".into()));
        let queued = QueuedApplication::from_new("queued_1".into(), input, 42);

        assert_eq!(queued.status, QueueStatus::Queued);
        assert_eq!(queued.timestamp, 42);
        assert_eq!(queued.status_changed_at, 42);
        assert_eq!(queued.cover_letter.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            record("a", QueueStatus::Queued),
            record("b", QueueStatus::Queued),
            record("c", QueueStatus::Failed),
            record("d", QueueStatus::Synced),
        ];

        let summary = QueueSummary::from_records(&records);
        assert_eq!(summary.queued, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.synced, 1);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.pending(), 3);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_value(record("a", QueueStatus::Syncing)).unwrap();
        assert_eq!(json["projectId"], "p1");
        assert_eq!(json["status"], "syncing");
        assert!(json["coverLetter"].is_null());
    }
}
