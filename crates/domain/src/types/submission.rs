//! Remote delivery payloads

use serde::{Deserialize, Serialize};

use super::queue::QueuedApplication;

/// How an application reached the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionChannel {
    Sms,
    Offline,
}

crate::impl_domain_status_conversions!(SubmissionChannel {
    Sms => "sms",
    Offline => "offline",
});

/// Body sent to the remote applications endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub project_id: String,
    pub student_id: String,
    pub cover_letter: Option<String>,
    pub submitted_via: SubmissionChannel,
    /// Always `false` on delivery: the remote record is a real submission,
    /// not a queue placeholder.
    pub is_queued: bool,
}

impl ApplicationSubmission {
    /// Payload for a record drained from the offline queue.
    pub fn from_queued(record: &QueuedApplication) -> Self {
        Self {
            project_id: record.project_id.clone(),
            student_id: record.student_id.clone(),
            cover_letter: record.cover_letter.clone(),
            submitted_via: SubmissionChannel::Offline,
            is_queued: false,
        }
    }

    /// Payload for an application received over SMS.
    pub fn from_sms(project_id: &str, phone: &str, message: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            student_id: phone.to_string(),
            cover_letter: Some(message.to_string()),
            submitted_via: SubmissionChannel::Sms,
            is_queued: false,
        }
    }
}

/// Acknowledgement from the remote endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Remote application id, when the endpoint returns one.
    pub remote_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::queue::QueueStatus;

    #[test]
    fn test_offline_payload_wire_shape() {
        let record = QueuedApplication {
            id: "queued_1".into(),
            project_id: "p1".into(),
            student_id: "s1".into(),
            cover_letter: Some("Hello".into()),
            timestamp: 1,
            status: QueueStatus::Syncing,
            status_changed_at: 1,
        };

        let json = serde_json::to_value(ApplicationSubmission::from_queued(&record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "project_id": "p1",
                "student_id": "s1",
                "cover_letter": "Hello",
                "submitted_via": "offline",
                "is_queued": false
            })
        );
    }

    #[test]
    fn test_sms_payload_uses_phone_as_student() {
        let payload = ApplicationSubmission::from_sms("7", "+919876543210", "hi");
        assert_eq!(payload.student_id, "+919876543210");
        assert_eq!(payload.submitted_via, SubmissionChannel::Sms);
        assert!(!payload.is_queued);
    }

    #[test]
    fn test_channel_accepts_only_delivery_paths() {
        assert_eq!("SMS".parse::<SubmissionChannel>(), Ok(SubmissionChannel::Sms));
        assert_eq!("offline".parse::<SubmissionChannel>(), Ok(SubmissionChannel::Offline));
        assert!("web".parse::<SubmissionChannel>().is_err());
        assert!(serde_json::from_str::<SubmissionChannel>("\"web\"").is_err());
    }
}
