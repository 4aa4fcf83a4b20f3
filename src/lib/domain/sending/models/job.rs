//! Send job state machine

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where a send job is in its lifecycle.
///
/// Status only moves forward: `Idle -> Sending -> {Completed, Error}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// No job has been started
    #[default]
    Idle,

    /// The background task is dispatching recipients
    Sending,

    /// Every recipient has been processed
    Completed,

    /// The transport could not be established; no further dispatch
    Error,
}

/// A failed delivery to one recipient
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SendFailure {
    /// The recipient address that failed
    #[schema(example = "b@x.com")]
    pub address: String,

    /// The transport's error message
    #[schema(example = "bounce")]
    pub message: String,
}

/// The progress state of a send job.
///
/// Mutated only by the one background task driving the job; everyone else
/// reads cloned snapshots. Counters never decrease and `sent + failed`
/// never exceeds `total`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SendJob {
    /// Recipient count, fixed when the job is created
    #[schema(example = 2)]
    pub total: usize,

    /// Deliveries accepted by the relay so far
    #[schema(example = 1)]
    pub sent: usize,

    /// Deliveries rejected so far
    #[schema(example = 1)]
    pub failed: usize,

    /// Lifecycle status
    pub status: JobStatus,

    /// Address currently being processed; empty when idle or finished
    #[schema(example = "")]
    pub current_recipient: String,

    /// Per-recipient failures, in dispatch order
    pub errors: Vec<SendFailure>,

    /// Fatal transport error, present only when `status` is `error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendJob {
    /// A fresh job in `Sending` state for `total` recipients
    pub fn started(total: usize) -> Self {
        Self {
            total,
            status: JobStatus::Sending,
            ..Self::default()
        }
    }

    /// Whether the job has reached `Completed` or `Error`
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, JobStatus::Completed | JobStatus::Error)
    }

    /// Whether a background task is still driving this job
    pub fn is_sending(&self) -> bool {
        self.status == JobStatus::Sending
    }

    /// Publish the recipient about to be dispatched
    pub fn set_current(&mut self, address: &str) {
        self.current_recipient = address.to_string();
    }

    /// Record one accepted delivery
    pub fn record_sent(&mut self) {
        self.sent += 1;
    }

    /// Record one rejected delivery
    pub fn record_failure(&mut self, address: &str, message: &str) {
        self.failed += 1;
        self.errors.push(SendFailure {
            address: address.to_string(),
            message: message.to_string(),
        });
    }

    /// All recipients processed; the job becomes immutable
    pub fn complete(&mut self) {
        self.status = JobStatus::Completed;
        self.current_recipient.clear();
    }

    /// Transport establishment failed before any recipient was attempted
    pub fn abort(&mut self, message: &str) {
        self.status = JobStatus::Error;
        self.current_recipient.clear();
        self.error = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_started_job_is_sending() {
        let job = SendJob::started(3);

        assert_eq!(job.total, 3);
        assert_eq!(job.sent, 0);
        assert_eq!(job.failed, 0);
        assert_eq!(job.status, JobStatus::Sending);
        assert!(job.errors.is_empty());
        assert!(!job.is_terminal());
    }

    #[test]
    fn test_counters_stay_within_total() {
        let mut job = SendJob::started(2);

        job.record_sent();
        job.record_failure("b@x.com", "bounce");

        assert_eq!(job.sent + job.failed, job.total);
        assert_eq!(job.errors.len(), 1);
        assert_eq!(job.errors[0].address, "b@x.com");
    }

    #[test]
    fn test_complete_clears_current_recipient() {
        let mut job = SendJob::started(1);
        job.set_current("a@x.com");

        job.complete();

        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.current_recipient.is_empty());
        assert!(job.is_terminal());
    }

    #[test]
    fn test_abort_records_the_fatal_error() {
        let mut job = SendJob::started(5);

        job.abort("relay unreachable");

        assert_eq!(job.status, JobStatus::Error);
        assert_eq!(job.error.as_deref(), Some("relay unreachable"));
        assert_eq!(job.sent, 0);
        assert!(job.is_terminal());
    }

    #[test]
    fn test_default_job_is_idle() {
        let job = SendJob::default();

        assert_eq!(job.status, JobStatus::Idle);
        assert!(!job.is_sending());
        assert!(!job.is_terminal());
    }

    #[test]
    fn test_snapshot_serializes_status_in_snake_case() {
        let job = SendJob::started(1);

        let json = serde_json::to_value(&job).unwrap();

        assert_eq!(json["status"], "sending");
    }
}
