/// Task-assignment notification port
///
/// Workflow handlers talk to an abstract [`Notifier`]; the concrete
/// transport is injected at startup. Delivery is best-effort and
/// at-most-once: the task is already committed when the notification is
/// attempted, and any failure is downgraded to a user-visible warning
/// without affecting the write.
///
/// # Implementations
///
/// - [`smtp::SmtpNotifier`]: sends real email over SMTP
/// - [`mock::MockNotifier`]: records notices in memory for tests

pub mod mock;
pub mod smtp;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::task::TaskPriority;

/// Subject line used for every assignment notification
pub const ASSIGNMENT_SUBJECT: &str = "New Task Assigned";

/// Error type for notification delivery
///
/// Callers must treat every variant as non-fatal: the triggering write
/// has already committed.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Transport-level failure (connection, timeout, rejected send)
    #[error("Notification transport failed: {0}")]
    Transport(String),

    /// The recipient address could not be parsed
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),
}

/// Everything needed to notify a user about a task assigned to them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentNotice {
    /// Recipient's email address
    pub recipient_email: String,

    /// Recipient's username, used in the greeting
    pub recipient_name: String,

    /// Title of the assigned task
    pub task_title: String,

    /// Task priority
    pub priority: TaskPriority,

    /// Due date, if any
    pub due_date: Option<NaiveDate>,

    /// Task description, if any
    pub description: Option<String>,
}

impl AssignmentNotice {
    /// Renders the notification body
    ///
    /// Missing due date and description are replaced by literal
    /// placeholders rather than omitted.
    pub fn body(&self) -> String {
        let due = self
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "No due date".to_string());
        let description = self
            .description
            .as_deref()
            .unwrap_or("No description provided");

        format!(
            "Hi {},\n\n\
             You have been assigned a new task:\n\n\
             Title: {}\n\
             Priority: {}\n\
             Due Date: {}\n\n\
             Description:\n{}\n\n\
             Best regards,\nTaskboard",
            self.recipient_name,
            self.task_title,
            self.priority.label(),
            due,
            description,
        )
    }
}

/// Capability to deliver a task-assignment notification
///
/// Implementations must not retry; at-most-once delivery with no
/// durability guarantee is the contract.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempts to deliver one assignment notification
    async fn task_assigned(&self, notice: &AssignmentNotice) -> Result<(), NotifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice() -> AssignmentNotice {
        AssignmentNotice {
            recipient_email: "eve@example.com".to_string(),
            recipient_name: "eve".to_string(),
            task_title: "Write release notes".to_string(),
            priority: TaskPriority::High,
            due_date: None,
            description: None,
        }
    }

    #[test]
    fn test_body_contains_title_and_priority() {
        let body = notice().body();

        assert!(body.contains("Hi eve,"));
        assert!(body.contains("Title: Write release notes"));
        assert!(body.contains("Priority: High"));
    }

    #[test]
    fn test_body_placeholders_when_fields_missing() {
        let body = notice().body();

        assert!(body.contains("Due Date: No due date"));
        assert!(body.contains("No description provided"));
    }

    #[test]
    fn test_body_renders_due_date_and_description() {
        let mut n = notice();
        n.due_date = NaiveDate::from_ymd_opt(2026, 9, 1);
        n.description = Some("Cover the auth changes.".to_string());

        let body = n.body();
        assert!(body.contains("Due Date: 2026-09-01"));
        assert!(body.contains("Cover the auth changes."));
        assert!(!body.contains("No due date"));
        assert!(!body.contains("No description provided"));
    }
}
