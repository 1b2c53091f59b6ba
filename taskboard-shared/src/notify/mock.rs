/// Mock notifier for tests
///
/// Records every notice it receives instead of sending anything, and can
/// be told to fail, which lets tests exercise the warning path of the
/// task-creation workflow without a mail relay.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{AssignmentNotice, Notifier, NotifyError};

/// Notifier that records notices in memory
#[derive(Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<AssignmentNotice>>,
    fail: bool,
}

impl MockNotifier {
    /// Creates a mock that accepts every notice
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose every delivery attempt fails
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Returns a copy of all notices delivered so far
    pub fn sent(&self) -> Vec<AssignmentNotice> {
        self.sent.lock().expect("mock notifier lock poisoned").clone()
    }

    /// Number of delivery attempts that succeeded
    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("mock notifier lock poisoned").len()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn task_assigned(&self, notice: &AssignmentNotice) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Transport("mock transport failure".to_string()));
        }

        self.sent
            .lock()
            .expect("mock notifier lock poisoned")
            .push(notice.clone());
        Ok(())
    }
}
