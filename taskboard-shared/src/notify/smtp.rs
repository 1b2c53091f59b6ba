/// SMTP notification transport
///
/// Sends assignment notifications as plain-text email via `lettre`'s
/// async SMTP transport. The send happens synchronously within the
/// request path and is bounded only by the transport's own timeout; there
/// is no retry queue.

use async_trait::async_trait;
use lettre::{
    message::Mailbox,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, warn};

use super::{AssignmentNotice, Notifier, NotifyError, ASSIGNMENT_SUBJECT};

/// SMTP transport configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,

    /// SMTP port
    pub port: u16,

    /// Username for SMTP AUTH (None disables TLS and auth, local dev only)
    pub username: Option<String>,

    /// Password for SMTP AUTH
    pub password: Option<String>,

    /// Sender address, e.g. "Taskboard <noreply@taskboard.example>"
    pub from: String,
}

/// Notifier that delivers over SMTP
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Creates a notifier from configuration
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Transport` if the relay host is invalid, or
    /// `NotifyError::InvalidRecipient` if the sender address cannot be
    /// parsed.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| NotifyError::InvalidRecipient(format!("sender address: {}", e)))?;

        let transport = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                    .map_err(|e| NotifyError::Transport(e.to_string()))?
                    .port(config.port)
                    .credentials(Credentials::new(username.clone(), password.clone()))
                    .build()
            }
            // Unauthenticated plaintext SMTP, for local development relays
            _ => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port)
                .build(),
        };

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn task_assigned(&self, notice: &AssignmentNotice) -> Result<(), NotifyError> {
        let to: Mailbox = notice
            .recipient_email
            .parse()
            .map_err(|e| NotifyError::InvalidRecipient(format!("{}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(ASSIGNMENT_SUBJECT)
            .body(notice.body())
            .map_err(|e| NotifyError::Transport(format!("failed to build message: {}", e)))?;

        match self.transport.send(message).await {
            Ok(_) => {
                debug!(recipient = %notice.recipient_email, "Assignment notification sent");
                Ok(())
            }
            Err(e) => {
                warn!(recipient = %notice.recipient_email, error = %e, "Assignment notification failed");
                Err(NotifyError::Transport(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_sender() {
        let config = SmtpConfig {
            host: "localhost".to_string(),
            port: 25,
            username: None,
            password: None,
            from: "not an address".to_string(),
        };

        assert!(matches!(
            SmtpNotifier::new(&config),
            Err(NotifyError::InvalidRecipient(_))
        ));
    }

    #[test]
    fn test_new_accepts_unauthenticated_config() {
        let config = SmtpConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: None,
            password: None,
            from: "Taskboard <noreply@taskboard.example>".to_string(),
        };

        assert!(SmtpNotifier::new(&config).is_ok());
    }

    // Actual delivery requires a running SMTP relay and is not covered here.
}
