use swagwatch_core::{AppConfig, NotificationPayload};

use crate::message::EmailMessage;
use crate::sendgrid::EmailSender;
use crate::template::render_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    /// The message could not be built or the provider rejected it. Already logged.
    Failed,
}

/// Renders and sends the notification email to a single recipient.
pub struct Notifier<S> {
    sender: S,
    from: String,
    to: String,
    subject: String,
}

impl<S: EmailSender> Notifier<S> {
    pub fn new(sender: S, from: &str, to: &str, subject: &str) -> Self {
        Self {
            sender,
            from: from.to_owned(),
            to: to.to_owned(),
            subject: subject.to_owned(),
        }
    }

    pub fn from_config(sender: S, config: &AppConfig) -> Self {
        Self::new(
            sender,
            &config.sender_email,
            &config.recipient_email,
            &config.email_subject,
        )
    }

    /// Renders `payload` and attempts one delivery.
    ///
    /// Never fails: errors are logged and reported as [`DeliveryStatus::Failed`].
    pub async fn notify(&self, payload: &NotificationPayload) -> DeliveryStatus {
        let html = render_email(payload);
        let message = match EmailMessage::new(&self.from, &self.to, &self.subject, html) {
            Ok(m) => m,
            Err(e) => {
                tracing::error!(error = %e, "could not build notification email");
                return DeliveryStatus::Failed;
            }
        };

        match self.sender.send(&message).await {
            Ok(()) => {
                tracing::info!(
                    to = %self.to,
                    amount = payload.reward.amount,
                    "notification email sent"
                );
                DeliveryStatus::Sent
            }
            Err(e) => {
                tracing::error!(error = %e, to = %self.to, "notification email delivery failed");
                DeliveryStatus::Failed
            }
        }
    }
}
