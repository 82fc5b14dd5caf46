//! Notification email rendering and delivery.
//!
//! [`Notifier`] is the only entry point the orchestrator needs: it renders the
//! template, builds the message and hands it to an [`EmailSender`]. Delivery
//! failures are logged and reported as [`DeliveryStatus::Failed`], never
//! returned as errors.

pub mod error;
pub mod message;
pub mod notifier;
pub mod sendgrid;
pub mod template;

pub use error::NotifyError;
pub use message::EmailMessage;
pub use notifier::{DeliveryStatus, Notifier};
pub use sendgrid::{EmailSender, SendGridClient};
pub use template::render_email;
