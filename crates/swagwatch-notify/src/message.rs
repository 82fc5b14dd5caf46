use crate::error::NotifyError;

/// A fully addressed HTML email, ready to hand to an [`crate::EmailSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl EmailMessage {
    /// # Errors
    ///
    /// Returns [`NotifyError::MissingField`] naming the first blank field.
    pub fn new(
        from: &str,
        to: &str,
        subject: &str,
        html_body: String,
    ) -> Result<Self, NotifyError> {
        let required = [("from", from), ("to", to), ("subject", subject)];
        if let Some(&(name, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(NotifyError::MissingField(name));
        }
        if html_body.trim().is_empty() {
            return Err(NotifyError::MissingField("html_body"));
        }

        Ok(Self {
            from: from.trim().to_owned(),
            to: to.trim().to_owned(),
            subject: subject.to_owned(),
            html_body,
        })
    }
}
