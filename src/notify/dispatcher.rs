use crate::config::MailConfig;
use crate::error::ApiError;
use crate::notify::mailer::{MailAttachment, MailError, Mailer, OutgoingMail};
use crate::utils::upload::TempUpload;
use lettre::message::Mailbox;
use std::sync::Arc;
use tracing::{error, info};

/// Sends transactional mail from the configured sender to the configured
/// recipient. Callers never choose either address.
#[derive(Clone)]
pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
    sender: Mailbox,
    recipient: Mailbox,
}

fn delivery_error(err: MailError) -> ApiError {
    error!(error = %err, "Mail delivery failed");
    ApiError::Delivery {
        message: err.to_string(),
    }
}

impl NotificationDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, config: &MailConfig) -> Self {
        Self {
            mailer,
            sender: config.sender.clone(),
            recipient: config.recipient.clone(),
        }
    }

    fn mail(&self, subject: &str, body: &str, attachment: Option<MailAttachment>) -> OutgoingMail {
        OutgoingMail {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            subject: subject.to_string(),
            body: body.to_string(),
            attachment,
        }
    }

    pub async fn send_email(&self, subject: &str, body: &str) -> Result<String, ApiError> {
        let confirmation = self
            .mailer
            .send(self.mail(subject, body, None))
            .await
            .map_err(delivery_error)?;
        info!(subject, "Email sent");
        Ok(confirmation)
    }

    /// Sends the application with the resume attached. The upload is only
    /// borrowed; the caller's guard removes the file afterwards.
    pub async fn send_job_application(
        &self,
        subject: &str,
        body: &str,
        resume: &TempUpload,
    ) -> Result<String, ApiError> {
        let content = tokio::fs::read(resume.path()).await.map_err(|e| {
            error!(error = %e, path = %resume.path().display(), "Failed to read upload");
            ApiError::internal(e.to_string())
        })?;
        let attachment = MailAttachment {
            filename: resume.original_name().to_string(),
            content_type: resume.content_type(),
            content,
        };

        let confirmation = self
            .mailer
            .send(self.mail(subject, body, Some(attachment)))
            .await
            .map_err(delivery_error)?;
        info!(subject, attachment = resume.original_name(), "Job application sent");
        Ok(confirmation)
    }
}
