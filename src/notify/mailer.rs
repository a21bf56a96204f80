use crate::config::MailConfig;
use async_trait::async_trait;
use derive_more::Display;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Debug, Clone, PartialEq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// One message as handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub body: String,
    pub attachment: Option<MailAttachment>,
}

#[derive(Debug, Display)]
pub enum MailError {
    #[display(fmt = "Error: invalid message: {}", message)]
    Build { message: String },

    #[display(fmt = "Error: {}", message)]
    Transport { message: String },
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers one message; the returned string is the transport's
    /// confirmation line.
    async fn send(&self, mail: OutgoingMail) -> Result<String, MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, lettre::transport::smtp::Error> {
        let builder = if config.smtp_starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        };
        let builder = builder.credentials(Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        ));
        let builder = match config.smtp_port {
            Some(port) => builder.port(port),
            None => builder,
        };

        Ok(Self {
            transport: builder.build(),
        })
    }
}

fn build_error(err: impl std::fmt::Display) -> MailError {
    MailError::Build {
        message: err.to_string(),
    }
}

pub fn build_message(mail: OutgoingMail) -> Result<Message, MailError> {
    let builder = Message::builder()
        .from(mail.from)
        .to(mail.to)
        .subject(mail.subject);

    match mail.attachment {
        None => builder
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)
            .map_err(build_error),
        Some(file) => {
            let content_type = ContentType::parse(&file.content_type)
                .or_else(|_| ContentType::parse("application/octet-stream"))
                .map_err(build_error)?;
            builder
                .multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(mail.body))
                        .singlepart(Attachment::new(file.filename).body(file.content, content_type)),
                )
                .map_err(build_error)
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<String, MailError> {
        let message = build_message(mail)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport {
                message: e.to_string(),
            })?;

        Ok(format!(
            "{} {}",
            response.code(),
            response.message().collect::<Vec<_>>().join(" ")
        ))
    }
}
