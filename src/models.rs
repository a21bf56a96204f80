use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /send-email`. Missing fields are sent as empty strings.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EmailReq {
    #[serde(default)]
    #[schema(example = "Leave request")]
    pub subject: String,
    #[serde(default)]
    #[schema(example = "I would like to apply for leave next Monday.")]
    pub text: String,
}

/// Multipart form of `POST /apply-job`, documented for the API docs only.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct JobApplicationReq {
    #[schema(example = "Application for Associate")]
    pub subject: String,
    #[schema(example = "Please find my resume attached.")]
    pub text: String,
    #[schema(value_type = String, format = Binary)]
    pub resume: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Email sent: 250 2.0.0 OK")]
    pub message: String,
}

impl MessageResponse {
    pub fn email_sent(confirmation: &str) -> Self {
        Self {
            message: format!("Email sent: {}", confirmation),
        }
    }
}
