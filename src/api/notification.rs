use crate::{
    config::UploadConfig,
    error::ApiError,
    models::{EmailReq, MessageResponse},
    notify::dispatcher::NotificationDispatcher,
    utils::upload::read_job_application,
};
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};

/// Send Email
#[utoipa::path(
    post,
    path = "/send-email",
    request_body = EmailReq,
    responses(
        (status = 200, description = "Email accepted by the mail transport", body = MessageResponse),
        (status = 400, description = "Malformed JSON body", body = crate::error::ErrorBody),
        (status = 500, description = "Mail transport failure", body = crate::error::ErrorBody)
    ),
    tag = "Notification"
)]
pub async fn send_email(
    dispatcher: web::Data<NotificationDispatcher>,
    payload: web::Json<EmailReq>,
) -> Result<HttpResponse, ApiError> {
    let confirmation = dispatcher.send_email(&payload.subject, &payload.text).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::email_sent(&confirmation)))
}

/// Apply for a Job
#[utoipa::path(
    post,
    path = "/apply-job",
    request_body(content = crate::models::JobApplicationReq, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Application emailed with resume attached", body = MessageResponse),
        (status = 400, description = "Resume missing or form malformed", body = crate::error::ErrorBody, example = json!({
            "message": "Resume file is required"
        })),
        (status = 413, description = "Resume exceeds the upload limit", body = crate::error::ErrorBody),
        (status = 500, description = "Mail transport failure", body = crate::error::ErrorBody)
    ),
    tag = "Notification"
)]
pub async fn apply_job(
    dispatcher: web::Data<NotificationDispatcher>,
    upload_config: web::Data<UploadConfig>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let form = read_job_application(payload, &upload_config).await?;
    let resume = form.resume.ok_or(ApiError::MissingAttachment)?;

    // `resume` lives until the end of this function, so the temp file is
    // removed whether or not the send succeeded.
    let confirmation = dispatcher
        .send_job_application(&form.subject, &form.text, &resume)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::email_sent(&confirmation)))
}
