use crate::config::UploadConfig;
use crate::error::ApiError;
use actix_multipart::{Field, Multipart};
use chrono::Utc;
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, warn};
use uuid::Uuid;

const RESUME_FIELD: &str = "resume";
const MAX_TEXT_BYTES: usize = 64 * 1024;

/// An uploaded file on disk. The file is removed when this value drops.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
    original_name: String,
}

impl TempUpload {
    /// Reserves a unique path under `dir` for a file uploaded as
    /// `original_name`. Nothing is written yet.
    pub fn new(dir: &Path, original_name: &str) -> Self {
        let original_name = Path::new(original_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| RESUME_FIELD.to_string());

        let extension = Path::new(&original_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        let file_name = format!(
            "{}-{}{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4(),
            extension
        );

        Self {
            path: dir.join(file_name),
            original_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.original_name)
            .first_or_octet_stream()
            .to_string()
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed temporary upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, path = %self.path.display(), "Failed to remove temporary upload"),
        }
    }
}

/// The job application form: two text fields and the resume file.
#[derive(Debug, Default)]
pub struct JobApplicationForm {
    pub subject: String,
    pub text: String,
    pub resume: Option<TempUpload>,
}

fn multipart_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::invalid_upload(format!("Malformed multipart body: {}", err))
}

fn io_error(err: std::io::Error) -> ApiError {
    error!(error = %err, "Failed to write temporary upload");
    ApiError::internal(err.to_string())
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(multipart_error)?;
        if buf.len() + chunk.len() > MAX_TEXT_BYTES {
            return Err(ApiError::invalid_upload(format!("Field `{}` is too long", name)));
        }
        buf.extend_from_slice(&chunk);
    }
    String::from_utf8(buf)
        .map_err(|_| ApiError::invalid_upload(format!("Field `{}` is not valid UTF-8", name)))
}

async fn save_file(
    field: &mut Field,
    original_name: &str,
    config: &UploadConfig,
) -> Result<TempUpload, ApiError> {
    let upload = TempUpload::new(&config.dir, original_name);
    let mut file = tokio::fs::File::create(upload.path())
        .await
        .map_err(io_error)?;

    let mut written = 0usize;
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(multipart_error)?;
        written += chunk.len();
        if written > config.max_file_bytes {
            return Err(ApiError::PayloadTooLarge {
                limit: config.max_file_bytes,
            });
        }
        file.write_all(&chunk).await.map_err(io_error)?;
    }
    file.flush().await.map_err(io_error)?;

    debug!(
        path = %upload.path().display(),
        original = upload.original_name(),
        bytes = written,
        "Stored temporary upload"
    );
    Ok(upload)
}

/// Reads `subject`, `text` and a single `resume` file from the form. Other
/// text fields are skipped; any other file field is rejected.
pub async fn read_job_application(
    mut payload: Multipart,
    config: &UploadConfig,
) -> Result<JobApplicationForm, ApiError> {
    let mut form = JobApplicationForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(multipart_error)?;
        let name = field.name().unwrap_or_default().to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match (name.as_str(), filename) {
            (RESUME_FIELD, Some(filename)) => {
                if form.resume.is_some() {
                    return Err(ApiError::invalid_upload("Only one resume file may be uploaded"));
                }
                form.resume = Some(save_file(&mut field, &filename, config).await?);
            }
            (_, Some(_)) => {
                return Err(ApiError::invalid_upload(format!(
                    "Unexpected file field `{}`",
                    name
                )));
            }
            ("subject", None) => form.subject = read_text(&mut field, &name).await?,
            ("text", None) => form.text = read_text(&mut field, &name).await?,
            _ => {
                read_text(&mut field, &name).await?;
            }
        }
    }

    Ok(form)
}
