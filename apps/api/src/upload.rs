//! Resume file gating: type and size checks applied at upload time, before
//! any submission state exists.

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::{Bytes, BytesMut};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::flows::data_uri::{DataUri, MIME_PDF, MIME_TEXT};
use crate::flows::schema::{ByteSize, ContractError};
use crate::state::AppState;

/// MIME types accepted for resume uploads.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[MIME_PDF, MIME_TEXT];

/// Extension fallback for browsers that send `application/octet-stream`.
const EXTENSION_MIME_TYPES: &[(&str, &str)] = &[("pdf", MIME_PDF), ("txt", MIME_TEXT)];

pub const INVALID_TYPE_MESSAGE: &str = "Invalid file type. Please upload a .pdf or .txt file.";

#[derive(Debug)]
pub struct UploadedResume {
    pub file_name: String,
    pub data_uri: DataUri,
}

/// Accepts the file if its declared MIME type OR its extension is supported,
/// then checks size. Rejection messages name the violated constraint.
pub fn validate_upload(
    file_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<UploadedResume, AppError> {
    let mime_type = check_file_type(file_name, content_type)?;
    check_file_size(file_name, bytes.len(), max_bytes)?;

    if bytes.is_empty() {
        return Err(AppError::InvalidFile("File is empty.".to_string()));
    }

    debug!("Accepted upload '{file_name}' as {mime_type} ({} bytes)", bytes.len());
    Ok(UploadedResume {
        file_name: file_name.to_string(),
        data_uri: DataUri::encode(mime_type, bytes),
    })
}

fn check_file_type(file_name: &str, content_type: Option<&str>) -> Result<&'static str, AppError> {
    resolve_mime_type(file_name, content_type).ok_or_else(|| {
        warn!("Rejected upload '{file_name}': unsupported type {content_type:?}");
        AppError::InvalidFile(INVALID_TYPE_MESSAGE.to_string())
    })
}

fn check_file_size(file_name: &str, len: usize, max_bytes: usize) -> Result<(), AppError> {
    if len > max_bytes {
        warn!("Rejected upload '{file_name}': {len} bytes exceeds {max_bytes}");
        return Err(ContractError::DocumentTooLarge {
            limit: ByteSize(max_bytes),
        }
        .into());
    }
    Ok(())
}

fn resolve_mime_type(file_name: &str, content_type: Option<&str>) -> Option<&'static str> {
    let declared = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());
    if let Some(declared) = declared {
        if let Some(mime) = ACCEPTED_MIME_TYPES.iter().find(|m| **m == declared) {
            return Some(*mime);
        }
    }

    let (_, extension) = file_name.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    EXTENSION_MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct ResumeForm {
    pub file: Option<FilePart>,
    pub job_description: Option<String>,
}

/// Reads the `file` and `jobDescription` fields; anything else is ignored.
/// An empty file part (no file chosen) counts as no file. A file part larger
/// than `max_file_bytes` is rejected as soon as it crosses the limit.
pub async fn read_resume_form(
    mut multipart: Multipart,
    max_file_bytes: usize,
) -> Result<ResumeForm, AppError> {
    let mut form = ResumeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes =
                    read_file_field(field, &file_name, content_type.as_deref(), max_file_bytes)
                        .await?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.file = Some(FilePart {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            "jobDescription" => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read jobDescription: {e}"))
                })?;
                form.job_description = Some(text);
            }
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    Ok(form)
}

/// Buffers a file part without reading past `max_bytes + 1`, so an oversized
/// file gets the size message instead of tripping the request body limit.
async fn read_file_field(
    mut field: Field<'_>,
    file_name: &str,
    content_type: Option<&str>,
    max_bytes: usize,
) -> Result<Bytes, AppError> {
    let mut buffer = BytesMut::new();
    loop {
        let chunk = match field.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => return Err(file_read_error(e, file_name, content_type, max_bytes)),
        };
        buffer.extend_from_slice(&chunk);
        if buffer.len() > max_bytes {
            check_file_type(file_name, content_type)?;
            check_file_size(file_name, buffer.len(), max_bytes)?;
        }
    }
    Ok(buffer.freeze())
}

fn file_read_error(
    err: MultipartError,
    file_name: &str,
    content_type: Option<&str>,
    max_bytes: usize,
) -> AppError {
    if err.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::Validation(format!("Failed to read file: {err}"));
    }
    match check_file_type(file_name, content_type) {
        Err(e) => e,
        Ok(_) => {
            warn!("Rejected upload '{file_name}': request body limit reached");
            ContractError::DocumentTooLarge {
                limit: ByteSize(max_bytes),
            }
            .into()
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_name: String,
    pub resume_data_uri: String,
}

/// POST /api/v1/resume/upload
///
/// Validates a resume file and returns it as a data URI ready for submission.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_resume_form(multipart, state.config.max_upload_bytes).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::MissingInput("Please select a resume file.".to_string()))?;

    let uploaded = validate_upload(
        &file.file_name,
        file.content_type.as_deref(),
        &file.bytes,
        state.config.max_upload_bytes,
    )?;

    Ok(Json(UploadResponse {
        file_name: uploaded.file_name,
        resume_data_uri: uploaded.data_uri.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_UPLOAD_BYTES;

    fn message(err: AppError) -> String {
        match err {
            AppError::InvalidFile(msg) => msg,
            other => panic!("expected InvalidFile, got {other:?}"),
        }
    }

    #[test]
    fn test_pdf_accepted_by_mime() {
        let uploaded = validate_upload(
            "cv.bin",
            Some("application/pdf"),
            b"%PDF-1.4",
            DEFAULT_MAX_UPLOAD_BYTES,
        )
        .unwrap();
        assert_eq!(uploaded.data_uri.mime_type(), MIME_PDF);
        assert_eq!(uploaded.file_name, "cv.bin");
    }

    #[test]
    fn test_pdf_accepted_by_extension() {
        let uploaded = validate_upload(
            "Resume.PDF",
            Some("application/octet-stream"),
            b"%PDF-1.4",
            DEFAULT_MAX_UPLOAD_BYTES,
        )
        .unwrap();
        assert_eq!(uploaded.data_uri.mime_type(), MIME_PDF);
    }

    #[test]
    fn test_text_file_accepted() {
        let uploaded =
            validate_upload("cv.txt", None, b"Jane Doe", DEFAULT_MAX_UPLOAD_BYTES).unwrap();
        assert_eq!(uploaded.data_uri.to_string(), "data:text/plain;base64,SmFuZSBEb2U=");
    }

    #[test]
    fn test_docx_rejected_with_type_message() {
        let err = validate_upload(
            "cv.docx",
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            b"PK..",
            DEFAULT_MAX_UPLOAD_BYTES,
        )
        .unwrap_err();
        assert_eq!(message(err), INVALID_TYPE_MESSAGE);
    }

    #[test]
    fn test_oversized_file_rejected_with_size_message() {
        let bytes = vec![b'a'; DEFAULT_MAX_UPLOAD_BYTES + 1];
        let err = validate_upload("cv.pdf", Some("application/pdf"), &bytes, DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert_eq!(message(err), "File is too large. Maximum size is 2MB.");
    }

    #[test]
    fn test_file_at_limit_accepted() {
        let bytes = vec![b'a'; DEFAULT_MAX_UPLOAD_BYTES];
        assert!(validate_upload("cv.txt", None, &bytes, DEFAULT_MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_type_checked_before_size() {
        let bytes = vec![0u8; DEFAULT_MAX_UPLOAD_BYTES + 1];
        let err = validate_upload("photo.png", Some("image/png"), &bytes, DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert_eq!(message(err), INVALID_TYPE_MESSAGE);
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = validate_upload("cv.pdf", None, b"", DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
        assert_eq!(message(err), "File is empty.");
    }
}
