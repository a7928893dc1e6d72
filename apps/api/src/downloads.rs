//! "Download as text file" for the generated documents.

use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DownloadKind {
    TailoredResume,
    CoverLetter,
}

impl DownloadKind {
    pub fn file_name(self) -> &'static str {
        match self {
            DownloadKind::TailoredResume => "tailored_resume.txt",
            DownloadKind::CoverLetter => "cover_letter.txt",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub content: String,
}

/// Serializes `content` as a plain-text attachment named after `kind`.
pub fn text_attachment(kind: DownloadKind, content: String) -> Result<Response, AppError> {
    if content.trim().is_empty() {
        return Err(AppError::NothingToDownload);
    }

    let disposition = format!("attachment; filename=\"{}\"", kind.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content,
    )
        .into_response())
}

/// POST /api/v1/download/:kind
pub async fn handle_download(
    Path(kind): Path<DownloadKind>,
    Json(request): Json<DownloadRequest>,
) -> Result<Response, AppError> {
    text_attachment(kind, request.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_file_names() {
        assert_eq!(DownloadKind::TailoredResume.file_name(), "tailored_resume.txt");
        assert_eq!(DownloadKind::CoverLetter.file_name(), "cover_letter.txt");
    }

    #[test]
    fn test_kind_from_path_segment() {
        let kind: DownloadKind = serde_json::from_str("\"cover-letter\"").unwrap();
        assert_eq!(kind, DownloadKind::CoverLetter);
    }

    #[test]
    fn test_attachment_headers() {
        let response =
            text_attachment(DownloadKind::TailoredResume, "Jane Doe".to_string()).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"tailored_resume.txt\""
        );
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_empty_content_rejected() {
        let err = text_attachment(DownloadKind::CoverLetter, "  \n".to_string()).unwrap_err();
        assert!(matches!(err, AppError::NothingToDownload));
    }
}
