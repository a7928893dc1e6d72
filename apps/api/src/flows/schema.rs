//! Input and output contracts for the two flows.
//!
//! Wire types mirror the JSON exchanged with callers (camelCase). Domain
//! types can only be built through validating constructors, so a flow never
//! sees a request with an empty field or two competing resume sources.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flows::data_uri::{DataUri, MIME_PDF, MIME_TEXT};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Provide either resumeText or resumeDataUri, not both")]
    AmbiguousResume,

    #[error("Invalid resume document: {0}")]
    InvalidDocument(String),

    #[error("File is too large. Maximum size is {limit}.")]
    DocumentTooLarge { limit: ByteSize },
}

/// A byte count shown in megabytes: `2MB`, `1.5MB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSize(pub usize);

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mb = self.0 as f64 / (1024.0 * 1024.0);
        if mb.fract() == 0.0 {
            write!(f, "{}MB", mb as u64)
        } else {
            write!(f, "{mb:.1}MB")
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorResumeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    /// `data:<mime>;base64,<payload>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_data_uri: Option<String>,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorResumeOutput {
    pub tailored_resume: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCoverLetterInput {
    #[serde(default)]
    pub tailored_resume: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCoverLetterOutput {
    pub cover_letter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Domain types
// ────────────────────────────────────────────────────────────────────────────

/// Exactly one resume representation. Plain-text documents are decoded into
/// `RawText` during validation, so `Document` always holds a PDF.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeSource {
    RawText(String),
    Document(DataUri),
}

impl ResumeSource {
    pub fn from_text(text: &str) -> Result<Self, ContractError> {
        if text.trim().is_empty() {
            return Err(ContractError::Missing("resume"));
        }
        Ok(ResumeSource::RawText(text.to_string()))
    }

    pub fn from_data_uri(raw: &str, max_bytes: usize) -> Result<Self, ContractError> {
        Self::from_document(DataUri::parse(raw)?, max_bytes)
    }

    /// Type is checked before size, the same order upload gating uses.
    pub fn from_document(uri: DataUri, max_bytes: usize) -> Result<Self, ContractError> {
        match uri.mime_type() {
            MIME_PDF => {
                check_document_size(&uri, max_bytes)?;
                Ok(ResumeSource::Document(uri))
            }
            MIME_TEXT => {
                check_document_size(&uri, max_bytes)?;
                let bytes = uri.decode()?;
                let text = String::from_utf8(bytes).map_err(|_| {
                    ContractError::InvalidDocument("plain-text resume is not valid UTF-8".into())
                })?;
                Self::from_text(&text)
            }
            other => Err(ContractError::InvalidDocument(format!(
                "unsupported document type '{other}'; upload a PDF or plain-text file"
            ))),
        }
    }
}

fn check_document_size(uri: &DataUri, max_bytes: usize) -> Result<(), ContractError> {
    if uri.decoded_len() > max_bytes {
        return Err(ContractError::DocumentTooLarge {
            limit: ByteSize(max_bytes),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TailorRequest {
    resume: ResumeSource,
    job_description: String,
}

impl TailorRequest {
    pub fn new(resume: ResumeSource, job_description: &str) -> Result<Self, ContractError> {
        if job_description.trim().is_empty() {
            return Err(ContractError::Missing("jobDescription"));
        }
        if let ResumeSource::RawText(text) = &resume {
            if text.trim().is_empty() {
                return Err(ContractError::Missing("resume"));
            }
        }
        Ok(Self {
            resume,
            job_description: job_description.to_string(),
        })
    }

    pub fn resume(&self) -> &ResumeSource {
        &self.resume
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    /// Builds a request from the wire input. Blank fields count as absent and
    /// an encoded document larger than `max_document_bytes` is rejected.
    pub fn from_input(
        input: TailorResumeInput,
        max_document_bytes: usize,
    ) -> Result<Self, ContractError> {
        let text = input.resume_text.filter(|t| !t.trim().is_empty());
        let uri = input.resume_data_uri.filter(|u| !u.trim().is_empty());

        let resume = match (text, uri) {
            (Some(_), Some(_)) => return Err(ContractError::AmbiguousResume),
            (Some(text), None) => ResumeSource::from_text(&text)?,
            (None, Some(uri)) => ResumeSource::from_data_uri(&uri, max_document_bytes)?,
            (None, None) => return Err(ContractError::Missing("resume")),
        };

        TailorRequest::new(resume, &input.job_description)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TailorResult {
    pub tailored_resume_text: String,
}

impl From<TailorResult> for TailorResumeOutput {
    fn from(result: TailorResult) -> Self {
        TailorResumeOutput {
            tailored_resume: result.tailored_resume_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverLetterRequest {
    tailored_resume_text: String,
    job_description: String,
}

impl CoverLetterRequest {
    pub fn new(tailored_resume_text: &str, job_description: &str) -> Result<Self, ContractError> {
        if tailored_resume_text.trim().is_empty() {
            return Err(ContractError::Missing("tailoredResume"));
        }
        if job_description.trim().is_empty() {
            return Err(ContractError::Missing("jobDescription"));
        }
        Ok(Self {
            tailored_resume_text: tailored_resume_text.to_string(),
            job_description: job_description.to_string(),
        })
    }

    pub fn tailored_resume_text(&self) -> &str {
        &self.tailored_resume_text
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }
}

impl TryFrom<GenerateCoverLetterInput> for CoverLetterRequest {
    type Error = ContractError;

    fn try_from(input: GenerateCoverLetterInput) -> Result<Self, Self::Error> {
        CoverLetterRequest::new(&input.tailored_resume, &input.job_description)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverLetterResult {
    pub cover_letter_text: String,
}

impl From<CoverLetterResult> for GenerateCoverLetterOutput {
    fn from(result: CoverLetterResult) -> Self {
        GenerateCoverLetterOutput {
            cover_letter: result.cover_letter_text,
        }
    }
}
