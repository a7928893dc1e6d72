// Request/response flows: resume tailoring and cover-letter generation.
// All model calls go through the llm_client::ModelClient port.

use thiserror::Error;

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::flows::schema::ContractError;
use crate::llm_client::LlmError;

pub mod cover_letter;
pub mod data_uri;
pub mod handlers;
pub mod prompts;
pub mod schema;
pub mod tailor;

/// Why a flow failed to produce its result.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    InvalidRequest(#[from] ContractError),

    #[error("{0}")]
    Model(#[from] LlmError),

    #[error("Could not extract text from the resume document: {0}")]
    Extraction(String),

    #[error("Model output failed validation: {0}")]
    InvalidOutput(String),
}

#[derive(Debug, Clone, Copy)]
pub struct FlowOptions {
    /// Run PDF text extraction in-process instead of forwarding the document.
    pub extract_pdf_locally: bool,
    /// Largest decoded resume document accepted, however it arrives.
    pub max_document_bytes: usize,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            extract_pdf_locally: false,
            max_document_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
