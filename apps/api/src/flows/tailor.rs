//! Tailor-resume flow: rewrites a resume to emphasize what a job description asks for.

use tracing::{debug, info};

use crate::flows::data_uri::DataUri;
use crate::flows::prompts::{
    RESUME_DOCUMENT_SECTION, RESUME_TEXT_SECTION, TAILOR_RESUME_PROMPT_TEMPLATE,
    TAILOR_RESUME_SYSTEM,
};
use crate::flows::schema::{ResumeSource, TailorRequest, TailorResult, TailorResumeOutput};
use crate::flows::{FlowOptions, GenerationError};
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{complete_json, Attachment, ModelClient, ModelRequest};

/// Produces a tailored resume. Fails with `GenerationError` when the model
/// call fails or its output is missing or empty.
pub async fn tailor_resume(
    model: &dyn ModelClient,
    request: &TailorRequest,
    options: FlowOptions,
) -> Result<TailorResult, GenerationError> {
    let model_request = build_tailor_request(request, options).await?;
    info!(
        "Tailoring resume (document attached: {})",
        model_request.attachment.is_some()
    );

    let output: TailorResumeOutput = complete_json(model, model_request).await?;
    let text = output.tailored_resume.trim();
    if text.is_empty() {
        return Err(GenerationError::InvalidOutput(
            "tailoredResume is empty".to_string(),
        ));
    }

    debug!("Tailored resume: {} chars", text.len());
    Ok(TailorResult {
        tailored_resume_text: text.to_string(),
    })
}

async fn build_tailor_request(
    request: &TailorRequest,
    options: FlowOptions,
) -> Result<ModelRequest, GenerationError> {
    let (resume_section, attachment) = match request.resume() {
        ResumeSource::RawText(text) => (text_section(text), None),
        ResumeSource::Document(uri) if options.extract_pdf_locally => {
            let text = extract_pdf_text(uri).await?;
            (text_section(&text), None)
        }
        ResumeSource::Document(uri) => (
            RESUME_DOCUMENT_SECTION.to_string(),
            Some(Attachment::Pdf {
                data: uri.payload().to_string(),
            }),
        ),
    };

    let prompt = fill_template(
        TAILOR_RESUME_PROMPT_TEMPLATE,
        &[
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("resume_section", &resume_section),
            ("job_description", request.job_description()),
        ],
    );

    Ok(ModelRequest {
        system: format!("{TAILOR_RESUME_SYSTEM} {JSON_ONLY_SYSTEM}"),
        prompt,
        attachment,
    })
}

fn text_section(text: &str) -> String {
    fill_template(RESUME_TEXT_SECTION, &[("resume_text", text)])
}

/// pdf-extract is synchronous and CPU-bound, so it runs on the blocking pool.
async fn extract_pdf_text(uri: &DataUri) -> Result<String, GenerationError> {
    let bytes = uri.decode()?;
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| GenerationError::Extraction(e.to_string()))?
        .map_err(|e| GenerationError::Extraction(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(GenerationError::Extraction(
            "the document contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}
