//! Cover-letter flow: writes a cover letter from the tailored resume and the job description.

use tracing::{debug, info};

use crate::flows::prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};
use crate::flows::schema::{CoverLetterRequest, CoverLetterResult, GenerateCoverLetterOutput};
use crate::flows::GenerationError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{complete_json, ModelClient, ModelRequest};

/// Produces a cover letter as a single text block.
pub async fn generate_cover_letter(
    model: &dyn ModelClient,
    request: &CoverLetterRequest,
) -> Result<CoverLetterResult, GenerationError> {
    info!("Generating cover letter");

    let prompt = fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("tailored_resume", request.tailored_resume_text()),
            ("job_description", request.job_description()),
        ],
    );
    let model_request = ModelRequest {
        system: format!("{COVER_LETTER_SYSTEM} {JSON_ONLY_SYSTEM}"),
        prompt,
        attachment: None,
    };

    let output: GenerateCoverLetterOutput = complete_json(model, model_request).await?;
    let text = output.cover_letter.trim();
    if text.is_empty() {
        return Err(GenerationError::InvalidOutput(
            "coverLetter is empty".to_string(),
        ));
    }

    debug!("Cover letter: {} chars", text.len());
    Ok(CoverLetterResult {
        cover_letter_text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubModelClient;

    fn request() -> CoverLetterRequest {
        CoverLetterRequest::new(
            "Ada Lovelace\nAnalyst\n- Wrote the first published algorithm",
            "Research Engineer at Analytical Engines Ltd.",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_cover_letter_text_returned() {
        let stub = StubModelClient::new()
            .reply_field("coverLetter", "Dear Hiring Manager,\n\nI am writing...\n\nSincerely,\nAda");
        let result = generate_cover_letter(&stub, &request()).await.unwrap();
        assert!(result.cover_letter_text.starts_with("Dear Hiring Manager,"));
    }

    #[tokio::test]
    async fn test_prompt_threads_tailored_resume_verbatim() {
        let stub = StubModelClient::new().reply_field("coverLetter", "Dear Hiring Manager,");
        generate_cover_letter(&stub, &request()).await.unwrap();

        let sent = &stub.requests()[0];
        assert!(sent
            .prompt
            .contains("Ada Lovelace\nAnalyst\n- Wrote the first published algorithm"));
        assert!(sent.prompt.contains("Research Engineer at Analytical Engines Ltd."));
        assert!(sent.prompt.contains("\"coverLetter\""));
        assert!(sent.attachment.is_none());
    }

    #[tokio::test]
    async fn test_fenced_json_output_accepted() {
        let stub =
            StubModelClient::new().reply("```json\n{\"coverLetter\": \"Dear Hiring Team,\"}\n```");
        let result = generate_cover_letter(&stub, &request()).await.unwrap();
        assert_eq!(result.cover_letter_text, "Dear Hiring Team,");
    }

    #[tokio::test]
    async fn test_empty_cover_letter_rejected() {
        let stub = StubModelClient::new().reply_field("coverLetter", "");
        let err = generate_cover_letter(&stub, &request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidOutput(_)));
    }

    #[tokio::test]
    async fn test_non_json_output_rejected() {
        let stub = StubModelClient::new().reply("Dear Hiring Manager, I would love this job.");
        let err = generate_cover_letter(&stub, &request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Model(_)));
    }
}
