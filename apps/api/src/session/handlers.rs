//! Axum route handlers for full submissions (both flows in sequence).

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::flows::schema::TailorResumeInput;
use crate::session::machine::SessionSnapshot;
use crate::session::sequencer::Sequencer;
use crate::state::AppState;
use crate::upload::{read_resume_form, validate_upload};

/// POST /api/v1/generate
///
/// Tailors the resume, then writes the cover letter. Always answers with the
/// session snapshot; a failed stage shows up in `state` / `error` while any
/// document produced before the failure is still returned.
///
/// Each request owns its session, so the in-flight guard never fires here;
/// concurrent HTTP submissions are independent. A caller that keeps one
/// `Sequencer` for several submissions gets `Busy` on overlap.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(input): Json<TailorResumeInput>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let sequencer = Sequencer::new(state.model.clone(), state.flow_options);
    Ok(Json(sequencer.submit(input).await?))
}

/// POST /api/v1/generate/upload
///
/// Multipart variant: `file` (PDF or text resume) + `jobDescription`.
/// The file is gated on type and size before a session is created.
pub async fn handle_generate_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SessionSnapshot>, AppError> {
    let form = read_resume_form(multipart, state.config.max_upload_bytes).await?;

    let resume_data_uri = match form.file {
        Some(file) => {
            let uploaded = validate_upload(
                &file.file_name,
                file.content_type.as_deref(),
                &file.bytes,
                state.config.max_upload_bytes,
            )?;
            Some(uploaded.data_uri.to_string())
        }
        None => None,
    };

    let input = TailorResumeInput {
        resume_text: None,
        resume_data_uri,
        job_description: form.job_description.unwrap_or_default(),
    };

    let sequencer = Sequencer::new(state.model.clone(), state.flow_options);
    Ok(Json(sequencer.submit(input).await?))
}
