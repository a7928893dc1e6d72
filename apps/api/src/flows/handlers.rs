//! Axum route handlers that expose each flow on its own.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::flows::cover_letter::generate_cover_letter;
use crate::flows::schema::{
    CoverLetterRequest, GenerateCoverLetterInput, GenerateCoverLetterOutput, TailorRequest,
    TailorResumeInput, TailorResumeOutput,
};
use crate::flows::tailor::tailor_resume;
use crate::state::AppState;

/// POST /api/v1/flows/tailor-resume
pub async fn handle_tailor_resume(
    State(state): State<AppState>,
    Json(input): Json<TailorResumeInput>,
) -> Result<Json<TailorResumeOutput>, AppError> {
    let request = TailorRequest::from_input(input, state.flow_options.max_document_bytes)?;
    let result = tailor_resume(state.model.as_ref(), &request, state.flow_options).await?;
    Ok(Json(result.into()))
}

/// POST /api/v1/flows/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(input): Json<GenerateCoverLetterInput>,
) -> Result<Json<GenerateCoverLetterOutput>, AppError> {
    let request = CoverLetterRequest::try_from(input)?;
    let result = generate_cover_letter(state.model.as_ref(), &request).await?;
    Ok(Json(result.into()))
}
