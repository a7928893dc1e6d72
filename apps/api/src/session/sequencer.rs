//! Drives a `SubmissionSession` by performing the effects its transitions ask for.
//!
//! The session lock is never held across a model call. Re-entrancy is
//! guarded by the session's in-flight flag: a second `submit` on the same
//! `Sequencer` while one is running is rejected with `AppError::Busy`.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::flows::cover_letter::generate_cover_letter;
use crate::flows::schema::TailorResumeInput;
use crate::flows::tailor::tailor_resume;
use crate::flows::FlowOptions;
use crate::llm_client::ModelClient;
use crate::session::machine::{Effect, Event, SessionSnapshot, SubmissionSession};

pub struct Sequencer {
    model: Arc<dyn ModelClient>,
    options: FlowOptions,
    session: Mutex<SubmissionSession>,
}

impl Sequencer {
    pub fn new(model: Arc<dyn ModelClient>, options: FlowOptions) -> Self {
        Self {
            model,
            options,
            session: Mutex::new(SubmissionSession::new(options.max_document_bytes)),
        }
    }

    /// Runs one submission to `Complete` or `Failed` and returns the final view.
    /// A `Failed` session is still `Ok`: its snapshot carries the error and any
    /// result produced before the failure.
    pub async fn submit(&self, submission: TailorResumeInput) -> Result<SessionSnapshot, AppError> {
        let mut effect = {
            let mut session = self.session.lock().await;
            if session.in_flight() {
                warn!("Rejected submission: another submission is in flight");
                return Err(AppError::Busy);
            }
            advance(&mut session, Event::Submit(submission))
        };

        loop {
            let event = match effect {
                Effect::None => break,
                Effect::Validate => Event::Validate,
                Effect::InvokeTailor(request) => {
                    match tailor_resume(self.model.as_ref(), &request, self.options).await {
                        Ok(result) => Event::TailorSucceeded(result),
                        Err(e) => {
                            warn!("Resume tailoring failed: {e}");
                            Event::TailorFailed(e.to_string())
                        }
                    }
                }
                Effect::InvokeCoverLetter(request) => {
                    match generate_cover_letter(self.model.as_ref(), &request).await {
                        Ok(result) => Event::CoverLetterSucceeded(result),
                        Err(e) => {
                            warn!("Cover letter generation failed: {e}");
                            Event::CoverLetterFailed(e.to_string())
                        }
                    }
                }
            };

            let mut session = self.session.lock().await;
            effect = advance(&mut session, event);
        }

        Ok(self.snapshot().await)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.lock().await;
        SessionSnapshot::capture(&session, Utc::now())
    }
}

fn advance(session: &mut SubmissionSession, event: Event) -> Effect {
    let current = std::mem::take(session);
    let from = current.state();
    let (next, effect) = current.step(event);
    if next.state() != from {
        info!("Submission {:?} -> {:?}", from, next.state());
    }
    *session = next;
    effect
}
