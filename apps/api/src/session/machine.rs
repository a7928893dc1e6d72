//! Submission state machine.
//!
//! `Idle → Validating → TailoringResume → GeneratingCoverLetter → Complete`,
//! with `Failed` reachable from the three middle states. `step` is pure: it
//! maps (session, event) to (next session, effect) and performs no I/O, so
//! every transition can be tested without a model or a server.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::flows::schema::{
    ContractError, CoverLetterRequest, CoverLetterResult, TailorRequest, TailorResult,
    TailorResumeInput,
};

pub const MISSING_INPUT_MESSAGE: &str =
    "Please provide both your resume file and the job description.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Validating,
    TailoringResume,
    GeneratingCoverLetter,
    Complete,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "MISSING_INPUT")]
    MissingInput,
    #[serde(rename = "INVALID_FILE")]
    InvalidFile,
    #[serde(rename = "VALIDATION_ERROR")]
    InvalidInput,
    #[serde(rename = "GENERATION_ERROR")]
    Generation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionError {
    pub code: ErrorKind,
    pub message: String,
    /// The absent input for `MISSING_INPUT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A transient, user-facing progress or error message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: NotificationVariant::Default,
        }
    }

    fn error(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: NotificationVariant::Destructive,
        }
    }
}

#[derive(Debug)]
pub enum Event {
    Submit(TailorResumeInput),
    Validate,
    TailorSucceeded(TailorResult),
    TailorFailed(String),
    CoverLetterSucceeded(CoverLetterResult),
    CoverLetterFailed(String),
}

/// Work the driver must perform before feeding the next event back in.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Validate,
    InvokeTailor(TailorRequest),
    InvokeCoverLetter(CoverLetterRequest),
}

/// Everything one submission holds. Discarded when the submission ends.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionSession {
    state: SessionState,
    submission: TailorResumeInput,
    tailored_resume: Option<String>,
    cover_letter: Option<String>,
    in_flight: bool,
    last_error: Option<SessionError>,
    notifications: Vec<Notification>,
    max_document_bytes: usize,
}

impl Default for SubmissionSession {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl SubmissionSession {
    /// An idle session that rejects resume documents larger than `max_document_bytes`.
    pub fn new(max_document_bytes: usize) -> Self {
        Self {
            state: SessionState::Idle,
            submission: TailorResumeInput::default(),
            tailored_resume: None,
            cover_letter: None,
            in_flight: false,
            last_error: None,
            notifications: Vec::new(),
            max_document_bytes,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn tailored_resume(&self) -> Option<&str> {
        self.tailored_resume.as_deref()
    }

    pub fn cover_letter(&self) -> Option<&str> {
        self.cover_letter.as_deref()
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn step(mut self, event: Event) -> (Self, Effect) {
        use SessionState::*;

        match (self.state, event) {
            // Overlapping submissions are ignored; the driver reports them as busy.
            (Validating | TailoringResume | GeneratingCoverLetter, Event::Submit(_)) => {
                (self, Effect::None)
            }

            // Re-submission starts from a clean slate: prior results are cleared.
            (Idle | Complete | Failed, Event::Submit(submission)) => {
                let next = SubmissionSession {
                    state: Validating,
                    submission,
                    in_flight: true,
                    ..SubmissionSession::new(self.max_document_bytes)
                };
                (next, Effect::Validate)
            }

            (Validating, Event::Validate) => self.validate(),

            (TailoringResume, Event::TailorSucceeded(result)) => {
                let request = CoverLetterRequest::new(
                    &result.tailored_resume_text,
                    &self.submission.job_description,
                );
                self.tailored_resume = Some(result.tailored_resume_text);
                match request {
                    Ok(request) => {
                        self.state = GeneratingCoverLetter;
                        self.notifications.push(Notification::info(
                            "Resume Tailored!",
                            "Now generating your cover letter...",
                        ));
                        (self, Effect::InvokeCoverLetter(request))
                    }
                    Err(e) => self.fail_generation(&e.to_string()),
                }
            }

            (TailoringResume, Event::TailorFailed(message))
            | (GeneratingCoverLetter, Event::CoverLetterFailed(message)) => {
                self.fail_generation(&message)
            }

            (GeneratingCoverLetter, Event::CoverLetterSucceeded(result)) => {
                self.cover_letter = Some(result.cover_letter_text);
                self.state = Complete;
                self.in_flight = false;
                self.notifications.push(Notification::info(
                    "Success!",
                    "Your tailored resume and cover letter are ready.",
                ));
                (self, Effect::None)
            }

            // Stale or out-of-order events leave the session untouched.
            (_, _) => (self, Effect::None),
        }
    }

    fn validate(mut self) -> (Self, Effect) {
        match TailorRequest::from_input(self.submission.clone(), self.max_document_bytes) {
            Ok(request) => {
                self.state = SessionState::TailoringResume;
                self.notifications.push(Notification::info(
                    "Processing Request...",
                    "Our AI is tailoring your resume. This may take a moment.",
                ));
                (self, Effect::InvokeTailor(request))
            }
            Err(ContractError::Missing(field)) => {
                self.notifications.push(Notification::error(
                    "Missing Information",
                    "Both resume and job description are required.",
                ));
                self.fail_with(SessionError {
                    code: ErrorKind::MissingInput,
                    message: format!(
                        "{MISSING_INPUT_MESSAGE} ({})",
                        ContractError::Missing(field)
                    ),
                    field: Some(field),
                })
            }
            Err(e @ (ContractError::InvalidDocument(_) | ContractError::DocumentTooLarge { .. })) => {
                self.notifications
                    .push(Notification::error("Invalid File", &e.to_string()));
                self.fail(ErrorKind::InvalidFile, e.to_string())
            }
            Err(e @ ContractError::AmbiguousResume) => {
                self.notifications
                    .push(Notification::error("Invalid Input", &e.to_string()));
                self.fail(ErrorKind::InvalidInput, e.to_string())
            }
        }
    }

    fn fail_generation(mut self, message: &str) -> (Self, Effect) {
        self.notifications.push(Notification::error(
            "Generation Failed",
            &format!("An error occurred: {message}"),
        ));
        self.fail(
            ErrorKind::Generation,
            format!("Failed to generate documents: {message}"),
        )
    }

    fn fail(self, code: ErrorKind, message: String) -> (Self, Effect) {
        self.fail_with(SessionError {
            code,
            message,
            field: None,
        })
    }

    fn fail_with(mut self, error: SessionError) -> (Self, Effect) {
        self.state = SessionState::Failed;
        self.in_flight = false;
        self.last_error = Some(error);
        (self, Effect::None)
    }
}

/// Read-only view of a session returned to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub is_loading: bool,
    pub tailored_resume: Option<String>,
    pub cover_letter: Option<String>,
    pub error: Option<SessionError>,
    pub notifications: Vec<Notification>,
    /// Set once any document has been produced.
    pub generated_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    pub fn capture(session: &SubmissionSession, now: DateTime<Utc>) -> Self {
        let has_output = session.tailored_resume.is_some() || session.cover_letter.is_some();
        Self {
            state: session.state,
            is_loading: session.in_flight,
            tailored_resume: session.tailored_resume.clone(),
            cover_letter: session.cover_letter.clone(),
            error: session.last_error.clone(),
            notifications: session.notifications.clone(),
            generated_at: has_output.then_some(now),
        }
    }
}
