// Submission lifecycle: validate → tailor resume → generate cover letter.
// `machine` holds the pure state machine, `sequencer` performs its effects.

pub mod handlers;
pub mod machine;
pub mod sequencer;
