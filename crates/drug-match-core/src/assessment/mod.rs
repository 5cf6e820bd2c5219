//! Simulated compatibility assessment.
//!
//! Pipeline: validate selection → fixed latency → random draws → first
//! matching disease rule → clamp → explanation and suggestions
//!
//! The latency models a remote analysis call. [`Simulator::run_assessment`]
//! is cancelled by dropping its future; [`Simulator::spawn_assessment`]
//! returns a [`PendingAssessment`] handle that can be cancelled explicitly
//! and never yields a result once cancelled.

mod simulator;
mod source;
mod task;

pub use simulator::*;
pub use source::*;
pub use task::*;

use thiserror::Error;

use crate::models::AssessmentKey;

/// Assessment errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("Invalid selection: an assessment needs a drug")]
    InvalidSelection,

    #[error("Assessment was cancelled")]
    Cancelled,

    #[error("Assessment was superseded by a newer selection")]
    Superseded(AssessmentKey),

    #[error("Assessment task failed: {0}")]
    TaskFailed(String),
}

pub type SimulatorResult<T> = Result<T, AssessmentError>;
