//! Handle to an in-flight assessment.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::models::{AssessmentKey, AssessmentResult};

use super::{AssessmentError, SimulatorResult};

/// Identifies one assessment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentTicket {
    pub request_id: Uuid,
    pub key: AssessmentKey,
}

/// An assessment running on the tokio runtime.
///
/// Dropping the handle cancels the task. Once cancelled, [`wait`] reports
/// [`AssessmentError::Cancelled`] even if the computation had already
/// finished.
///
/// [`wait`]: PendingAssessment::wait
#[derive(Debug)]
pub struct PendingAssessment {
    ticket: AssessmentTicket,
    token: CancellationToken,
    handle: JoinHandle<Option<AssessmentResult>>,
}

impl PendingAssessment {
    pub(crate) fn new(
        request_id: Uuid,
        key: AssessmentKey,
        token: CancellationToken,
        handle: JoinHandle<Option<AssessmentResult>>,
    ) -> Self {
        Self {
            ticket: AssessmentTicket { request_id, key },
            token,
            handle,
        }
    }

    /// Unique id of this request.
    pub fn request_id(&self) -> Uuid {
        self.ticket.request_id
    }

    /// The (drug, disease) pair this request was made for.
    pub fn key(&self) -> &AssessmentKey {
        &self.ticket.key
    }

    /// Identity of this request, kept by callers after [`wait`] consumes
    /// the handle.
    ///
    /// [`wait`]: PendingAssessment::wait
    pub fn ticket(&self) -> AssessmentTicket {
        self.ticket.clone()
    }

    /// A token that cancels this request when triggered.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Stop the request. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the latency has elapsed (or the task was cancelled).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the result.
    pub async fn wait(mut self) -> SimulatorResult<AssessmentResult> {
        let outcome = (&mut self.handle)
            .await
            .map_err(|e| AssessmentError::TaskFailed(e.to_string()))?;

        if self.token.is_cancelled() {
            return Err(AssessmentError::Cancelled);
        }
        outcome.ok_or(AssessmentError::Cancelled)
    }
}

impl Drop for PendingAssessment {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
