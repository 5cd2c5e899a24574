//! Upload Controller: owns the request lifecycle for one resume at a time.
//!
//! ```text
//! Idle ──select_file──▶ FileSelected ──submit──▶ Submitting ──▶ Succeeded
//!   ▲                        ▲                        │
//!   │                        └──── select_file ───────┼──▶ Failed
//!   └──────────── reset_for_new_analysis ◀────────────┴──────┘
//! ```
//!
//! Exactly one state is active, so combinations like "submitting with a
//! result" are unrepresentable. Transport failures keep the selected file in
//! `Failed` so `submit()` can retry it; validation failures never keep a file.

use std::sync::Arc;

use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::errors::ClientError;
use crate::evaluation::{Evaluation, EvaluationTransport};
use crate::upload::candidate::CandidateFile;
use crate::upload::validation::{Rejection, ValidationPolicy};

#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Idle,
    FileSelected(CandidateFile),
    Submitting(CandidateFile),
    Succeeded(Evaluation),
    Failed(Failure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FailureKind {
    Validation(Rejection),
    Transport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    /// The file that was being submitted, kept for a retry.
    pub retained: Option<CandidateFile>,
}

/// Ticket for one in-flight submission. Settling with a ticket that is no
/// longer current is ignored.
#[derive(Debug)]
pub struct Submission {
    id: u64,
    file: CandidateFile,
}

impl Submission {
    pub fn file(&self) -> &CandidateFile {
        &self.file
    }
}

/// Aborts whatever request is in flight when `cancel` is called.
/// Has no effect on submissions started afterwards.
#[derive(Clone)]
pub struct CancelHandle(Arc<Notify>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.notify_waiters();
    }
}

pub struct UploadController<T> {
    transport: T,
    policy: ValidationPolicy,
    state: UploadState,
    next_submission: u64,
    in_flight: Option<u64>,
    cancel: Arc<Notify>,
}

impl<T: EvaluationTransport> UploadController<T> {
    pub fn new(transport: T, policy: ValidationPolicy) -> Self {
        Self {
            transport,
            policy,
            state: UploadState::Idle,
            next_submission: 0,
            in_flight: None,
            cancel: Arc::new(Notify::new()),
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    #[cfg(test)]
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, UploadState::Submitting(_))
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.cancel.clone())
    }

    /// Validates `candidate` and stores it if it passes.
    /// Ignored while a submission is in flight or a result is on screen.
    pub fn select_file(&mut self, candidate: CandidateFile) -> &UploadState {
        match self.state {
            UploadState::Idle | UploadState::FileSelected(_) | UploadState::Failed(_) => {}
            UploadState::Submitting(_) | UploadState::Succeeded(_) => {
                debug!("Ignoring file selection while {}", self.state_name());
                return &self.state;
            }
        }

        self.state = match self.policy.validate(&candidate) {
            Ok(()) => {
                info!(
                    "Selected {} ({} bytes)",
                    candidate.file_name(),
                    candidate.size_bytes()
                );
                UploadState::FileSelected(candidate)
            }
            Err(rejection) => {
                warn!(
                    "Rejected {}: {}",
                    candidate.file_name(),
                    rejection.reason()
                );
                UploadState::Failed(Failure {
                    message: rejection.to_string(),
                    kind: FailureKind::Validation(rejection),
                    retained: None,
                })
            }
        };
        &self.state
    }

    /// Moves to `Submitting` and hands out the ticket for the request.
    /// Returns `None` (state untouched) when there is nothing to submit or a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        let file = match &self.state {
            UploadState::FileSelected(file) => file.clone(),
            UploadState::Failed(Failure {
                retained: Some(file),
                ..
            }) => file.clone(),
            _ => {
                debug!("Ignoring submit while {}", self.state_name());
                return None;
            }
        };

        self.next_submission += 1;
        let id = self.next_submission;
        self.in_flight = Some(id);
        self.state = UploadState::Submitting(file.clone());
        info!("Submission #{id} started for {}", file.file_name());

        Some(Submission { id, file })
    }

    /// Applies the outcome of a submission started by `begin_submit`.
    pub fn settle(
        &mut self,
        submission: Submission,
        outcome: Result<Evaluation, ClientError>,
    ) -> &UploadState {
        if self.in_flight != Some(submission.id) {
            debug!("Dropping stale outcome for submission #{}", submission.id);
            return &self.state;
        }
        self.in_flight = None;

        self.state = match outcome {
            Ok(evaluation) => {
                info!(
                    "Submission #{} succeeded with score {}",
                    submission.id, evaluation.score
                );
                UploadState::Succeeded(evaluation)
            }
            Err(err) => {
                warn!("Submission #{} failed: {err}", submission.id);
                UploadState::Failed(Failure {
                    kind: FailureKind::Transport,
                    message: err.user_message(),
                    retained: Some(submission.file),
                })
            }
        };
        &self.state
    }

    /// Sends the selected (or retained) file and waits for the single response.
    /// Resolves early with a cancellation failure if the cancel handle fires.
    pub async fn submit(&mut self) -> &UploadState {
        let Some(submission) = self.begin_submit() else {
            return &self.state;
        };

        let cancel = self.cancel.clone();
        let outcome = tokio::select! {
            result = self.transport.evaluate(submission.file()) => result,
            _ = cancel.notified() => Err(ClientError::Cancelled),
        };

        self.settle(submission, outcome)
    }

    /// Clears file, result and error. Only meaningful after a submission
    /// settled or a file was rejected.
    pub fn reset_for_new_analysis(&mut self) -> &UploadState {
        match self.state {
            UploadState::Succeeded(_) | UploadState::Failed(_) => {
                info!("Resetting for a new analysis");
                self.state = UploadState::Idle;
            }
            _ => debug!("Ignoring reset while {}", self.state_name()),
        }
        &self.state
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            UploadState::Idle => "idle",
            UploadState::FileSelected(_) => "file selected",
            UploadState::Submitting(_) => "submitting",
            UploadState::Succeeded(_) => "succeeded",
            UploadState::Failed(_) => "failed",
        }
    }
}
