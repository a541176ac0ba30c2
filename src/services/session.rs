//! Edit session controller — the state machine behind the single-page tool.
//!
//! DESIGN
//! ======
//! One session, one explicit serializable state object. The remote call
//! itself runs outside the controller: the caller obtains a validated
//! request from `begin_submit`, awaits the service without holding any
//! session lock, then finishes the cycle with `complete` or `fail`. The
//! at-most-one-in-flight rule is enforced here by the `Pending` guard, not
//! by disabling a UI control.

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::history::{EditRecord, HISTORY_CAPACITY, HistoryStore};
use super::refine::RefineRequest;

/// Shown when a submit arrives with an empty base text or instruction.
pub const VALIDATION_MESSAGE: &str = "Please fill in both the base text and the edit instruction.";

// =============================================================================
// STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Pending,
    Success,
    Failed,
}

/// The full view-state rendered by the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub phase: Phase,
    pub base_prompt: String,
    pub instruction: String,
    pub result: String,
    pub error: Option<String>,
    /// Newest first, at most [`HISTORY_CAPACITY`] entries.
    pub history: Vec<EditRecord>,
}

/// Why a submit did not start a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// A request is already in flight; the submit is ignored without any
    /// state change.
    InFlight,
    /// One or both inputs were empty after trimming; the session moved to
    /// `Failed` with the validation message.
    EmptyInput,
}

// =============================================================================
// SESSION
// =============================================================================

pub struct Session {
    state: SessionState,
    /// Snapshot of the submitted pair while a request is in flight, so a
    /// `clear` during `Pending` cannot corrupt the recorded history entry.
    in_flight: Option<RefineRequest>,
    store: HistoryStore,
}

impl Session {
    /// Create a session with history loaded once from the store.
    #[must_use]
    pub fn new(store: HistoryStore) -> Self {
        let history = store.load();
        info!(records = history.len(), "session: history loaded");
        Self {
            state: SessionState {
                phase: Phase::Idle,
                base_prompt: String::new(),
                instruction: String::new(),
                result: String::new(),
                error: None,
                history,
            },
            in_flight: None,
            store,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Validate inputs and move to `Pending`.
    ///
    /// On success the caller owns the returned request and must finish the
    /// cycle with [`Session::complete`] or [`Session::fail`].
    ///
    /// # Errors
    ///
    /// [`SubmitRejected::InFlight`] while a request is already pending (no
    /// state change); [`SubmitRejected::EmptyInput`] when either field is
    /// blank after trimming (moves to `Failed`, issues no remote call).
    pub fn begin_submit(&mut self, base_prompt: String, instruction: String) -> Result<RefineRequest, SubmitRejected> {
        if self.state.phase == Phase::Pending {
            debug!("session: submit ignored, request already in flight");
            return Err(SubmitRejected::InFlight);
        }

        self.state.base_prompt = base_prompt;
        self.state.instruction = instruction;

        if self.state.base_prompt.trim().is_empty() || self.state.instruction.trim().is_empty() {
            self.state.phase = Phase::Failed;
            self.state.error = Some(VALIDATION_MESSAGE.to_string());
            return Err(SubmitRejected::EmptyInput);
        }

        let request = RefineRequest {
            base_prompt: self.state.base_prompt.clone(),
            instruction: self.state.instruction.clone(),
        };
        self.in_flight = Some(request.clone());
        self.state.phase = Phase::Pending;
        self.state.error = None;
        Ok(request)
    }

    /// Finish the in-flight cycle with the service's modified text: store the
    /// result, prepend a fresh [`EditRecord`], evict past capacity, persist.
    pub fn complete(&mut self, modified: String) {
        let request = self.in_flight.take().unwrap_or_else(|| RefineRequest {
            base_prompt: self.state.base_prompt.clone(),
            instruction: self.state.instruction.clone(),
        });

        self.state.phase = Phase::Success;
        self.state.result = modified.clone();
        self.state.error = None;

        let record = EditRecord::new(request.base_prompt, request.instruction, modified);
        self.state.history.insert(0, record);
        self.state.history.truncate(HISTORY_CAPACITY);
        self.store.save(&self.state.history);
        info!(records = self.state.history.len(), "session: edit recorded");
    }

    /// Finish the in-flight cycle with a failure message. History is
    /// untouched.
    pub fn fail(&mut self, message: String) {
        self.in_flight = None;
        self.state.phase = Phase::Failed;
        self.state.error = Some(message);
    }

    /// Reset working fields and any error. History is untouched. An
    /// in-flight request keeps running and still records the values it was
    /// submitted with.
    pub fn clear(&mut self) {
        self.state.base_prompt.clear();
        self.state.instruction.clear();
        self.state.result.clear();
        self.state.error = None;
        if self.state.phase != Phase::Pending {
            self.state.phase = Phase::Idle;
        }
    }

    /// Copy a stored record back into the working fields. A recall operation,
    /// not a re-run: no remote call is issued. Returns false when the id is
    /// unknown.
    pub fn recall(&mut self, id: Uuid) -> bool {
        let Some(record) = self.state.history.iter().find(|r| r.id == id).cloned() else {
            return false;
        };
        self.state.base_prompt = record.original;
        self.state.instruction = record.instruction;
        self.state.result = record.modified;
        self.state.error = None;
        if self.state.phase != Phase::Pending {
            self.state.phase = Phase::Success;
        }
        true
    }

    /// Remove a record by id and persist the updated list. No-op for unknown
    /// ids.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.state.history.len();
        self.state.history.retain(|r| r.id != id);
        if self.state.history.len() == before {
            return false;
        }
        self.store.save(&self.state.history);
        true
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
