//! Search lifecycle: the state machine behind a single extraction run.
//!
//! One controller owns one [`SearchState`]. The state moves
//! `Idle -> Running -> Succeeded | Failed` per run; every terminal phase
//! requires a fresh explicit [`SearchController::run`] to leave.
//!
//! The state sits behind a mutex so the TUI can render snapshots while a
//! request is outstanding, but there is only ever one writer per run: the
//! lock is never held across the await point.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::client::{EtlClient, SearchOutcome, SkillCount};
use crate::error::Result;

/// Initial term shown before the user types anything.
pub const SAMPLE_TERM: &str = "software engineer intern";

/// Lifecycle phase of the most recent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Everything the UI needs to render one search invocation.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Pending term, edited freely; independent of any in-flight run.
    pub term: String,
    pub phase: Phase,
    /// Backend identifier for the last successful run.
    pub search_id: Option<String>,
    pub results: Vec<SkillCount>,
    pub error_message: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            term: SAMPLE_TERM.to_string(),
            phase: Phase::Idle,
            search_id: None,
            results: Vec::new(),
            error_message: None,
        }
    }
}

impl SearchState {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Whether the UI should allow triggering a run right now.
    #[must_use]
    pub fn can_run(&self) -> bool {
        !self.is_running() && !self.term.trim().is_empty()
    }
}

/// Owner of the search lifecycle.
///
/// Cloning is cheap and clones share the same state slot, so a clone can
/// drive `run()` on a background task while the original keeps rendering
/// snapshots.
#[derive(Debug, Clone)]
pub struct SearchController {
    client: EtlClient,
    state: Arc<Mutex<SearchState>>,
}

impl SearchController {
    #[must_use]
    pub fn new(client: EtlClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(SearchState::default())),
        }
    }

    /// Replace the pending term. Legal at any time, including while a run
    /// is in flight; the in-flight run keeps the term it was started with.
    pub fn set_term(&self, text: impl Into<String>) {
        self.state.lock().term = text.into();
    }

    /// Clone of the current state, for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.state.lock().clone()
    }

    /// Run one search with the current term.
    ///
    /// A blank (after trimming) term is a no-op: state is left untouched
    /// and the UI is expected to have disabled the trigger anyway. For a
    /// non-blank term the state transitions to `Running` with stale
    /// results, identifier, and error cleared before the request goes
    /// out, and reaches a terminal phase on every path once the request
    /// resolves.
    pub async fn run(&self) {
        let term = {
            let mut state = self.state.lock();
            let term = state.term.trim().to_string();
            if term.is_empty() {
                return;
            }
            state.phase = Phase::Running;
            state.search_id = None;
            state.results = Vec::new();
            state.error_message = None;
            term
        };

        let outcome = self.client.search(&term).await;
        self.apply(outcome);
    }

    /// Single reconciliation point: whatever the request produced, the
    /// phase leaves `Running` here.
    fn apply(&self, outcome: Result<SearchOutcome>) {
        let mut state = self.state.lock();
        match outcome {
            Ok(outcome) => {
                state.phase = Phase::Succeeded;
                state.search_id = outcome.search_id;
                state.results = outcome.skills;
                state.error_message = None;
            }
            Err(err) => {
                state.phase = Phase::Failed;
                state.search_id = None;
                state.results = Vec::new();
                state.error_message = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PulseError;

    fn controller() -> SearchController {
        let config = crate::config::BackendConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 1,
        };
        SearchController::new(EtlClient::new(&config).unwrap())
    }

    fn entry(skill: &str, count: u64) -> SkillCount {
        SkillCount {
            skill: skill.to_string(),
            count,
        }
    }

    #[test]
    fn initial_state_uses_the_sample_term() {
        let state = SearchState::default();
        assert_eq!(state.term, SAMPLE_TERM);
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.search_id.is_none());
        assert!(state.results.is_empty());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn set_term_replaces_the_pending_term() {
        let ctrl = controller();
        ctrl.set_term("data engineer intern");
        assert_eq!(ctrl.snapshot().term, "data engineer intern");
    }

    #[test]
    fn can_run_requires_non_blank_term() {
        let mut state = SearchState::default();
        assert!(state.can_run());
        state.term = "   ".to_string();
        assert!(!state.can_run());
        state.term = "rust".to_string();
        state.phase = Phase::Running;
        assert!(!state.can_run());
    }

    #[tokio::test]
    async fn blank_term_run_is_a_no_op() {
        let ctrl = controller();
        ctrl.set_term("  \t ");
        ctrl.run().await;
        let state = ctrl.snapshot();
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn success_outcome_fills_results_and_clears_error() {
        let ctrl = controller();
        ctrl.apply(Ok(SearchOutcome {
            search_id: Some("abc123".to_string()),
            skills: vec![entry("A", 5), entry("B", 9)],
        }));
        let state = ctrl.snapshot();
        assert_eq!(state.phase, Phase::Succeeded);
        assert_eq!(state.search_id.as_deref(), Some("abc123"));
        assert_eq!(state.results, vec![entry("A", 5), entry("B", 9)]);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn empty_success_is_still_a_success() {
        let ctrl = controller();
        ctrl.apply(Ok(SearchOutcome::default()));
        let state = ctrl.snapshot();
        assert_eq!(state.phase, Phase::Succeeded);
        assert!(state.results.is_empty());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn failure_outcome_clears_results_and_keeps_message() {
        let ctrl = controller();
        ctrl.apply(Ok(SearchOutcome {
            search_id: Some("old".to_string()),
            skills: vec![entry("stale", 1)],
        }));
        ctrl.apply(Err(PulseError::Backend {
            status: 500,
            body: "db down".to_string(),
        }));
        let state = ctrl.snapshot();
        assert_eq!(state.phase, Phase::Failed);
        assert!(state.results.is_empty());
        assert!(state.search_id.is_none());
        let message = state.error_message.unwrap();
        assert!(message.contains("500"));
        assert!(message.contains("db down"));
    }

    #[tokio::test]
    async fn unreachable_backend_fails_the_run() {
        // Port 1 is never listening.
        let ctrl = controller();
        ctrl.set_term("data engineer intern");
        ctrl.run().await;
        let state = ctrl.snapshot();
        assert_eq!(state.phase, Phase::Failed);
        assert!(state.results.is_empty());
        assert!(state.search_id.is_none());
        assert!(!state.error_message.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn term_edits_during_a_run_do_not_affect_it() {
        let ctrl = controller();
        ctrl.set_term("first");
        let runner = ctrl.clone();
        let run = tokio::spawn(async move { runner.run().await });
        ctrl.set_term("second");
        run.await.unwrap();
        // The failed run ran with "first"; the pending term stays "second".
        let state = ctrl.snapshot();
        assert_eq!(state.term, "second");
        assert_eq!(state.phase, Phase::Failed);
    }
}
