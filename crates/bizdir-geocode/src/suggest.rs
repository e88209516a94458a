//! Address suggestion controller.
//!
//! Turns incrementally typed address text into a ranked candidate list via
//! the geocoding provider, gating short input and discarding stale in-flight
//! responses. Lookups are fire-and-forget: outdated ones are left to
//! complete and ignored on arrival via a sequence-number check, so no
//! cooperative cancellation is required from the provider.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;

use crate::error::GeocodeError;

/// Async source of ranked address candidates.
///
/// Implemented by [`crate::GeocodeClient`] in production; tests substitute a
/// fake with controllable completion order.
pub trait SuggestionProvider: Send + Sync + 'static {
    fn suggest(
        &self,
        query: &str,
        limit: usize,
        country_code: &str,
    ) -> impl Future<Output = Result<Vec<String>, GeocodeError>> + Send;
}

/// Where the controller currently is in its lookup lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestState {
    /// No lookup outstanding and no candidates published.
    Idle,
    /// A lookup has been dispatched and its response is awaited.
    Pending,
    /// The latest lookup completed; its candidates are published.
    Resolved,
    /// The latest lookup failed; candidates are empty, the error is kept
    /// for display. Retrying is the caller's policy.
    Failed,
}

/// One dispatched lookup, identified by its monotonic sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub query_text: String,
    pub sequence: u64,
}

/// Caller-supplied lookup policy; none of this is hardcoded in the
/// controller.
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    /// Maximum candidates per lookup.
    pub limit: usize,
    /// Country restriction forwarded to the provider; empty disables it.
    pub country_code: String,
    /// Minimum trimmed input length before a lookup is dispatched.
    pub min_query_len: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            limit: 5,
            country_code: "za".to_string(),
            min_query_len: 3,
        }
    }
}

struct Inner {
    state: SuggestState,
    candidates: Vec<String>,
    committed: Option<String>,
    last_error: Option<String>,
    /// Sequence number of the most recently issued request. Also advanced
    /// by `select` and by gating, so that any in-flight lookup is stale on
    /// arrival and cannot resurrect cleared candidates.
    issued: u64,
}

/// Tracks the latest suggestion request and publishes at most one current
/// result.
///
/// Sequence numbers are assigned under the state mutex, so they stay
/// strictly increasing even when text-change events race across tasks; a
/// completion whose sequence is not the latest issued one is discarded
/// without touching published state.
pub struct SuggestionController<P> {
    provider: Arc<P>,
    config: SuggestionConfig,
    inner: Arc<Mutex<Inner>>,
}

impl<P: SuggestionProvider> SuggestionController<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, config: SuggestionConfig) -> Self {
        Self {
            provider,
            config,
            inner: Arc::new(Mutex::new(Inner {
                state: SuggestState::Idle,
                candidates: Vec::new(),
                committed: None,
                last_error: None,
                issued: 0,
            })),
        }
    }

    /// Handles one edit of the address input.
    ///
    /// Input shorter than the configured minimum (after trimming) clears
    /// the candidates and returns to `Idle` without contacting the
    /// provider. Otherwise a lookup is dispatched on a background task;
    /// the returned handle lets callers await completion (tests do),
    /// but awaiting it is not required for correctness.
    pub fn on_text_changed(&self, text: &str) -> Option<JoinHandle<()>> {
        let trimmed = text.trim();

        if trimmed.chars().count() < self.config.min_query_len {
            let mut inner = lock(&self.inner);
            inner.issued += 1;
            inner.candidates.clear();
            inner.state = SuggestState::Idle;
            inner.last_error = None;
            return None;
        }

        let request = {
            let mut inner = lock(&self.inner);
            inner.issued += 1;
            inner.state = SuggestState::Pending;
            SuggestionRequest {
                query_text: trimmed.to_owned(),
                sequence: inner.issued,
            }
        };

        let provider = Arc::clone(&self.provider);
        let inner = Arc::clone(&self.inner);
        let limit = self.config.limit;
        let country_code = self.config.country_code.clone();

        Some(tokio::spawn(async move {
            let outcome = provider
                .suggest(&request.query_text, limit, &country_code)
                .await;

            let mut inner = lock(&inner);
            if request.sequence != inner.issued {
                tracing::debug!(
                    sequence = request.sequence,
                    latest = inner.issued,
                    query = %request.query_text,
                    "discarding stale suggestion response"
                );
                return;
            }

            match outcome {
                Ok(candidates) => {
                    inner.state = SuggestState::Resolved;
                    inner.candidates = candidates;
                    inner.last_error = None;
                }
                Err(error) => {
                    tracing::warn!(%error, query = %request.query_text, "suggestion lookup failed");
                    inner.state = SuggestState::Failed;
                    inner.candidates.clear();
                    inner.last_error = Some(error.to_string());
                }
            }
        }))
    }

    /// Commits `candidate` as the authoritative address text, clears the
    /// candidate list, and resets to `Idle`. Any in-flight lookup becomes
    /// stale and is ignored when it completes.
    pub fn select(&self, candidate: &str) {
        let mut inner = lock(&self.inner);
        inner.issued += 1;
        inner.committed = Some(candidate.to_owned());
        inner.candidates.clear();
        inner.state = SuggestState::Idle;
        inner.last_error = None;
    }

    #[must_use]
    pub fn state(&self) -> SuggestState {
        lock(&self.inner).state
    }

    /// The currently published candidates, in provider relevance order.
    #[must_use]
    pub fn candidates(&self) -> Vec<String> {
        lock(&self.inner).candidates.clone()
    }

    /// The address committed by the last `select`, if any.
    #[must_use]
    pub fn committed_address(&self) -> Option<String> {
        lock(&self.inner).committed.clone()
    }

    /// Display message from the most recent failed lookup.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        lock(&self.inner).last_error.clone()
    }
}

fn lock(inner: &Mutex<Inner>) -> std::sync::MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "suggest_test.rs"]
mod suggest_test;
