//! Live query criteria for the discovery view.

use crate::types::Coordinate;

/// The user's current search criteria: free-text term, category selector,
/// and optional origin for distance ranking.
///
/// Immutable; every user edit produces a fresh value via [`QueryState::apply`]
/// so dependents never observe a half-updated query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    /// Free-text term matched against business names. Stored trimmed.
    pub term: String,
    /// Exact category filter; empty means "all categories".
    pub category: String,
    /// User position for distance ranking; `None` disables re-ordering.
    pub origin: Option<Coordinate>,
}

/// A partial update to [`QueryState`]: `None` keeps the current value.
///
/// `origin` is doubly optional so a patch can distinguish "leave the origin
/// alone" from "clear the origin".
#[derive(Debug, Clone, Default)]
pub struct QueryPatch {
    pub term: Option<String>,
    pub category: Option<String>,
    pub origin: Option<Option<Coordinate>>,
}

impl QueryPatch {
    #[must_use]
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn origin(mut self, origin: Coordinate) -> Self {
        self.origin = Some(Some(origin));
        self
    }

    #[must_use]
    pub fn clear_origin(mut self) -> Self {
        self.origin = Some(None);
        self
    }
}

impl QueryState {
    /// Returns a new state with the patched fields replaced and everything
    /// else preserved. The term is trimmed of surrounding whitespace; no
    /// other validation applies.
    #[must_use]
    pub fn apply(&self, patch: QueryPatch) -> Self {
        Self {
            term: patch
                .term
                .map_or_else(|| self.term.clone(), |t| t.trim().to_string()),
            category: patch.category.unwrap_or_else(|| self.category.clone()),
            origin: patch.origin.unwrap_or(self.origin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_preserves_everything() {
        let state = QueryState {
            term: "joe".to_string(),
            category: "Food".to_string(),
            origin: Some(Coordinate::new(-33.9, 18.4).unwrap()),
        };
        let next = state.apply(QueryPatch::default());
        assert_eq!(next, state);
    }

    #[test]
    fn patch_replaces_only_given_fields() {
        let state = QueryState {
            term: "joe".to_string(),
            category: "Food".to_string(),
            origin: None,
        };
        let next = state.apply(QueryPatch::default().category("Retail"));
        assert_eq!(next.term, "joe");
        assert_eq!(next.category, "Retail");
        assert!(next.origin.is_none());
    }

    #[test]
    fn term_is_trimmed() {
        let next = QueryState::default().apply(QueryPatch::default().term("  diner  "));
        assert_eq!(next.term, "diner");
    }

    #[test]
    fn origin_can_be_cleared() {
        let state = QueryState {
            origin: Some(Coordinate::new(0.0, 0.0).unwrap()),
            ..QueryState::default()
        };
        let next = state.apply(QueryPatch::default().clear_origin());
        assert!(next.origin.is_none());
    }

    #[test]
    fn apply_does_not_mutate_the_original() {
        let state = QueryState::default();
        let _ = state.apply(QueryPatch::default().term("x"));
        assert_eq!(state.term, "");
    }
}
