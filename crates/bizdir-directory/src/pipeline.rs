//! Derives the visible, ordered listing from the store and the live query.

use std::cmp::Ordering;
use std::sync::Arc;

use bizdir_core::{distance_km, BusinessRecord, QueryPatch, QueryState};

use crate::store::RecordStore;

/// Computes the visible list for one (snapshot, query) pair.
///
/// Pure function of its inputs: same snapshot and query always yield the
/// same sequence, with no state carried between calls. The output is a
/// filtered permutation of `snapshot` — cloned records, never fabricated or
/// duplicated ones.
///
/// 1. Keep records whose lowercased name contains the lowercased term
///    (empty term keeps everything; plain code-point substring match).
/// 2. Keep records whose category equals the query category exactly
///    (empty category keeps everything).
/// 3. With an origin, stable-sort ascending by haversine distance. Records
///    without a location sort after every located record; ties and the
///    location-less tail both keep their snapshot-relative order.
/// 4. Without an origin, step 2's order is preserved untouched.
#[must_use]
pub fn rank(snapshot: &[BusinessRecord], query: &QueryState) -> Vec<BusinessRecord> {
    let term = query.term.to_lowercase();

    let surviving = snapshot.iter().filter(|record| {
        (term.is_empty() || record.name.to_lowercase().contains(&term))
            && (query.category.is_empty() || record.category == query.category)
    });

    let Some(origin) = query.origin else {
        return surviving.cloned().collect();
    };

    // Precompute each record's distance once; None sorts last. The sort is
    // stable, so equal distances and the location-less tail keep snapshot
    // order.
    let mut keyed: Vec<(Option<f64>, BusinessRecord)> = surviving
        .map(|record| {
            let key = record.location.map(|location| distance_km(origin, location));
            (key, record.clone())
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(da), Some(db)) => da.partial_cmp(db).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// The discovery view: an owned [`RecordStore`] handle plus the current
/// [`QueryState`].
///
/// `current_view` re-derives from live inputs on every call, so it is always
/// consistent with the latest `replace_all` and the latest query update; the
/// hosting UI re-renders on store notification or after `update_query`.
pub struct RankingPipeline {
    store: Arc<RecordStore>,
    query: QueryState,
}

impl RankingPipeline {
    #[must_use]
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            store,
            query: QueryState::default(),
        }
    }

    #[must_use]
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Applies a partial query update; the next `current_view` reflects it.
    pub fn update_query(&mut self, patch: QueryPatch) {
        self.query = self.query.apply(patch);
    }

    /// The ordered, filtered listing for the current query.
    #[must_use]
    pub fn current_view(&self) -> Vec<BusinessRecord> {
        rank(&self.store.snapshot(), &self.query)
    }
}
