//! In-memory record store fed by full-snapshot replacements.
//!
//! The remote document feed redelivers the complete business collection on
//! every change; [`RecordStore::replace_all`] is the binding point. Readers
//! only ever get owned snapshot copies, never a live reference into the
//! store's collection.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

use bizdir_core::{BusinessRecord, RawBusinessRecord};

type Subscriber = Box<dyn Fn() + Send + Sync>;

/// Counts reported by one [`RecordStore::replace_all`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Records now held by the store.
    pub stored: usize,
    /// Raw records skipped for failing validation (missing id, bad coordinate).
    pub rejected: usize,
    /// Records superseded by a later occurrence of the same id in the batch.
    pub duplicates: usize,
}

/// Holds the latest known snapshot of business records, keyed by id.
///
/// `replace_all` calls are internally atomic: the snapshot is validated
/// outside any lock and swapped in one write, so no reader observes a
/// half-replaced store. Subscribers are notified once per replacement, in
/// subscription order, after the write lock has been released.
#[derive(Default)]
pub struct RecordStore {
    records: RwLock<Vec<BusinessRecord>>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replaces the entire stored set with the validated subset
    /// of `batch`, then notifies every subscriber once.
    ///
    /// Malformed entries are skipped and counted, never silently dropped:
    /// each rejection is logged at `warn` and tallied in the returned
    /// [`ReplaceOutcome`]. When one id appears more than once, the last
    /// occurrence wins (a later feed write supersedes an earlier one).
    pub fn replace_all(&self, batch: Vec<RawBusinessRecord>) -> ReplaceOutcome {
        let mut index_by_id: HashMap<String, usize> = HashMap::new();
        let mut validated: Vec<BusinessRecord> = Vec::with_capacity(batch.len());
        let mut rejected = 0usize;
        let mut duplicates = 0usize;

        for raw in batch {
            match BusinessRecord::try_from(raw) {
                Ok(record) => {
                    if let Some(&existing) = index_by_id.get(&record.id) {
                        validated[existing] = record;
                        duplicates += 1;
                    } else {
                        index_by_id.insert(record.id.clone(), validated.len());
                        validated.push(record);
                    }
                }
                Err(error) => {
                    rejected += 1;
                    tracing::warn!(%error, "rejected malformed feed record");
                }
            }
        }

        let outcome = ReplaceOutcome {
            stored: validated.len(),
            rejected,
            duplicates,
        };

        {
            let mut records = self
                .records
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *records = validated;
        }

        let subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for notify in subscribers.iter() {
            notify();
        }

        outcome
    }

    /// Returns an owned copy of the current contents, in the insertion order
    /// of the last `replace_all` batch.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BusinessRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers a callback invoked once per `replace_all`. Every subscriber
    /// sees every replacement; nothing is coalesced or dropped.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(callback));
    }
}
