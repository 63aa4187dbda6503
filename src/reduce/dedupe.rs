//! Service De-duplication
//!
//! Collapses a service listing to one record per `(category, name)`.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{RawServiceRecord, ServiceRecord};
use crate::reduce::normalize;

/// Identity of a service for de-duplication: normalized category and name.
pub fn identity(record: &ServiceRecord) -> (String, String) {
    (normalize(&record.category_key), normalize(&record.name))
}

// == Dedupe ==
/// Keeps the first record seen for each identity, in input order.
///
/// Records whose normalized name is empty are dropped and do not claim
/// their identity, so a later valid record is never shadowed by them.
pub fn dedupe(records: &[ServiceRecord]) -> Vec<ServiceRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut kept = Vec::with_capacity(records.len());

    for record in records {
        let key = identity(record);
        if key.1.is_empty() {
            continue;
        }
        if seen.insert(key) {
            kept.push(record.clone());
        }
    }

    debug!(input = records.len(), output = kept.len(), "deduped services");
    kept
}

/// Adapts raw documents then de-duplicates them.
pub fn dedupe_raw(raw: Vec<RawServiceRecord>) -> Vec<ServiceRecord> {
    let records: Vec<ServiceRecord> = raw.into_iter().map(ServiceRecord::from).collect();
    dedupe(&records)
}
