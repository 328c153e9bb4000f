//! Duplicate-document detection and removal.
//!
//! Two documents are duplicates when their *sets* of distinct words are
//! equal; term frequencies and word order are ignored. The lowest id in
//! each duplicate group is canonical and kept; the rest are removed.

use std::collections::{BTreeMap, BTreeSet};

use crate::index::{DocumentId, ExecutionMode, SearchIndex};

/// Remove every duplicate document, keeping the lowest id of each
/// group. Returns the removed ids in ascending order.
pub fn remove_duplicates(index: &mut SearchIndex) -> Vec<DocumentId> {
    let mut seen: BTreeMap<BTreeSet<String>, DocumentId> = BTreeMap::new();
    let mut removed = Vec::new();

    // Ascending scan, so the first holder of a word set is the lowest id.
    let ids: Vec<DocumentId> = index.document_ids().collect();
    for id in ids {
        let words: BTreeSet<String> = index
            .word_frequencies(id)
            .keys()
            .map(|word| word.to_string())
            .collect();
        if seen.contains_key(&words) {
            removed.push(id);
        } else {
            seen.insert(words, id);
        }
    }

    for &id in &removed {
        index.remove_document(id, ExecutionMode::Sequential);
    }
    removed
}
