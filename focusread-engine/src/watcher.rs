//! Structural-change watcher
//!
//! Drains the document's mutation queue and reports insertions made by
//! anyone other than the engine. Engine-tagged records are dropped, which
//! keeps a pass from re-triggering itself.

use crate::dom::{Document, MutationOrigin, MutationRecord, NodeId};

/// Summary of the external insertions seen since the last poll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Nodes inserted by external mutations, in record order
    pub added: Vec<NodeId>,
    /// Engine-originated records that were ignored
    pub ignored: usize,
}

impl ChangeSet {
    /// Whether a re-application pass is warranted
    pub fn needs_update(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Watches a document for externally inserted content
#[derive(Debug, Clone, Default)]
pub struct StructureWatcher {
    polls: u64,
}

impl StructureWatcher {
    /// Create a watcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain pending records from `doc` and summarise them
    pub fn poll(&mut self, doc: &mut Document) -> ChangeSet {
        self.polls += 1;
        Self::summarize(doc.take_mutations())
    }

    /// Summarise a batch of records
    pub fn summarize(records: Vec<MutationRecord>) -> ChangeSet {
        let mut changes = ChangeSet::default();
        for record in records {
            match record.origin {
                MutationOrigin::Engine => changes.ignored += 1,
                MutationOrigin::External => changes.added.extend(record.added),
            }
        }
        changes
    }

    /// Number of polls so far
    pub fn polls(&self) -> u64 {
        self.polls
    }
}
