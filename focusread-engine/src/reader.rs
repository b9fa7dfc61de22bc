//! Document-level orchestration
//!
//! [`FocusReader`] owns the feature flags and the per-block state for one
//! document and drives passes over every candidate block. A failure in one
//! block is logged and counted; it never aborts the pass.

use crate::block::{apply_to_block, reset_block, ApplyOutcome, ResetOutcome, TextBlock};
use crate::dimming::{clear_dimming, set_dimming};
use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::exclusion::{ExclusionPolicy, ScanConfig, TagExclusion};
use crate::ruler::ReadingRuler;
use crate::watcher::StructureWatcher;
use focusread_core::{Feature, FeatureFlags};
use std::collections::{HashMap, HashSet};

/// Host request to switch the reader on or off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Turn on and apply
    Enable,
    /// Turn off and reset
    Disable,
    /// Flip the global switch
    Toggle,
}

/// Counters from one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Blocks transformed in this pass
    pub applied: usize,
    /// Blocks already processed before this pass
    pub unchanged: usize,
    /// Blank or excluded blocks
    pub skipped: usize,
    /// Blocks restored to plain text
    pub reset: usize,
    /// Blocks that failed and were left as they were
    pub failed: usize,
}

impl PassReport {
    fn merge(&mut self, other: PassReport) {
        self.applied += other.applied;
        self.unchanged += other.unchanged;
        self.skipped += other.skipped;
        self.reset += other.reset;
        self.failed += other.failed;
    }
}

/// Focus-reading controller for one document
pub struct FocusReader {
    flags: FeatureFlags,
    scan: ScanConfig,
    exclusion: Box<dyn ExclusionPolicy>,
    blocks: HashMap<NodeId, TextBlock>,
    order: Vec<NodeId>,
    ruler: ReadingRuler,
    watcher: StructureWatcher,
}

impl FocusReader {
    /// Create a reader for `doc`, excluding blocks by [`ScanConfig::excluded_tags`]
    pub fn new(doc: &Document, flags: FeatureFlags, scan: ScanConfig) -> Self {
        let exclusion = Box::new(TagExclusion::from_config(&scan));
        Self::with_exclusion(doc, flags, scan, exclusion)
    }

    /// Create a reader with a custom exclusion policy
    pub fn with_exclusion(
        doc: &Document,
        flags: FeatureFlags,
        scan: ScanConfig,
        exclusion: Box<dyn ExclusionPolicy>,
    ) -> Self {
        let ruler = ReadingRuler::locate(doc, &scan.ruler_id);
        Self {
            flags,
            scan,
            exclusion,
            blocks: HashMap::new(),
            order: Vec::new(),
            ruler,
            watcher: StructureWatcher::new(),
        }
    }

    /// Current flags
    pub fn flags(&self) -> FeatureFlags {
        self.flags
    }

    /// Scan configuration
    pub fn scan(&self) -> &ScanConfig {
        &self.scan
    }

    /// Ruler state
    pub fn ruler(&self) -> &ReadingRuler {
        &self.ruler
    }

    /// Known blocks in the order of the latest pass
    pub fn blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.order.iter().filter_map(|node| self.blocks.get(node))
    }

    /// State of the block backed by `node`
    pub fn block(&self, node: NodeId) -> Option<&TextBlock> {
        self.blocks.get(&node)
    }

    fn content_root(&self, doc: &Document) -> Option<NodeId> {
        match &self.scan.content_root {
            None => Some(doc.root()),
            Some(id) => {
                let found = doc.element_by_id(id);
                if found.is_none() {
                    log::warn!("content root '{id}' not found; nothing to transform");
                }
                found
            }
        }
    }

    /// Innermost block elements under the content root, in document order
    fn candidate_blocks(&self, doc: &Document, root: NodeId) -> Result<Vec<NodeId>> {
        let all = doc.elements_by_tag(root, &self.scan.block_tags)?;
        let set: HashSet<NodeId> = all.iter().copied().collect();
        let mut innermost = Vec::with_capacity(all.len());
        for node in all {
            let nested = doc
                .descendants(node)?
                .into_iter()
                .any(|inner| set.contains(&inner));
            if !nested {
                innermost.push(node);
            }
        }
        Ok(innermost)
    }

    /// Transform every eligible block, or reset everything when globally off
    pub fn apply_transformations(&mut self, doc: &mut Document) -> PassReport {
        if !self.flags.effective(Feature::Global) {
            return self.reset_transformations(doc);
        }

        let mut report = PassReport::default();
        self.prune_detached(doc);
        let Some(root) = self.content_root(doc) else {
            return report;
        };

        let candidates = match self.candidate_blocks(doc, root) {
            Ok(candidates) => candidates,
            Err(e) => {
                log::warn!("could not collect blocks: {e}");
                return report;
            }
        };

        for (index, node) in candidates.iter().enumerate() {
            if !self.blocks.contains_key(node) {
                match TextBlock::capture(doc, *node) {
                    Ok(block) => {
                        self.blocks.insert(*node, block);
                    }
                    Err(e) => {
                        log::warn!("block {node} could not be captured: {e}");
                        report.failed += 1;
                        continue;
                    }
                }
            }
            let Some(block) = self.blocks.get_mut(node) else {
                continue;
            };

            match apply_to_block(doc, block, index, self.flags, self.exclusion.as_ref()) {
                Ok(ApplyOutcome::Applied { .. }) => report.applied += 1,
                Ok(ApplyOutcome::AlreadyProcessed) => report.unchanged += 1,
                Ok(ApplyOutcome::Blank | ApplyOutcome::Excluded) => report.skipped += 1,
                Ok(ApplyOutcome::Disabled) => {}
                Err(e) => {
                    log::warn!("block {node} left untouched: {e}");
                    report.failed += 1;
                }
            }
        }
        self.order = candidates;

        self.sync_ruler(doc);
        self.sync_dimming(doc);

        log::info!(
            "pass complete: {} applied, {} unchanged, {} skipped, {} failed",
            report.applied,
            report.unchanged,
            report.skipped,
            report.failed
        );
        report
    }

    /// Reset every processed block, hide the ruler and undo dimming
    pub fn reset_transformations(&mut self, doc: &mut Document) -> PassReport {
        let mut report = self.reset_blocks(doc);

        self.rebind_ruler(doc);
        if let Err(e) = self.ruler.set_enabled(doc, false) {
            log::warn!("could not hide ruler: {e}");
        }
        if let Err(e) = clear_dimming(doc) {
            log::warn!("could not clear dimming: {e}");
            report.failed += 1;
        }
        report
    }

    fn reset_blocks(&mut self, doc: &mut Document) -> PassReport {
        self.prune_detached(doc);
        let mut report = PassReport::default();
        for (node, block) in self.blocks.iter_mut() {
            match reset_block(doc, block) {
                Ok(ResetOutcome::Restored { .. }) => report.reset += 1,
                Ok(ResetOutcome::NotProcessed) => {}
                Err(e) => {
                    log::warn!("block {node} could not be reset: {e}");
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Forget blocks whose element has left the document
    fn prune_detached(&mut self, doc: &Document) {
        let root = doc.root();
        let before = self.blocks.len();
        self.blocks
            .retain(|node, _| doc.is_inclusive_ancestor(root, *node).unwrap_or(false));
        let blocks = &self.blocks;
        self.order.retain(|node| blocks.contains_key(node));

        let dropped = before - self.blocks.len();
        if dropped > 0 {
            log::debug!("dropped {dropped} blocks no longer in the document");
        }
    }

    /// Bind the ruler again when its overlay is missing or was removed
    fn rebind_ruler(&mut self, doc: &Document) {
        let root = doc.root();
        let attached = self.ruler.element().is_some_and(|element| {
            doc.is_inclusive_ancestor(root, element).unwrap_or(false)
        });
        if !attached {
            self.ruler = ReadingRuler::locate(doc, &self.scan.ruler_id);
        }
    }

    fn sync_ruler(&mut self, doc: &mut Document) {
        self.rebind_ruler(doc);
        let enabled = self.flags.effective(Feature::Ruler);
        if let Err(e) = self.ruler.set_enabled(doc, enabled) {
            log::warn!("could not toggle ruler: {e}");
        }
    }

    /// Media anywhere in the document, not only under the content root
    fn sync_dimming(&self, doc: &mut Document) {
        let dimmed = self.flags.effective(Feature::Focus);
        let root = doc.root();
        if let Err(e) = set_dimming(doc, root, &self.scan.media_tags, dimmed) {
            log::warn!("could not toggle dimming: {e}");
        }
    }

    /// Change one feature and bring the document in line with it.
    ///
    /// Text-affecting features re-derive every processed block from its
    /// text; ruler and focus only touch their auxiliary elements.
    pub fn set_feature(&mut self, doc: &mut Document, feature: Feature, value: bool) -> PassReport {
        if self.flags.get(feature) == value {
            return PassReport::default();
        }
        self.flags.set(feature, value);
        log::debug!("feature {feature} set to {value}");

        match feature {
            Feature::Ruler => {
                self.sync_ruler(doc);
                PassReport::default()
            }
            Feature::Focus => {
                self.sync_dimming(doc);
                PassReport::default()
            }
            Feature::Global => self.apply_transformations(doc),
            _ => {
                let mut report = self.reset_blocks(doc);
                report.merge(self.apply_transformations(doc));
                report
            }
        }
    }

    /// Handle an enable/disable transition from the host
    pub fn handle(&mut self, doc: &mut Document, command: Command) -> PassReport {
        match command {
            Command::Enable => {
                self.flags.global = true;
                self.apply_transformations(doc)
            }
            Command::Disable => self.set_feature(doc, Feature::Global, false),
            Command::Toggle => {
                let target = !self.flags.global;
                self.set_feature(doc, Feature::Global, target)
            }
        }
    }

    /// React to queued structural changes.
    ///
    /// Only insertions made outside the engine trigger a pass.
    pub fn on_structure_changed(&mut self, doc: &mut Document) -> PassReport {
        let changes = self.watcher.poll(doc);
        if !changes.needs_update() {
            log::trace!("{} engine mutations ignored", changes.ignored);
            return PassReport::default();
        }
        log::debug!("{} external insertions observed", changes.added.len());
        self.apply_transformations(doc)
    }

    /// Forward a pointer move to the ruler. Returns the new ruler top.
    pub fn pointer_moved(&self, doc: &mut Document, client_y: f64, scroll_y: f64) -> Option<f64> {
        if !self.flags.effective(Feature::Ruler) {
            return None;
        }
        match self.ruler.update_position(doc, client_y, scroll_y) {
            Ok(top) => top,
            Err(e) => {
                log::warn!("could not move ruler: {e}");
                None
            }
        }
    }
}

impl std::fmt::Debug for FocusReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusReader")
            .field("flags", &self.flags)
            .field("scan", &self.scan)
            .field("blocks", &self.blocks.len())
            .field("ruler", &self.ruler)
            .finish()
    }
}
