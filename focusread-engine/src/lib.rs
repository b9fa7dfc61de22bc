//! Block-level orchestration for focus reading
//!
//! This crate hosts the text engine from `focusread-core` inside a small
//! presentation tree. It tracks which blocks have been transformed, swaps
//! their content atomically, restores them on reset, ignores its own
//! mutations when watching for new content, and drives the reading ruler
//! and media dimming.
//!
//! All operations are synchronous and run to completion on the caller's
//! thread.

#![warn(missing_docs)]

pub mod block;
pub mod dimming;
pub mod dom;
pub mod error;
pub mod exclusion;
pub mod reader;
pub mod ruler;
pub mod watcher;

// Re-export key types
pub use block::{apply_to_block, reset_block, ApplyOutcome, BlockState, ResetOutcome, TextBlock};
pub use dom::{Document, MutationOrigin, MutationRecord, NodeId, NodeKind};
pub use error::{EngineError, Result};
pub use exclusion::{ExclusionPolicy, NoExclusion, ScanConfig, TagExclusion};
pub use reader::{Command, FocusReader, PassReport};
pub use ruler::ReadingRuler;
pub use watcher::{ChangeSet, StructureWatcher};

// Re-export from core for convenience
pub use focusread_core::{Feature, FeatureFlags, StyledBlock};
