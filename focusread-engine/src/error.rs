//! Engine error types

use crate::dom::NodeId;
use focusread_core::CoreError;
use thiserror::Error;

/// Engine-level errors
///
/// Orchestration never propagates these past a single block: a failing
/// block is logged and skipped so the rest of the pass completes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Core text engine error
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Node id not present in the document
    #[error("node {0} not found")]
    MissingNode(NodeId),

    /// Operation requires an element but the node is text
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// Insertion would make a node its own ancestor
    #[error("cannot insert node {child} under {parent}: would create a cycle")]
    HierarchyRequest {
        /// Intended parent
        parent: NodeId,
        /// Node being inserted
        child: NodeId,
    },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
