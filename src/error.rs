use std::sync::PoisonError;

use derive_more::Display;

use crate::geometry::MVec;
use crate::node::NodeId;
use crate::node::RootIndex;
use crate::star::StarId;

pub type Result<T> = std::result::Result<T, ForestError>;

/// A failure reported by the backing store itself.
#[derive(Debug, Display, Clone, PartialEq)]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl std::error::Error for StoreError {}

/// The record that a lookup failed to find.
#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum Missing {
    #[display(fmt = "node {}", _0)]
    Node(NodeId),
    #[display(fmt = "star {}", _0)]
    Star(StarId),
    #[display(fmt = "tree {}", _0)]
    Root(RootIndex),
}

#[derive(Debug, Display, Clone, PartialEq)]
pub enum ForestError {
    #[display(fmt = "store failure: {}", _0)]
    Store(StoreError),
    #[display(fmt = "{} does not exist", _0)]
    NotFound(Missing),
    #[display(fmt = "inconsistent node {}: {}", node, reason)]
    InvariantViolation { node: NodeId, reason: String },
    #[display(fmt = "malformed numeric data: {}", _0)]
    Parse(String),
    #[display(
        fmt = "star at {} cannot be separated from star {} before reaching floating point resolution",
        position,
        blocking
    )]
    Unseparable { blocking: StarId, position: MVec },
    #[display(fmt = "star at {} lies outside the root box of tree {}", position, root)]
    OutOfBounds { root: RootIndex, position: MVec },
}

impl ForestError {
    pub(crate) fn invariant(node: NodeId, reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            node,
            reason: reason.into(),
        }
    }
}

impl std::error::Error for ForestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ForestError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<Missing> for ForestError {
    fn from(missing: Missing) -> Self {
        Self::NotFound(missing)
    }
}

impl<T> From<PoisonError<T>> for ForestError {
    fn from(err: PoisonError<T>) -> Self {
        Self::Store(StoreError::new(format!("lock poisoned: {}", err)))
    }
}
