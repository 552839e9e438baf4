use derive_more::Display;
use derive_more::From;
use derive_more::Into;
use generational_arena::Index;

use crate::error::ForestError;
use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::geometry::MVec;
use crate::geometry::NUM_SUBDIVISIONS;
use crate::star::StarId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, From, Into)]
pub struct NodeId(Index);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (index, generation) = self.0.into_raw_parts();
        write!(f, "{}v{}", index, generation)
    }
}

/// Identifies a tree in the forest. The first tree gets index 1.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord, From, Into)]
pub struct RootIndex(pub u64);

impl RootIndex {
    pub const FIRST: RootIndex = RootIndex(1);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

pub type Children = [NodeId; NUM_SUBDIVISIONS];

/// The structural state of a node, as seen by the tree algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(Option<StarId>),
    Internal(Children),
}

/// A node as persisted by a [`Store`](crate::store::Store). The
/// leaf flag, star and children are kept as separate fields so that a
/// contradictory combination can be detected by [`NodeState::kind`].
#[derive(Clone, Debug)]
pub struct NodeState {
    pub bounds: BoundingBox,
    pub depth: usize,
    pub root: Option<RootIndex>,
    pub is_leaf: bool,
    pub star: Option<StarId>,
    pub children: Option<Children>,
    pub total_mass: f64,
    pub center_of_mass: MVec,
}

impl NodeState {
    pub fn empty_leaf(bounds: BoundingBox, depth: usize, root: Option<RootIndex>) -> Self {
        Self {
            bounds,
            depth,
            root,
            is_leaf: true,
            star: None,
            children: None,
            total_mass: 0.0,
            center_of_mass: MVec::ZERO,
        }
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind> {
        match (self.is_leaf, self.star, self.children) {
            (true, star, None) => Ok(NodeKind::Leaf(star)),
            (false, None, Some(children)) => Ok(NodeKind::Internal(children)),
            (true, _, Some(_)) => Err(ForestError::invariant(id, "leaf with children")),
            (false, Some(_), _) => Err(ForestError::invariant(id, "internal node holds a star")),
            (false, None, None) => {
                Err(ForestError::invariant(id, "internal node without children"))
            }
        }
    }

    /// Checks the stored depth and the numeric sanity of the bounding box.
    pub fn check_shape(&self, id: NodeId, expected_depth: usize) -> Result<()> {
        let width = self.bounds.width;
        if !self.bounds.center.is_finite() || !width.is_finite() || width <= 0.0 {
            return Err(ForestError::Parse(format!(
                "node {} has unreadable bounds {:?}",
                id, self.bounds
            )));
        }
        if self.depth != expected_depth {
            return Err(ForestError::invariant(
                id,
                format!(
                    "stored depth {} but reached at depth {}",
                    self.depth, expected_depth
                ),
            ));
        }
        Ok(())
    }
}
