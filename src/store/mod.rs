#[cfg(test)]
pub(crate) mod faulty;
mod indexed_arena;
mod memory;
mod shared;

pub use memory::MemoryStore;
pub use shared::SharedStore;

use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::geometry::MVec;
use crate::node::Children;
use crate::node::NodeId;
use crate::node::NodeState;
use crate::node::RootIndex;
use crate::star::Star;
use crate::star::StarId;

/// Durable storage for nodes and stars.
///
/// The store only records what it is told: it does not enforce the
/// leaf/internal invariant, which the tree algorithms check on every
/// read through [`NodeState::kind`]. Lookups of unknown identities
/// fail with [`ForestError::NotFound`](crate::error::ForestError::NotFound),
/// failures of the storage itself with
/// [`ForestError::Store`](crate::error::ForestError::Store).
///
/// A multi-step change such as a subdivision is not atomic at this
/// level. Callers that share a store between threads serialize access
/// per tree, see [`Forest`](crate::registry::Forest).
pub trait Store {
    /// Allocates a new empty leaf. Passing a root index makes the node
    /// the root of that tree.
    fn create_node(
        &mut self,
        bounds: BoundingBox,
        depth: usize,
        root: Option<RootIndex>,
    ) -> Result<NodeId>;

    fn node(&self, id: NodeId) -> Result<NodeState>;

    fn set_leaf_state(&mut self, id: NodeId, is_leaf: bool) -> Result<()>;

    fn set_children(&mut self, id: NodeId, children: Children) -> Result<()>;

    fn assign_star(&mut self, id: NodeId, star: StarId) -> Result<()>;

    fn clear_star(&mut self, id: NodeId) -> Result<()>;

    fn create_star(&mut self, star: &Star) -> Result<StarId>;

    fn star(&self, id: StarId) -> Result<Star>;

    fn update_total_mass(&mut self, id: NodeId, mass: f64) -> Result<()>;

    fn update_center_of_mass(&mut self, id: NodeId, center_of_mass: MVec) -> Result<()>;

    fn find_root(&self, root: RootIndex) -> Result<NodeId>;

    /// The largest root index in use, if any tree exists.
    fn max_root_index(&self) -> Result<Option<RootIndex>>;

    fn stars(&self) -> Result<Vec<(StarId, Star)>>;

    fn delete_all_nodes(&mut self) -> Result<()>;

    fn delete_all_stars(&mut self) -> Result<()>;
}

/// Reads a star record and checks that its numbers are usable. A
/// damaged record is reported as
/// [`ForestError::Parse`](crate::error::ForestError::Parse).
pub fn read_star<S: Store>(store: &S, id: StarId) -> Result<Star> {
    let star = store.star(id)?;
    star.validate()?;
    Ok(star)
}
