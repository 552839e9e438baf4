use super::MemoryStore;
use super::Store;
use crate::error::Result;
use crate::error::StoreError;
use crate::geometry::BoundingBox;
use crate::geometry::MVec;
use crate::node::Children;
use crate::node::NodeId;
use crate::node::NodeState;
use crate::node::RootIndex;
use crate::star::Star;
use crate::star::StarId;

pub(crate) const CONNECTION_LOST: &str = "connection lost";

/// A [`MemoryStore`] that can be told to fail individual calls or to
/// hand out damaged star records.
#[derive(Default)]
pub(crate) struct FaultyStore {
    pub inner: MemoryStore,
    pub fail_node_creation: bool,
    pub fail_leaf_state: bool,
    pub fail_star_reads: bool,
    pub corrupt_star_mass: bool,
}

fn connection_lost<T>() -> Result<T> {
    Err(StoreError::new(CONNECTION_LOST).into())
}

impl Store for FaultyStore {
    fn create_node(
        &mut self,
        bounds: BoundingBox,
        depth: usize,
        root: Option<RootIndex>,
    ) -> Result<NodeId> {
        if self.fail_node_creation {
            return connection_lost();
        }
        self.inner.create_node(bounds, depth, root)
    }

    fn node(&self, id: NodeId) -> Result<NodeState> {
        self.inner.node(id)
    }

    fn set_leaf_state(&mut self, id: NodeId, is_leaf: bool) -> Result<()> {
        if self.fail_leaf_state {
            return connection_lost();
        }
        self.inner.set_leaf_state(id, is_leaf)
    }

    fn set_children(&mut self, id: NodeId, children: Children) -> Result<()> {
        self.inner.set_children(id, children)
    }

    fn assign_star(&mut self, id: NodeId, star: StarId) -> Result<()> {
        self.inner.assign_star(id, star)
    }

    fn clear_star(&mut self, id: NodeId) -> Result<()> {
        self.inner.clear_star(id)
    }

    fn create_star(&mut self, star: &Star) -> Result<StarId> {
        self.inner.create_star(star)
    }

    fn star(&self, id: StarId) -> Result<Star> {
        if self.fail_star_reads {
            return connection_lost();
        }
        let mut star = self.inner.star(id)?;
        if self.corrupt_star_mass {
            star.mass = f64::NAN;
        }
        Ok(star)
    }

    fn update_total_mass(&mut self, id: NodeId, mass: f64) -> Result<()> {
        self.inner.update_total_mass(id, mass)
    }

    fn update_center_of_mass(&mut self, id: NodeId, center_of_mass: MVec) -> Result<()> {
        self.inner.update_center_of_mass(id, center_of_mass)
    }

    fn find_root(&self, root: RootIndex) -> Result<NodeId> {
        self.inner.find_root(root)
    }

    fn max_root_index(&self) -> Result<Option<RootIndex>> {
        self.inner.max_root_index()
    }

    fn stars(&self) -> Result<Vec<(StarId, Star)>> {
        self.inner.stars()
    }

    fn delete_all_nodes(&mut self) -> Result<()> {
        self.inner.delete_all_nodes()
    }

    fn delete_all_stars(&mut self) -> Result<()> {
        self.inner.delete_all_stars()
    }
}
