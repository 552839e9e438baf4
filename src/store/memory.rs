use std::collections::BTreeMap;

use super::indexed_arena::IndexedArena;
use super::Store;
use crate::error::Missing;
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

/// A store that keeps all records in memory, with nodes and stars
/// living in two separate arenas.
#[derive(Default)]
pub struct MemoryStore {
    nodes: IndexedArena<NodeId, NodeState>,
    stars: IndexedArena<StarId, Star>,
    roots: BTreeMap<RootIndex, NodeId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_stars(&self) -> usize {
        self.stars.len()
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeState> {
        Ok(self.nodes.get_mut(id)?)
    }
}

impl Store for MemoryStore {
    fn create_node(
        &mut self,
        bounds: BoundingBox,
        depth: usize,
        root: Option<RootIndex>,
    ) -> Result<NodeId> {
        if let Some(root) = root {
            if self.roots.contains_key(&root) {
                return Err(StoreError::new(format!("root index {} already in use", root)).into());
            }
        }
        let id = self.nodes.insert(NodeState::empty_leaf(bounds, depth, root));
        if let Some(root) = root {
            self.roots.insert(root, id);
        }
        Ok(id)
    }

    fn node(&self, id: NodeId) -> Result<NodeState> {
        Ok(self.nodes.get(id)?.clone())
    }

    fn set_leaf_state(&mut self, id: NodeId, is_leaf: bool) -> Result<()> {
        self.node_mut(id)?.is_leaf = is_leaf;
        Ok(())
    }

    fn set_children(&mut self, id: NodeId, children: Children) -> Result<()> {
        if let Some(child) = children.iter().find(|child| !self.nodes.contains(**child)) {
            return Err(Missing::Node(*child).into());
        }
        self.node_mut(id)?.children = Some(children);
        Ok(())
    }

    fn assign_star(&mut self, id: NodeId, star: StarId) -> Result<()> {
        if !self.stars.contains(star) {
            return Err(Missing::Star(star).into());
        }
        self.node_mut(id)?.star = Some(star);
        Ok(())
    }

    fn clear_star(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?.star = None;
        Ok(())
    }

    fn create_star(&mut self, star: &Star) -> Result<StarId> {
        Ok(self.stars.insert(star.clone()))
    }

    fn star(&self, id: StarId) -> Result<Star> {
        Ok(self.stars.get(id)?.clone())
    }

    fn update_total_mass(&mut self, id: NodeId, mass: f64) -> Result<()> {
        self.node_mut(id)?.total_mass = mass;
        Ok(())
    }

    fn update_center_of_mass(&mut self, id: NodeId, center_of_mass: MVec) -> Result<()> {
        self.node_mut(id)?.center_of_mass = center_of_mass;
        Ok(())
    }

    fn find_root(&self, root: RootIndex) -> Result<NodeId> {
        Ok(*self.roots.get(&root).ok_or(Missing::Root(root))?)
    }

    fn max_root_index(&self) -> Result<Option<RootIndex>> {
        Ok(self.roots.keys().next_back().copied())
    }

    fn stars(&self) -> Result<Vec<(StarId, Star)>> {
        Ok(self
            .stars
            .iter()
            .map(|(id, star)| (id, star.clone()))
            .collect())
    }

    fn delete_all_nodes(&mut self) -> Result<()> {
        self.nodes.clear();
        self.roots.clear();
        Ok(())
    }

    fn delete_all_stars(&mut self) -> Result<()> {
        self.stars.clear();
        Ok(())
    }
}
