use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use super::MemoryStore;
use super::Store;
use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::geometry::MVec;
use crate::node::Children;
use crate::node::NodeId;
use crate::node::NodeState;
use crate::node::RootIndex;
use crate::star::Star;
use crate::star::StarId;

/// A cloneable handle to a store that can be used from several
/// threads at once. Every single call is atomic; sequences of calls
/// are not.
pub struct SharedStore<S = MemoryStore> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Default> Default for SharedStore<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> SharedStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, S>> {
        Ok(self.inner.lock()?)
    }
}

impl<S: Store> Store for SharedStore<S> {
    fn create_node(
        &mut self,
        bounds: BoundingBox,
        depth: usize,
        root: Option<RootIndex>,
    ) -> Result<NodeId> {
        self.lock()?.create_node(bounds, depth, root)
    }

    fn node(&self, id: NodeId) -> Result<NodeState> {
        self.lock()?.node(id)
    }

    fn set_leaf_state(&mut self, id: NodeId, is_leaf: bool) -> Result<()> {
        self.lock()?.set_leaf_state(id, is_leaf)
    }

    fn set_children(&mut self, id: NodeId, children: Children) -> Result<()> {
        self.lock()?.set_children(id, children)
    }

    fn assign_star(&mut self, id: NodeId, star: StarId) -> Result<()> {
        self.lock()?.assign_star(id, star)
    }

    fn clear_star(&mut self, id: NodeId) -> Result<()> {
        self.lock()?.clear_star(id)
    }

    fn create_star(&mut self, star: &Star) -> Result<StarId> {
        self.lock()?.create_star(star)
    }

    fn star(&self, id: StarId) -> Result<Star> {
        self.lock()?.star(id)
    }

    fn update_total_mass(&mut self, id: NodeId, mass: f64) -> Result<()> {
        self.lock()?.update_total_mass(id, mass)
    }

    fn update_center_of_mass(&mut self, id: NodeId, center_of_mass: MVec) -> Result<()> {
        self.lock()?.update_center_of_mass(id, center_of_mass)
    }

    fn find_root(&self, root: RootIndex) -> Result<NodeId> {
        self.lock()?.find_root(root)
    }

    fn max_root_index(&self) -> Result<Option<RootIndex>> {
        self.lock()?.max_root_index()
    }

    fn stars(&self) -> Result<Vec<(StarId, Star)>> {
        self.lock()?.stars()
    }

    fn delete_all_nodes(&mut self) -> Result<()> {
        self.lock()?.delete_all_nodes()
    }

    fn delete_all_stars(&mut self) -> Result<()> {
        self.lock()?.delete_all_stars()
    }
}

#[cfg(test)]
mod tests {
    use super::SharedStore;
    use crate::error::ForestError;
    use crate::geometry::MVec;
    use crate::star::Star;
    use crate::store::MemoryStore;
    use crate::store::Store;

    #[test]
    fn clones_share_records() {
        let mut store: SharedStore = SharedStore::default();
        let other = store.clone();
        let star = Star::at_rest(MVec::new(1.0, 1.0), 2.0);
        let id = store.create_star(&star).unwrap();
        assert_eq!(other.star(id), Ok(star));
    }

    #[test]
    fn poisoned_store_reports_store_error() {
        let store = SharedStore::new(MemoryStore::new());
        let inner = store.inner.clone();
        let _ = std::thread::spawn(move || {
            let _guard = inner.lock().unwrap();
            panic!("poison");
        })
        .join();
        assert!(matches!(store.stars(), Err(ForestError::Store(_))));
    }
}
