use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use log::debug;
use log::info;

use crate::error::ForestError;
use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::geometry::MVec;
use crate::mass;
use crate::node::NodeId;
use crate::node::RootIndex;
use crate::quadtree;
use crate::render;
use crate::star::Star;
use crate::star::StarId;
use crate::store::Store;

/// Creates a new tree with an empty root leaf of the given width,
/// centered at the origin, and returns its root index. Indices are
/// handed out as one more than the largest index in use.
pub fn create_tree<S: Store>(store: &mut S, width: f64) -> Result<RootIndex> {
    if !width.is_finite() || width <= 0.0 {
        return Err(ForestError::Parse(format!(
            "tree width must be positive and finite, got {}",
            width
        )));
    }
    let root = store
        .max_root_index()?
        .map(RootIndex::next)
        .unwrap_or(RootIndex::FIRST);
    let root_id = store.create_node(BoundingBox::new(MVec::ZERO, width), 0, Some(root))?;
    debug!("Created tree {} with root {} and width {}", root, root_id, width);
    Ok(root)
}

/// Removes every star in the store, across all trees. Leaves that
/// referenced them are left dangling until the nodes are deleted as
/// well.
pub fn delete_all_stars<S: Store>(store: &mut S) -> Result<()> {
    store.delete_all_stars()?;
    info!("Deleted all stars");
    Ok(())
}

/// Removes every node in the store, which deletes all trees.
pub fn delete_all_nodes<S: Store>(store: &mut S) -> Result<()> {
    store.delete_all_nodes()?;
    info!("Deleted all nodes");
    Ok(())
}

pub fn list_stars<S: Store>(store: &S) -> Result<Vec<(StarId, Star)>> {
    store.stars()
}

type TreeLock = Arc<Mutex<()>>;

/// One lock per root index. An entry is created the first time the
/// tree is known to exist and never replaced or removed afterwards, so
/// every handle agrees on the lock of a tree, also across resets that
/// make the index available again. The table itself is guarded by a
/// lock that is held while trees are created or bulk deleted.
#[derive(Default, Clone)]
struct TreeLocks {
    table: Arc<Mutex<HashMap<RootIndex, TreeLock>>>,
}

impl TreeLocks {
    fn get<S: Store>(&self, store: &S, root: RootIndex) -> Result<TreeLock> {
        let mut table = self.table.lock()?;
        if let Some(lock) = table.get(&root) {
            return Ok(lock.clone());
        }
        store.find_root(root)?;
        Ok(table.entry(root).or_default().clone())
    }
}

/// A handle to a forest of trees in a store.
///
/// Every operation on a tree holds that tree's lock for its whole
/// duration, so a subdivision is never observed half done by another
/// handle. Operations on different trees run in parallel. Clones share
/// the lock table, so handles to a [`SharedStore`](crate::store::SharedStore)
/// can be sent to different threads.
#[derive(Clone)]
pub struct Forest<S> {
    store: S,
    locks: TreeLocks,
}

impl<S: Default> Default for Forest<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Forest<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: TreeLocks::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: Store> Forest<S> {
    pub fn create_tree(&mut self, width: f64) -> Result<RootIndex> {
        let mut table = self.locks.table.lock()?;
        let root = create_tree(&mut self.store, width)?;
        table.entry(root).or_default();
        Ok(root)
    }

    pub fn insert(&mut self, star: Star, root: RootIndex) -> Result<StarId> {
        let lock = self.locks.get(&self.store, root)?;
        let _guard = lock.lock()?;
        quadtree::insert(&mut self.store, star, root)
    }

    pub fn update_total_mass(&mut self, root: RootIndex) -> Result<f64> {
        let lock = self.locks.get(&self.store, root)?;
        let _guard = lock.lock()?;
        mass::update_total_mass(&mut self.store, root)
    }

    pub fn update_center_of_mass(&mut self, root: RootIndex) -> Result<MVec> {
        let lock = self.locks.get(&self.store, root)?;
        let _guard = lock.lock()?;
        mass::update_center_of_mass(&mut self.store, root)
    }

    pub fn update_mass_moments(&mut self, root: RootIndex) -> Result<(f64, MVec)> {
        let lock = self.locks.get(&self.store, root)?;
        let _guard = lock.lock()?;
        mass::update_mass_moments(&mut self.store, root)
    }

    pub fn render(&self, root: RootIndex) -> Result<String> {
        let lock = self.locks.get(&self.store, root)?;
        let _guard = lock.lock()?;
        render::render(&self.store, root)
    }

    pub fn collect_stars(&self, root: RootIndex) -> Result<Vec<StarId>> {
        let lock = self.locks.get(&self.store, root)?;
        let _guard = lock.lock()?;
        quadtree::collect_stars(&self.store, root)
    }

    pub fn locate_leaf(&self, root: RootIndex, pos: &MVec) -> Result<NodeId> {
        let lock = self.locks.get(&self.store, root)?;
        let _guard = lock.lock()?;
        quadtree::locate_leaf(&self.store, root, pos)
    }

    pub fn list_stars(&self) -> Result<Vec<(StarId, Star)>> {
        list_stars(&self.store)
    }

    pub fn delete_all_stars(&mut self) -> Result<()> {
        let table = self.locks.table.lock()?;
        let locks = sorted_locks(&table);
        let _guards = locks
            .iter()
            .map(|lock| lock.lock())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        delete_all_stars(&mut self.store)
    }

    pub fn delete_all_nodes(&mut self) -> Result<()> {
        let table = self.locks.table.lock()?;
        let locks = sorted_locks(&table);
        let _guards = locks
            .iter()
            .map(|lock| lock.lock())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        delete_all_nodes(&mut self.store)
    }
}

/// Tree locks are always taken in ascending root order.
fn sorted_locks(table: &HashMap<RootIndex, TreeLock>) -> Vec<TreeLock> {
    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_by_key(|(root, _)| **root);
    entries.into_iter().map(|(_, lock)| lock.clone()).collect()
}
