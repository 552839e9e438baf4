use std::marker::PhantomData;

use generational_arena::Arena;
use generational_arena::Index;

use crate::error::Missing;
use crate::node::NodeId;
use crate::star::StarId;

pub(super) trait ArenaId: Copy + Into<Index> + From<Index> {
    fn missing(self) -> Missing;
}

impl ArenaId for NodeId {
    fn missing(self) -> Missing {
        Missing::Node(self)
    }
}

impl ArenaId for StarId {
    fn missing(self) -> Missing {
        Missing::Star(self)
    }
}

/// This simply adds a layer of type safety around the arena, making sure
/// we cannot accidentally confuse node ids and star ids.
pub(super) struct IndexedArena<Id, T> {
    _marker: PhantomData<Id>,
    arena: Arena<T>,
}

impl<Id, T> Default for IndexedArena<Id, T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
            arena: Arena::default(),
        }
    }
}

impl<Id: ArenaId, T> IndexedArena<Id, T> {
    pub fn get(&self, id: Id) -> Result<&T, Missing> {
        self.arena.get(id.into()).ok_or_else(|| id.missing())
    }

    pub fn get_mut(&mut self, id: Id) -> Result<&mut T, Missing> {
        self.arena.get_mut(id.into()).ok_or_else(|| id.missing())
    }

    pub fn insert(&mut self, t: T) -> Id {
        self.arena.insert(t).into()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, &T)> {
        self.arena.iter().map(|(idx, t)| (idx.into(), t))
    }

    pub fn contains(&self, id: Id) -> bool {
        self.arena.contains(id.into())
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Removes every entry. Unlike `Arena::clear`, removing the entries
    /// one by one bumps the generation, so ids handed out before the
    /// reset can never resolve to entries inserted after it.
    pub fn clear(&mut self) {
        let ids: Vec<Index> = self.arena.iter().map(|(idx, _)| idx).collect();
        for idx in ids {
            self.arena.remove(idx);
        }
    }
}
