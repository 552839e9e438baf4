mod traversal;


use log::debug;
use log::trace;
pub use traversal::collect_stars;
pub use traversal::depth_first_map_leaf;
pub use traversal::locate_leaf;

use crate::error::ForestError;
use crate::error::Result;
use crate::geometry::MVec;
use crate::node::Children;
use crate::node::NodeId;
use crate::node::NodeKind;
use crate::node::NodeState;
use crate::node::RootIndex;
use crate::star::Star;
use crate::star::StarId;
use crate::store::read_star;
use crate::store::Store;

/// Inserts a new star into the tree with the given root index and
/// returns the id of the stored star.
///
/// Stars have to lie within the root box of the tree (boundary
/// included), otherwise the insertion fails with
/// [`ForestError::OutOfBounds`]. Before anything is written, the leaf
/// the star will end up in is located. If that leaf is occupied by a
/// star that cannot be separated from the new one within floating
/// point resolution, the insertion fails with
/// [`ForestError::Unseparable`]. In both cases neither the star nor
/// any node is created.
pub fn insert<S: Store>(store: &mut S, star: Star, root: RootIndex) -> Result<StarId> {
    star.validate()?;
    let root_id = store.find_root(root)?;
    let root_state = store.node(root_id)?;
    root_state.check_shape(root_id, 0)?;
    if !root_state.bounds.contains(&star.pos) {
        return Err(ForestError::OutOfBounds {
            root,
            position: star.pos,
        });
    }
    let leaf = locate_leaf(store, root, &star.pos)?;
    let leaf_state = store.node(leaf)?;
    if let NodeKind::Leaf(Some(blocking)) = leaf_state.kind(leaf)? {
        let blocking_pos = read_star(store, blocking)?.pos;
        if leaf_state
            .bounds
            .separation_depth(&blocking_pos, &star.pos)
            .is_none()
        {
            return Err(ForestError::Unseparable {
                blocking,
                position: star.pos,
            });
        }
    }
    let id = store.create_star(&star)?;
    insert_into_node(store, id, &star.pos, root_id, 0)?;
    trace!("Inserted star {} at {} into tree {}", id, star.pos, root);
    Ok(id)
}

fn insert_into_node<S: Store>(
    store: &mut S,
    star: StarId,
    pos: &MVec,
    node: NodeId,
    depth: usize,
) -> Result<()> {
    let state = store.node(node)?;
    state.check_shape(node, depth)?;
    match state.kind(node)? {
        NodeKind::Leaf(None) => store.assign_star(node, star),
        NodeKind::Leaf(Some(blocking)) => {
            let blocking_pos = read_star(store, blocking)?.pos;
            let children = subdivide(store, node, &state)?;
            let blocking_quadrant = state.bounds.quadrant(&blocking_pos);
            insert_into_node(
                store,
                blocking,
                &blocking_pos,
                children[blocking_quadrant.index()],
                depth + 1,
            )?;
            let quadrant = state.bounds.quadrant(pos);
            insert_into_node(store, star, pos, children[quadrant.index()], depth + 1)
        }
        NodeKind::Internal(children) => {
            let quadrant = state.bounds.quadrant(pos);
            insert_into_node(store, star, pos, children[quadrant.index()], depth + 1)
        }
    }
}

/// Turns the leaf `node` into an internal node with four empty
/// children. The star it held is detached and has to be reinserted by
/// the caller.
fn subdivide<S: Store>(store: &mut S, node: NodeId, state: &NodeState) -> Result<Children> {
    debug_assert!(state.is_leaf);
    let quadrants = state.bounds.get_quadrants();
    let depth = state.depth + 1;
    let children: Children =
        array_init::try_array_init(|i| store.create_node(quadrants[i], depth, None))?;
    store.set_children(node, children)?;
    store.set_leaf_state(node, false)?;
    // Cleared last, so a partial failure keeps the star referenced.
    store.clear_star(node)?;
    debug!("Subdivided node {} at depth {}", node, state.depth);
    Ok(children)
}

pub fn is_leaf<S: Store>(store: &S, node: NodeId) -> Result<bool> {
    let kind = store.node(node)?.kind(node)?;
    Ok(matches!(kind, NodeKind::Leaf(_)))
}

pub fn contains_star<S: Store>(store: &S, node: NodeId) -> Result<bool> {
    let kind = store.node(node)?.kind(node)?;
    Ok(matches!(kind, NodeKind::Leaf(Some(_))))
}
