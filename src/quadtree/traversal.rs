use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::geometry::MVec;
use crate::node::NodeId;
use crate::node::NodeKind;
use crate::node::RootIndex;
use crate::star::StarId;
use crate::store::Store;

/// Descends from the root of the tree by the quadrant rule and returns
/// the leaf that `pos` belongs to.
pub fn locate_leaf<S: Store>(store: &S, root: RootIndex, pos: &MVec) -> Result<NodeId> {
    let mut node = store.find_root(root)?;
    let mut depth = 0;
    loop {
        let state = store.node(node)?;
        state.check_shape(node, depth)?;
        match state.kind(node)? {
            NodeKind::Leaf(_) => return Ok(node),
            NodeKind::Internal(children) => {
                node = children[state.bounds.quadrant(pos).index()];
                depth += 1;
            }
        }
    }
}

/// Calls `closure` on every leaf of the tree, visiting children in
/// quadrant order.
pub fn depth_first_map_leaf<S: Store>(
    store: &S,
    root: RootIndex,
    closure: &mut impl FnMut(&BoundingBox, Option<StarId>),
) -> Result<()> {
    let root_id = store.find_root(root)?;
    map_leaf(store, root_id, 0, closure)
}

fn map_leaf<S: Store>(
    store: &S,
    node: NodeId,
    depth: usize,
    closure: &mut impl FnMut(&BoundingBox, Option<StarId>),
) -> Result<()> {
    let state = store.node(node)?;
    state.check_shape(node, depth)?;
    match state.kind(node)? {
        NodeKind::Leaf(star) => {
            closure(&state.bounds, star);
        }
        NodeKind::Internal(children) => {
            for child in children {
                map_leaf(store, child, depth + 1, closure)?;
            }
        }
    }
    Ok(())
}

pub fn collect_stars<S: Store>(store: &S, root: RootIndex) -> Result<Vec<StarId>> {
    let mut stars = vec![];
    depth_first_map_leaf(store, root, &mut |_, star| stars.extend(star))?;
    Ok(stars)
}
