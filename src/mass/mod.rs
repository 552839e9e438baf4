mod moments;

use log::debug;
use log::trace;
pub use moments::MassMoments;

use crate::error::Result;
use crate::geometry::MVec;
use crate::node::NodeId;
use crate::node::NodeKind;
use crate::node::RootIndex;
use crate::store::read_star;
use crate::store::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    TotalMass,
    CenterOfMass,
    Both,
}

impl Target {
    fn writes_total_mass(self) -> bool {
        matches!(self, Target::TotalMass | Target::Both)
    }

    fn writes_center_of_mass(self) -> bool {
        matches!(self, Target::CenterOfMass | Target::Both)
    }
}

/// Recomputes the total mass of every node in the tree and returns
/// the mass of the root.
pub fn update_total_mass<S: Store>(store: &mut S, root: RootIndex) -> Result<f64> {
    let (mass, _) = update_root(store, root, Target::TotalMass)?;
    Ok(mass)
}

/// Recomputes the center of mass of every node in the tree and
/// returns that of the root. The masses used for weighting are
/// recomputed along the way, so this does not depend on a previous
/// [`update_total_mass`]. Nodes without mass get the zero vector.
pub fn update_center_of_mass<S: Store>(store: &mut S, root: RootIndex) -> Result<MVec> {
    let (_, center_of_mass) = update_root(store, root, Target::CenterOfMass)?;
    Ok(center_of_mass)
}

/// Both of the above in a single pass.
pub fn update_mass_moments<S: Store>(store: &mut S, root: RootIndex) -> Result<(f64, MVec)> {
    update_root(store, root, Target::Both)
}

fn update_root<S: Store>(store: &mut S, root: RootIndex, target: Target) -> Result<(f64, MVec)> {
    let root_id = store.find_root(root)?;
    debug!("Updating {:?} of tree {} (root {})", target, root, root_id);
    update_node(store, root_id, 0, target)
}

fn update_node<S: Store>(
    store: &mut S,
    node: NodeId,
    depth: usize,
    target: Target,
) -> Result<(f64, MVec)> {
    let state = store.node(node)?;
    state.check_shape(node, depth)?;
    let (mass, center_of_mass) = match state.kind(node)? {
        NodeKind::Leaf(None) => (0.0, MVec::ZERO),
        NodeKind::Leaf(Some(star)) => {
            let star = read_star(store, star)?;
            (star.mass, star.pos)
        }
        NodeKind::Internal(children) => {
            let mut moments = MassMoments::default();
            for child in children {
                let (mass, center_of_mass) = update_node(store, child, depth + 1, target)?;
                moments.add_mass_at(&center_of_mass, mass);
            }
            (moments.total(), moments.center_of_mass())
        }
    };
    if target.writes_total_mass() {
        store.update_total_mass(node, mass)?;
    }
    if target.writes_center_of_mass() {
        store.update_center_of_mass(node, center_of_mass)?;
    }
    trace!("Node {}: mass {} at {}", node, mass, center_of_mass);
    Ok((mass, center_of_mass))
}
