use log::debug;

use crate::error::Result;
use crate::node::NodeId;
use crate::node::NodeKind;
use crate::node::RootIndex;
use crate::store::read_star;
use crate::store::Store;

const EMPTY_LEAF: &str = "[0 0]";

/// Renders the tree as nested brackets, one level per depth.
///
/// An internal node shows its cached center of mass and total mass,
/// followed by its four children in quadrant order. A leaf shows the
/// position and mass of its star, or `[0 0]` if it is empty. Cached
/// aggregates are printed as they are, so a tree that was never
/// aggregated shows zeros.
pub fn render<S: Store>(store: &S, root: RootIndex) -> Result<String> {
    let root_id = store.find_root(root)?;
    debug!("Rendering tree {}", root);
    let mut out = String::new();
    render_node(store, root_id, &mut out)?;
    Ok(out)
}

fn render_node<S: Store>(store: &S, node: NodeId, out: &mut String) -> Result<()> {
    let state = store.node(node)?;
    match state.kind(node)? {
        NodeKind::Leaf(None) => out.push_str(EMPTY_LEAF),
        NodeKind::Leaf(Some(star)) => {
            let star = read_star(store, star)?;
            write_entry(out, star.pos.x, star.pos.y, star.mass);
            out.push(']');
        }
        NodeKind::Internal(children) => {
            write_entry(
                out,
                state.center_of_mass.x,
                state.center_of_mass.y,
                state.total_mass,
            );
            for child in children {
                render_node(store, child, out)?;
            }
            out.push(']');
        }
    }
    Ok(())
}

fn write_entry(out: &mut String, x: f64, y: f64, mass: f64) {
    out.push_str(&format!(
        "[{:.0} {:.0} {:.0}",
        rounded(x),
        rounded(y),
        rounded(mass)
    ));
}

/// Avoids printing "-0" for small negative values.
fn rounded(x: f64) -> f64 {
    let x = x.round();
    if x == 0.0 {
        0.0
    } else {
        x
    }
}
