pub mod command_line_options;
pub mod error;
pub mod geometry;
pub mod ics;
pub mod mass;
pub mod node;
pub mod parameters;
pub mod quadtree;
pub mod registry;
pub mod render;
pub mod star;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub mod prelude {
    pub use super::error::ForestError;
    pub use super::error::Missing;
    pub use super::error::Result;
    pub use super::error::StoreError;
    pub use super::geometry::BoundingBox;
    pub use super::geometry::MVec;
    pub use super::geometry::Quadrant;
    pub use super::mass::update_center_of_mass;
    pub use super::mass::update_mass_moments;
    pub use super::mass::update_total_mass;
    pub use super::node::NodeId;
    pub use super::node::NodeKind;
    pub use super::node::NodeState;
    pub use super::node::RootIndex;
    pub use super::quadtree::insert;
    pub use super::registry::create_tree;
    pub use super::registry::delete_all_nodes;
    pub use super::registry::delete_all_stars;
    pub use super::registry::list_stars;
    pub use super::registry::Forest;
    pub use super::render::render;
    pub use super::star::Star;
    pub use super::star::StarId;
    pub use super::store::MemoryStore;
    pub use super::store::SharedStore;
    pub use super::store::Store;
}
