use glam::DVec2;

pub type MVec = DVec2;

pub const NUM_SUBDIVISIONS: usize = 4;

/// One of the four children of a subdivided node. The discriminant
/// is the index into the child array of the parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; NUM_SUBDIVISIONS] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// The quadrant of `pos` relative to `center`. A position that lies
    /// exactly on one of the axes through the center belongs to the
    /// south/west side of that axis.
    pub fn of(center: &MVec, pos: &MVec) -> Self {
        match (pos.x > center.x, pos.y > center.y) {
            (true, true) => Quadrant::NorthEast,
            (true, false) => Quadrant::SouthEast,
            (false, true) => Quadrant::NorthWest,
            (false, false) => Quadrant::SouthWest,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    fn direction(self) -> MVec {
        match self {
            Quadrant::NorthWest => MVec::new(-1.0, 1.0),
            Quadrant::NorthEast => MVec::new(1.0, 1.0),
            Quadrant::SouthWest => MVec::new(-1.0, -1.0),
            Quadrant::SouthEast => MVec::new(1.0, -1.0),
        }
    }
}

/// The square region covered by a node.
#[derive(Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub center: MVec,
    pub width: f64,
}

impl BoundingBox {
    pub fn new(center: MVec, width: f64) -> Self {
        debug_assert!(width >= 0.0);
        Self { center, width }
    }

    pub fn min(&self) -> MVec {
        self.center - MVec::splat(self.width / 2.0)
    }

    pub fn max(&self) -> MVec {
        self.center + MVec::splat(self.width / 2.0)
    }

    pub fn contains(&self, pos: &MVec) -> bool {
        let (min, max) = (self.min(), self.max());
        min.x <= pos.x && pos.x <= max.x && min.y <= pos.y && pos.y <= max.y
    }

    pub fn quadrant(&self, pos: &MVec) -> Quadrant {
        Quadrant::of(&self.center, pos)
    }

    pub fn get_quadrant(&self, quadrant: Quadrant) -> Self {
        let offset = quadrant.direction() * (self.width / 4.0);
        Self::new(self.center + offset, self.width / 2.0)
    }

    pub fn get_quadrants(&self) -> [Self; NUM_SUBDIVISIONS] {
        Quadrant::ALL.map(|quadrant| self.get_quadrant(quadrant))
    }

    /// Whether subdividing this box still produces four distinct
    /// children. Once the quarter width vanishes against the center
    /// coordinates, every child would coincide with this box.
    pub fn can_subdivide(&self) -> bool {
        let offset = self.width / 4.0;
        offset > 0.0
            && self.center.x + offset != self.center.x
            && self.center.x - offset != self.center.x
            && self.center.y + offset != self.center.y
            && self.center.y - offset != self.center.y
    }

    /// Returns the number of subdivisions below this box that are
    /// needed before `a` and `b` end up in different quadrants, or
    /// `None` if the geometry collapses first.
    pub fn separation_depth(&self, a: &MVec, b: &MVec) -> Option<usize> {
        let mut bounds = *self;
        let mut depth = 1;
        loop {
            if !bounds.can_subdivide() {
                return None;
            }
            let quadrant = bounds.quadrant(a);
            if quadrant != bounds.quadrant(b) {
                return Some(depth);
            }
            bounds = bounds.get_quadrant(quadrant);
            depth += 1;
        }
    }
}

impl std::fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundingBox({:.3?} w={:.3})", self.center, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::BoundingBox;
    use super::MVec;
    use super::Quadrant;
    use crate::test_utils::assert_float_is_close;
    use crate::test_utils::assert_vec_is_close;

    #[test]
    fn quadrant_rule() {
        let center = MVec::new(1.0, -1.0);
        let q = |x, y| Quadrant::of(&center, &MVec::new(x, y));
        assert_eq!(q(2.0, 0.0), Quadrant::NorthEast);
        assert_eq!(q(2.0, -2.0), Quadrant::SouthEast);
        assert_eq!(q(0.0, 0.0), Quadrant::NorthWest);
        assert_eq!(q(0.0, -2.0), Quadrant::SouthWest);
    }

    #[test]
    fn ties_go_south_and_west() {
        let center = MVec::ZERO;
        let q = |x, y| Quadrant::of(&center, &MVec::new(x, y));
        assert_eq!(q(0.0, 0.0), Quadrant::SouthWest);
        assert_eq!(q(0.0, 1.0), Quadrant::NorthWest);
        assert_eq!(q(1.0, 0.0), Quadrant::SouthEast);
        assert_eq!(q(-1.0, 0.0), Quadrant::SouthWest);
    }

    #[test]
    fn quadrant_only_depends_on_signs() {
        let center = MVec::new(3.0, 4.0);
        for (dx, dy) in [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
            let near = Quadrant::of(&center, &(center + MVec::new(dx * 1e-9, dy * 1e-9)));
            let far = Quadrant::of(&center, &(center + MVec::new(dx * 1e9, dy * 1e9)));
            assert_eq!(near, far);
        }
    }

    #[test]
    fn quadrant_indices_match_child_order() {
        for (i, quadrant) in Quadrant::ALL.iter().enumerate() {
            assert_eq!(quadrant.index(), i);
        }
    }

    #[test]
    fn subdivision_geometry() {
        let bounds = BoundingBox::new(MVec::new(0.0, 0.0), 100.0);
        let quadrants = bounds.get_quadrants();
        assert_vec_is_close(quadrants[0].center, MVec::new(-25.0, 25.0));
        assert_vec_is_close(quadrants[1].center, MVec::new(25.0, 25.0));
        assert_vec_is_close(quadrants[2].center, MVec::new(-25.0, -25.0));
        assert_vec_is_close(quadrants[3].center, MVec::new(25.0, -25.0));
        for quadrant in quadrants.iter() {
            assert_float_is_close(quadrant.width, 50.0);
        }
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let bounds = BoundingBox::new(MVec::new(3.0, -7.0), 16.0);
        let quadrants = bounds.get_quadrants();
        let area: f64 = quadrants.iter().map(|q| q.width * q.width).sum();
        assert_float_is_close(area, bounds.width * bounds.width);
        // Neighbouring children share exactly one edge.
        assert_float_is_close(quadrants[0].max().x, quadrants[1].min().x);
        assert_float_is_close(quadrants[2].max().y, quadrants[0].min().y);
        assert_float_is_close(quadrants[3].max().y, quadrants[1].min().y);
        assert_vec_is_close(quadrants[2].min(), bounds.min());
        assert_vec_is_close(quadrants[1].max(), bounds.max());
    }

    #[test]
    fn every_point_lands_in_a_child_that_contains_it() {
        let bounds = BoundingBox::new(MVec::new(0.0, 0.0), 4.0);
        for x in [-2.0, -1.0, 0.0, 0.5, 2.0] {
            for y in [-2.0, -0.5, 0.0, 1.0, 2.0] {
                let pos = MVec::new(x, y);
                let child = bounds.get_quadrant(bounds.quadrant(&pos));
                assert!(child.contains(&pos), "{:?} not in {:?}", pos, child);
            }
        }
    }

    #[test]
    fn separation_depth_of_nearby_points() {
        let bounds = BoundingBox::new(MVec::ZERO, 100.0);
        assert_eq!(
            bounds.separation_depth(&MVec::new(25.0, 25.0), &MVec::new(25.0, -25.0)),
            Some(1)
        );
        assert_eq!(
            bounds.separation_depth(&MVec::new(10.0, 10.0), &MVec::new(30.0, 30.0)),
            Some(2)
        );
    }

    #[test]
    fn identical_points_cannot_be_separated() {
        let bounds = BoundingBox::new(MVec::ZERO, 100.0);
        let pos = MVec::new(12.5, 3.0);
        assert_eq!(bounds.separation_depth(&pos, &pos), None);
    }

    #[test]
    fn collapsed_box_cannot_subdivide() {
        assert!(BoundingBox::new(MVec::ZERO, 1.0).can_subdivide());
        assert!(!BoundingBox::new(MVec::ZERO, 0.0).can_subdivide());
        assert!(!BoundingBox::new(MVec::new(1e20, 1e20), 1e-10).can_subdivide());
    }
}
