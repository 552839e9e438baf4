use std::iter::Sum;
use std::ops::AddAssign;

use crate::geometry::MVec;

/// Running total of mass and mass-weighted position. Contributions
/// without mass are ignored, so they never shift the center of mass.
#[derive(Clone, Default)]
pub struct MassMoments {
    total: f64,
    weighted_position_sum: MVec,
    count: usize,
}

impl MassMoments {
    pub fn total(&self) -> f64 {
        self.total
    }

    /// The zero vector if nothing with mass was added. Only meaningful
    /// together with a nonzero [`MassMoments::total`].
    pub fn center_of_mass(&self) -> MVec {
        if self.count == 0 {
            return MVec::ZERO;
        }
        self.weighted_position_sum / self.total
    }

    pub fn add_mass_at(&mut self, pos: &MVec, mass: f64) {
        if mass == 0.0 {
            return;
        }
        self.count += 1;
        self.total += mass;
        self.weighted_position_sum += *pos * mass;
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Sum<(f64, MVec)> for MassMoments {
    fn sum<I: Iterator<Item = (f64, MVec)>>(iter: I) -> Self {
        let mut s = Self::default();
        for (mass, pos) in iter {
            s.add_mass_at(&pos, mass);
        }
        s
    }
}

impl AddAssign<&MassMoments> for MassMoments {
    fn add_assign(&mut self, rhs: &MassMoments) {
        self.count += rhs.count;
        self.total += rhs.total;
        self.weighted_position_sum += rhs.weighted_position_sum;
    }
}

impl std::fmt::Debug for MassMoments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Moments({:.3?} @ {:.3?})",
            self.total(),
            self.center_of_mass()
        )
    }
}
