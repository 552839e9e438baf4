use derive_more::From;
use derive_more::Into;
use generational_arena::Index;

use crate::error::ForestError;
use crate::error::Result;
use crate::geometry::MVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, From, Into)]
pub struct StarId(Index);

impl std::fmt::Display for StarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (index, generation) = self.0.into_raw_parts();
        write!(f, "{}v{}", index, generation)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub pos: MVec,
    pub vel: MVec,
    pub mass: f64,
}

impl Star {
    pub fn new(pos: MVec, vel: MVec, mass: f64) -> Self {
        Self { pos, vel, mass }
    }

    pub fn at_rest(pos: MVec, mass: f64) -> Self {
        Self::new(pos, MVec::ZERO, mass)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.pos.is_finite() {
            return Err(ForestError::Parse(format!(
                "star position {} is not finite",
                self.pos
            )));
        }
        if !self.vel.is_finite() {
            return Err(ForestError::Parse(format!(
                "star velocity {} is not finite",
                self.vel
            )));
        }
        if !self.mass.is_finite() || self.mass < 0.0 {
            return Err(ForestError::Parse(format!(
                "star mass {} is not a finite non-negative number",
                self.mass
            )));
        }
        Ok(())
    }
}
