use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::geometry::MVec;
use crate::parameters::GalaxyParameters;
use crate::star::Star;

pub const DEFAULT_SEED: u64 = 123;

/// Samples stars uniformly over a disk centered at the origin, rotating
/// counter-clockwise like a rigid body.
pub fn sample_disk(parameters: &GalaxyParameters) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(parameters.seed);
    (0..parameters.num_stars)
        .map(|_| sample_star(&mut rng, parameters))
        .collect()
}

fn sample_star(rng: &mut StdRng, parameters: &GalaxyParameters) -> Star {
    // sqrt for a uniform area density
    let r = parameters.radius * rng.gen::<f64>().sqrt();
    let angle = rng.gen_range(0.0..TAU);
    let direction = MVec::new(angle.cos(), angle.sin());
    let speed = if parameters.radius > 0.0 {
        parameters.rotation_speed * r / parameters.radius
    } else {
        0.0
    };
    let mass = if parameters.min_mass < parameters.max_mass {
        rng.gen_range(parameters.min_mass..parameters.max_mass)
    } else {
        parameters.min_mass
    };
    Star::new(direction * r, direction.perp() * speed, mass)
}

#[cfg(test)]
mod tests {
    use super::sample_disk;
    use crate::parameters::GalaxyParameters;
    use crate::test_utils::assert_float_is_close_high_error;

    fn parameters() -> GalaxyParameters {
        GalaxyParameters {
            num_stars: 500,
            radius: 30.0,
            min_mass: 1.0,
            max_mass: 3.0,
            rotation_speed: 2.0,
            ..Default::default()
        }
    }

    #[test]
    fn stars_lie_within_the_disk() {
        let parameters = parameters();
        let stars = sample_disk(&parameters);
        assert_eq!(stars.len(), parameters.num_stars);
        for star in stars.iter() {
            assert!(star.pos.length() <= parameters.radius);
            assert!(star.mass >= parameters.min_mass && star.mass < parameters.max_mass);
            star.validate().unwrap();
        }
    }

    #[test]
    fn velocity_is_tangential() {
        for star in sample_disk(&parameters()).iter() {
            assert_float_is_close_high_error(star.pos.dot(star.vel) / 100.0, 0.0);
            assert!(star.vel.length() <= 2.0 + 1e-10);
        }
    }

    #[test]
    fn sampling_is_reproducible() {
        assert_eq!(sample_disk(&parameters()), sample_disk(&parameters()));
        let other = GalaxyParameters {
            seed: 5,
            ..parameters()
        };
        assert_ne!(sample_disk(&parameters()), sample_disk(&other));
    }

    #[test]
    fn fixed_mass() {
        let parameters = GalaxyParameters {
            min_mass: 2.0,
            max_mass: 2.0,
            ..parameters()
        };
        assert!(sample_disk(&parameters).iter().all(|star| star.mass == 2.0));
    }
}
