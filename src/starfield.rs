use crate::orbit::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::cell::OnceCell;

/// Half-width of the cube the background stars are scattered in.
pub(crate) const STAR_EXTENT: f64 = 50.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Starfield {
    points: Vec<Vec3>,
}

impl Starfield {
    pub(crate) fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }
}

pub(crate) fn generate_starfield<R: Rng>(count: usize, rng: &mut R) -> Starfield {
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(Vec3 {
            x: rng.gen_range(-STAR_EXTENT..=STAR_EXTENT),
            y: rng.gen_range(-STAR_EXTENT..=STAR_EXTENT),
            z: rng.gen_range(-STAR_EXTENT..=STAR_EXTENT),
        });
    }
    Starfield { points }
}

/// Session starfield: sampled on first use, then handed out unchanged so the
/// background does not jitter between renders.
pub(crate) struct StarfieldCache {
    count: usize,
    seed: Option<u64>,
    field: OnceCell<Starfield>,
}

impl StarfieldCache {
    pub(crate) fn new(count: usize, seed: Option<u64>) -> Self {
        Self { count, seed, field: OnceCell::new() }
    }

    pub(crate) fn get(&self) -> &Starfield {
        self.field.get_or_init(|| {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let field = generate_starfield(self.count, &mut rng);
            tracing::debug!(stars = field.len(), seed = ?self.seed, "starfield generated");
            field
        })
    }
}
