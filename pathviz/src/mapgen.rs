//! Random barrier maps.

use pathviz_core::{CellKind, Grid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator, or one seeded from the OS when `seed` is `None`.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Map generator writing barriers into a [`Grid`].
pub struct MapGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MapGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Turn each empty cell into a barrier with probability `density`.
    /// Endpoints and other painted cells are left alone.
    ///
    /// Returns the number of barriers placed.
    pub fn scatter(&mut self, grid: &mut Grid, density: f64) -> usize {
        let mut placed = 0;
        for p in grid.bounds() {
            if grid.kind(p) != Some(CellKind::Empty) {
                continue;
            }
            let r: f64 = self.rng.random();
            if r < density {
                grid.set_kind(p, CellKind::Barrier);
                placed += 1;
            }
        }
        log::debug!("mapgen: {placed} barriers at density {density}");
        placed
    }
}
