//! Rejection-sampled trap placement for freshly generated worlds.

use std::{error::Error, fmt};

use code_quest_core::{CellCoord, GridBounds};
use rand::Rng;

use crate::TrapSet;

/// Produces a trap set of exactly `count` distinct cells.
///
/// Cells are sampled uniformly within `bounds` and accepted only when they
/// are not already chosen and collide with neither `start` nor `goal`.
/// Termination is a statistical property rather than a guarantee: for
/// grids holding more than `count + 2` cells the loop finishes almost
/// surely, and the capacity check below rejects every configuration for
/// which no fixed point exists before sampling begins.
pub fn generate<R>(
    bounds: GridBounds,
    start: CellCoord,
    goal: CellCoord,
    count: usize,
    rng: &mut R,
) -> Result<TrapSet, TrapFieldError>
where
    R: Rng + ?Sized,
{
    let capacity = bounds.cell_count().saturating_sub(2);
    if count as u64 > capacity {
        return Err(TrapFieldError::InsufficientCapacity {
            requested: count,
            capacity,
        });
    }

    let mut cells: Vec<CellCoord> = Vec::with_capacity(count);
    while cells.len() < count {
        let candidate = CellCoord::new(
            rng.gen_range(0..bounds.columns()),
            rng.gen_range(0..bounds.rows()),
        );
        if candidate == start || candidate == goal || cells.contains(&candidate) {
            continue;
        }
        cells.push(candidate);
    }

    Ok(TrapSet::from_cells(cells))
}

/// Errors produced while sampling trap positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapFieldError {
    /// More traps were requested than the grid can hold once the start and
    /// goal cells are reserved.
    InsufficientCapacity {
        /// Number of traps requested by the caller.
        requested: usize,
        /// Number of cells available after reserving start and goal.
        capacity: u64,
    },
}

impl fmt::Display for TrapFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientCapacity {
                requested,
                capacity,
            } => write!(
                f,
                "requested {requested} traps but only {capacity} cells are available"
            ),
        }
    }
}

impl Error for TrapFieldError {}

#[cfg(test)]
mod tests {
    use code_quest_core::{CellCoord, GridBounds};
    use rand::SeedableRng as _;
    use rand_chacha::ChaCha8Rng;

    use super::{generate, TrapFieldError};

    #[test]
    fn fills_a_nearly_saturated_grid() {
        let bounds = GridBounds::new(3, 3);
        let start = CellCoord::new(0, 0);
        let goal = CellCoord::new(2, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        let traps = generate(bounds, start, goal, 7, &mut rng).expect("seven traps fit");

        assert_eq!(traps.len(), 7);
        assert!(!traps.contains(start));
        assert!(!traps.contains(goal));
    }

    #[test]
    fn zero_traps_produce_an_empty_set() {
        let bounds = GridBounds::new(2, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let traps = generate(
            bounds,
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            0,
            &mut rng,
        )
        .expect("an empty request always succeeds");

        assert!(traps.is_empty());
    }

    #[test]
    fn rejects_requests_beyond_capacity() {
        let bounds = GridBounds::new(2, 2);
        let error = generate(
            bounds,
            CellCoord::new(0, 0),
            CellCoord::new(1, 1),
            3,
            &mut ChaCha8Rng::seed_from_u64(1),
        )
        .expect_err("a 2x2 grid holds at most two traps");

        assert_eq!(
            error,
            TrapFieldError::InsufficientCapacity {
                requested: 3,
                capacity: 2,
            }
        );
    }
}
