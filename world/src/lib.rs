#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Immutable world state for a Code Quest session.
//!
//! A [`World`] bundles the grid bounds, the start and goal cells, and the
//! trap set fixed at creation time. The replay system borrows the world
//! read-only for each run; nothing here is mutated after construction, so
//! runs against the same world are trivially repeatable.

pub mod trap_field;

use std::{error::Error, fmt};

use code_quest_core::{CellCoord, GridBounds};
use rand::Rng;

pub use trap_field::TrapFieldError;

/// Number of traps placed in a freshly generated world.
pub const DEFAULT_TRAP_COUNT: usize = 5;

/// Duplicate-free collection of trap cells fixed at world creation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrapSet {
    cells: Vec<CellCoord>,
}

impl TrapSet {
    /// Creates a trap set from the provided cells, discarding duplicates
    /// while preserving first-occurrence order.
    #[must_use]
    pub fn from_cells(cells: Vec<CellCoord>) -> Self {
        let mut deduplicated: Vec<CellCoord> = Vec::with_capacity(cells.len());
        for cell in cells {
            if !deduplicated.contains(&cell) {
                deduplicated.push(cell);
            }
        }
        Self {
            cells: deduplicated,
        }
    }

    /// Creates an empty trap set for worlds without hazards.
    #[must_use]
    pub const fn empty() -> Self {
        Self { cells: Vec::new() }
    }

    /// Number of distinct trap cells in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the set contains no traps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the provided cell holds a trap.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.iter().any(|trap| *trap == cell)
    }

    /// Iterator over the trap cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CellCoord> {
        self.cells.iter()
    }
}

/// Immutable spatial configuration for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    bounds: GridBounds,
    start: CellCoord,
    goal: CellCoord,
    traps: TrapSet,
}

impl World {
    /// Creates a world from explicit parts, validating every invariant.
    ///
    /// The start and goal must be distinct in-bounds cells and the trap set
    /// must avoid both of them; violations surface as [`WorldError`]
    /// values rather than panics so a shell can report them and continue.
    pub fn new(
        bounds: GridBounds,
        start: CellCoord,
        goal: CellCoord,
        traps: TrapSet,
    ) -> Result<Self, WorldError> {
        validate_geometry(bounds, start, goal)?;

        for trap in traps.iter() {
            if !bounds.contains(*trap) {
                return Err(WorldError::TrapOutOfBounds(*trap));
            }
            if *trap == start || *trap == goal {
                return Err(WorldError::TrapOnReservedCell(*trap));
            }
        }

        Ok(Self {
            bounds,
            start,
            goal,
            traps,
        })
    }

    /// Generates a world whose traps are sampled from the provided random
    /// source.
    ///
    /// Geometry is validated before sampling begins so the rejection loop
    /// in [`trap_field::generate`] is never entered with a configuration
    /// that cannot terminate.
    pub fn generate<R>(
        bounds: GridBounds,
        start: CellCoord,
        goal: CellCoord,
        trap_count: usize,
        rng: &mut R,
    ) -> Result<Self, WorldError>
    where
        R: Rng + ?Sized,
    {
        validate_geometry(bounds, start, goal)?;

        let traps = trap_field::generate(bounds, start, goal, trap_count, rng)
            .map_err(WorldError::TrapField)?;

        Ok(Self {
            bounds,
            start,
            goal,
            traps,
        })
    }
}

fn validate_geometry(
    bounds: GridBounds,
    start: CellCoord,
    goal: CellCoord,
) -> Result<(), WorldError> {
    if bounds.is_empty() {
        return Err(WorldError::EmptyBounds);
    }
    if !bounds.contains(start) {
        return Err(WorldError::StartOutOfBounds(start));
    }
    if !bounds.contains(goal) {
        return Err(WorldError::GoalOutOfBounds(goal));
    }
    if start == goal {
        return Err(WorldError::StartEqualsGoal(start));
    }
    Ok(())
}

/// Errors that can occur while assembling a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldError {
    /// The grid contains no playable cells.
    EmptyBounds,
    /// The start cell lies outside the grid.
    StartOutOfBounds(CellCoord),
    /// The goal cell lies outside the grid.
    GoalOutOfBounds(CellCoord),
    /// The start and goal cells coincide.
    StartEqualsGoal(CellCoord),
    /// A trap cell lies outside the grid.
    TrapOutOfBounds(CellCoord),
    /// A trap cell collides with the start or goal cell.
    TrapOnReservedCell(CellCoord),
    /// Trap sampling rejected the requested configuration.
    TrapField(TrapFieldError),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBounds => write!(f, "the grid has no playable cells"),
            Self::StartOutOfBounds(cell) => {
                write!(f, "start cell {cell} lies outside the grid")
            }
            Self::GoalOutOfBounds(cell) => {
                write!(f, "goal cell {cell} lies outside the grid")
            }
            Self::StartEqualsGoal(cell) => {
                write!(f, "start and goal both occupy {cell}")
            }
            Self::TrapOutOfBounds(cell) => {
                write!(f, "trap cell {cell} lies outside the grid")
            }
            Self::TrapOnReservedCell(cell) => {
                write!(f, "trap cell {cell} collides with the start or goal")
            }
            Self::TrapField(error) => write!(f, "could not place traps: {error}"),
        }
    }
}

impl Error for WorldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TrapField(error) => Some(error),
            _ => None,
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use code_quest_core::{CellCoord, GridBounds};

    use super::{TrapSet, World};

    /// Provides the rectangular bounds of the world grid.
    #[must_use]
    pub fn bounds(world: &World) -> GridBounds {
        world.bounds
    }

    /// Cell the player occupies when a run begins.
    #[must_use]
    pub fn start(world: &World) -> CellCoord {
        world.start
    }

    /// Cell the player must reach for a run to succeed.
    #[must_use]
    pub fn goal(world: &World) -> CellCoord {
        world.goal
    }

    /// Reports whether the provided cell holds a trap.
    #[must_use]
    pub fn is_trap(world: &World, cell: CellCoord) -> bool {
        world.traps.contains(cell)
    }

    /// Provides read-only access to the trap set.
    #[must_use]
    pub fn traps(world: &World) -> &TrapSet {
        &world.traps
    }
}
