#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic replay system that executes player programs against a
//! world.
//!
//! Commands are processed strictly one at a time, in sequence order. Each
//! completed command appends a narration line to the run log and notifies
//! the observer with the player's position, so a presentation layer can
//! animate the run incrementally while the core stays delay-agnostic. The
//! world is borrowed read-only; every invocation produces a fresh
//! [`RunState`], which makes re-running the same program against the same
//! world produce an identical log.

use code_quest_core::{CellCoord, Command, Event, GridBounds, Outcome};
use code_quest_world::{query, World};

/// Transient product of replaying one program against a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunState {
    position: CellCoord,
    log: Vec<String>,
    outcome: Outcome,
}

impl RunState {
    /// Cell the player occupied when the run terminated.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.position
    }

    /// Ordered narration lines accumulated during the run.
    #[must_use]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Terminal classification of the run.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// Replays the provided commands strictly in order against the world.
///
/// The observer fires once per emitted event with the player's position
/// after the step. A move that lands on a trap terminates the run
/// immediately; remaining commands are never examined. Otherwise the final
/// position is compared against the goal exactly once, after the last
/// command.
pub fn run<F>(world: &World, commands: &[Command], mut observer: F) -> RunState
where
    F: FnMut(&Event, CellCoord),
{
    let bounds = query::bounds(world);
    let mut position = query::start(world);
    let mut log = Vec::new();

    for command in commands {
        match execute(world, bounds, &mut position, *command) {
            Step::Advanced(event) => {
                record(&event, position, &mut log, &mut observer);
            }
            Step::Terminated(event) => {
                record(&event, position, &mut log, &mut observer);
                return RunState {
                    position,
                    log,
                    outcome: Outcome::TrapHit,
                };
            }
        }
    }

    let (event, outcome) = if position == query::goal(world) {
        (Event::RunSucceeded, Outcome::Success)
    } else {
        (Event::RunFailed { at: position }, Outcome::Incomplete)
    };
    record(&event, position, &mut log, &mut observer);

    RunState {
        position,
        log,
        outcome,
    }
}

enum Step {
    Advanced(Event),
    Terminated(Event),
}

fn execute(world: &World, bounds: GridBounds, position: &mut CellCoord, command: Command) -> Step {
    match command {
        Command::MoveUp => slide(world, bounds, position, 0, -1),
        Command::MoveDown => slide(world, bounds, position, 0, 1),
        Command::MoveLeft => slide(world, bounds, position, -1, 0),
        Command::MoveRight | Command::MoveForward => slide(world, bounds, position, 1, 0),
        Command::Jump => {
            // Jumps skip trap detection entirely, landing cell included.
            *position = bounds.offset_clamped(*position, 2, 0);
            Step::Advanced(Event::PlayerJumped { to: *position })
        }
        Command::SenseTrap => {
            let nearby =
                cardinal_neighbors(*position, bounds).any(|cell| query::is_trap(world, cell));
            Step::Advanced(Event::TrapSensed { nearby })
        }
    }
}

fn slide(
    world: &World,
    bounds: GridBounds,
    position: &mut CellCoord,
    columns: i64,
    rows: i64,
) -> Step {
    // A move against a boundary keeps the position but still consumes the
    // step and re-checks the trap at the resulting cell.
    *position = bounds.offset_clamped(*position, columns, rows);
    if query::is_trap(world, *position) {
        Step::Terminated(Event::TrapHit { at: *position })
    } else {
        Step::Advanced(Event::PlayerMoved { to: *position })
    }
}

fn record<F>(event: &Event, position: CellCoord, log: &mut Vec<String>, observer: &mut F)
where
    F: FnMut(&Event, CellCoord),
{
    log.push(event.to_string());
    observer(event, position);
}

fn cardinal_neighbors(cell: CellCoord, bounds: GridBounds) -> NeighborIter {
    let mut neighbors = NeighborIter::default();

    if cell.row() > 0 {
        neighbors.push(CellCoord::new(cell.column(), cell.row() - 1));
    }
    if cell.column() > 0 {
        neighbors.push(CellCoord::new(cell.column() - 1, cell.row()));
    }
    if cell.column() + 1 < bounds.columns() {
        neighbors.push(CellCoord::new(cell.column() + 1, cell.row()));
    }
    if cell.row() + 1 < bounds.rows() {
        neighbors.push(CellCoord::new(cell.column(), cell.row() + 1));
    }

    neighbors
}

#[derive(Clone, Debug, Default)]
struct NeighborIter {
    buffer: [Option<CellCoord>; 4],
    len: usize,
    cursor: usize,
}

impl NeighborIter {
    fn push(&mut self, cell: CellCoord) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use code_quest_core::{CellCoord, GridBounds};

    use super::cardinal_neighbors;

    #[test]
    fn corner_cells_have_two_neighbors() {
        let bounds = GridBounds::new(5, 5);
        let neighbors: Vec<CellCoord> = cardinal_neighbors(CellCoord::new(0, 0), bounds).collect();

        assert_eq!(
            neighbors,
            vec![CellCoord::new(1, 0), CellCoord::new(0, 1)]
        );
    }

    #[test]
    fn interior_cells_have_four_neighbors() {
        let bounds = GridBounds::new(5, 5);
        let neighbors: Vec<CellCoord> = cardinal_neighbors(CellCoord::new(2, 2), bounds).collect();

        assert_eq!(
            neighbors,
            vec![
                CellCoord::new(2, 1),
                CellCoord::new(1, 2),
                CellCoord::new(3, 2),
                CellCoord::new(2, 3),
            ]
        );
    }

    #[test]
    fn track_cells_only_expose_in_bounds_neighbors() {
        let bounds = GridBounds::new(7, 1);
        let neighbors: Vec<CellCoord> = cardinal_neighbors(CellCoord::new(3, 0), bounds).collect();

        assert_eq!(
            neighbors,
            vec![CellCoord::new(2, 0), CellCoord::new(4, 0)]
        );
    }
}
