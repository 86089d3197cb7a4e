#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Code Quest engine.
//!
//! This crate defines the message surface that connects the presentation
//! adapter, the immutable world, and the pure systems. The parser system
//! produces ordered [`Command`] sequences, the replay system executes them
//! against a world and broadcasts [`Event`] values as each command
//! completes, and adapters render those events as narration lines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Code Quest.";

/// Commands that make up the closed program vocabulary.
///
/// The serde representation doubles as the wire format: each variant
/// serializes to the snake_case token players write into a JSON program,
/// e.g. `"move_right"` or `"sense_trap"`. [`Command::token`] and
/// [`Command::from_token`] expose the same mapping for block-built
/// programs that never pass through a deserializer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Moves the player one cell toward decreasing row indices.
    MoveUp,
    /// Moves the player one cell toward increasing row indices.
    MoveDown,
    /// Moves the player one cell toward decreasing column indices.
    MoveLeft,
    /// Moves the player one cell toward increasing column indices.
    MoveRight,
    /// Moves the player one cell along the primary (column) axis.
    MoveForward,
    /// Advances the player two cells along the primary axis without
    /// performing any trap detection.
    Jump,
    /// Reports whether a cardinal neighbor holds a trap, without moving.
    SenseTrap,
}

/// Every command in the vocabulary, in declaration order.
pub const COMMAND_VOCABULARY: [Command; 7] = [
    Command::MoveUp,
    Command::MoveDown,
    Command::MoveLeft,
    Command::MoveRight,
    Command::MoveForward,
    Command::Jump,
    Command::SenseTrap,
];

impl Command {
    /// Returns the wire token that names the command.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::MoveUp => "move_up",
            Self::MoveDown => "move_down",
            Self::MoveLeft => "move_left",
            Self::MoveRight => "move_right",
            Self::MoveForward => "move_forward",
            Self::Jump => "jump",
            Self::SenseTrap => "sense_trap",
        }
    }

    /// Resolves a wire token back into a command, if it names one.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        COMMAND_VOCABULARY
            .into_iter()
            .find(|command| command.token() == token)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Rectangular extent of the playable grid measured in whole cells.
///
/// A track world is a grid with a single row; every position invariant is
/// phrased against these bounds, so clamped movement can never produce a
/// cell outside them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    columns: u32,
    rows: u32,
}

impl GridBounds {
    /// Creates a new bounds descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns spanned by the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows spanned by the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Reports whether the grid contains no playable cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Reports whether the provided cell lies within the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Offsets a cell by whole columns and rows, clamping each axis to the
    /// grid. For non-empty bounds the result always satisfies
    /// [`GridBounds::contains`].
    #[must_use]
    pub fn offset_clamped(&self, cell: CellCoord, columns: i64, rows: i64) -> CellCoord {
        CellCoord::new(
            clamp_axis(cell.column(), columns, self.columns),
            clamp_axis(cell.row(), rows, self.rows),
        )
    }
}

fn clamp_axis(value: u32, delta: i64, extent: u32) -> u32 {
    let limit = i64::from(extent.saturating_sub(1));
    let shifted = i64::from(value).saturating_add(delta);
    u32::try_from(shifted.clamp(0, limit)).unwrap_or(0)
}

/// Events broadcast by the replay system as each command completes.
///
/// The `Display` impl renders the narration line appended to the run log
/// and streamed to the presentation adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the player finished a single-cell move.
    PlayerMoved {
        /// Cell the player occupies after the move, clamped to bounds.
        to: CellCoord,
    },
    /// Confirms that the player jumped two cells along the primary axis.
    PlayerJumped {
        /// Cell the player occupies after the jump, clamped to bounds.
        to: CellCoord,
    },
    /// Reports the result of probing the cardinal neighbors for traps.
    TrapSensed {
        /// Indicates whether any in-bounds neighbor holds a trap.
        nearby: bool,
    },
    /// Announces that the player landed on a trap, ending the run.
    TrapHit {
        /// Trap cell the player landed on.
        at: CellCoord,
    },
    /// Announces that the run ended on the goal cell.
    RunSucceeded,
    /// Announces that the run ended away from the goal cell.
    RunFailed {
        /// Cell the player occupied when the program ran out.
        at: CellCoord,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerMoved { to } => write!(f, "Moved to {to}"),
            Self::PlayerJumped { to } => write!(f, "Jumped to {to}"),
            Self::TrapSensed { nearby: true } => write!(f, "Trap nearby!"),
            Self::TrapSensed { nearby: false } => write!(f, "No trap nearby."),
            Self::TrapHit { at } => write!(f, "Trap hit at {at}! Game over."),
            Self::RunSucceeded => write!(f, "Success! You reached the treasure."),
            Self::RunFailed { at } => write!(f, "Try again. You're at {at}"),
        }
    }
}

/// Terminal classification of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The program finished on the goal cell.
    Success,
    /// A move landed on a trap before the program finished.
    TrapHit,
    /// The program finished away from the goal cell.
    Incomplete,
}
