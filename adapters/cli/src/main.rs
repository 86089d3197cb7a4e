#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Code Quest experience.
//!
//! The adapter owns every presentation concern the engine deliberately
//! avoids: it assembles the program from block tokens or raw JSON text,
//! generates the world, throttles the replay with an artificial per-step
//! delay, and prints the narration stream as it arrives.

use std::{thread, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use code_quest_core::{CellCoord, GridBounds, WELCOME_BANNER};
use code_quest_system_parser as parser;
use code_quest_world::{World, DEFAULT_TRAP_COUNT};
use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha8Rng;

/// Replays a player program against a freshly generated trap grid.
#[derive(Debug, Parser)]
#[command(name = "code-quest")]
struct Cli {
    /// Number of columns in the grid.
    #[arg(long, default_value_t = 5)]
    columns: u32,

    /// Number of rows in the grid; use 1 for a track world.
    #[arg(long, default_value_t = 5)]
    rows: u32,

    /// Number of traps placed in the grid.
    #[arg(long, default_value_t = DEFAULT_TRAP_COUNT)]
    traps: usize,

    /// Seed for trap placement; omit for a different field every run.
    #[arg(long)]
    seed: Option<u64>,

    /// Delay inserted before each narration line, in milliseconds.
    #[arg(long, default_value_t = 400)]
    step_delay_ms: u64,

    /// Program text as a JSON array of command tokens; overrides BLOCKS.
    #[arg(long)]
    program: Option<String>,

    /// Command tokens assembled from blocks, executed in order.
    #[arg(value_name = "BLOCKS")]
    blocks: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    println!("{WELCOME_BANNER}");

    let commands = match parser::parse(&cli.blocks, cli.program.as_deref().unwrap_or("")) {
        Ok(commands) => commands,
        Err(error) => {
            // Parse failures abort only this run attempt; the shell stays
            // usable, so they are narrated rather than treated as fatal.
            println!("{error}");
            return Ok(());
        }
    };

    let bounds = GridBounds::new(cli.columns, cli.rows);
    let start = CellCoord::new(0, 0);
    let goal = CellCoord::new(
        cli.columns.saturating_sub(1),
        cli.rows.saturating_sub(1),
    );
    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let world = World::generate(bounds, start, goal, cli.traps, &mut rng)
        .context("could not generate the trap grid")?;

    let delay = Duration::from_millis(cli.step_delay_ms);
    let _run = code_quest_system_replay::run(&world, &commands, |event, _position| {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        println!("{event}");
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory as _, Parser as _};

    use super::Cli;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_blocks_and_program_text() {
        let cli = Cli::parse_from([
            "code-quest",
            "--seed",
            "7",
            "--program",
            r#"["move_right"]"#,
            "move_up",
            "sense_trap",
        ]);

        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.program.as_deref(), Some(r#"["move_right"]"#));
        assert_eq!(
            cli.blocks,
            vec!["move_up".to_owned(), "sense_trap".to_owned()]
        );
    }

    #[test]
    fn defaults_describe_a_five_by_five_grid() {
        let cli = Cli::parse_from(["code-quest"]);

        assert_eq!(cli.columns, 5);
        assert_eq!(cli.rows, 5);
        assert_eq!(cli.traps, 5);
        assert_eq!(cli.step_delay_ms, 400);
        assert_eq!(cli.seed, None);
        assert!(cli.blocks.is_empty());
    }
}
