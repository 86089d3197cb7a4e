use code_quest_core::{CellCoord, Command, GridBounds};
use code_quest_system_replay::{run, RunState};
use code_quest_world::{TrapSet, World};
use rand::SeedableRng as _;
use rand_chacha::ChaCha8Rng;

const WORLD_SEED: u64 = 0x5eed_c0de;

fn scripted_program() -> Vec<Command> {
    vec![
        Command::SenseTrap,
        Command::MoveRight,
        Command::SenseTrap,
        Command::MoveDown,
        Command::MoveRight,
        Command::MoveDown,
        Command::Jump,
        Command::MoveDown,
        Command::MoveDown,
    ]
}

fn generated_world() -> World {
    let mut rng = ChaCha8Rng::seed_from_u64(WORLD_SEED);
    World::generate(
        GridBounds::new(5, 5),
        CellCoord::new(0, 0),
        CellCoord::new(4, 4),
        5,
        &mut rng,
    )
    .expect("world generates")
}

fn replay(world: &World) -> RunState {
    run(world, &scripted_program(), |_event, _position| {})
}

#[test]
fn replaying_the_same_program_twice_produces_identical_runs() {
    let world = generated_world();

    let first = replay(&world);
    let second = replay(&world);

    assert_eq!(first, second, "replay diverged between runs");
}

#[test]
fn separately_generated_worlds_replay_identically_for_one_seed() {
    let first = replay(&generated_world());
    let second = replay(&generated_world());

    assert_eq!(first, second, "world generation diverged between runs");
}

#[test]
fn a_fixed_world_produces_the_expected_log() {
    let world = World::new(
        GridBounds::new(4, 4),
        CellCoord::new(0, 0),
        CellCoord::new(3, 3),
        TrapSet::from_cells(vec![CellCoord::new(1, 2), CellCoord::new(3, 0)]),
    )
    .expect("fixed world is valid");
    let program = [
        Command::MoveRight,
        Command::SenseTrap,
        Command::MoveDown,
        Command::MoveDown,
    ];

    let state = run(&world, &program, |_event, _position| {});

    assert_eq!(
        state.log(),
        [
            "Moved to (1, 0)",
            "No trap nearby.",
            "Moved to (1, 1)",
            "Trap hit at (1, 2)! Game over.",
        ]
    );
}
