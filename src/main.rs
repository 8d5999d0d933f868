//! Gridspell command line driver
//!
//! Plays out a scripted demo game between two greedy bots, useful for
//! smoke-testing the engine and eyeballing the log output.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gridspell::board::Pos;
use gridspell::catalog;
use gridspell::core::{Direction, PlayerSeat};
use gridspell::game::{GameState, TurnEnd, VerbosityLevel};

/// Verbosity level for game output (accepts names or numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "gridspell")]
#[command(about = "Gridspell tactical card battler engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scripted demo game between two greedy bots
    Demo {
        /// RNG seed for deck shuffles
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Maximum number of turns before giving up
        #[arg(long, default_value_t = 40)]
        turns: u32,

        /// Output verbosity
        #[arg(long, default_value = "normal")]
        verbosity: VerbosityArg,
    },
    /// List every card in the catalog
    Cards,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Demo {
            seed,
            turns,
            verbosity,
        } => run_demo(seed, turns, verbosity.0),
        Commands::Cards => {
            for id in catalog::all_ids() {
                println!("{id}");
            }
            Ok(())
        }
    }
}

fn run_demo(seed: u64, max_turns: u32, verbosity: VerbosityLevel) -> Result<()> {
    let mut game = GameState::new(seed);
    game.logger.set_verbosity(verbosity);

    let decks = catalog::DeckSubmission::default_decks();
    for seat in [PlayerSeat::One, PlayerSeat::Two] {
        catalog::build_decks(&mut game, seat, &decks);
    }
    catalog::start_game(&mut game);

    for _ in 0..max_turns {
        let seat = game.turn.active;

        if let Some((slot, to)) = pick_summon(&game, seat) {
            let info = game.summon(seat, slot, to)?;
            game.logger.minimal(&info);
        }

        if let Some(winner) = attack_from_back_row(&mut game, seat)? {
            println!("player {winner} wins by mana-out");
            return Ok(());
        }

        advance_monsters(&mut game, seat);

        match finish_turn(&mut game, seat)? {
            Some(winner) => {
                println!("player {winner} wins by center control");
                return Ok(());
            }
            None => {}
        }
    }

    println!(
        "no winner after {max_turns} turns (mana {} vs {})",
        game.mana_of(PlayerSeat::One),
        game.mana_of(PlayerSeat::Two)
    );
    Ok(())
}

/// First affordable monster in hand paired with a free summon-row tile
fn pick_summon(game: &GameState, seat: PlayerSeat) -> Option<(usize, Pos)> {
    let row = seat.summon_row();
    let to = (0..gridspell::board::BOARD_SIZE as u8)
        .map(|x| Pos::new(x, row))
        .find(|p| game.board.is_empty_tile(*p))?;
    let hand_size = game.zones(seat).hand.len();
    for slot in 0..hand_size {
        let id = game.hand_card(seat, slot).ok()?;
        let card = game.card(id).ok()?;
        if card.is_monster() && card.mana <= game.mana_of(seat) {
            return Some((slot, to));
        }
    }
    None
}

/// Every friendly monster sitting on its summon row swings at the enemy
fn attack_from_back_row(game: &mut GameState, seat: PlayerSeat) -> Result<Option<PlayerSeat>> {
    let attackers: Vec<Pos> = game
        .board
        .occupied()
        .filter(|(pos, id)| {
            pos.y == seat.summon_row()
                && game.card(*id).map(|c| c.owner == seat).unwrap_or(false)
        })
        .map(|(pos, _)| pos)
        .collect();
    for pos in attackers {
        if let Ok(report) = game.direct_attack(seat, pos) {
            game.logger.minimal(&report.message);
            if report.winner.is_some() {
                return Ok(report.winner);
            }
        }
    }
    Ok(None)
}

/// March monsters one step forward while the move budget lasts
fn advance_monsters(game: &mut GameState, seat: PlayerSeat) {
    let movers: Vec<Pos> = game
        .board
        .occupied()
        .filter(|(_, id)| game.card(*id).map(|c| c.owner == seat).unwrap_or(false))
        .map(|(pos, _)| pos)
        .collect();
    let (dx, dy) = Direction::Forward.offset(seat);
    for from in movers {
        let Some(to) = from.step(dx, dy, gridspell::board::BOARD_SIZE) else {
            continue;
        };
        match game.move_monster(seat, from, to) {
            Ok(info) => game.logger.minimal(&info),
            Err(_) => continue,
        }
    }
}

fn finish_turn(game: &mut GameState, seat: PlayerSeat) -> Result<Option<PlayerSeat>> {
    match game.end_turn(seat)? {
        TurnEnd::DiscardRequired { .. } => match game.end_turn_with_discard(seat, 0)? {
            TurnEnd::Victory { winner } => Ok(Some(winner)),
            _ => Ok(None),
        },
        TurnEnd::Victory { winner } => Ok(Some(winner)),
        TurnEnd::Ended { .. } => Ok(None),
    }
}
