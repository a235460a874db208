//! Replay command - rebuild a recorded game and report how it ended

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use havannah_core::{GameRecord, GameResult, GameState, Player, WinKind};

#[derive(Args)]
pub struct ReplayArgs {
    /// Game record JSON file
    pub file: PathBuf,

    /// Stop after this many plies
    #[arg(long)]
    pub plies: Option<usize>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(serde::Serialize)]
struct ReplaySummary {
    board_size: usize,
    swap_rule: bool,
    plies: usize,
    result: GameResult,
    winner: Option<Player>,
    win_kind: Option<WinKind>,
    score: f32,
}

/// Run replay command
///
/// 1. Load the record
/// 2. Replay it on a fresh board
/// 3. Report result
pub fn run(args: ReplayArgs) -> Result<()> {
    let record = GameRecord::load(&args.file)?;
    let plies = args.plies.unwrap_or(record.len());

    tracing::info!(
        "Replaying {} ({} of {} plies)",
        args.file.display(),
        plies,
        record.len()
    );

    let state = record
        .replay_to(plies)
        .with_context(|| format!("Failed to replay {}", args.file.display()))?;
    if !state.is_terminal() {
        tracing::warn!("Game is still undecided after {} plies", plies);
    }

    let summary = summarize(&state);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_board(&state);
        print_summary(&summary);
    }

    Ok(())
}

fn summarize(state: &GameState) -> ReplaySummary {
    ReplaySummary {
        board_size: state.config().board_size,
        swap_rule: state.config().use_swap_rule,
        plies: state.history().len(),
        result: state.result(),
        winner: state.winner(),
        win_kind: state.win_kind(),
        score: state.eval_score(false),
    }
}

/// Hexagon view: row r is shifted so that neighbouring cells line up
fn render_board(state: &GameState) -> String {
    let geometry = state.geometry();
    let size = geometry.size();
    let mut out = String::new();

    for row in 0..size {
        let mut line = " ".repeat(size.abs_diff(2 * row + 1) / 2);
        for col in 0..size {
            let cell = geometry.cell(row, col);
            if !geometry.is_playable_cell(cell) {
                continue;
            }
            line.push(state.get(cell).map_or('.', Player::to_char));
            line.push(' ');
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn print_board(state: &GameState) {
    println!("{}", render_board(state));
}

fn print_summary(summary: &ReplaySummary) {
    println!("Board:  {}x{} (swap={})", summary.board_size, summary.board_size, summary.swap_rule);
    println!("Plies:  {}", summary.plies);
    match (summary.winner, summary.win_kind) {
        (Some(winner), Some(kind)) => println!("Winner: {:?} by {:?}", winner, kind),
        _ => println!("Result: {:?}", summary.result),
    }
    println!("Score:  {:+.1}", summary.score);
}
