//! Selfplay command - play random games and report outcome statistics
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play_games(), save_records(), report_results()
//! - Level 3: play_random_game(), compute_statistics()
//! - Level 4: formatting utilities

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use havannah_core::{GameConfig, GameRecord, GameResult, GameState, WinKind};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Board size (odd, 3-19)
    #[arg(long, default_value = "9")]
    pub size: usize,

    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Enable the swap rule
    #[arg(long)]
    pub swap: bool,

    /// Game config JSON file (overrides --size and --swap)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to write one JSON record per game
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameSummary {
    game_number: usize,
    result: GameResult,
    win_kind: Option<WinKind>,
    plies: usize,
    record: GameRecord,
}

/// Aggregated results
#[derive(Clone, Debug)]
struct SelfplayResults {
    games: Vec<GameSummary>,
    black_wins: usize,
    white_wins: usize,
    draws: usize,
    win_kinds: BTreeMap<String, usize>,
    avg_plies: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run selfplay command
///
/// 1. Build the game configuration
/// 2. Play all games in parallel, one independent state per game
/// 3. Optionally save records
/// 4. Report results
pub fn run(args: SelfplayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args)?;
    let base_seed = seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Starting selfplay: {} games on {} (swap={}, seed={})",
        args.games,
        config.name(),
        config.use_swap_rule,
        base_seed
    );

    let games = play_games(&config, args.games, base_seed)?;

    if let Some(dir) = &args.output {
        save_records(&games, dir)?;
    }

    let results = compute_statistics(games);
    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &SelfplayArgs) -> Result<GameConfig> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::new(args.size).with_swap_rule(args.swap),
    };
    config.validate()?;
    Ok(config)
}

/// Play `count` games; game `i` uses seed `base_seed + i`
fn play_games(config: &GameConfig, count: usize, base_seed: u64) -> Result<Vec<GameSummary>> {
    let progress = ProgressBar::new(count as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let games = (0..count)
        .into_par_iter()
        .map(|i| {
            let summary = play_random_game(config, i + 1, base_seed.wrapping_add(i as u64));
            progress.inc(1);
            summary
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish_and_clear();
    Ok(games)
}

fn save_records(games: &[GameSummary], dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    for game in games {
        let path = dir.join(format!("game_{:05}.json", game.game_number));
        game.record
            .save(&path)
            .with_context(|| format!("Failed to save record: {}", path.display()))?;
    }
    tracing::info!("Saved {} records to {}", games.len(), dir.display());
    Ok(())
}

fn report_results(results: &SelfplayResults, args: &SelfplayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play uniformly random legal moves until the game ends
fn play_random_game(config: &GameConfig, game_number: usize, seed: u64) -> Result<GameSummary> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new(config)?;

    while !state.is_terminal() {
        let legal = state.legal_actions();
        let action = *legal
            .choose(&mut rng)
            .context("No legal actions in a non-terminal position")?;
        state.act(action)?;
    }

    tracing::debug!(
        "Game {}: {:?} by {:?} after {} plies",
        game_number,
        state.result(),
        state.win_kind(),
        state.history().len()
    );

    Ok(GameSummary {
        game_number,
        result: state.result(),
        win_kind: state.win_kind(),
        plies: state.history().len(),
        record: GameRecord::from_state(&state),
    })
}

fn compute_statistics(games: Vec<GameSummary>) -> SelfplayResults {
    let count = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let black_wins = count(GameResult::BlackWins);
    let white_wins = count(GameResult::WhiteWins);
    let draws = count(GameResult::Draw);

    let mut win_kinds = BTreeMap::new();
    for kind in games.iter().filter_map(|g| g.win_kind) {
        *win_kinds.entry(format!("{:?}", kind)).or_insert(0) += 1;
    }

    let total_plies: usize = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    SelfplayResults {
        games,
        black_wins,
        white_wins,
        draws,
        win_kinds,
        avg_plies,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_json_results(results: &SelfplayResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        result: GameResult,
        win_kind: Option<WinKind>,
        plies: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_games: usize,
        black_wins: usize,
        white_wins: usize,
        draws: usize,
        win_kinds: &'a BTreeMap<String, usize>,
        avg_plies: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        black_wins: results.black_wins,
        white_wins: results.white_wins,
        draws: results.draws,
        win_kinds: &results.win_kinds,
        avg_plies: results.avg_plies,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: g.result,
                win_kind: g.win_kind,
                plies: g.plies,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(results: &SelfplayResults) {
    let total = results.games.len();

    println!("\n=== Selfplay Results ===");
    println!("Total games: {}", total);
    println!("Black wins:  {} ({:.1}%)", results.black_wins, percent(results.black_wins, total));
    println!("White wins:  {} ({:.1}%)", results.white_wins, percent(results.white_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    for (kind, n) in &results.win_kinds {
        println!("  by {:<8} {}", kind, n);
    }
    println!("Avg plies:   {:.1}", results.avg_plies);
}

fn percent(part: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f32 / total as f32
    }
}
