pub mod matrix;
pub mod model;

use crate::matrix::{compute_matrix, play_battle, validate_team_sizes, BattleSetup, SELECTION_SIZE};
use crate::model::TeamsFile;
use anyhow::Context;
use log::info;
use pokemon_battle_core::sim::ai::Difficulty;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub teams_path: PathBuf,
    pub sims_per_cell: usize,
    pub seed: u64,
    pub output_path: PathBuf,
    /// Overrides the difficulty named in the teams file.
    pub difficulty: Option<Difficulty>,
    /// Where to dump the full log of one sample battle.
    pub log_json: Option<PathBuf>,
}

pub fn load_teams(path: &Path) -> anyhow::Result<TeamsFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read teams file at {}", path.display()))?;
    let parsed: TeamsFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    validate_team_sizes(&parsed)?;
    Ok(parsed)
}

/// Plays the first three members of each team once and writes the typed log.
pub fn write_battle_log(
    teams: &TeamsFile,
    setup: &BattleSetup,
    seed: u64,
    path: &Path,
) -> anyhow::Result<()> {
    let (result, state) = play_battle(
        &teams.team_a[..SELECTION_SIZE],
        &teams.team_b[..SELECTION_SIZE],
        setup,
        seed,
    )?;
    let document = json!({
        "seed": seed,
        "result": format!("{result:?}"),
        "turns": state.turn,
        "winner": state.winner,
        "log": state.log.to_json(),
    });
    let text = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write battle log to {}", path.display()))?;
    info!("wrote {} log entries to {}", state.log.len(), path.display());
    Ok(())
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    if opts.sims_per_cell == 0 {
        anyhow::bail!("--sims-per-cell must be > 0");
    }
    let teams = load_teams(&opts.teams_path)?;
    let difficulty = match (opts.difficulty, &teams.difficulty) {
        (Some(difficulty), _) => difficulty,
        (None, Some(name)) => Difficulty::from_name(name).with_context(|| {
            format!("Unknown difficulty {name} in {}", opts.teams_path.display())
        })?,
        (None, None) => Difficulty::default(),
    };
    let setup = BattleSetup::from_teams(&teams, difficulty);
    info!(
        "simulating {} battles per cell at {difficulty:?} difficulty (mechanics {:?})",
        opts.sims_per_cell, setup.mechanics
    );
    if let Some(path) = &opts.log_json {
        write_battle_log(&teams, &setup, opts.seed, path)?;
    }
    let matrix = compute_matrix(&teams, &setup, opts.sims_per_cell, opts.seed)?;
    matrix::write_csv(&matrix, &opts.output_path)?;
    println!(
        "Wrote {}x{} matrix to {}",
        matrix.len(),
        matrix.first().map(|r| r.len()).unwrap_or(0),
        opts.output_path.display()
    );
    Ok(())
}
