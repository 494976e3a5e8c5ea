use crate::model::TeamsFile;
use anyhow::Context;
use log::debug;
use pokemon_battle_core::data::moves::MoveDex;
use pokemon_battle_core::engine::{BattleEngine, BattleOutcome};
use pokemon_battle_core::sim::ai::{Difficulty, ScoringAI};
use pokemon_battle_core::sim::battle::{BattleState, Side};
use pokemon_battle_core::sim::pokemon::{Mechanic, PokemonSet};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Turn cap for a single simulated battle; hitting it counts as a tie.
pub const MAX_TURNS: u32 = 500;
pub const SELECTION_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleResult {
    AWins,
    BWins,
    Tie,
}

/// Everything a battle needs besides the two selections.
#[derive(Debug, Clone)]
pub struct BattleSetup {
    pub dex: MoveDex,
    pub mechanics: [Mechanic; 2],
    pub difficulty: Difficulty,
}

impl BattleSetup {
    pub fn from_teams(teams: &TeamsFile, difficulty: Difficulty) -> Self {
        Self {
            dex: teams.move_dex(),
            mechanics: teams.mechanics(),
            difficulty,
        }
    }
}

/// Plays `a` against `b` with a scoring AI on both sides and returns the
/// final state alongside the result.
pub fn play_battle(
    a: &[PokemonSet],
    b: &[PokemonSet],
    setup: &BattleSetup,
    seed: u64,
) -> anyhow::Result<(BattleResult, BattleState)> {
    let mut engine = BattleEngine::from_sets(a, b, setup.mechanics, &setup.dex, seed)?;
    let mut ai_a = ScoringAI::new(setup.difficulty, seed.wrapping_add(1));
    let mut ai_b = ScoringAI::new(setup.difficulty, seed.wrapping_add(2));
    let outcome = engine
        .run_with(&mut ai_a, &mut ai_b, MAX_TURNS)
        .with_context(|| format!("battle with seed {seed} rejected an AI action"))?;
    let result = match outcome {
        Some(BattleOutcome::Winner(Side::Player1)) => BattleResult::AWins,
        Some(BattleOutcome::Winner(Side::Player2)) => BattleResult::BWins,
        Some(BattleOutcome::Draw) | None => BattleResult::Tie,
    };
    Ok((result, engine.into_state()))
}

pub fn simulate_battle(
    a: &[PokemonSet],
    b: &[PokemonSet],
    setup: &BattleSetup,
    seed: u64,
) -> anyhow::Result<BattleResult> {
    play_battle(a, b, setup, seed).map(|(result, _)| result)
}

pub fn choose3_indices(len: usize) -> Vec<[usize; 3]> {
    let mut combos = Vec::new();
    for i in 0..len {
        for j in (i + 1)..len {
            for k in (j + 1)..len {
                combos.push([i, j, k]);
            }
        }
    }
    combos
}

fn selection_from_indices(team: &[PokemonSet], indices: &[usize; 3]) -> Vec<PokemonSet> {
    indices.iter().map(|&idx| team[idx].clone()).collect()
}

/// Team A's win rate (ties count half) for every pair of three-member
/// selections. Rows are team A selections, columns team B selections.
pub fn compute_matrix(
    teams: &TeamsFile,
    setup: &BattleSetup,
    sims_per_cell: usize,
    seed: u64,
) -> anyhow::Result<Vec<Vec<f64>>> {
    let selections_a: Vec<Vec<PokemonSet>> = choose3_indices(teams.team_a.len())
        .iter()
        .map(|idx| selection_from_indices(&teams.team_a, idx))
        .collect();
    let selections_b: Vec<Vec<PokemonSet>> = choose3_indices(teams.team_b.len())
        .iter()
        .map(|idx| selection_from_indices(&teams.team_b, idx))
        .collect();
    let tasks: Vec<(usize, usize)> = (0..selections_a.len())
        .flat_map(|a| (0..selections_b.len()).map(move |b| (a, b)))
        .collect();
    let cell_results: Vec<CellResult> = tasks
        .par_iter()
        .map(|(a_idx, b_idx)| -> anyhow::Result<CellResult> {
            let cell_seed = seed ^ ((*a_idx as u64) << 32) ^ (*b_idx as u64);
            let mut cell_rng = SmallRng::seed_from_u64(cell_seed);
            let a_sel = &selections_a[*a_idx];
            let b_sel = &selections_b[*b_idx];
            let mut a_wins = 0u64;
            let mut ties = 0u64;
            for _ in 0..sims_per_cell {
                let battle_seed = cell_rng.gen();
                match simulate_battle(a_sel, b_sel, setup, battle_seed)? {
                    BattleResult::AWins => a_wins += 1,
                    BattleResult::BWins => {}
                    BattleResult::Tie => ties += 1,
                }
            }
            let total = sims_per_cell as f64;
            let win_rate = (a_wins as f64 + 0.5 * ties as f64) / total;
            debug!("cell ({a_idx}, {b_idx}): {a_wins} wins, {ties} ties");
            Ok(CellResult {
                a_idx: *a_idx,
                b_idx: *b_idx,
                win_rate,
            })
        })
        .collect::<anyhow::Result<_>>()?;

    let mut matrix = vec![vec![0.0; selections_b.len()]; selections_a.len()];
    for cell in cell_results {
        matrix[cell.a_idx][cell.b_idx] = cell.win_rate;
    }
    Ok(matrix)
}

pub fn write_csv(matrix: &[Vec<f64>], path: &std::path::Path) -> anyhow::Result<()> {
    let mut out = String::new();
    for (row_idx, row) in matrix.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            if col_idx > 0 {
                out.push(',');
            }
            out.push_str(&format!("{value:.4}"));
        }
        if row_idx + 1 < matrix.len() {
            out.push('\n');
        }
    }
    std::fs::write(path, out)
        .with_context(|| format!("Failed to write matrix to {}", path.display()))?;
    Ok(())
}

struct CellResult {
    a_idx: usize,
    b_idx: usize,
    win_rate: f64,
}

pub fn validate_team_sizes(teams: &TeamsFile) -> anyhow::Result<()> {
    for (label, team) in [("teamA", &teams.team_a), ("teamB", &teams.team_b)] {
        if !(SELECTION_SIZE..=6).contains(&team.len()) {
            anyhow::bail!(
                "{label} must have between {SELECTION_SIZE} and 6 Pokemon, found {}",
                team.len()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose3_counts() {
        assert_eq!(choose3_indices(3), vec![[0, 1, 2]]);
        assert_eq!(choose3_indices(6).len(), 20);
        assert!(choose3_indices(2).is_empty());
    }

    #[test]
    fn csv_layout() {
        let path = std::env::temp_dir().join("pokemon-battle-sim-csv-layout.csv");
        write_csv(&[vec![0.5, 1.0], vec![0.0, 0.25]], &path).expect("write");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, "0.5000,1.0000\n0.0000,0.2500");
        let _ = std::fs::remove_file(path);
    }
}
