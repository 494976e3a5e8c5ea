use pokemon_battle_core::data::moves::{MoveData, MoveDex};
use pokemon_battle_core::sim::pokemon::{Mechanic, PokemonSet};
use serde::Deserialize;
use std::collections::HashMap;

/// Rosters and battle settings loaded from a teams JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsFile {
    pub team_a: Vec<PokemonSet>,
    pub team_b: Vec<PokemonSet>,
    /// Extra moves keyed by id; they shadow the built-in table.
    #[serde(default)]
    pub moves: HashMap<String, MoveData>,
    #[serde(default)]
    pub mechanic_a: Mechanic,
    #[serde(default)]
    pub mechanic_b: Mechanic,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(flatten, default)]
    pub extras: HashMap<String, serde_json::Value>,
}

impl TeamsFile {
    pub fn move_dex(&self) -> MoveDex {
        if self.moves.is_empty() {
            return MoveDex::builtin().clone();
        }
        MoveDex::with_custom(self.moves.clone())
    }

    pub fn mechanics(&self) -> [Mechanic; 2] {
        [self.mechanic_a, self.mechanic_b]
    }
}
