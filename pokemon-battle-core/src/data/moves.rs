use crate::data::normalize_id;
use crate::data::types::Type;
use crate::sim::stats::BoostStat;
use crate::sim::status::Status;
use crate::sim::weather_field::{Terrain, Weather};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatChange {
    pub stat: BoostStat,
    pub stages: i8,
}

/// Chance-gated effect rolled after a damaging hit lands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryEffect {
    pub chance: u8,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub boosts: Vec<StatChange>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveData {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: Type,
    pub category: MoveCategory,
    #[serde(default)]
    pub power: u16,
    /// `None` never misses.
    #[serde(default)]
    pub accuracy: Option<u8>,
    #[serde(default = "default_pp")]
    pub pp: u8,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub crit_ratio: u8,
    #[serde(default)]
    pub secondary: Option<SecondaryEffect>,
    /// Primary status inflicted by status moves.
    #[serde(default)]
    pub status: Option<Status>,
    /// Stage changes applied to the target by status moves.
    #[serde(default)]
    pub boosts: Vec<StatChange>,
    /// Stage changes applied to the user once the move resolves.
    #[serde(default)]
    pub self_boosts: Vec<StatChange>,
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default)]
    pub terrain: Option<Terrain>,
    /// Fraction of the user's max HP restored.
    #[serde(default)]
    pub heal: Option<(u16, u16)>,
    /// Fraction of damage dealt restored to the user.
    #[serde(default)]
    pub drain: Option<(u16, u16)>,
    /// Fraction of damage dealt taken back as recoil.
    #[serde(default)]
    pub recoil: Option<(u16, u16)>,
}

fn default_pp() -> u8 {
    10
}

impl MoveData {
    pub fn is_status(&self) -> bool {
        matches!(self.category, MoveCategory::Status)
    }

    pub fn is_physical(&self) -> bool {
        matches!(self.category, MoveCategory::Physical)
    }

    /// Used when every move is out of PP.
    pub fn struggle() -> MoveData {
        MoveData {
            id: "struggle".to_string(),
            name: "Struggle".to_string(),
            move_type: Type::Normal,
            category: MoveCategory::Physical,
            power: 50,
            accuracy: None,
            pp: 1,
            priority: 0,
            crit_ratio: 0,
            secondary: None,
            status: None,
            boosts: Vec::new(),
            self_boosts: Vec::new(),
            weather: None,
            terrain: None,
            heal: None,
            drain: None,
            recoil: Some((1, 4)),
        }
    }
}

/// Move lookup keyed by normalized id. Caller-supplied entries shadow the
/// built-in table.
#[derive(Clone, Debug, Default)]
pub struct MoveDex {
    moves: HashMap<String, MoveData>,
}

static BUILTIN: Lazy<MoveDex> = Lazy::new(|| {
    let raw: HashMap<String, MoveData> = serde_json::from_str(include_str!("moves.json"))
        .expect("embedded move table is valid JSON");
    MoveDex::from_entries(raw)
});

impl MoveDex {
    pub fn builtin() -> &'static MoveDex {
        &BUILTIN
    }

    pub fn from_entries(entries: HashMap<String, MoveData>) -> Self {
        let moves = entries
            .into_iter()
            .map(|(key, mut data)| {
                let id = normalize_id(&key);
                data.id = id.clone();
                (id, data)
            })
            .collect();
        Self { moves }
    }

    /// The built-in table extended by `custom`.
    pub fn with_custom(custom: HashMap<String, MoveData>) -> Self {
        let mut dex = MoveDex::builtin().clone();
        dex.moves.extend(Self::from_entries(custom).moves);
        dex
    }

    pub fn get(&self, name: &str) -> Option<&MoveData> {
        self.moves.get(normalize_id(name).as_str())
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

pub fn get_move(name: &str) -> Option<&'static MoveData> {
    BUILTIN.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_parses() {
        assert!(MoveDex::builtin().len() > 50);
    }

    #[test]
    fn thunderbolt_secondary_paralysis() {
        let thunderbolt = get_move("Thunderbolt").expect("Thunderbolt must be present");
        assert_eq!(thunderbolt.id, "thunderbolt");
        assert_eq!(thunderbolt.power, 90);
        let secondary = thunderbolt.secondary.as_ref().expect("secondary effect");
        assert_eq!(secondary.chance, 10);
        assert_eq!(secondary.status, Some(Status::Paralysis));
    }

    #[test]
    fn status_moves_have_no_accuracy_check_when_omitted() {
        let dance = get_move("swordsdance").expect("Swords Dance must be present");
        assert!(dance.is_status());
        assert_eq!(dance.accuracy, None);
        assert_eq!(dance.self_boosts[0].stages, 2);
    }

    #[test]
    fn custom_entries_shadow_builtin_moves() {
        let mut custom = HashMap::new();
        custom.insert(
            "Tackle".to_string(),
            MoveData {
                power: 200,
                ..get_move("tackle").expect("tackle").clone()
            },
        );
        let dex = MoveDex::with_custom(custom);
        assert_eq!(dex.get("tackle").map(|m| m.power), Some(200));
        assert_eq!(dex.get("surf").map(|m| m.power), Some(90));
    }
}
