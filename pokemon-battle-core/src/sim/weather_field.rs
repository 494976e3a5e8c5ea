use crate::data::moves::MoveData;
use crate::data::types::Type;
use crate::sim::abilities::Ability;
use crate::sim::pokemon::BattlePokemon;
use crate::sim::status::Status;
use serde::{Deserialize, Serialize};

/// Turns a weather or terrain lasts when set by a move or an ability.
pub const DEFAULT_FIELD_TURNS: u8 = 5;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
}

impl Weather {
    pub fn label(self) -> &'static str {
        match self {
            Weather::Sun => "harsh sunlight",
            Weather::Rain => "rain",
            Weather::Sand => "sandstorm",
            Weather::Hail => "hail",
        }
    }

    pub fn start_message(self) -> &'static str {
        match self {
            Weather::Sun => "The sunlight turned harsh!",
            Weather::Rain => "It started to rain!",
            Weather::Sand => "A sandstorm kicked up!",
            Weather::Hail => "It started to hail!",
        }
    }

    pub fn end_message(self) -> &'static str {
        match self {
            Weather::Sun => "The harsh sunlight faded.",
            Weather::Rain => "The rain stopped.",
            Weather::Sand => "The sandstorm subsided.",
            Weather::Hail => "The hail stopped.",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Electric,
    Grassy,
    Psychic,
    Misty,
}

impl Terrain {
    pub fn label(self) -> &'static str {
        match self {
            Terrain::Electric => "Electric Terrain",
            Terrain::Grassy => "Grassy Terrain",
            Terrain::Psychic => "Psychic Terrain",
            Terrain::Misty => "Misty Terrain",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    pub weather: Option<Weather>,
    pub weather_turns: u8,
    pub terrain: Option<Terrain>,
    pub terrain_turns: u8,
}

/// What ran out during a [`FieldState::decrement`] call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FieldExpiry {
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
}

impl FieldState {
    /// Returns false when the same weather is already up.
    pub fn set_weather(&mut self, weather: Weather, turns: u8) -> bool {
        if self.weather == Some(weather) {
            return false;
        }
        self.weather = Some(weather);
        self.weather_turns = turns;
        true
    }

    pub fn set_terrain(&mut self, terrain: Terrain, turns: u8) -> bool {
        if self.terrain == Some(terrain) {
            return false;
        }
        self.terrain = Some(terrain);
        self.terrain_turns = turns;
        true
    }

    pub fn decrement(&mut self) -> FieldExpiry {
        let mut expiry = FieldExpiry::default();
        if self.weather.is_some() {
            self.weather_turns = self.weather_turns.saturating_sub(1);
            if self.weather_turns == 0 {
                expiry.weather = self.weather.take();
            }
        }
        if self.terrain.is_some() {
            self.terrain_turns = self.terrain_turns.saturating_sub(1);
            if self.terrain_turns == 0 {
                expiry.terrain = self.terrain.take();
            }
        }
        expiry
    }
}

pub fn is_grounded(pokemon: &BattlePokemon) -> bool {
    if pokemon.ability == Ability::Levitate {
        return false;
    }
    !pokemon.defensive_types().contains(&Type::Flying)
}

pub fn weather_damage_modifier(weather: Option<Weather>, move_type: Type) -> f32 {
    match weather {
        Some(Weather::Sun) => match move_type {
            Type::Fire => 1.5,
            Type::Water => 0.5,
            _ => 1.0,
        },
        Some(Weather::Rain) => match move_type {
            Type::Water => 1.5,
            Type::Fire => 0.5,
            _ => 1.0,
        },
        _ => 1.0,
    }
}

/// `None` means the move cannot miss.
pub fn effective_accuracy(move_data: &MoveData, weather: Option<Weather>) -> Option<f32> {
    let accuracy = move_data.accuracy?;
    match (move_data.id.as_str(), weather) {
        ("thunder" | "hurricane", Some(Weather::Rain)) => None,
        ("thunder" | "hurricane", Some(Weather::Sun)) => Some(50.0),
        ("blizzard", Some(Weather::Hail)) => None,
        _ => Some(accuracy as f32),
    }
}

pub fn terrain_damage_modifier(
    terrain: Option<Terrain>,
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    move_data: &MoveData,
) -> f32 {
    let move_type = move_data.move_type;
    match terrain {
        Some(Terrain::Electric) if move_type == Type::Electric && is_grounded(attacker) => 1.3,
        Some(Terrain::Psychic) if move_type == Type::Psychic && is_grounded(attacker) => 1.3,
        Some(Terrain::Grassy) => {
            if move_type == Type::Grass && is_grounded(attacker) {
                1.3
            } else if move_data.id == "earthquake" && is_grounded(defender) {
                0.5
            } else {
                1.0
            }
        }
        Some(Terrain::Misty) if move_type == Type::Dragon && is_grounded(defender) => 0.5,
        _ => 1.0,
    }
}

pub fn terrain_blocks_status(
    terrain: Option<Terrain>,
    target: &BattlePokemon,
    status: Status,
) -> bool {
    if !is_grounded(target) {
        return false;
    }
    match terrain {
        Some(Terrain::Misty) => true,
        Some(Terrain::Electric) => status == Status::Sleep,
        _ => false,
    }
}

/// Psychic Terrain shields grounded targets from priority moves.
pub fn terrain_blocks_priority(
    terrain: Option<Terrain>,
    defender: &BattlePokemon,
    priority: i8,
) -> bool {
    terrain == Some(Terrain::Psychic) && priority > 0 && is_grounded(defender)
}

pub fn grassy_heal(terrain: Option<Terrain>, pokemon: &BattlePokemon) -> Option<u16> {
    if terrain != Some(Terrain::Grassy)
        || !is_grounded(pokemon)
        || pokemon.current_hp == pokemon.max_hp
    {
        return None;
    }
    Some((pokemon.max_hp / 16).max(1))
}

pub fn weather_residual_damage(pokemon: &BattlePokemon, weather: Option<Weather>) -> Option<u16> {
    if pokemon.ability_hooks().prevents_indirect_damage || pokemon.ability == Ability::Overcoat {
        return None;
    }
    let types = pokemon.defensive_types();
    let immune = match weather? {
        Weather::Sand => {
            types.iter().any(|t| matches!(t, Type::Rock | Type::Ground | Type::Steel))
                || matches!(pokemon.ability, Ability::SandRush | Ability::SandStream)
        }
        Weather::Hail => {
            types.contains(&Type::Ice)
                || matches!(pokemon.ability, Ability::SlushRush | Ability::SnowWarning)
        }
        Weather::Sun | Weather::Rain => true,
    };
    if immune {
        return None;
    }
    Some((pokemon.max_hp / 16).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::moves::get_move;
    use crate::sim::pokemon::test_pokemon;

    #[test]
    fn thunder_never_misses_in_rain() {
        let thunder = get_move("thunder").expect("thunder");
        assert_eq!(effective_accuracy(thunder, Some(Weather::Rain)), None);
        assert_eq!(effective_accuracy(thunder, Some(Weather::Sun)), Some(50.0));
        assert_eq!(effective_accuracy(thunder, None), Some(70.0));
    }

    #[test]
    fn blizzard_never_misses_in_hail() {
        let blizzard = get_move("blizzard").expect("blizzard");
        assert_eq!(effective_accuracy(blizzard, Some(Weather::Hail)), None);
    }

    #[test]
    fn grassy_halves_earthquake_on_grounded_target() {
        let attacker = test_pokemon("attacker", &[Type::Normal], Ability::NoAbility);
        let defender = test_pokemon("defender", &[Type::Normal], Ability::NoAbility);
        let earthquake = get_move("earthquake").expect("earthquake");
        let modifier =
            terrain_damage_modifier(Some(Terrain::Grassy), &attacker, &defender, earthquake);
        assert!((modifier - 0.5).abs() < 1e-6);
    }

    #[test]
    fn flying_types_ignore_terrain() {
        let bird = test_pokemon("bird", &[Type::Normal, Type::Flying], Ability::NoAbility);
        let target = test_pokemon("target", &[Type::Normal], Ability::NoAbility);
        let thunderbolt = get_move("thunderbolt").expect("thunderbolt");
        let electric = Some(Terrain::Electric);
        assert_eq!(terrain_damage_modifier(electric, &bird, &target, thunderbolt), 1.0);
        assert!(!terrain_blocks_status(Some(Terrain::Misty), &bird, Status::Burn));
        assert!(terrain_blocks_status(Some(Terrain::Misty), &target, Status::Burn));
    }

    #[test]
    fn field_counters_expire() {
        let mut field = FieldState::default();
        assert!(field.set_weather(Weather::Rain, 2));
        assert!(!field.set_weather(Weather::Rain, 5));
        assert_eq!(field.decrement(), FieldExpiry::default());
        let expiry = field.decrement();
        assert_eq!(expiry.weather, Some(Weather::Rain));
        assert_eq!(field.weather, None);
    }

    #[test]
    fn sand_spares_rock_types_and_magic_guard() {
        let rock = test_pokemon("rock", &[Type::Rock], Ability::NoAbility);
        let normal = test_pokemon("normal", &[Type::Normal], Ability::NoAbility);
        let guarded = test_pokemon("guarded", &[Type::Normal], Ability::MagicGuard);
        assert_eq!(weather_residual_damage(&rock, Some(Weather::Sand)), None);
        assert_eq!(weather_residual_damage(&normal, Some(Weather::Sand)), Some(normal.max_hp / 16));
        assert_eq!(weather_residual_damage(&guarded, Some(Weather::Sand)), None);
    }
}
