//! Turn order: switches first, then priority, then speed, then a coin flip.

use crate::sim::pokemon::BattlePokemon;
use crate::sim::stats::apply_stage_multiplier;
use crate::sim::status::Status;
use crate::sim::weather_field::Weather;
use rand::rngs::SmallRng;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderKey {
    pub is_switch: bool,
    /// Ignored for switches.
    pub priority: i8,
    pub speed: u32,
}

/// Speed after stages, paralysis and ability/item modifiers.
pub fn effective_speed(pokemon: &BattlePokemon, weather: Option<Weather>) -> u32 {
    let mut speed = apply_stage_multiplier(pokemon.stats.spe, pokemon.stages.spe) as f32;
    if let Some(modify) = pokemon.ability_hooks().modify_speed {
        speed *= modify(pokemon, weather);
    }
    if let Some(modify) = pokemon.item_hooks().modify_speed {
        speed *= modify(pokemon);
    }
    if pokemon.status == Some(Status::Paralysis) {
        speed *= 0.5;
    }
    speed.floor() as u32
}

/// True when the first key acts first. The RNG is only drawn on an exact tie.
pub fn first_goes_first(first: OrderKey, second: OrderKey, rng: &mut SmallRng) -> bool {
    if first.is_switch != second.is_switch {
        return first.is_switch;
    }
    if !first.is_switch && first.priority != second.priority {
        return first.priority > second.priority;
    }
    if first.speed != second.speed {
        return first.speed > second.speed;
    }
    rng.gen_bool(0.5)
}

/// Orders two actors, returning their indices as `[first, second]`.
pub fn resolve_order(keys: [OrderKey; 2], rng: &mut SmallRng) -> [usize; 2] {
    if first_goes_first(keys[0], keys[1], rng) {
        [0, 1]
    } else {
        [1, 0]
    }
}
