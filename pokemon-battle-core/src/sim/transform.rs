//! One-shot generational transformations: Mega Evolution, Terastallization and Dynamax.

use crate::sim::pokemon::{BattlePokemon, BattleTeam, Mechanic};

pub const DYNAMAX_TURNS: u8 = 3;

/// Max Move base power for a damaging move of `power`.
pub fn max_move_power(power: u16) -> u16 {
    match power {
        0 => 0,
        1..=40 => 90,
        41..=50 => 100,
        51..=60 => 110,
        61..=70 => 120,
        71..=100 => 130,
        101..=140 => 140,
        _ => 150,
    }
}

/// Reason the active combatant cannot use `mechanic` right now.
pub fn check_transformation(team: &BattleTeam, mechanic: Mechanic) -> Result<(), &'static str> {
    if mechanic == Mechanic::None {
        return Err("no transformation requested");
    }
    if team.mechanic != mechanic {
        return Err("mechanic is not available in this battle");
    }
    if team.transformation_used {
        return Err("already used this battle");
    }
    let pokemon = team.active_pokemon();
    if pokemon.is_fainted() {
        return Err("active combatant has fainted");
    }
    match mechanic {
        Mechanic::Mega => {
            if pokemon.mega_evolved || pokemon.mega.is_none() {
                return Err("no mega forme");
            }
            if !pokemon.item.is_some_and(|item| item.is_mega_stone()) {
                return Err("not holding a Mega Stone");
            }
        }
        Mechanic::Tera => {
            if pokemon.tera_type.is_none() {
                return Err("no tera type");
            }
        }
        Mechanic::Dynamax | Mechanic::None => {}
    }
    Ok(())
}

/// Swaps in the mega forme's types, stats and ability. HP is untouched.
pub fn mega_evolve(pokemon: &mut BattlePokemon) -> bool {
    let Some(forme) = pokemon.mega.clone() else {
        return false;
    };
    pokemon.species = forme.species;
    pokemon.types = forme.types;
    pokemon.stats = forme.stats;
    pokemon.ability = forme.ability;
    pokemon.mega_evolved = true;
    true
}

pub fn terastallize(pokemon: &mut BattlePokemon) -> bool {
    if pokemon.tera_type.is_none() {
        return false;
    }
    pokemon.terastallized = true;
    true
}

pub fn dynamax(pokemon: &mut BattlePokemon) {
    pokemon.max_hp = pokemon.max_hp.saturating_mul(2);
    pokemon.current_hp = pokemon.current_hp.saturating_mul(2);
    pokemon.dynamaxed = true;
    pokemon.dynamax_turns = DYNAMAX_TURNS;
}

/// Restores the normal HP cap; current HP is halved, rounding up.
pub fn end_dynamax(pokemon: &mut BattlePokemon) {
    pokemon.max_hp = pokemon.stats.hp;
    pokemon.current_hp = pokemon.current_hp.div_ceil(2).min(pokemon.max_hp);
    pokemon.dynamaxed = false;
    pokemon.dynamax_turns = 0;
}

/// Counts down one turn of Dynamax; returns true when it just ended.
pub fn tick_dynamax(pokemon: &mut BattlePokemon) -> bool {
    if !pokemon.dynamaxed {
        return false;
    }
    pokemon.dynamax_turns = pokemon.dynamax_turns.saturating_sub(1);
    if pokemon.dynamax_turns == 0 {
        end_dynamax(pokemon);
        return true;
    }
    false
}
