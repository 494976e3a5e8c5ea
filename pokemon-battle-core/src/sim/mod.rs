//! Battle simulation: combatants, rules and the turn executor.

pub mod abilities;
pub mod ai;
pub mod battle;
pub mod damage;
pub mod faint_handler;
pub mod items;
pub mod order;
pub mod pokemon;
pub mod stats;
pub mod status;
pub mod switching;
pub mod transform;
pub mod weather_field;

pub use pokemon::{BattlePokemon, BattleTeam, Mechanic, PokemonSet};
