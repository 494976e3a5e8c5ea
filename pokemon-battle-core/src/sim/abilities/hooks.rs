//! Hook signatures and result types shared by the ability and item tables.
//!
//! Hooks only ever see read-only views of the combatants. They describe the
//! mutation they want as a return value and the turn executor applies it.

use crate::data::moves::StatChange;
use crate::data::types::Type;
use crate::sim::pokemon::BattlePokemon;
use crate::sim::stats::BoostStat;
use crate::sim::status::Status;
use crate::sim::weather_field::{Terrain, Weather};

/// Fires once when the holder becomes active.
pub type OnSwitchIn =
    fn(pokemon: &BattlePokemon, opponent: &BattlePokemon) -> Option<SwitchInEffect>;

/// Fires before a move of `move_type` hits the holder. A multiplier of 0 is an immunity.
pub type ModifyIncomingDamage = fn(
    defender: &BattlePokemon,
    attacker: &BattlePokemon,
    move_type: Type,
    move_power: u16,
) -> Option<IncomingDamage>;

pub type ModifyAttackStat =
    fn(attacker: &BattlePokemon, move_type: Type, move_power: u16, is_physical: bool) -> f32;

pub type ModifyStab = fn(attacker: &BattlePokemon, stab: f32) -> f32;

pub type PreventStatus = fn(pokemon: &BattlePokemon, status: Status) -> bool;

pub type OnAfterKo = fn(attacker: &BattlePokemon) -> Option<StatChange>;

pub type OnEndOfTurn =
    fn(pokemon: &BattlePokemon, weather: Option<Weather>) -> Option<EndOfTurnEffect>;

pub type ModifySurvival = fn(pokemon: &BattlePokemon, incoming: u16) -> Option<Survival>;

pub type OnStatDrop =
    fn(pokemon: &BattlePokemon, stat: BoostStat, stages: i8) -> Option<StatChange>;

/// `pokemon` is the trapper, `opponent` the combatant trying to leave.
pub type OnTrapping = fn(pokemon: &BattlePokemon, opponent: &BattlePokemon) -> bool;

pub type ModifySpeed = fn(pokemon: &BattlePokemon, weather: Option<Weather>) -> f32;

/// Defender-side multiplier folded into the final damage modifier.
pub type ModifyFinalDamage = fn(defender: &BattlePokemon, effectiveness: f32) -> f32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwitchInEffect {
    /// Applied to the opponent.
    StatDrop(StatChange),
    Weather(Weather),
    Terrain(Terrain),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IncomingDamage {
    pub multiplier: f32,
    /// HP restored instead of taking the hit.
    pub heal_instead: Option<u16>,
    pub flash_fire_boost: bool,
}

impl IncomingDamage {
    pub fn scaled(multiplier: f32) -> Self {
        Self {
            multiplier,
            heal_instead: None,
            flash_fire_boost: false,
        }
    }

    pub fn immune() -> Self {
        Self::scaled(0.0)
    }

    pub fn is_immune(&self) -> bool {
        self.multiplier == 0.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EndOfTurnEffect {
    Boost(StatChange),
    Heal(u16),
    Damage(u16),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Survival {
    pub survive_with_hp: u16,
}

#[derive(Clone, Copy, Default)]
pub struct AbilityHooks {
    pub on_switch_in: Option<OnSwitchIn>,
    pub modify_incoming_damage: Option<ModifyIncomingDamage>,
    pub modify_attack_stat: Option<ModifyAttackStat>,
    pub modify_stab: Option<ModifyStab>,
    pub prevent_status: Option<PreventStatus>,
    pub on_after_ko: Option<OnAfterKo>,
    pub on_end_of_turn: Option<OnEndOfTurn>,
    pub modify_survival: Option<ModifySurvival>,
    pub on_stat_drop: Option<OnStatDrop>,
    pub on_trapping: Option<OnTrapping>,
    pub modify_speed: Option<ModifySpeed>,
    pub modify_final_damage: Option<ModifyFinalDamage>,
    /// Magic Guard: no damage from anything but direct attacks.
    pub prevents_indirect_damage: bool,
    /// Clear Body: opponents cannot lower the holder's stages.
    pub blocks_stat_drops: bool,
    /// Poison Heal: poison residuals become the end-of-turn heal instead.
    pub replaces_poison_damage: bool,
}

impl AbilityHooks {
    pub const NONE: Self = Self {
        on_switch_in: None,
        modify_incoming_damage: None,
        modify_attack_stat: None,
        modify_stab: None,
        prevent_status: None,
        on_after_ko: None,
        on_end_of_turn: None,
        modify_survival: None,
        on_stat_drop: None,
        on_trapping: None,
        modify_speed: None,
        modify_final_damage: None,
        prevents_indirect_damage: false,
        blocks_stat_drops: false,
        replaces_poison_damage: false,
    };
}
