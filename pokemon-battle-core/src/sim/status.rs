use crate::data::types::Type;
use crate::sim::pokemon::BattlePokemon;
use crate::sim::weather_field::{terrain_blocks_status, Terrain};
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MAX_SLEEP_TURNS: u8 = 3;
pub const FREEZE_MAX_TICKS: u8 = 3;
pub const TOXIC_MAX_COUNTER: u8 = 15;
pub const THAW_CHANCE: f64 = 0.2;
pub const FULL_PARALYSIS_CHANCE: f64 = 0.25;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Burn,
    Paralysis,
    Poison,
    Toxic,
    Sleep,
    Freeze,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Burn => "burned",
            Status::Paralysis => "paralyzed",
            Status::Poison => "poisoned",
            Status::Toxic => "badly poisoned",
            Status::Sleep => "asleep",
            Status::Freeze => "frozen",
        }
    }

    fn immune_types(self) -> &'static [Type] {
        match self {
            Status::Burn => &[Type::Fire],
            Status::Paralysis => &[Type::Electric],
            Status::Poison | Status::Toxic => &[Type::Poison, Type::Steel],
            Status::Freeze => &[Type::Ice],
            Status::Sleep => &[],
        }
    }
}

/// Why a status application was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusBlock {
    AlreadyStatused,
    Fainted,
    Ability,
    TypeImmune,
    Terrain,
}

pub fn check_status(
    target: &BattlePokemon,
    status: Status,
    terrain: Option<Terrain>,
) -> Result<(), StatusBlock> {
    if target.is_fainted() {
        return Err(StatusBlock::Fainted);
    }
    if target.status.is_some() {
        return Err(StatusBlock::AlreadyStatused);
    }
    if let Some(prevent) = target.ability_hooks().prevent_status {
        if prevent(target, status) {
            return Err(StatusBlock::Ability);
        }
    }
    if target
        .defensive_types()
        .iter()
        .any(|t| status.immune_types().contains(t))
    {
        return Err(StatusBlock::TypeImmune);
    }
    if terrain_blocks_status(terrain, target, status) {
        return Err(StatusBlock::Terrain);
    }
    Ok(())
}

pub fn apply_status(
    target: &mut BattlePokemon,
    status: Status,
    terrain: Option<Terrain>,
    rng: &mut SmallRng,
) -> Result<(), StatusBlock> {
    check_status(target, status, terrain)?;
    target.status = Some(status);
    target.sleep_turns = 0;
    target.toxic_counter = 0;
    target.freeze_turns = 0;
    match status {
        Status::Sleep => target.sleep_turns = rng.gen_range(1..=MAX_SLEEP_TURNS),
        Status::Toxic => target.toxic_counter = 1,
        _ => {}
    }
    Ok(())
}

pub fn clear_status(target: &mut BattlePokemon) {
    target.status = None;
    target.sleep_turns = 0;
    target.toxic_counter = 0;
    target.freeze_turns = 0;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BeforeMove {
    Act,
    Thawed,
    Asleep,
    Frozen,
    FullyParalyzed,
}

impl BeforeMove {
    pub fn can_act(self) -> bool {
        matches!(self, BeforeMove::Act | BeforeMove::Thawed)
    }
}

/// Rolls the per-action status checks. Only a thaw mutates the combatant.
pub fn before_move(pokemon: &mut BattlePokemon, rng: &mut SmallRng) -> BeforeMove {
    match pokemon.status {
        Some(Status::Sleep) if pokemon.sleep_turns > 0 => BeforeMove::Asleep,
        Some(Status::Freeze) => {
            if rng.gen_bool(THAW_CHANCE) {
                clear_status(pokemon);
                BeforeMove::Thawed
            } else {
                BeforeMove::Frozen
            }
        }
        Some(Status::Paralysis) if rng.gen_bool(FULL_PARALYSIS_CHANCE) => {
            BeforeMove::FullyParalyzed
        }
        _ => BeforeMove::Act,
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusTick {
    Damage { status: Status, amount: u16 },
    WokeUp,
    Thawed,
    Expired(Status),
}

/// End-of-turn status processing: damage over time, counters and natural expiry.
pub fn end_of_turn(pokemon: &mut BattlePokemon) -> Vec<StatusTick> {
    let mut ticks = Vec::new();
    let Some(status) = pokemon.status else {
        return ticks;
    };
    if pokemon.is_fainted() {
        return ticks;
    }
    let hooks = pokemon.ability_hooks();
    let skip_damage = hooks.prevents_indirect_damage;
    match status {
        Status::Burn | Status::Poison => {
            let replaced = status == Status::Poison && hooks.replaces_poison_damage;
            if !skip_damage && !replaced {
                let divisor = if status == Status::Burn { 16 } else { 8 };
                let amount = pokemon.take_damage((pokemon.max_hp / divisor).max(1));
                ticks.push(StatusTick::Damage { status, amount });
            }
        }
        Status::Toxic => {
            if !skip_damage && !hooks.replaces_poison_damage {
                let raw = (pokemon.max_hp as u32 * pokemon.toxic_counter as u32 / 16).max(1) as u16;
                let amount = pokemon.take_damage(raw);
                ticks.push(StatusTick::Damage { status, amount });
            }
            pokemon.toxic_counter = pokemon.toxic_counter.saturating_add(1);
            if pokemon.toxic_counter > TOXIC_MAX_COUNTER && !pokemon.is_fainted() {
                clear_status(pokemon);
                ticks.push(StatusTick::Expired(Status::Toxic));
            }
        }
        Status::Sleep => {
            pokemon.sleep_turns = pokemon.sleep_turns.saturating_sub(1);
            if pokemon.sleep_turns == 0 {
                clear_status(pokemon);
                ticks.push(StatusTick::WokeUp);
            }
        }
        Status::Freeze => {
            pokemon.freeze_turns = pokemon.freeze_turns.saturating_add(1);
            if pokemon.freeze_turns >= FREEZE_MAX_TICKS {
                clear_status(pokemon);
                ticks.push(StatusTick::Thawed);
            }
        }
        Status::Paralysis => {}
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::abilities::Ability;
    use crate::sim::pokemon::test_pokemon;
    use assert_matches::assert_matches;
    use rand::SeedableRng;

    #[test]
    fn only_one_status_at_a_time() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut target = test_pokemon("target", &[Type::Normal], Ability::NoAbility);
        assert_eq!(apply_status(&mut target, Status::Burn, None, &mut rng), Ok(()));
        assert_eq!(
            apply_status(&mut target, Status::Paralysis, None, &mut rng),
            Err(StatusBlock::AlreadyStatused)
        );
        assert_eq!(target.status, Some(Status::Burn));
    }

    #[test]
    fn abilities_and_types_block_status() {
        let immunity = test_pokemon("immunity", &[Type::Normal], Ability::Immunity);
        assert_eq!(check_status(&immunity, Status::Toxic, None), Err(StatusBlock::Ability));
        let insomnia = test_pokemon("insomnia", &[Type::Normal], Ability::Insomnia);
        assert_eq!(check_status(&insomnia, Status::Sleep, None), Err(StatusBlock::Ability));
        assert_eq!(check_status(&insomnia, Status::Burn, None), Ok(()));
        let steel = test_pokemon("steel", &[Type::Steel], Ability::NoAbility);
        assert_eq!(check_status(&steel, Status::Poison, None), Err(StatusBlock::TypeImmune));
        let electric = test_pokemon("electric", &[Type::Electric], Ability::NoAbility);
        assert_eq!(check_status(&electric, Status::Paralysis, None), Err(StatusBlock::TypeImmune));
    }

    #[test]
    fn electric_terrain_blocks_sleep() {
        let target = test_pokemon("target", &[Type::Normal], Ability::NoAbility);
        assert_eq!(
            check_status(&target, Status::Sleep, Some(Terrain::Electric)),
            Err(StatusBlock::Terrain)
        );
    }

    #[test]
    fn poison_and_burn_residuals() {
        let mut poisoned = test_pokemon("poisoned", &[Type::Normal], Ability::NoAbility);
        poisoned.status = Some(Status::Poison);
        assert_eq!(
            end_of_turn(&mut poisoned),
            vec![StatusTick::Damage { status: Status::Poison, amount: 12 }]
        );
        assert_eq!(poisoned.current_hp, 88);

        let mut burned = test_pokemon("burned", &[Type::Normal], Ability::NoAbility);
        burned.status = Some(Status::Burn);
        end_of_turn(&mut burned);
        assert_eq!(burned.current_hp, 94);
    }

    #[test]
    fn toxic_scales_with_counter() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut target = test_pokemon("target", &[Type::Normal], Ability::NoAbility);
        apply_status(&mut target, Status::Toxic, None, &mut rng).expect("toxic applies");
        end_of_turn(&mut target);
        assert_eq!(target.current_hp, 94);
        end_of_turn(&mut target);
        assert_eq!(target.current_hp, 82);
        assert_eq!(target.toxic_counter, 3);
    }

    #[test]
    fn toxic_expires_after_counter_passes_limit() {
        let mut target = test_pokemon("target", &[Type::Normal], Ability::MagicGuard);
        target.status = Some(Status::Toxic);
        target.toxic_counter = TOXIC_MAX_COUNTER;
        assert_eq!(end_of_turn(&mut target), vec![StatusTick::Expired(Status::Toxic)]);
        assert_eq!(target.status, None);
        assert_eq!(target.current_hp, target.max_hp);
    }

    #[test]
    fn magic_guard_skips_status_damage() {
        let mut target = test_pokemon("guard", &[Type::Normal], Ability::MagicGuard);
        target.status = Some(Status::Burn);
        assert!(end_of_turn(&mut target).is_empty());
        assert_eq!(target.current_hp, target.max_hp);
    }

    #[test]
    fn poison_heal_replaces_poison_damage() {
        let mut target = test_pokemon("heal", &[Type::Normal], Ability::PoisonHeal);
        target.status = Some(Status::Poison);
        assert!(end_of_turn(&mut target).is_empty());
        assert_eq!(target.current_hp, target.max_hp);
    }

    #[test]
    fn sleep_counts_down_and_wakes() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut target = test_pokemon("sleeper", &[Type::Normal], Ability::NoAbility);
        apply_status(&mut target, Status::Sleep, None, &mut rng).expect("sleep applies");
        let turns = target.sleep_turns;
        assert!((1..=MAX_SLEEP_TURNS).contains(&turns));
        assert_eq!(before_move(&mut target, &mut rng), BeforeMove::Asleep);
        for _ in 1..turns {
            assert!(end_of_turn(&mut target).is_empty());
        }
        assert_eq!(end_of_turn(&mut target), vec![StatusTick::WokeUp]);
        assert_matches!(before_move(&mut target, &mut rng), BeforeMove::Act);
    }

    #[test]
    fn freeze_always_expires_after_three_ticks() {
        let mut target = test_pokemon("frozen", &[Type::Normal], Ability::NoAbility);
        target.status = Some(Status::Freeze);
        assert!(end_of_turn(&mut target).is_empty());
        assert!(end_of_turn(&mut target).is_empty());
        assert_eq!(end_of_turn(&mut target), vec![StatusTick::Thawed]);
        assert_eq!(target.status, None);
    }
}
