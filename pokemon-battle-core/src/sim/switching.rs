use crate::sim::pokemon::BattlePokemon;
use crate::sim::stats::StatStages;
use crate::sim::status::Status;
use crate::sim::transform::end_dynamax;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwitchKind {
    Voluntary,
    Forced,
}

/// Whether `opponent`'s ability keeps `pokemon` on the field.
pub fn is_trapped(pokemon: &BattlePokemon, opponent: &BattlePokemon) -> bool {
    if opponent.is_fainted() {
        return false;
    }
    opponent
        .ability_hooks()
        .on_trapping
        .is_some_and(|trap| trap(opponent, pokemon))
}

pub fn can_switch(pokemon: &BattlePokemon, opponent: &BattlePokemon, kind: SwitchKind) -> bool {
    match kind {
        SwitchKind::Forced => true,
        SwitchKind::Voluntary => !is_trapped(pokemon, opponent),
    }
}

/// Clears everything that only lasts while the combatant is on the field.
pub fn leave_field(pokemon: &mut BattlePokemon) {
    pokemon.active = false;
    pokemon.stages = StatStages::default();
    pokemon.choice_lock = None;
    pokemon.flash_fire = false;
    if pokemon.status == Some(Status::Toxic) {
        pokemon.toxic_counter = 1;
    }
    if pokemon.dynamaxed {
        end_dynamax(pokemon);
    }
}

pub fn enter_field(pokemon: &mut BattlePokemon) {
    pokemon.active = true;
    pokemon.sturdy_used = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::Type;
    use crate::sim::abilities::Ability;
    use crate::sim::pokemon::test_pokemon;
    use crate::sim::stats::BoostStat;

    #[test]
    fn shadow_tag_blocks_voluntary_but_not_forced() {
        let trapper = test_pokemon("trapper", &[Type::Psychic], Ability::ShadowTag);
        let target = test_pokemon("target", &[Type::Normal], Ability::NoAbility);
        assert!(!can_switch(&target, &trapper, SwitchKind::Voluntary));
        assert!(can_switch(&target, &trapper, SwitchKind::Forced));
    }

    #[test]
    fn fainted_trapper_releases() {
        let mut trapper = test_pokemon("trapper", &[Type::Ground], Ability::ArenaTrap);
        let target = test_pokemon("target", &[Type::Normal], Ability::NoAbility);
        assert!(is_trapped(&target, &trapper));
        trapper.current_hp = 0;
        assert!(!is_trapped(&target, &trapper));
    }

    #[test]
    fn leaving_resets_volatile_state() {
        let mut pokemon = test_pokemon("mon", &[Type::Normal], Ability::Sturdy);
        pokemon.stages.apply(BoostStat::Atk, 2);
        pokemon.choice_lock = Some(0);
        pokemon.sturdy_used = true;
        pokemon.status = Some(Status::Toxic);
        pokemon.toxic_counter = 5;
        leave_field(&mut pokemon);
        assert_eq!(pokemon.stages, StatStages::default());
        assert_eq!(pokemon.choice_lock, None);
        assert_eq!(pokemon.toxic_counter, 1);
        assert!(pokemon.sturdy_used);
        enter_field(&mut pokemon);
        assert!(!pokemon.sturdy_used);
        assert!(pokemon.active);
    }
}
