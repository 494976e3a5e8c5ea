use super::hooks::{AbilityHooks, EndOfTurnEffect};
use super::Ability;
use crate::data::moves::StatChange;
use crate::sim::pokemon::BattlePokemon;
use crate::sim::stats::BoostStat;
use crate::sim::status::Status;
use crate::sim::weather_field::Weather;

fn status_immunity(pokemon: &BattlePokemon, status: Status) -> bool {
    match pokemon.ability {
        Ability::Immunity => matches!(status, Status::Poison | Status::Toxic),
        Ability::Insomnia | Ability::VitalSpirit => status == Status::Sleep,
        Ability::Limber => status == Status::Paralysis,
        Ability::WaterVeil => status == Status::Burn,
        Ability::MagmaArmor => status == Status::Freeze,
        _ => false,
    }
}

fn speed_boost(pokemon: &BattlePokemon, _: Option<Weather>) -> Option<EndOfTurnEffect> {
    let boost = StatChange {
        stat: BoostStat::Spe,
        stages: 1,
    };
    (pokemon.stages.spe < crate::sim::stats::MAX_STAGE).then_some(EndOfTurnEffect::Boost(boost))
}

fn poison_heal(pokemon: &BattlePokemon, _: Option<Weather>) -> Option<EndOfTurnEffect> {
    let poisoned = matches!(pokemon.status, Some(Status::Poison | Status::Toxic));
    if !poisoned || pokemon.current_hp == pokemon.max_hp {
        return None;
    }
    Some(EndOfTurnEffect::Heal((pokemon.max_hp / 8).max(1)))
}

pub static STATUS_IMMUNITY: AbilityHooks = AbilityHooks {
    prevent_status: Some(status_immunity),
    ..AbilityHooks::NONE
};

pub static SPEED_BOOST: AbilityHooks = AbilityHooks {
    on_end_of_turn: Some(speed_boost),
    ..AbilityHooks::NONE
};

pub static POISON_HEAL: AbilityHooks = AbilityHooks {
    on_end_of_turn: Some(poison_heal),
    replaces_poison_damage: true,
    ..AbilityHooks::NONE
};

pub static MAGIC_GUARD: AbilityHooks = AbilityHooks {
    prevents_indirect_damage: true,
    ..AbilityHooks::NONE
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::Type;
    use crate::sim::pokemon::test_pokemon;

    #[test]
    fn status_immunities_are_specific() {
        let limber = test_pokemon("limber", &[Type::Normal], Ability::Limber);
        assert!(status_immunity(&limber, Status::Paralysis));
        assert!(!status_immunity(&limber, Status::Burn));
        let veil = test_pokemon("veil", &[Type::Water], Ability::WaterVeil);
        assert!(status_immunity(&veil, Status::Burn));
    }

    #[test]
    fn speed_boost_stops_at_cap() {
        let mut user = test_pokemon("user", &[Type::Bug], Ability::SpeedBoost);
        assert!(speed_boost(&user, None).is_some());
        user.stages.spe = 6;
        assert_eq!(speed_boost(&user, None), None);
    }

    #[test]
    fn poison_heal_only_while_poisoned() {
        let mut user = test_pokemon("user", &[Type::Grass], Ability::PoisonHeal);
        user.current_hp = 50;
        assert_eq!(poison_heal(&user, None), None);
        user.status = Some(Status::Toxic);
        assert_eq!(poison_heal(&user, None), Some(EndOfTurnEffect::Heal(12)));
    }
}
