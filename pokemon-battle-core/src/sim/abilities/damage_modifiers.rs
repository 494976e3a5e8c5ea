use super::hooks::{AbilityHooks, EndOfTurnEffect, IncomingDamage};
use super::Ability;
use crate::data::types::Type;
use crate::sim::pokemon::BattlePokemon;
use crate::sim::status::Status;
use crate::sim::weather_field::Weather;

fn absorb_heal(defender: &BattlePokemon) -> IncomingDamage {
    IncomingDamage {
        heal_instead: Some((defender.max_hp / 4).max(1)),
        ..IncomingDamage::immune()
    }
}

fn levitate(
    _: &BattlePokemon,
    _: &BattlePokemon,
    move_type: Type,
    _: u16,
) -> Option<IncomingDamage> {
    (move_type == Type::Ground).then(IncomingDamage::immune)
}

fn water_absorb(
    defender: &BattlePokemon,
    _: &BattlePokemon,
    move_type: Type,
    _: u16,
) -> Option<IncomingDamage> {
    (move_type == Type::Water).then(|| absorb_heal(defender))
}

fn volt_absorb(
    defender: &BattlePokemon,
    _: &BattlePokemon,
    move_type: Type,
    _: u16,
) -> Option<IncomingDamage> {
    (move_type == Type::Electric).then(|| absorb_heal(defender))
}

fn dry_skin_incoming(
    defender: &BattlePokemon,
    _: &BattlePokemon,
    move_type: Type,
    _: u16,
) -> Option<IncomingDamage> {
    match move_type {
        Type::Water => Some(absorb_heal(defender)),
        Type::Fire => Some(IncomingDamage::scaled(1.25)),
        _ => None,
    }
}

fn dry_skin_weather(pokemon: &BattlePokemon, weather: Option<Weather>) -> Option<EndOfTurnEffect> {
    let eighth = (pokemon.max_hp / 8).max(1);
    match weather {
        Some(Weather::Rain) if pokemon.current_hp < pokemon.max_hp => {
            Some(EndOfTurnEffect::Heal(eighth))
        }
        Some(Weather::Sun) => Some(EndOfTurnEffect::Damage(eighth)),
        _ => None,
    }
}

fn flash_fire_absorb(
    _: &BattlePokemon,
    _: &BattlePokemon,
    move_type: Type,
    _: u16,
) -> Option<IncomingDamage> {
    (move_type == Type::Fire).then(|| IncomingDamage {
        flash_fire_boost: true,
        ..IncomingDamage::immune()
    })
}

fn flash_fire_boost(attacker: &BattlePokemon, move_type: Type, _: u16, _: bool) -> f32 {
    if attacker.flash_fire && move_type == Type::Fire {
        1.5
    } else {
        1.0
    }
}

fn thick_fat(
    _: &BattlePokemon,
    _: &BattlePokemon,
    move_type: Type,
    _: u16,
) -> Option<IncomingDamage> {
    matches!(move_type, Type::Fire | Type::Ice).then(|| IncomingDamage::scaled(0.5))
}

fn multiscale(defender: &BattlePokemon, _effectiveness: f32) -> f32 {
    if defender.current_hp == defender.max_hp {
        0.5
    } else {
        1.0
    }
}

/// Filter and Solid Rock soften super-effective hits.
fn filter(_: &BattlePokemon, effectiveness: f32) -> f32 {
    if effectiveness > 1.0 {
        0.75
    } else {
        1.0
    }
}

fn huge_power(_: &BattlePokemon, _: Type, _: u16, is_physical: bool) -> f32 {
    if is_physical {
        2.0
    } else {
        1.0
    }
}

fn guts(attacker: &BattlePokemon, _: Type, _: u16, is_physical: bool) -> f32 {
    if is_physical && attacker.status.is_some() {
        1.5
    } else {
        1.0
    }
}

fn technician(_: &BattlePokemon, _: Type, move_power: u16, _: bool) -> f32 {
    if move_power <= 60 {
        1.5
    } else {
        1.0
    }
}

fn pinch_boost(attacker: &BattlePokemon, move_type: Type, _: u16, _: bool) -> f32 {
    let boosted = match attacker.ability {
        Ability::Blaze => Type::Fire,
        Ability::Torrent => Type::Water,
        Ability::Overgrow => Type::Grass,
        Ability::Swarm => Type::Bug,
        _ => return 1.0,
    };
    if move_type == boosted && attacker.current_hp as u32 * 3 <= attacker.max_hp as u32 {
        1.5
    } else {
        1.0
    }
}

fn adaptability(_: &BattlePokemon, stab: f32) -> f32 {
    if stab >= 2.0 {
        2.25
    } else if stab > 1.0 {
        2.0
    } else {
        stab
    }
}

fn weather_speed(pokemon: &BattlePokemon, weather: Option<Weather>) -> f32 {
    let active = match (pokemon.ability, weather) {
        (Ability::SwiftSwim, Some(Weather::Rain)) => true,
        (Ability::Chlorophyll, Some(Weather::Sun)) => true,
        (Ability::SandRush, Some(Weather::Sand)) => true,
        (Ability::SlushRush, Some(Weather::Hail)) => true,
        _ => false,
    };
    if active {
        2.0
    } else {
        1.0
    }
}

pub static LEVITATE: AbilityHooks = AbilityHooks {
    modify_incoming_damage: Some(levitate),
    ..AbilityHooks::NONE
};

pub static WATER_ABSORB: AbilityHooks = AbilityHooks {
    modify_incoming_damage: Some(water_absorb),
    ..AbilityHooks::NONE
};

pub static VOLT_ABSORB: AbilityHooks = AbilityHooks {
    modify_incoming_damage: Some(volt_absorb),
    ..AbilityHooks::NONE
};

pub static DRY_SKIN: AbilityHooks = AbilityHooks {
    modify_incoming_damage: Some(dry_skin_incoming),
    on_end_of_turn: Some(dry_skin_weather),
    ..AbilityHooks::NONE
};

pub static FLASH_FIRE: AbilityHooks = AbilityHooks {
    modify_incoming_damage: Some(flash_fire_absorb),
    modify_attack_stat: Some(flash_fire_boost),
    ..AbilityHooks::NONE
};

pub static THICK_FAT: AbilityHooks = AbilityHooks {
    modify_incoming_damage: Some(thick_fat),
    ..AbilityHooks::NONE
};

pub static MULTISCALE: AbilityHooks = AbilityHooks {
    modify_final_damage: Some(multiscale),
    ..AbilityHooks::NONE
};

pub static FILTER: AbilityHooks = AbilityHooks {
    modify_final_damage: Some(filter),
    ..AbilityHooks::NONE
};

pub static HUGE_POWER: AbilityHooks = AbilityHooks {
    modify_attack_stat: Some(huge_power),
    ..AbilityHooks::NONE
};

pub static GUTS: AbilityHooks = AbilityHooks {
    modify_attack_stat: Some(guts),
    ..AbilityHooks::NONE
};

pub static TECHNICIAN: AbilityHooks = AbilityHooks {
    modify_attack_stat: Some(technician),
    ..AbilityHooks::NONE
};

pub static PINCH_BOOST: AbilityHooks = AbilityHooks {
    modify_attack_stat: Some(pinch_boost),
    ..AbilityHooks::NONE
};

pub static ADAPTABILITY: AbilityHooks = AbilityHooks {
    modify_stab: Some(adaptability),
    ..AbilityHooks::NONE
};

pub static WEATHER_SPEED: AbilityHooks = AbilityHooks {
    modify_speed: Some(weather_speed),
    ..AbilityHooks::NONE
};

/// Guts ignores the burn attack drop.
pub fn ignores_burn_drop(attacker: &BattlePokemon) -> bool {
    attacker.ability == Ability::Guts && attacker.status == Some(Status::Burn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pokemon::test_pokemon;

    fn incoming(defender: &BattlePokemon, move_type: Type) -> Option<IncomingDamage> {
        let attacker = test_pokemon("attacker", &[Type::Normal], Ability::NoAbility);
        let hook = defender.ability_hooks().modify_incoming_damage?;
        hook(defender, &attacker, move_type, 90)
    }

    #[test]
    fn water_absorb_turns_water_moves_into_healing() {
        let defender = test_pokemon("absorber", &[Type::Water], Ability::WaterAbsorb);
        let result = incoming(&defender, Type::Water).expect("water is absorbed");
        assert_eq!(result.multiplier, 0.0);
        assert_eq!(result.heal_instead, Some(25));
        assert_eq!(incoming(&defender, Type::Fire), None);
    }

    #[test]
    fn levitate_is_immune_to_ground_without_heal() {
        let defender = test_pokemon("floater", &[Type::Ghost], Ability::Levitate);
        let result = incoming(&defender, Type::Ground).expect("ground is blocked");
        assert!(result.is_immune());
        assert_eq!(result.heal_instead, None);
    }

    #[test]
    fn flash_fire_absorbs_and_boosts() {
        let mut holder = test_pokemon("fire", &[Type::Fire], Ability::FlashFire);
        let result = incoming(&holder, Type::Fire).expect("fire is absorbed");
        assert!(result.flash_fire_boost);
        let boost = FLASH_FIRE.modify_attack_stat.expect("boost hook");
        assert_eq!(boost(&holder, Type::Fire, 90, false), 1.0);
        holder.flash_fire = true;
        assert_eq!(boost(&holder, Type::Fire, 90, false), 1.5);
    }

    #[test]
    fn attack_stat_modifiers() {
        let mut guts_user = test_pokemon("guts", &[Type::Normal], Ability::Guts);
        assert_eq!(guts(&guts_user, Type::Normal, 70, true), 1.0);
        guts_user.status = Some(Status::Burn);
        assert_eq!(guts(&guts_user, Type::Normal, 70, true), 1.5);
        assert!(ignores_burn_drop(&guts_user));

        let power = test_pokemon("power", &[Type::Water], Ability::HugePower);
        assert_eq!(huge_power(&power, Type::Water, 90, true), 2.0);
        assert_eq!(huge_power(&power, Type::Water, 90, false), 1.0);

        let tech = test_pokemon("tech", &[Type::Bug], Ability::Technician);
        assert_eq!(technician(&tech, Type::Bug, 60, true), 1.5);
        assert_eq!(technician(&tech, Type::Bug, 61, true), 1.0);
    }

    #[test]
    fn blaze_only_below_a_third() {
        let mut starter = test_pokemon("starter", &[Type::Fire], Ability::Blaze);
        assert_eq!(pinch_boost(&starter, Type::Fire, 90, false), 1.0);
        starter.current_hp = 33;
        assert_eq!(pinch_boost(&starter, Type::Fire, 90, false), 1.5);
        assert_eq!(pinch_boost(&starter, Type::Water, 90, false), 1.0);
    }

    #[test]
    fn adaptability_raises_stab() {
        let user = test_pokemon("user", &[Type::Normal], Ability::Adaptability);
        assert_eq!(adaptability(&user, 1.5), 2.0);
        assert_eq!(adaptability(&user, 2.0), 2.25);
        assert_eq!(adaptability(&user, 1.0), 1.0);
    }

    #[test]
    fn filter_and_multiscale() {
        let mut rock = test_pokemon("rock", &[Type::Rock], Ability::SolidRock);
        let hook = rock.ability_hooks().modify_final_damage.expect("filter hook");
        assert_eq!(hook(&rock, 2.0), 0.75);
        assert_eq!(hook(&rock, 1.0), 1.0);
        rock.ability = Ability::Multiscale;
        let hook = rock.ability_hooks().modify_final_damage.expect("multiscale hook");
        assert_eq!(hook(&rock, 1.0), 0.5);
        rock.current_hp -= 1;
        assert_eq!(hook(&rock, 1.0), 1.0);
    }

    #[test]
    fn swift_swim_doubles_speed_in_rain() {
        let swimmer = test_pokemon("swimmer", &[Type::Water], Ability::SwiftSwim);
        assert_eq!(weather_speed(&swimmer, Some(Weather::Rain)), 2.0);
        assert_eq!(weather_speed(&swimmer, Some(Weather::Sun)), 1.0);
    }
}
