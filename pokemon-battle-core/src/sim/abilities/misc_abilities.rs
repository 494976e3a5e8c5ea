use super::hooks::{AbilityHooks, Survival};
use super::Ability;
use crate::data::moves::StatChange;
use crate::data::types::Type;
use crate::sim::pokemon::BattlePokemon;
use crate::sim::stats::BoostStat;

fn moxie(_: &BattlePokemon) -> Option<StatChange> {
    Some(StatChange {
        stat: BoostStat::Atk,
        stages: 1,
    })
}

/// Boosts whichever of Attack, Sp. Atk and Speed is numerically highest.
fn beast_boost(attacker: &BattlePokemon) -> Option<StatChange> {
    let stats = attacker.stats;
    let stat = if stats.atk >= stats.spa && stats.atk >= stats.spe {
        BoostStat::Atk
    } else if stats.spa >= stats.spe {
        BoostStat::Spa
    } else {
        BoostStat::Spe
    };
    Some(StatChange { stat, stages: 1 })
}

/// Holds on at 1 HP from full, once per switch-in.
fn sturdy(pokemon: &BattlePokemon, incoming: u16) -> Option<Survival> {
    let full = pokemon.current_hp == pokemon.max_hp;
    if full && !pokemon.sturdy_used && incoming >= pokemon.current_hp && pokemon.current_hp > 1 {
        Some(Survival { survive_with_hp: 1 })
    } else {
        None
    }
}

fn stat_drop_reaction(pokemon: &BattlePokemon, _stat: BoostStat, stages: i8) -> Option<StatChange> {
    if stages >= 0 {
        return None;
    }
    let stat = match pokemon.ability {
        Ability::Defiant => BoostStat::Atk,
        Ability::Competitive => BoostStat::Spa,
        _ => return None,
    };
    Some(StatChange { stat, stages: 2 })
}

fn trapping(pokemon: &BattlePokemon, opponent: &BattlePokemon) -> bool {
    let types = opponent.defensive_types();
    match pokemon.ability {
        Ability::ArenaTrap => {
            !types.contains(&Type::Flying)
                && !types.contains(&Type::Ghost)
                && opponent.ability != Ability::Levitate
        }
        Ability::ShadowTag => {
            !types.contains(&Type::Ghost) && opponent.ability != Ability::ShadowTag
        }
        Ability::MagnetPull => types.contains(&Type::Steel) && !types.contains(&Type::Ghost),
        _ => false,
    }
}

pub static MOXIE: AbilityHooks = AbilityHooks {
    on_after_ko: Some(moxie),
    ..AbilityHooks::NONE
};

pub static BEAST_BOOST: AbilityHooks = AbilityHooks {
    on_after_ko: Some(beast_boost),
    ..AbilityHooks::NONE
};

pub static STURDY: AbilityHooks = AbilityHooks {
    modify_survival: Some(sturdy),
    ..AbilityHooks::NONE
};

pub static STAT_DROP_REACTION: AbilityHooks = AbilityHooks {
    on_stat_drop: Some(stat_drop_reaction),
    ..AbilityHooks::NONE
};

pub static TRAPPING: AbilityHooks = AbilityHooks {
    on_trapping: Some(trapping),
    ..AbilityHooks::NONE
};

pub static CLEAR_BODY: AbilityHooks = AbilityHooks {
    blocks_stat_drops: true,
    ..AbilityHooks::NONE
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pokemon::test_pokemon;

    #[test]
    fn sturdy_requires_full_hp_and_unused_flag() {
        let mut holder = test_pokemon("holder", &[Type::Rock], Ability::Sturdy);
        assert_eq!(sturdy(&holder, 80), None);
        assert_eq!(sturdy(&holder, 150), Some(Survival { survive_with_hp: 1 }));
        holder.sturdy_used = true;
        assert_eq!(sturdy(&holder, 150), None);
        holder.sturdy_used = false;
        holder.current_hp = 99;
        assert_eq!(sturdy(&holder, 150), None);
    }

    #[test]
    fn beast_boost_picks_highest_stat() {
        let mut user = test_pokemon("user", &[Type::Steel], Ability::BeastBoost);
        user.stats.spe = 180;
        assert_eq!(beast_boost(&user).map(|c| c.stat), Some(BoostStat::Spe));
        user.stats.atk = 200;
        assert_eq!(beast_boost(&user).map(|c| c.stat), Some(BoostStat::Atk));
    }

    #[test]
    fn defiant_and_competitive_answer_drops() {
        let defiant = test_pokemon("defiant", &[Type::Dark], Ability::Defiant);
        assert_eq!(
            stat_drop_reaction(&defiant, BoostStat::Def, -1),
            Some(StatChange { stat: BoostStat::Atk, stages: 2 })
        );
        let competitive = test_pokemon("competitive", &[Type::Fairy], Ability::Competitive);
        assert_eq!(
            stat_drop_reaction(&competitive, BoostStat::Atk, -1).map(|c| c.stat),
            Some(BoostStat::Spa)
        );
        assert_eq!(stat_drop_reaction(&defiant, BoostStat::Atk, 1), None);
    }

    #[test]
    fn trapping_immunities() {
        let trapper = test_pokemon("trapper", &[Type::Ground], Ability::ArenaTrap);
        let grounded = test_pokemon("grounded", &[Type::Normal], Ability::NoAbility);
        let flyer = test_pokemon("flyer", &[Type::Flying], Ability::NoAbility);
        let ghost = test_pokemon("ghost", &[Type::Ghost], Ability::NoAbility);
        let floater = test_pokemon("floater", &[Type::Psychic], Ability::Levitate);
        assert!(trapping(&trapper, &grounded));
        assert!(!trapping(&trapper, &flyer));
        assert!(!trapping(&trapper, &ghost));
        assert!(!trapping(&trapper, &floater));

        let tagger = test_pokemon("tagger", &[Type::Psychic], Ability::ShadowTag);
        let mirror = test_pokemon("mirror", &[Type::Psychic], Ability::ShadowTag);
        assert!(trapping(&tagger, &grounded));
        assert!(!trapping(&tagger, &mirror));
        assert!(!trapping(&tagger, &ghost));

        let magnet = test_pokemon("magnet", &[Type::Electric], Ability::MagnetPull);
        let steel = test_pokemon("steel", &[Type::Steel], Ability::NoAbility);
        assert!(trapping(&magnet, &steel));
        assert!(!trapping(&magnet, &grounded));
    }
}
