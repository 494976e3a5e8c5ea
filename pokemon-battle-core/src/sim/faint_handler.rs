use crate::data::moves::StatChange;
use crate::sim::abilities::Ability;
use crate::sim::items::Item;
use crate::sim::pokemon::BattlePokemon;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KoPrevention {
    Ability(Ability),
    Item(Item),
}

/// Checks ability then item survival hooks against a lethal hit.
/// Returns the reduced damage and what prevented the KO.
pub fn prevent_ko(defender: &BattlePokemon, damage: u16) -> Option<(u16, KoPrevention)> {
    if defender.is_fainted() || damage < defender.current_hp {
        return None;
    }
    let survived = |hp: u16| defender.current_hp.saturating_sub(hp.max(1));
    if let Some(hook) = defender.ability_hooks().modify_survival {
        if let Some(survival) = hook(defender, damage) {
            let prevention = KoPrevention::Ability(defender.ability);
            return Some((survived(survival.survive_with_hp), prevention));
        }
    }
    let item = defender.item?;
    let hook = item.hooks().modify_survival?;
    hook(defender, damage)
        .map(|survival| (survived(survival.survive_with_hp), KoPrevention::Item(item)))
}

/// Records that a KO prevention fired: Sturdy is spent until the next
/// switch-in, items are consumed.
pub fn spend_ko_prevention(defender: &mut BattlePokemon, prevention: KoPrevention) {
    match prevention {
        KoPrevention::Ability(_) => defender.sturdy_used = true,
        KoPrevention::Item(item) => {
            if item.hooks().consumed_on_use {
                defender.item = None;
            }
        }
    }
}

pub fn after_ko_boost(attacker: &BattlePokemon) -> Option<StatChange> {
    if attacker.is_fainted() {
        return None;
    }
    attacker.ability_hooks().on_after_ko.and_then(|hook| hook(attacker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::Type;
    use crate::sim::pokemon::test_pokemon;
    use crate::sim::stats::BoostStat;

    #[test]
    fn sturdy_survives_once() {
        let mut defender = test_pokemon("defender", &[Type::Rock], Ability::Sturdy);
        let (damage, source) = prevent_ko(&defender, 180).expect("sturdy fires");
        assert_eq!(damage, 99);
        assert_eq!(source, KoPrevention::Ability(Ability::Sturdy));
        spend_ko_prevention(&mut defender, source);
        defender.take_damage(damage);
        defender.current_hp = defender.max_hp;
        assert_eq!(prevent_ko(&defender, 180), None);
    }

    #[test]
    fn focus_sash_is_consumed() {
        let mut defender = test_pokemon("defender", &[Type::Normal], Ability::NoAbility);
        defender.item = Some(Item::FocusSash);
        let (damage, source) = prevent_ko(&defender, 300).expect("sash fires");
        assert_eq!(damage, 99);
        spend_ko_prevention(&mut defender, source);
        assert_eq!(defender.item, None);
    }

    #[test]
    fn non_lethal_hits_are_untouched() {
        let defender = test_pokemon("defender", &[Type::Rock], Ability::Sturdy);
        assert_eq!(prevent_ko(&defender, 99), None);
    }

    #[test]
    fn moxie_boosts_living_attacker() {
        let mut attacker = test_pokemon("attacker", &[Type::Dark], Ability::Moxie);
        assert_eq!(after_ko_boost(&attacker).map(|c| c.stat), Some(BoostStat::Atk));
        attacker.current_hp = 0;
        assert_eq!(after_ko_boost(&attacker), None);
    }
}
