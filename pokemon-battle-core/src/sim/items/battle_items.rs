use super::{Item, ItemHooks};
use crate::data::types::Type;
use crate::sim::abilities::hooks::EndOfTurnEffect;
use crate::sim::pokemon::BattlePokemon;

fn leftovers(holder: &BattlePokemon) -> Option<EndOfTurnEffect> {
    if holder.current_hp == holder.max_hp {
        return None;
    }
    Some(EndOfTurnEffect::Heal((holder.max_hp / 16).max(1)))
}

/// Heals Poison types, hurts everyone else.
fn black_sludge(holder: &BattlePokemon) -> Option<EndOfTurnEffect> {
    let amount = (holder.max_hp / 16).max(1);
    if holder.defensive_types().contains(&Type::Poison) {
        (holder.current_hp < holder.max_hp).then_some(EndOfTurnEffect::Heal(amount))
    } else if holder.ability_hooks().prevents_indirect_damage {
        None
    } else {
        Some(EndOfTurnEffect::Damage(amount))
    }
}

fn life_orb_boost(_: &BattlePokemon, _: Type, _: f32) -> f32 {
    1.3
}

fn life_orb_recoil(holder: &BattlePokemon) -> Option<u16> {
    if holder.ability_hooks().prevents_indirect_damage {
        return None;
    }
    Some((holder.max_hp / 10).max(1))
}

fn expert_belt(_: &BattlePokemon, _: Type, effectiveness: f32) -> f32 {
    if effectiveness > 1.0 {
        1.2
    } else {
        1.0
    }
}

fn choice_power(holder: &BattlePokemon, is_physical: bool) -> f32 {
    match (holder.item, is_physical) {
        (Some(Item::ChoiceBand), true) | (Some(Item::ChoiceSpecs), false) => 1.5,
        _ => 1.0,
    }
}

fn choice_scarf(_: &BattlePokemon) -> f32 {
    1.5
}

fn assault_vest(_: &BattlePokemon, is_physical: bool) -> f32 {
    if is_physical {
        1.0
    } else {
        1.5
    }
}

pub static LEFTOVERS: ItemHooks = ItemHooks {
    on_end_of_turn: Some(leftovers),
    ..ItemHooks::NONE
};

pub static BLACK_SLUDGE: ItemHooks = ItemHooks {
    on_end_of_turn: Some(black_sludge),
    ..ItemHooks::NONE
};

pub static LIFE_ORB: ItemHooks = ItemHooks {
    modify_final_damage: Some(life_orb_boost),
    attack_recoil: Some(life_orb_recoil),
    ..ItemHooks::NONE
};

pub static EXPERT_BELT: ItemHooks = ItemHooks {
    modify_final_damage: Some(expert_belt),
    ..ItemHooks::NONE
};

pub static CHOICE_POWER: ItemHooks = ItemHooks {
    modify_attack_stat: Some(choice_power),
    choice_lock: true,
    ..ItemHooks::NONE
};

pub static CHOICE_SCARF: ItemHooks = ItemHooks {
    modify_speed: Some(choice_scarf),
    choice_lock: true,
    ..ItemHooks::NONE
};

pub static ASSAULT_VEST: ItemHooks = ItemHooks {
    modify_defense_stat: Some(assault_vest),
    ..ItemHooks::NONE
};
