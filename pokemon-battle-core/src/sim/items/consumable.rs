use super::ItemHooks;
use crate::sim::abilities::hooks::Survival;
use crate::sim::pokemon::BattlePokemon;

fn focus_sash(holder: &BattlePokemon, incoming: u16) -> Option<Survival> {
    let full = holder.current_hp == holder.max_hp;
    (full && incoming >= holder.current_hp && holder.current_hp > 1)
        .then_some(Survival { survive_with_hp: 1 })
}

fn sitrus_berry(holder: &BattlePokemon) -> Option<u16> {
    if holder.is_fainted() || holder.current_hp as u32 * 2 > holder.max_hp as u32 {
        return None;
    }
    Some((holder.max_hp / 4).max(1))
}

pub static FOCUS_SASH: ItemHooks = ItemHooks {
    modify_survival: Some(focus_sash),
    consumed_on_use: true,
    ..ItemHooks::NONE
};

pub static SITRUS_BERRY: ItemHooks = ItemHooks {
    on_after_damage: Some(sitrus_berry),
    consumed_on_use: true,
    ..ItemHooks::NONE
};
