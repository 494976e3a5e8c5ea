use super::{Item, ItemHooks};
use crate::data::types::Type;
use crate::sim::pokemon::BattlePokemon;

pub fn boosted_type(item: Item) -> Option<Type> {
    match item {
        Item::SilkScarf => Some(Type::Normal),
        Item::Charcoal => Some(Type::Fire),
        Item::MysticWater => Some(Type::Water),
        Item::Magnet => Some(Type::Electric),
        Item::MiracleSeed => Some(Type::Grass),
        Item::NeverMeltIce => Some(Type::Ice),
        Item::BlackBelt => Some(Type::Fighting),
        Item::PoisonBarb => Some(Type::Poison),
        Item::SoftSand => Some(Type::Ground),
        Item::SharpBeak => Some(Type::Flying),
        Item::TwistedSpoon => Some(Type::Psychic),
        Item::SilverPowder => Some(Type::Bug),
        Item::HardStone => Some(Type::Rock),
        Item::SpellTag => Some(Type::Ghost),
        Item::DragonFang => Some(Type::Dragon),
        Item::BlackGlasses => Some(Type::Dark),
        Item::MetalCoat => Some(Type::Steel),
        Item::FairyFeather => Some(Type::Fairy),
        _ => None,
    }
}

pub fn is_mega_stone(item: Item) -> bool {
    matches!(
        item,
        Item::CharizarditeX
            | Item::CharizarditeY
            | Item::Venusaurite
            | Item::Blastoisinite
            | Item::Gengarite
            | Item::Gyaradosite
            | Item::Kangaskhanite
            | Item::Lucarionite
            | Item::Garchompite
            | Item::Tyranitarite
            | Item::Metagrossite
            | Item::Salamencite
    )
}

fn type_booster(holder: &BattlePokemon, move_type: Type, _: f32) -> f32 {
    if holder.item.and_then(boosted_type) == Some(move_type) {
        1.2
    } else {
        1.0
    }
}

pub static TYPE_BOOSTER: ItemHooks = ItemHooks {
    modify_final_damage: Some(type_booster),
    ..ItemHooks::NONE
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::abilities::Ability;
    use crate::sim::pokemon::test_pokemon;

    #[test]
    fn type_booster_matches_move_type() {
        let mut holder = test_pokemon("holder", &[Type::Fire], Ability::NoAbility);
        holder.item = Some(Item::Charcoal);
        assert_eq!(type_booster(&holder, Type::Fire, 1.0), 1.2);
        assert_eq!(type_booster(&holder, Type::Water, 1.0), 1.0);
        assert!(std::ptr::eq(Item::Charcoal.hooks(), &TYPE_BOOSTER));
    }

    #[test]
    fn mega_stones_are_flagged() {
        assert!(Item::Gengarite.is_mega_stone());
        assert!(!Item::Leftovers.is_mega_stone());
        assert_eq!(boosted_type(Item::Gengarite), None);
    }
}
