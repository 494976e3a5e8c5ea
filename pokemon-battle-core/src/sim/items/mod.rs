//! Held items as a closed table, dispatched the same way as abilities.

pub mod battle_items;
pub mod consumable;
pub mod type_items;

use crate::data::normalize_id;
use crate::data::types::Type;
use crate::sim::abilities::hooks::{EndOfTurnEffect, ModifySurvival};
use crate::sim::pokemon::BattlePokemon;
use phf::phf_map;
use serde::{Deserialize, Serialize};

pub type ItemAttackModifier = fn(holder: &BattlePokemon, is_physical: bool) -> f32;
pub type ItemDefenseModifier = fn(holder: &BattlePokemon, is_physical: bool) -> f32;
pub type ItemFinalModifier = fn(holder: &BattlePokemon, move_type: Type, effectiveness: f32) -> f32;
pub type ItemSpeedModifier = fn(holder: &BattlePokemon) -> f32;
pub type ItemEndOfTurn = fn(holder: &BattlePokemon) -> Option<EndOfTurnEffect>;
/// HP restored after the holder takes a hit. The item is consumed when it fires.
pub type ItemAfterDamage = fn(holder: &BattlePokemon) -> Option<u16>;
/// Recoil taken after the holder lands a damaging move.
pub type ItemAttackRecoil = fn(holder: &BattlePokemon) -> Option<u16>;

#[derive(Clone, Copy, Default)]
pub struct ItemHooks {
    pub modify_attack_stat: Option<ItemAttackModifier>,
    pub modify_defense_stat: Option<ItemDefenseModifier>,
    pub modify_final_damage: Option<ItemFinalModifier>,
    pub modify_speed: Option<ItemSpeedModifier>,
    pub modify_survival: Option<ModifySurvival>,
    pub on_end_of_turn: Option<ItemEndOfTurn>,
    pub on_after_damage: Option<ItemAfterDamage>,
    pub attack_recoil: Option<ItemAttackRecoil>,
    pub choice_lock: bool,
    pub consumed_on_use: bool,
}

impl ItemHooks {
    pub const NONE: Self = Self {
        modify_attack_stat: None,
        modify_defense_stat: None,
        modify_final_damage: None,
        modify_speed: None,
        modify_survival: None,
        on_end_of_turn: None,
        on_after_damage: None,
        attack_recoil: None,
        choice_lock: false,
        consumed_on_use: false,
    };
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Item {
    Leftovers,
    BlackSludge,
    LifeOrb,
    ExpertBelt,
    ChoiceBand,
    ChoiceSpecs,
    ChoiceScarf,
    AssaultVest,
    FocusSash,
    SitrusBerry,
    SilkScarf,
    Charcoal,
    MysticWater,
    Magnet,
    MiracleSeed,
    NeverMeltIce,
    BlackBelt,
    PoisonBarb,
    SoftSand,
    SharpBeak,
    TwistedSpoon,
    SilverPowder,
    HardStone,
    SpellTag,
    DragonFang,
    BlackGlasses,
    MetalCoat,
    FairyFeather,
    CharizarditeX,
    CharizarditeY,
    Venusaurite,
    Blastoisinite,
    Gengarite,
    Gyaradosite,
    Kangaskhanite,
    Lucarionite,
    Garchompite,
    Tyranitarite,
    Metagrossite,
    Salamencite,
}

static ITEM_IDS: phf::Map<&'static str, Item> = phf_map! {
    "leftovers" => Item::Leftovers,
    "blacksludge" => Item::BlackSludge,
    "lifeorb" => Item::LifeOrb,
    "expertbelt" => Item::ExpertBelt,
    "choiceband" => Item::ChoiceBand,
    "choicespecs" => Item::ChoiceSpecs,
    "choicescarf" => Item::ChoiceScarf,
    "assaultvest" => Item::AssaultVest,
    "focussash" => Item::FocusSash,
    "sitrusberry" => Item::SitrusBerry,
    "silkscarf" => Item::SilkScarf,
    "charcoal" => Item::Charcoal,
    "mysticwater" => Item::MysticWater,
    "magnet" => Item::Magnet,
    "miracleseed" => Item::MiracleSeed,
    "nevermeltice" => Item::NeverMeltIce,
    "blackbelt" => Item::BlackBelt,
    "poisonbarb" => Item::PoisonBarb,
    "softsand" => Item::SoftSand,
    "sharpbeak" => Item::SharpBeak,
    "twistedspoon" => Item::TwistedSpoon,
    "silverpowder" => Item::SilverPowder,
    "hardstone" => Item::HardStone,
    "spelltag" => Item::SpellTag,
    "dragonfang" => Item::DragonFang,
    "blackglasses" => Item::BlackGlasses,
    "metalcoat" => Item::MetalCoat,
    "fairyfeather" => Item::FairyFeather,
    "charizarditex" => Item::CharizarditeX,
    "charizarditey" => Item::CharizarditeY,
    "venusaurite" => Item::Venusaurite,
    "blastoisinite" => Item::Blastoisinite,
    "gengarite" => Item::Gengarite,
    "gyaradosite" => Item::Gyaradosite,
    "kangaskhanite" => Item::Kangaskhanite,
    "lucarionite" => Item::Lucarionite,
    "garchompite" => Item::Garchompite,
    "tyranitarite" => Item::Tyranitarite,
    "metagrossite" => Item::Metagrossite,
    "salamencite" => Item::Salamencite,
};

static NO_HOOKS: ItemHooks = ItemHooks::NONE;

/// Hooks for an optional held item; an empty hand has none.
pub fn item_hooks(item: Option<Item>) -> &'static ItemHooks {
    item.map_or(&NO_HOOKS, Item::hooks)
}

impl Item {
    pub fn from_name(name: &str) -> Option<Item> {
        ITEM_IDS.get(normalize_id(name).as_str()).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Item::Leftovers => "Leftovers",
            Item::BlackSludge => "Black Sludge",
            Item::LifeOrb => "Life Orb",
            Item::ExpertBelt => "Expert Belt",
            Item::ChoiceBand => "Choice Band",
            Item::ChoiceSpecs => "Choice Specs",
            Item::ChoiceScarf => "Choice Scarf",
            Item::AssaultVest => "Assault Vest",
            Item::FocusSash => "Focus Sash",
            Item::SitrusBerry => "Sitrus Berry",
            Item::SilkScarf => "Silk Scarf",
            Item::Charcoal => "Charcoal",
            Item::MysticWater => "Mystic Water",
            Item::Magnet => "Magnet",
            Item::MiracleSeed => "Miracle Seed",
            Item::NeverMeltIce => "Never-Melt Ice",
            Item::BlackBelt => "Black Belt",
            Item::PoisonBarb => "Poison Barb",
            Item::SoftSand => "Soft Sand",
            Item::SharpBeak => "Sharp Beak",
            Item::TwistedSpoon => "Twisted Spoon",
            Item::SilverPowder => "Silver Powder",
            Item::HardStone => "Hard Stone",
            Item::SpellTag => "Spell Tag",
            Item::DragonFang => "Dragon Fang",
            Item::BlackGlasses => "Black Glasses",
            Item::MetalCoat => "Metal Coat",
            Item::FairyFeather => "Fairy Feather",
            Item::CharizarditeX => "Charizardite X",
            Item::CharizarditeY => "Charizardite Y",
            Item::Venusaurite => "Venusaurite",
            Item::Blastoisinite => "Blastoisinite",
            Item::Gengarite => "Gengarite",
            Item::Gyaradosite => "Gyaradosite",
            Item::Kangaskhanite => "Kangaskhanite",
            Item::Lucarionite => "Lucarionite",
            Item::Garchompite => "Garchompite",
            Item::Tyranitarite => "Tyranitarite",
            Item::Metagrossite => "Metagrossite",
            Item::Salamencite => "Salamencite",
        }
    }

    pub fn is_mega_stone(self) -> bool {
        type_items::is_mega_stone(self)
    }

    pub fn hooks(self) -> &'static ItemHooks {
        match self {
            Item::Leftovers => &battle_items::LEFTOVERS,
            Item::BlackSludge => &battle_items::BLACK_SLUDGE,
            Item::LifeOrb => &battle_items::LIFE_ORB,
            Item::ExpertBelt => &battle_items::EXPERT_BELT,
            Item::ChoiceBand | Item::ChoiceSpecs => &battle_items::CHOICE_POWER,
            Item::ChoiceScarf => &battle_items::CHOICE_SCARF,
            Item::AssaultVest => &battle_items::ASSAULT_VEST,
            Item::FocusSash => &consumable::FOCUS_SASH,
            Item::SitrusBerry => &consumable::SITRUS_BERRY,
            item if type_items::boosted_type(item).is_some() => &type_items::TYPE_BOOSTER,
            _ => &NO_HOOKS,
        }
    }
}
