//! Closed ability table. Each ability maps to a static [`AbilityHooks`] entry
//! implementing only the hook kinds that ability uses.

pub mod damage_modifiers;
pub mod hooks;
pub mod misc_abilities;
pub mod status_abilities;
pub mod switch_in;

use crate::data::normalize_id;
use phf::phf_map;
use serde::{Deserialize, Serialize};

pub use hooks::{AbilityHooks, EndOfTurnEffect, IncomingDamage, Survival, SwitchInEffect};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Ability {
    #[default]
    NoAbility,
    Intimidate,
    Drizzle,
    Drought,
    SandStream,
    SnowWarning,
    ElectricSurge,
    GrassySurge,
    PsychicSurge,
    MistySurge,
    Levitate,
    WaterAbsorb,
    VoltAbsorb,
    DrySkin,
    FlashFire,
    ThickFat,
    Multiscale,
    Filter,
    SolidRock,
    HugePower,
    PurePower,
    Guts,
    Technician,
    Blaze,
    Torrent,
    Overgrow,
    Swarm,
    Adaptability,
    Immunity,
    Insomnia,
    VitalSpirit,
    Limber,
    WaterVeil,
    MagmaArmor,
    Moxie,
    BeastBoost,
    SpeedBoost,
    PoisonHeal,
    Sturdy,
    Defiant,
    Competitive,
    ArenaTrap,
    ShadowTag,
    MagnetPull,
    MagicGuard,
    ClearBody,
    SwiftSwim,
    Chlorophyll,
    SandRush,
    SlushRush,
    Overcoat,
}

static ABILITY_IDS: phf::Map<&'static str, Ability> = phf_map! {
    "noability" => Ability::NoAbility,
    "intimidate" => Ability::Intimidate,
    "drizzle" => Ability::Drizzle,
    "drought" => Ability::Drought,
    "sandstream" => Ability::SandStream,
    "snowwarning" => Ability::SnowWarning,
    "electricsurge" => Ability::ElectricSurge,
    "grassysurge" => Ability::GrassySurge,
    "psychicsurge" => Ability::PsychicSurge,
    "mistysurge" => Ability::MistySurge,
    "levitate" => Ability::Levitate,
    "waterabsorb" => Ability::WaterAbsorb,
    "voltabsorb" => Ability::VoltAbsorb,
    "dryskin" => Ability::DrySkin,
    "flashfire" => Ability::FlashFire,
    "thickfat" => Ability::ThickFat,
    "multiscale" => Ability::Multiscale,
    "filter" => Ability::Filter,
    "solidrock" => Ability::SolidRock,
    "hugepower" => Ability::HugePower,
    "purepower" => Ability::PurePower,
    "guts" => Ability::Guts,
    "technician" => Ability::Technician,
    "blaze" => Ability::Blaze,
    "torrent" => Ability::Torrent,
    "overgrow" => Ability::Overgrow,
    "swarm" => Ability::Swarm,
    "adaptability" => Ability::Adaptability,
    "immunity" => Ability::Immunity,
    "insomnia" => Ability::Insomnia,
    "vitalspirit" => Ability::VitalSpirit,
    "limber" => Ability::Limber,
    "waterveil" => Ability::WaterVeil,
    "magmaarmor" => Ability::MagmaArmor,
    "moxie" => Ability::Moxie,
    "beastboost" => Ability::BeastBoost,
    "speedboost" => Ability::SpeedBoost,
    "poisonheal" => Ability::PoisonHeal,
    "sturdy" => Ability::Sturdy,
    "defiant" => Ability::Defiant,
    "competitive" => Ability::Competitive,
    "arenatrap" => Ability::ArenaTrap,
    "shadowtag" => Ability::ShadowTag,
    "magnetpull" => Ability::MagnetPull,
    "magicguard" => Ability::MagicGuard,
    "clearbody" => Ability::ClearBody,
    "swiftswim" => Ability::SwiftSwim,
    "chlorophyll" => Ability::Chlorophyll,
    "sandrush" => Ability::SandRush,
    "slushrush" => Ability::SlushRush,
    "overcoat" => Ability::Overcoat,
};

static NO_HOOKS: AbilityHooks = AbilityHooks::NONE;

impl Ability {
    /// Parses a display name or id ("Water Absorb", "waterabsorb").
    pub fn from_name(name: &str) -> Option<Ability> {
        ABILITY_IDS.get(normalize_id(name).as_str()).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Ability::NoAbility => "No Ability",
            Ability::Intimidate => "Intimidate",
            Ability::Drizzle => "Drizzle",
            Ability::Drought => "Drought",
            Ability::SandStream => "Sand Stream",
            Ability::SnowWarning => "Snow Warning",
            Ability::ElectricSurge => "Electric Surge",
            Ability::GrassySurge => "Grassy Surge",
            Ability::PsychicSurge => "Psychic Surge",
            Ability::MistySurge => "Misty Surge",
            Ability::Levitate => "Levitate",
            Ability::WaterAbsorb => "Water Absorb",
            Ability::VoltAbsorb => "Volt Absorb",
            Ability::DrySkin => "Dry Skin",
            Ability::FlashFire => "Flash Fire",
            Ability::ThickFat => "Thick Fat",
            Ability::Multiscale => "Multiscale",
            Ability::Filter => "Filter",
            Ability::SolidRock => "Solid Rock",
            Ability::HugePower => "Huge Power",
            Ability::PurePower => "Pure Power",
            Ability::Guts => "Guts",
            Ability::Technician => "Technician",
            Ability::Blaze => "Blaze",
            Ability::Torrent => "Torrent",
            Ability::Overgrow => "Overgrow",
            Ability::Swarm => "Swarm",
            Ability::Adaptability => "Adaptability",
            Ability::Immunity => "Immunity",
            Ability::Insomnia => "Insomnia",
            Ability::VitalSpirit => "Vital Spirit",
            Ability::Limber => "Limber",
            Ability::WaterVeil => "Water Veil",
            Ability::MagmaArmor => "Magma Armor",
            Ability::Moxie => "Moxie",
            Ability::BeastBoost => "Beast Boost",
            Ability::SpeedBoost => "Speed Boost",
            Ability::PoisonHeal => "Poison Heal",
            Ability::Sturdy => "Sturdy",
            Ability::Defiant => "Defiant",
            Ability::Competitive => "Competitive",
            Ability::ArenaTrap => "Arena Trap",
            Ability::ShadowTag => "Shadow Tag",
            Ability::MagnetPull => "Magnet Pull",
            Ability::MagicGuard => "Magic Guard",
            Ability::ClearBody => "Clear Body",
            Ability::SwiftSwim => "Swift Swim",
            Ability::Chlorophyll => "Chlorophyll",
            Ability::SandRush => "Sand Rush",
            Ability::SlushRush => "Slush Rush",
            Ability::Overcoat => "Overcoat",
        }
    }

    pub fn hooks(self) -> &'static AbilityHooks {
        match self {
            Ability::Intimidate => &switch_in::INTIMIDATE,
            Ability::Drizzle => &switch_in::DRIZZLE,
            Ability::Drought => &switch_in::DROUGHT,
            Ability::SandStream => &switch_in::SAND_STREAM,
            Ability::SnowWarning => &switch_in::SNOW_WARNING,
            Ability::ElectricSurge => &switch_in::ELECTRIC_SURGE,
            Ability::GrassySurge => &switch_in::GRASSY_SURGE,
            Ability::PsychicSurge => &switch_in::PSYCHIC_SURGE,
            Ability::MistySurge => &switch_in::MISTY_SURGE,
            Ability::Levitate => &damage_modifiers::LEVITATE,
            Ability::WaterAbsorb => &damage_modifiers::WATER_ABSORB,
            Ability::VoltAbsorb => &damage_modifiers::VOLT_ABSORB,
            Ability::DrySkin => &damage_modifiers::DRY_SKIN,
            Ability::FlashFire => &damage_modifiers::FLASH_FIRE,
            Ability::ThickFat => &damage_modifiers::THICK_FAT,
            Ability::Multiscale => &damage_modifiers::MULTISCALE,
            Ability::Filter | Ability::SolidRock => &damage_modifiers::FILTER,
            Ability::HugePower | Ability::PurePower => &damage_modifiers::HUGE_POWER,
            Ability::Guts => &damage_modifiers::GUTS,
            Ability::Technician => &damage_modifiers::TECHNICIAN,
            Ability::Blaze | Ability::Torrent | Ability::Overgrow | Ability::Swarm => {
                &damage_modifiers::PINCH_BOOST
            }
            Ability::Adaptability => &damage_modifiers::ADAPTABILITY,
            Ability::SwiftSwim | Ability::Chlorophyll | Ability::SandRush | Ability::SlushRush => {
                &damage_modifiers::WEATHER_SPEED
            }
            Ability::Immunity
            | Ability::Insomnia
            | Ability::VitalSpirit
            | Ability::Limber
            | Ability::WaterVeil
            | Ability::MagmaArmor => &status_abilities::STATUS_IMMUNITY,
            Ability::SpeedBoost => &status_abilities::SPEED_BOOST,
            Ability::PoisonHeal => &status_abilities::POISON_HEAL,
            Ability::MagicGuard => &status_abilities::MAGIC_GUARD,
            Ability::Moxie => &misc_abilities::MOXIE,
            Ability::BeastBoost => &misc_abilities::BEAST_BOOST,
            Ability::Sturdy => &misc_abilities::STURDY,
            Ability::Defiant | Ability::Competitive => &misc_abilities::STAT_DROP_REACTION,
            Ability::ArenaTrap | Ability::ShadowTag | Ability::MagnetPull => {
                &misc_abilities::TRAPPING
            }
            Ability::ClearBody => &misc_abilities::CLEAR_BODY,
            Ability::NoAbility | Ability::Overcoat => &NO_HOOKS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names() {
        assert_eq!(Ability::from_name("Water Absorb"), Some(Ability::WaterAbsorb));
        assert_eq!(Ability::from_name("shadow-tag"), Some(Ability::ShadowTag));
        assert_eq!(Ability::from_name("Run Away"), None);
    }

    #[test]
    fn names_round_trip_through_parser() {
        for (_, ability) in ABILITY_IDS.entries() {
            assert_eq!(Ability::from_name(ability.name()), Some(*ability));
        }
    }

    #[test]
    fn inert_abilities_have_no_hooks() {
        let hooks = Ability::NoAbility.hooks();
        assert!(hooks.on_switch_in.is_none());
        assert!(!hooks.prevents_indirect_damage);
        assert!(Ability::MagicGuard.hooks().prevents_indirect_damage);
    }
}
