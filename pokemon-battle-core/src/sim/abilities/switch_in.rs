use super::hooks::{AbilityHooks, SwitchInEffect};
use crate::data::moves::StatChange;
use crate::sim::pokemon::BattlePokemon;
use crate::sim::stats::BoostStat;
use crate::sim::weather_field::{Terrain, Weather};

fn intimidate(_pokemon: &BattlePokemon, _opponent: &BattlePokemon) -> Option<SwitchInEffect> {
    Some(SwitchInEffect::StatDrop(StatChange {
        stat: BoostStat::Atk,
        stages: -1,
    }))
}

fn drizzle(_: &BattlePokemon, _: &BattlePokemon) -> Option<SwitchInEffect> {
    Some(SwitchInEffect::Weather(Weather::Rain))
}

fn drought(_: &BattlePokemon, _: &BattlePokemon) -> Option<SwitchInEffect> {
    Some(SwitchInEffect::Weather(Weather::Sun))
}

fn sand_stream(_: &BattlePokemon, _: &BattlePokemon) -> Option<SwitchInEffect> {
    Some(SwitchInEffect::Weather(Weather::Sand))
}

fn snow_warning(_: &BattlePokemon, _: &BattlePokemon) -> Option<SwitchInEffect> {
    Some(SwitchInEffect::Weather(Weather::Hail))
}

fn electric_surge(_: &BattlePokemon, _: &BattlePokemon) -> Option<SwitchInEffect> {
    Some(SwitchInEffect::Terrain(Terrain::Electric))
}

fn grassy_surge(_: &BattlePokemon, _: &BattlePokemon) -> Option<SwitchInEffect> {
    Some(SwitchInEffect::Terrain(Terrain::Grassy))
}

fn psychic_surge(_: &BattlePokemon, _: &BattlePokemon) -> Option<SwitchInEffect> {
    Some(SwitchInEffect::Terrain(Terrain::Psychic))
}

fn misty_surge(_: &BattlePokemon, _: &BattlePokemon) -> Option<SwitchInEffect> {
    Some(SwitchInEffect::Terrain(Terrain::Misty))
}

pub static INTIMIDATE: AbilityHooks = AbilityHooks {
    on_switch_in: Some(intimidate),
    ..AbilityHooks::NONE
};

pub static DRIZZLE: AbilityHooks = AbilityHooks {
    on_switch_in: Some(drizzle),
    ..AbilityHooks::NONE
};

pub static DROUGHT: AbilityHooks = AbilityHooks {
    on_switch_in: Some(drought),
    ..AbilityHooks::NONE
};

pub static SAND_STREAM: AbilityHooks = AbilityHooks {
    on_switch_in: Some(sand_stream),
    ..AbilityHooks::NONE
};

pub static SNOW_WARNING: AbilityHooks = AbilityHooks {
    on_switch_in: Some(snow_warning),
    ..AbilityHooks::NONE
};

pub static ELECTRIC_SURGE: AbilityHooks = AbilityHooks {
    on_switch_in: Some(electric_surge),
    ..AbilityHooks::NONE
};

pub static GRASSY_SURGE: AbilityHooks = AbilityHooks {
    on_switch_in: Some(grassy_surge),
    ..AbilityHooks::NONE
};

pub static PSYCHIC_SURGE: AbilityHooks = AbilityHooks {
    on_switch_in: Some(psychic_surge),
    ..AbilityHooks::NONE
};

pub static MISTY_SURGE: AbilityHooks = AbilityHooks {
    on_switch_in: Some(misty_surge),
    ..AbilityHooks::NONE
};
