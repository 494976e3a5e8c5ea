use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    #[default]
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

pub fn stat_modifier(nature: Nature, stat: Stat) -> f32 {
    match nature {
        Nature::Hardy | Nature::Docile | Nature::Serious | Nature::Bashful | Nature::Quirky => 1.0,
        Nature::Lonely => bonus(stat, Stat::Atk, Stat::Def),
        Nature::Brave => bonus(stat, Stat::Atk, Stat::Spe),
        Nature::Adamant => bonus(stat, Stat::Atk, Stat::Spa),
        Nature::Naughty => bonus(stat, Stat::Atk, Stat::Spd),
        Nature::Bold => bonus(stat, Stat::Def, Stat::Atk),
        Nature::Relaxed => bonus(stat, Stat::Def, Stat::Spe),
        Nature::Impish => bonus(stat, Stat::Def, Stat::Spa),
        Nature::Lax => bonus(stat, Stat::Def, Stat::Spd),
        Nature::Timid => bonus(stat, Stat::Spe, Stat::Atk),
        Nature::Hasty => bonus(stat, Stat::Spe, Stat::Def),
        Nature::Jolly => bonus(stat, Stat::Spe, Stat::Spa),
        Nature::Naive => bonus(stat, Stat::Spe, Stat::Spd),
        Nature::Modest => bonus(stat, Stat::Spa, Stat::Atk),
        Nature::Mild => bonus(stat, Stat::Spa, Stat::Def),
        Nature::Quiet => bonus(stat, Stat::Spa, Stat::Spe),
        Nature::Rash => bonus(stat, Stat::Spa, Stat::Spd),
        Nature::Calm => bonus(stat, Stat::Spd, Stat::Atk),
        Nature::Gentle => bonus(stat, Stat::Spd, Stat::Def),
        Nature::Sassy => bonus(stat, Stat::Spd, Stat::Spe),
        Nature::Careful => bonus(stat, Stat::Spd, Stat::Spa),
    }
}

fn bonus(stat: Stat, boosted: Stat, lowered: Stat) -> f32 {
    if stat == boosted {
        1.1
    } else if stat == lowered {
        0.9
    } else {
        1.0
    }
}

pub fn calc_hp(base: u16, iv: u8, ev: u8, level: u8) -> u16 {
    let ev_quarter = (ev / 4) as u16;
    let base_value = base * 2 + iv as u16 + ev_quarter;
    let intermediate = (base_value as u32 * level as u32 / 100) as u16;
    intermediate + level as u16 + 10
}

pub fn calc_stat(base: u16, iv: u8, ev: u8, level: u8, nature_mod: f32) -> u16 {
    let ev_quarter = (ev / 4) as u16;
    let base_value = base * 2 + iv as u16 + ev_quarter;
    let intermediate = (base_value as u32 * level as u32 / 100) as u16;
    let stat = (intermediate + 5) as f32 * nature_mod;
    stat.floor() as u16
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatsSet {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatsSet {
    /// Resolves level/EV/IV/nature against species base stats.
    pub fn from_base(
        base: &StatsSet,
        level: u8,
        evs: [u8; 6],
        ivs: [u8; 6],
        nature: Nature,
    ) -> Self {
        Self {
            hp: calc_hp(base.hp, ivs[0], evs[0], level),
            atk: calc_stat(base.atk, ivs[1], evs[1], level, stat_modifier(nature, Stat::Atk)),
            def: calc_stat(base.def, ivs[2], evs[2], level, stat_modifier(nature, Stat::Def)),
            spa: calc_stat(base.spa, ivs[3], evs[3], level, stat_modifier(nature, Stat::Spa)),
            spd: calc_stat(base.spd, ivs[4], evs[4], level, stat_modifier(nature, Stat::Spd)),
            spe: calc_stat(base.spe, ivs[5], evs[5], level, stat_modifier(nature, Stat::Spe)),
        }
    }
}

/// Stats that carry an in-battle stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostStat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl BoostStat {
    pub fn label(self) -> &'static str {
        match self {
            BoostStat::Atk => "Attack",
            BoostStat::Def => "Defense",
            BoostStat::Spa => "Sp. Atk",
            BoostStat::Spd => "Sp. Def",
            BoostStat::Spe => "Speed",
            BoostStat::Accuracy => "accuracy",
            BoostStat::Evasion => "evasiveness",
        }
    }
}

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatStages {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl StatStages {
    pub fn get(&self, stat: BoostStat) -> i8 {
        match stat {
            BoostStat::Atk => self.atk,
            BoostStat::Def => self.def,
            BoostStat::Spa => self.spa,
            BoostStat::Spd => self.spd,
            BoostStat::Spe => self.spe,
            BoostStat::Accuracy => self.accuracy,
            BoostStat::Evasion => self.evasion,
        }
    }

    fn slot(&mut self, stat: BoostStat) -> &mut i8 {
        match stat {
            BoostStat::Atk => &mut self.atk,
            BoostStat::Def => &mut self.def,
            BoostStat::Spa => &mut self.spa,
            BoostStat::Spd => &mut self.spd,
            BoostStat::Spe => &mut self.spe,
            BoostStat::Accuracy => &mut self.accuracy,
            BoostStat::Evasion => &mut self.evasion,
        }
    }

    /// Applies `delta` clamped to [-6, +6] and returns the change actually made.
    pub fn apply(&mut self, stat: BoostStat, delta: i8) -> i8 {
        let slot = self.slot(stat);
        let current = *slot;
        let next = current.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE);
        *slot = next;
        next - current
    }

    pub fn all(&self) -> [i8; 7] {
        [
            self.atk,
            self.def,
            self.spa,
            self.spd,
            self.spe,
            self.accuracy,
            self.evasion,
        ]
    }
}

pub fn stage_multiplier(stage: i8) -> f32 {
    if stage >= 0 {
        (2 + stage as i32) as f32 / 2.0
    } else {
        2.0 / (2 - stage as i32) as f32
    }
}

pub fn accuracy_multiplier(stage: i8) -> f32 {
    if stage >= 0 {
        (3 + stage as i32) as f32 / 3.0
    } else {
        3.0 / (3 - stage as i32) as f32
    }
}

pub fn apply_stage_multiplier(base: u16, stage: i8) -> u16 {
    let value = (base as f32) * stage_multiplier(stage);
    value.floor().max(1.0) as u16
}
