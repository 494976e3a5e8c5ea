//! Pure damage calculation on fully resolved numeric inputs.

use crate::data::types::{effectiveness_types, Type};
use crate::sim::stats::apply_stage_multiplier;
use crate::sim::weather_field::{weather_damage_modifier, Weather};
use serde::Serialize;

pub const MIN_ROLL: u8 = 85;
pub const MAX_ROLL: u8 = 100;
pub const CRIT_MULTIPLIER: f32 = 1.5;
pub const STAB: f32 = 1.5;
pub const TERA_MATCHING_STAB: f32 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct DamageInput<'a> {
    pub level: u8,
    /// Raw Atk or SpA, before stages.
    pub attack: u16,
    pub attack_stage: i8,
    /// Ability and item multipliers on the attacking stat.
    pub attack_modifier: f32,
    /// Raw Def or SpD, before stages.
    pub defense: u16,
    pub defense_stage: i8,
    /// Item multiplier on the defending stat (Assault Vest).
    pub defense_modifier: f32,
    pub power: u16,
    /// `None` for typeless damage such as Struggle.
    pub move_type: Option<Type>,
    pub defender_types: &'a [Type],
    /// 1.0 when the move gets no same-type bonus.
    pub stab: f32,
    pub critical: bool,
    pub weather: Option<Weather>,
    pub burned_physical: bool,
    /// Chained item, ability and terrain multipliers.
    pub final_modifier: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DamageResult {
    pub min: u16,
    pub max: u16,
    pub effectiveness: f32,
    pub stab_applied: bool,
    pub critical: bool,
}

pub(crate) fn chain_modifier(previous: f32, next: f32) -> f32 {
    let previous = (previous * 4096.0).floor() as u64;
    let next = (next * 4096.0).floor() as u64;
    let chained = (previous * next + 2048) >> 12;
    chained as f32 / 4096.0
}

fn apply_modifier(value: u32, modifier: f32) -> u32 {
    if modifier <= 0.0 {
        return 0;
    }
    let modifier = (modifier * 4096.0).floor() as u64;
    let value = value as u64;
    ((value * modifier + 2048 - 1) / 4096) as u32
}

fn apply_random_factor(value: u32, roll: u8) -> u32 {
    let percent = roll.clamp(MIN_ROLL, MAX_ROLL) as u32;
    value.saturating_mul(percent) / 100
}

fn type_effectiveness_steps(type_effectiveness: f32) -> i8 {
    (type_effectiveness.ln() / 2.0_f32.ln()).round() as i8
}

fn apply_type_effectiveness(value: u32, type_effectiveness: f32) -> u32 {
    if type_effectiveness == 0.0 {
        return 0;
    }
    let steps = type_effectiveness_steps(type_effectiveness);
    if steps > 0 {
        value.saturating_mul(1u32 << steps as u32)
    } else if steps < 0 {
        value / (1u32 << (-steps) as u32)
    } else {
        value
    }
}

fn compute_base_damage(level: u8, attack: u32, defense: u32, power: u16) -> u32 {
    let mut base_damage = 2 * level as u32 / 5 + 2;
    base_damage = base_damage.saturating_mul(power as u32);
    base_damage = base_damage.saturating_mul(attack);
    base_damage /= defense.max(1);
    base_damage /= 50;
    base_damage
}

/// STAB before abilities: 2.0 when the tera type matches an original type,
/// 1.5 for any original or tera type match, otherwise 1.0.
pub fn base_stab(move_type: Type, original_types: &[Type], tera_type: Option<Type>) -> f32 {
    let original = original_types.contains(&move_type);
    match tera_type {
        Some(tera) if tera == move_type && original => TERA_MATCHING_STAB,
        Some(tera) if tera == move_type => STAB,
        _ if original => STAB,
        _ => 1.0,
    }
}

pub fn effectiveness(input: &DamageInput<'_>) -> f32 {
    match input.move_type {
        Some(move_type) => effectiveness_types(move_type, input.defender_types),
        None => 1.0,
    }
}

fn effective_stats(input: &DamageInput<'_>) -> (u32, u32) {
    // Critical hits ignore the attacker's drops and the defender's boosts.
    let (attack_stage, defense_stage) = if input.critical {
        (input.attack_stage.max(0), input.defense_stage.min(0))
    } else {
        (input.attack_stage, input.defense_stage)
    };
    let attack = apply_stage_multiplier(input.attack, attack_stage) as u32;
    let defense = apply_stage_multiplier(input.defense, defense_stage) as u32;
    (
        apply_modifier(attack, input.attack_modifier).max(1),
        apply_modifier(defense, input.defense_modifier).max(1),
    )
}

/// Damage for a single roll in `85..=100`.
pub fn damage_at_roll(input: &DamageInput<'_>, roll: u8) -> u16 {
    let type_effectiveness = effectiveness(input);
    if type_effectiveness == 0.0 || input.power == 0 {
        return 0;
    }
    let (attack, defense) = effective_stats(input);
    let mut damage = compute_base_damage(input.level, attack, defense, input.power);
    damage = damage.saturating_add(2);
    if let Some(move_type) = input.move_type {
        damage = apply_modifier(damage, weather_damage_modifier(input.weather, move_type));
    }
    if input.critical {
        damage = ((damage as f32) * CRIT_MULTIPLIER).floor() as u32;
    }
    damage = apply_random_factor(damage, roll);
    if input.stab > 1.0 {
        damage = apply_modifier(damage, input.stab);
    }
    damage = apply_type_effectiveness(damage, type_effectiveness);
    if input.burned_physical {
        damage = apply_modifier(damage, 0.5);
    }
    damage = apply_modifier(damage, input.final_modifier);
    if damage == 0 {
        return 1;
    }
    damage.min(u16::MAX as u32) as u16
}

pub fn calculate_damage(input: &DamageInput<'_>) -> DamageResult {
    let effectiveness = effectiveness(input);
    if effectiveness == 0.0 {
        return DamageResult {
            min: 0,
            max: 0,
            effectiveness,
            stab_applied: false,
            critical: input.critical,
        };
    }
    DamageResult {
        min: damage_at_roll(input, MIN_ROLL),
        max: damage_at_roll(input, MAX_ROLL),
        effectiveness,
        stab_applied: input.stab > 1.0,
        critical: input.critical,
    }
}

/// Folds a list of multipliers with 4096-based rounding.
pub fn chain_all(modifiers: impl IntoIterator<Item = f32>) -> f32 {
    modifiers.into_iter().fold(1.0, chain_modifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stats::{Nature, StatsSet};

    fn input<'a>(
        attack: u16,
        defense: u16,
        power: u16,
        move_type: Type,
        defender_types: &'a [Type],
    ) -> DamageInput<'a> {
        DamageInput {
            level: 50,
            attack,
            attack_stage: 0,
            attack_modifier: 1.0,
            defense,
            defense_stage: 0,
            defense_modifier: 1.0,
            power,
            move_type: Some(move_type),
            defender_types,
            stab: 1.0,
            critical: false,
            weather: None,
            burned_physical: false,
            final_modifier: 1.0,
        }
    }

    #[test]
    fn test_damage_calc_thunderbolt() {
        let base = input(120, 100, 90, Type::Electric, &[Type::Normal]);
        assert_eq!(damage_at_roll(&base, 100), 49);
    }

    #[test]
    fn test_stab_bonus() {
        let mut with_stab = input(120, 100, 90, Type::Electric, &[Type::Normal]);
        with_stab.stab = STAB;
        assert_eq!(damage_at_roll(&with_stab, 100), 73);
        assert!(calculate_damage(&with_stab).stab_applied);
    }

    #[test]
    fn test_type_effectiveness() {
        let neutral = input(120, 100, 90, Type::Electric, &[Type::Normal]);
        let doubled = input(120, 100, 90, Type::Electric, &[Type::Water]);
        assert_eq!(damage_at_roll(&doubled, 100), damage_at_roll(&neutral, 100) * 2);
    }

    #[test]
    fn immunity_yields_zero_range_regardless_of_modifiers() {
        let mut immune = input(400, 10, 250, Type::Ground, &[Type::Flying, Type::Steel]);
        immune.stab = 2.0;
        immune.critical = true;
        immune.final_modifier = 3.0;
        immune.weather = Some(Weather::Sun);
        let result = calculate_damage(&immune);
        assert_eq!((result.min, result.max), (0, 0));
        assert_eq!(result.effectiveness, 0.0);
        assert!(!result.stab_applied);
    }

    #[test]
    fn garchomp_earthquake_into_heatran() {
        let garchomp = StatsSet { hp: 108, atk: 130, def: 95, spa: 80, spd: 85, spe: 102 };
        let heatran = StatsSet { hp: 91, atk: 90, def: 106, spa: 130, spd: 106, spe: 77 };
        let attacker = StatsSet::from_base(&garchomp, 50, [0; 6], [31; 6], Nature::Hardy);
        let defender = StatsSet::from_base(&heatran, 50, [0; 6], [31; 6], Nature::Hardy);
        let defender_types = [Type::Fire, Type::Steel];
        let mut eq = input(attacker.atk, defender.def, 100, Type::Ground, &defender_types);
        eq.stab = STAB;
        let result = calculate_damage(&eq);
        assert_eq!(result.max, 324);
        assert_eq!(result.min, 268);
        assert_eq!(result.effectiveness, 4.0);
    }

    #[test]
    fn pikachu_thunderbolt_into_gyarados() {
        let pikachu = StatsSet { hp: 35, atk: 55, def: 40, spa: 50, spd: 50, spe: 90 };
        let gyarados = StatsSet { hp: 95, atk: 125, def: 79, spa: 60, spd: 100, spe: 81 };
        let attacker = StatsSet::from_base(&pikachu, 100, [0; 6], [31; 6], Nature::Hardy);
        let defender = StatsSet::from_base(&gyarados, 100, [0; 6], [31; 6], Nature::Hardy);
        let defender_types = [Type::Water, Type::Flying];
        let mut bolt = input(attacker.spa, defender.spd, 90, Type::Electric, &defender_types);
        bolt.level = 100;
        bolt.stab = STAB;
        let result = calculate_damage(&bolt);
        assert_eq!(result.max, 268);
        assert_eq!(result.min, 228);
    }

    #[test]
    fn stab_only_on_type_match_or_tera() {
        assert_eq!(base_stab(Type::Fire, &[Type::Water], None), 1.0);
        assert_eq!(base_stab(Type::Water, &[Type::Water], None), STAB);
        assert_eq!(base_stab(Type::Fire, &[Type::Water], Some(Type::Fire)), STAB);
        assert_eq!(base_stab(Type::Water, &[Type::Water], Some(Type::Water)), TERA_MATCHING_STAB);
        assert_eq!(base_stab(Type::Water, &[Type::Water], Some(Type::Fire)), STAB);
    }

    #[test]
    fn critical_hits_ignore_unfavourable_stages() {
        let mut base = input(100, 100, 80, Type::Normal, &[Type::Normal]);
        base.attack_stage = -2;
        base.defense_stage = 2;
        let weakened = damage_at_roll(&base, 100);
        base.critical = true;
        let crit = damage_at_roll(&base, 100);
        let mut clean = input(100, 100, 80, Type::Normal, &[Type::Normal]);
        clean.critical = true;
        assert_eq!(crit, damage_at_roll(&clean, 100));
        assert!(crit > weakened);
    }

    #[test]
    fn burn_halves_physical_damage() {
        let base = input(150, 100, 100, Type::Normal, &[Type::Normal]);
        let mut burned = base.clone();
        burned.burned_physical = true;
        let full = damage_at_roll(&base, 100);
        let halved = damage_at_roll(&burned, 100);
        assert!(halved == full / 2 || halved == full / 2 + 1);
    }

    #[test]
    fn range_is_ordered() {
        let base = input(150, 100, 100, Type::Fire, &[Type::Grass]);
        let result = calculate_damage(&base);
        assert!(result.min <= result.max);
        assert!(result.min > 0);
    }

    #[test]
    fn struggle_is_typeless() {
        let mut struggle = input(100, 100, 50, Type::Normal, &[Type::Ghost]);
        struggle.move_type = None;
        assert_eq!(effectiveness(&struggle), 1.0);
        assert!(calculate_damage(&struggle).max > 0);
    }

    #[test]
    fn chain_all_multiplies() {
        assert_eq!(chain_all([1.5, 2.0]), 3.0);
        assert_eq!(chain_all(std::iter::empty::<f32>()), 1.0);
    }
}
