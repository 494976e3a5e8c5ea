//! Action selection for computer-controlled sides.
//!
//! The scoring helpers are plain functions over explicit inputs; the
//! [`ScoringAI`] only owns the RNG its randomized heuristics draw from.

use crate::data::moves::MoveData;
use crate::data::types::{effectiveness_against, effectiveness_types};
use crate::sim::battle::{BattleState, BattleTurnAction, Side};
use crate::sim::damage::base_stab;
use crate::sim::pokemon::BattlePokemon;
use crate::sim::transform::max_move_power;
use log::debug;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const STATUS_MOVE_SCORE: f32 = 40.0;
pub const ZERO_POWER_SCORE: f32 = 1.0;
pub const SWITCH_BASELINE: f32 = 50.0;
pub const RESIST_BONUS: f32 = 20.0;
pub const IMMUNE_BONUS: f32 = 40.0;
pub const SUPER_EFFECTIVE_BONUS: f32 = 30.0;
/// Best move score below which switching out is considered.
pub const WEAK_MOVE_SCORE: f32 = 20.0;

pub trait BattleAI {
    fn choose_action(
        &mut self,
        state: &BattleState,
        side: Side,
        legal: &[BattleTurnAction],
    ) -> BattleTurnAction;
}

pub struct RandomAI {
    rng: SmallRng,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl BattleAI for RandomAI {
    fn choose_action(
        &mut self,
        _state: &BattleState,
        _side: Side,
        legal: &[BattleTurnAction],
    ) -> BattleTurnAction {
        *legal.choose(&mut self.rng).unwrap_or(&BattleTurnAction::Move(0))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn from_name(name: &str) -> Option<Difficulty> {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Chance of ignoring the scores and picking any legal action.
    fn blunder_chance(self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Normal => 0.05,
            Difficulty::Hard => 0.0,
        }
    }

    fn tera_chance(self) -> f64 {
        match self {
            Difficulty::Easy => 0.1,
            Difficulty::Normal => 0.3,
            Difficulty::Hard => 0.5,
        }
    }

    fn dynamax_chance(self) -> f64 {
        match self {
            Difficulty::Easy => 0.1,
            Difficulty::Normal => 0.25,
            Difficulty::Hard => 0.4,
        }
    }
}

/// `power × STAB × effectiveness × accuracy`, with flat scores for status
/// and zero-power moves. A dynamaxed attacker is scored on Max Move power.
pub fn score_move(
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    move_data: &MoveData,
) -> f32 {
    if move_data.is_status() {
        return STATUS_MOVE_SCORE;
    }
    if move_data.power == 0 {
        return ZERO_POWER_SCORE;
    }
    let tera = attacker.tera_type.filter(|_| attacker.terastallized);
    let stab = base_stab(move_data.move_type, &attacker.types, tera);
    let effectiveness = effectiveness_types(move_data.move_type, defender.defensive_types());
    let accuracy = move_data.accuracy.map_or(100.0, f32::from) / 100.0;
    let power = if attacker.dynamaxed {
        max_move_power(move_data.power)
    } else {
        move_data.power
    };
    power as f32 * stab * effectiveness * accuracy
}

/// Matchup score for bringing `candidate` in against `opponent`.
pub fn score_switch(candidate: &BattlePokemon, opponent: &BattlePokemon) -> f32 {
    let mut score = SWITCH_BASELINE;
    for attacking in &opponent.types {
        let taken = effectiveness_types(*attacking, candidate.defensive_types());
        if taken == 0.0 {
            score += IMMUNE_BONUS;
        } else if taken < 1.0 {
            score += RESIST_BONUS;
        }
    }
    if candidate
        .types
        .iter()
        .any(|attacking| effectiveness_types(*attacking, opponent.defensive_types()) > 1.0)
    {
        score += SUPER_EFFECTIVE_BONUS;
    }
    score * candidate.hp_ratio()
}

/// Tera when it turns one of the opponent's super-effective types into a
/// neutral or resisted hit; otherwise a difficulty-gated coin while healthy.
pub fn should_terastallize(
    pokemon: &BattlePokemon,
    opponent: &BattlePokemon,
    difficulty: Difficulty,
    rng: &mut SmallRng,
) -> bool {
    let Some(tera) = pokemon.tera_type else {
        return false;
    };
    let flips_weakness = opponent.types.iter().any(|attacking| {
        effectiveness_types(*attacking, &pokemon.types) > 1.0
            && effectiveness_against(*attacking, tera) <= 1.0
    });
    if flips_weakness {
        return true;
    }
    pokemon.hp_ratio() > 0.5 && rng.gen_bool(difficulty.tera_chance())
}

/// Always with fewer than two combatants left, otherwise a chance while
/// above 70% HP.
pub fn should_dynamax(
    pokemon: &BattlePokemon,
    remaining: usize,
    difficulty: Difficulty,
    rng: &mut SmallRng,
) -> bool {
    if remaining < 2 {
        return true;
    }
    pokemon.hp_ratio() > 0.7 && rng.gen_bool(difficulty.dynamax_chance())
}

pub fn should_mega(pokemon: &BattlePokemon) -> bool {
    pokemon.mega.is_some() && !pokemon.mega_evolved
}

pub struct ScoringAI {
    difficulty: Difficulty,
    rng: SmallRng,
}

impl ScoringAI {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn best_switch(
        &self,
        state: &BattleState,
        side: Side,
        legal: &[BattleTurnAction],
    ) -> Option<(BattleTurnAction, f32)> {
        let team = state.team(side);
        let opponent = state.active(side.opponent());
        legal
            .iter()
            .filter_map(|action| match action {
                BattleTurnAction::Switch(index) => team
                    .members
                    .get(*index)
                    .map(|candidate| (*action, score_switch(candidate, opponent))),
                _ => None,
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn best_move(
        &self,
        state: &BattleState,
        side: Side,
        legal: &[BattleTurnAction],
    ) -> Option<(usize, f32)> {
        let attacker = state.active(side);
        let defender = state.active(side.opponent());
        legal
            .iter()
            .filter_map(|action| match action {
                BattleTurnAction::Move(index) => {
                    let score = if attacker.has_usable_move() {
                        attacker.moves.get(*index).map_or(ZERO_POWER_SCORE, |slot| {
                            score_move(attacker, defender, &slot.data)
                        })
                    } else {
                        ZERO_POWER_SCORE
                    };
                    Some((*index, score))
                }
                _ => None,
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Wraps the chosen move in a transformation when one is legal and the
    /// heuristics approve.
    fn with_transformation(
        &mut self,
        state: &BattleState,
        side: Side,
        index: usize,
        legal: &[BattleTurnAction],
    ) -> BattleTurnAction {
        let pokemon = state.active(side);
        let opponent = state.active(side.opponent());
        if legal.contains(&BattleTurnAction::MegaEvolve(index)) && should_mega(pokemon) {
            return BattleTurnAction::MegaEvolve(index);
        }
        if legal.contains(&BattleTurnAction::Terastallize(index))
            && should_terastallize(pokemon, opponent, self.difficulty, &mut self.rng)
        {
            return BattleTurnAction::Terastallize(index);
        }
        if legal.contains(&BattleTurnAction::Dynamax(index))
            && should_dynamax(pokemon, state.team(side).remaining(), self.difficulty, &mut self.rng)
        {
            return BattleTurnAction::Dynamax(index);
        }
        BattleTurnAction::Move(index)
    }
}

impl BattleAI for ScoringAI {
    fn choose_action(
        &mut self,
        state: &BattleState,
        side: Side,
        legal: &[BattleTurnAction],
    ) -> BattleTurnAction {
        let Some(fallback) = legal.first().copied() else {
            return BattleTurnAction::Move(0);
        };
        if self.rng.gen_bool(self.difficulty.blunder_chance()) {
            return *legal.choose(&mut self.rng).unwrap_or(&fallback);
        }

        let best_switch = self.best_switch(state, side, legal);
        let Some((index, move_score)) = self.best_move(state, side, legal) else {
            // Forced switch: only replacements are on offer.
            return best_switch.map_or(fallback, |(action, _)| action);
        };
        if let Some((action, switch_score)) = best_switch {
            if move_score < WEAK_MOVE_SCORE && switch_score > move_score {
                debug!("{side:?} switches ({switch_score:.1} > {move_score:.1})");
                return action;
            }
        }
        self.with_transformation(state, side, index, legal)
    }
}
