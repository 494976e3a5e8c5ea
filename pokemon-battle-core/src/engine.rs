//! High-level battle engine wrapper for step-based simulations.

use crate::battle_logger::LogEntry;
use crate::data::moves::MoveDex;
use crate::error::BattleError;
use crate::sim::ai::BattleAI;
use crate::sim::battle::{
    execute_turn, legal_actions, start_battle, submit_force_switch, BattleState, BattleTurnAction,
    Phase, Side,
};
use crate::sim::pokemon::{BattleTeam, Mechanic, PokemonSet};
use anyhow::{Context, Result};
use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleOutcome {
    Winner(Side),
    Draw,
}

/// Result of a single engine step.
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Log entries appended by this step.
    pub events: Vec<LogEntry>,
    /// Phase the battle is waiting in after the step.
    pub phase: Phase,
    /// Terminal outcome if the battle ended.
    pub outcome: Option<BattleOutcome>,
}

/// Step-based battle engine owning its state and PRNG.
pub struct BattleEngine {
    state: BattleState,
    rng: SmallRng,
}

impl BattleEngine {
    /// Sends out both leads. Identical teams and seeds replay identically.
    pub fn new(team1: BattleTeam, team2: BattleTeam, seed: u64) -> Result<Self, BattleError> {
        let mut state = BattleState::new(team1, team2);
        start_battle(&mut state)?;
        Ok(Self {
            state,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Builds both rosters from configured sets, then starts the battle.
    pub fn from_sets(
        team1: &[PokemonSet],
        team2: &[PokemonSet],
        mechanics: [Mechanic; 2],
        dex: &MoveDex,
        seed: u64,
    ) -> Result<Self> {
        let team1 =
            BattleTeam::from_sets(team1, dex, mechanics[0]).context("building player 1's team")?;
        let team2 =
            BattleTeam::from_sets(team2, dex, mechanics[1]).context("building player 2's team")?;
        Ok(Self::new(team1, team2, seed)?)
    }

    /// Advance the battle by one turn using the provided actions.
    pub fn step(
        &mut self,
        p1_action: BattleTurnAction,
        p2_action: BattleTurnAction,
    ) -> Result<StepResult, BattleError> {
        let start = self.state.log.len();
        execute_turn(&mut self.state, p1_action, p2_action, &mut self.rng)?;
        Ok(self.step_result(start))
    }

    /// Supplies the replacement a forced switch is waiting on.
    pub fn force_switch(&mut self, side: Side, index: usize) -> Result<StepResult, BattleError> {
        let start = self.state.log.len();
        submit_force_switch(&mut self.state, side, index)?;
        Ok(self.step_result(start))
    }

    fn step_result(&self, start: usize) -> StepResult {
        StepResult {
            events: self.state.log.since(start).to_vec(),
            phase: self.state.phase,
            outcome: self.outcome(),
        }
    }

    /// Returns true if the current state is terminal.
    pub fn is_terminal(&self) -> bool {
        self.state.is_ended()
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        if !self.state.is_ended() {
            return None;
        }
        Some(self.state.winner.map_or(BattleOutcome::Draw, BattleOutcome::Winner))
    }

    /// List legal actions for a side given the current state.
    pub fn legal_actions(&self, side: Side) -> Vec<BattleTurnAction> {
        legal_actions(&self.state, side)
    }

    /// Access the internal battle state.
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn into_state(self) -> BattleState {
        self.state
    }

    /// Plays AI against AI until the battle ends or `max_turns` turns have
    /// been executed. Returns `None` when the turn cap is hit first.
    pub fn run_with(
        &mut self,
        p1: &mut dyn BattleAI,
        p2: &mut dyn BattleAI,
        max_turns: u32,
    ) -> Result<Option<BattleOutcome>, BattleError> {
        let mut turns = 0;
        loop {
            match self.state.phase {
                Phase::ActionSelect => {
                    if turns >= max_turns {
                        debug!("turn cap of {max_turns} reached without a winner");
                        return Ok(None);
                    }
                    let legal1 = self.legal_actions(Side::Player1);
                    let legal2 = self.legal_actions(Side::Player2);
                    let action1 = p1.choose_action(&self.state, Side::Player1, &legal1);
                    let action2 = p2.choose_action(&self.state, Side::Player2, &legal2);
                    self.step(action1, action2)?;
                    turns += 1;
                }
                Phase::ForceSwitch => {
                    for side in Side::BOTH {
                        if !self.state.force_switch[side.index()] {
                            continue;
                        }
                        let legal = self.legal_actions(side);
                        let ai: &mut dyn BattleAI = match side {
                            Side::Player1 => &mut *p1,
                            Side::Player2 => &mut *p2,
                        };
                        let index = match ai.choose_action(&self.state, side, &legal) {
                            BattleTurnAction::Switch(index) => index,
                            other => {
                                debug!("{side:?} sent {other:?} for a forced switch");
                                match legal.first() {
                                    Some(BattleTurnAction::Switch(index)) => *index,
                                    _ => return Err(BattleError::NoForcedSwitchPending { side }),
                                }
                            }
                        };
                        self.force_switch(side, index)?;
                    }
                }
                Phase::Ended => return Ok(self.outcome()),
                Phase::Setup | Phase::Executing => {
                    return Err(BattleError::WrongPhase { phase: self.state.phase });
                }
            }
        }
    }
}
