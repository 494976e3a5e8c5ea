//! Turn executor: the phase state machine that drives a singles battle.
//!
//! Every public entry point validates first and only then mutates, so a
//! rejected call leaves the state untouched.

use crate::battle_logger::{BattleLogger, LogKind};
use crate::data::moves::{MoveData, StatChange};
use crate::data::types::{effectiveness_types, Type};
use crate::error::BattleError;
use crate::sim::abilities::{EndOfTurnEffect, IncomingDamage, SwitchInEffect};
use crate::sim::abilities::damage_modifiers::ignores_burn_drop;
use crate::sim::damage::{base_stab, chain_all, damage_at_roll, DamageInput, MAX_ROLL, MIN_ROLL};
use crate::sim::faint_handler::{after_ko_boost, prevent_ko, spend_ko_prevention, KoPrevention};
use crate::sim::order::{effective_speed, resolve_order, OrderKey};
use crate::sim::pokemon::{BattlePokemon, BattleTeam, Mechanic};
use crate::sim::stats::{accuracy_multiplier, MAX_STAGE, MIN_STAGE};
use crate::sim::status::{self, BeforeMove, Status, StatusTick};
use crate::sim::switching::{can_switch, enter_field, leave_field, SwitchKind};
use crate::sim::transform::{
    check_transformation, dynamax, max_move_power, mega_evolve, terastallize, tick_dynamax,
};
use crate::sim::weather_field::{
    effective_accuracy, grassy_heal, terrain_blocks_priority, terrain_damage_modifier,
    weather_residual_damage, FieldState, Terrain, Weather, DEFAULT_FIELD_TURNS,
};
use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player1, Side::Player2];

    pub fn index(self) -> usize {
        match self {
            Side::Player1 => 0,
            Side::Player2 => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Player1 => "Player 1",
            Side::Player2 => "Player 2",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    ActionSelect,
    Executing,
    ForceSwitch,
    Ended,
}

/// One side's choice for a turn. Transformation variants also name the move
/// used after transforming.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum BattleTurnAction {
    Move(usize),
    Switch(usize),
    MegaEvolve(usize),
    Terastallize(usize),
    Dynamax(usize),
}

impl BattleTurnAction {
    pub fn move_index(self) -> Option<usize> {
        match self {
            BattleTurnAction::Move(index)
            | BattleTurnAction::MegaEvolve(index)
            | BattleTurnAction::Terastallize(index)
            | BattleTurnAction::Dynamax(index) => Some(index),
            BattleTurnAction::Switch(_) => None,
        }
    }

    pub fn mechanic(self) -> Mechanic {
        match self {
            BattleTurnAction::MegaEvolve(_) => Mechanic::Mega,
            BattleTurnAction::Terastallize(_) => Mechanic::Tera,
            BattleTurnAction::Dynamax(_) => Mechanic::Dynamax,
            BattleTurnAction::Move(_) | BattleTurnAction::Switch(_) => Mechanic::None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BattleState {
    pub phase: Phase,
    pub turn: u32,
    pub teams: [BattleTeam; 2],
    pub field: FieldState,
    pub log: BattleLogger,
    /// `None` while running, and also for a draw once `phase` is `Ended`.
    pub winner: Option<Side>,
    /// Sides that still owe a replacement for a fainted active.
    pub force_switch: [bool; 2],
    /// Replacements already sent out whose switch-in abilities are still queued.
    pub pending_entry: [bool; 2],
}

impl BattleState {
    pub fn new(team1: BattleTeam, team2: BattleTeam) -> Self {
        Self {
            phase: Phase::Setup,
            turn: 0,
            teams: [team1, team2],
            field: FieldState::default(),
            log: BattleLogger::new(),
            winner: None,
            force_switch: [false; 2],
            pending_entry: [false; 2],
        }
    }

    pub fn team(&self, side: Side) -> &BattleTeam {
        &self.teams[side.index()]
    }

    pub fn team_mut(&mut self, side: Side) -> &mut BattleTeam {
        &mut self.teams[side.index()]
    }

    pub fn active(&self, side: Side) -> &BattlePokemon {
        self.team(side).active_pokemon()
    }

    pub fn active_mut(&mut self, side: Side) -> &mut BattlePokemon {
        self.team_mut(side).active_pokemon_mut()
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    fn push_log(&mut self, kind: LogKind, side: Option<Side>, message: impl Into<String>) {
        let message = message.into();
        trace!("[T{}] {}", self.turn, message);
        self.log.push(self.turn, kind, side, message);
    }

    fn name(&self, side: Side) -> String {
        format!("{}'s {}", side.label(), self.active(side).species)
    }

    /// Panics if the state breaks a structural invariant. Called after every
    /// public transition.
    pub fn assert_invariants(&self) {
        for side in Side::BOTH {
            let team = self.team(side);
            assert!(team.active < team.members.len(), "{side:?} active index out of range");
            let on_field = team.members.iter().filter(|p| p.active).count();
            assert!(on_field <= 1, "{side:?} has {on_field} combatants flagged active");
            for pokemon in &team.members {
                assert!(
                    pokemon.current_hp <= pokemon.max_hp,
                    "{} has {} HP over a max of {}",
                    pokemon.species,
                    pokemon.current_hp,
                    pokemon.max_hp
                );
                if pokemon.status != Some(Status::Sleep) {
                    assert_eq!(
                        pokemon.sleep_turns, 0,
                        "{} has a stale sleep counter",
                        pokemon.species
                    );
                }
                if pokemon.is_fainted() {
                    assert!(pokemon.status.is_none(), "{} fainted with a status", pokemon.species);
                }
            }
            if self.phase == Phase::ActionSelect {
                assert!(
                    !team.active_pokemon().is_fainted(),
                    "{side:?} selecting actions with a fainted active"
                );
            }
        }
        if self.phase == Phase::ForceSwitch {
            assert!(self.force_switch.iter().any(|pending| *pending));
        }
        if self.winner.is_some() {
            assert_eq!(self.phase, Phase::Ended);
        }
    }
}

/// Sends out each side's first healthy member and runs their switch-in
/// abilities, faster first.
pub fn start_battle(state: &mut BattleState) -> Result<(), BattleError> {
    if state.phase != Phase::Setup {
        return Err(BattleError::WrongPhase { phase: state.phase });
    }
    let mut leads = [0; 2];
    for side in Side::BOTH {
        leads[side.index()] = state
            .team(side)
            .members
            .iter()
            .position(|member| !member.is_fainted())
            .ok_or(BattleError::NoHealthyMembers { side })?;
    }
    state.turn = 1;
    for side in Side::BOTH {
        let team = state.team_mut(side);
        team.members.iter_mut().for_each(|member| member.active = false);
        team.active = leads[side.index()];
        enter_field(team.active_pokemon_mut());
        let message = format!("{} sent out {}!", side.label(), state.active(side).species);
        state.push_log(LogKind::Switch, Some(side), message);
    }
    for side in speed_order(state, &Side::BOTH) {
        run_switch_in(state, side);
    }
    state.phase = Phase::ActionSelect;
    debug!(
        "battle started: {} vs {}",
        state.active(Side::Player1).species,
        state.active(Side::Player2).species
    );
    state.assert_invariants();
    Ok(())
}

pub fn validate_action(
    state: &BattleState,
    side: Side,
    action: BattleTurnAction,
) -> Result<(), BattleError> {
    if state.phase != Phase::ActionSelect {
        return Err(BattleError::WrongPhase { phase: state.phase });
    }
    match action {
        BattleTurnAction::Switch(index) => {
            validate_switch(state, side, index, SwitchKind::Voluntary)
        }
        BattleTurnAction::Move(index) => validate_move(state, side, index),
        BattleTurnAction::MegaEvolve(index)
        | BattleTurnAction::Terastallize(index)
        | BattleTurnAction::Dynamax(index) => {
            let mechanic = action.mechanic();
            check_transformation(state.team(side), mechanic).map_err(|reason| {
                BattleError::TransformationUnavailable { side, mechanic, reason }
            })?;
            validate_move(state, side, index)
        }
    }
}

fn validate_move(state: &BattleState, side: Side, index: usize) -> Result<(), BattleError> {
    let pokemon = state.active(side);
    if index >= pokemon.moves.len() {
        return Err(BattleError::MoveOutOfRange { side, index });
    }
    // Out of PP everywhere: any slot resolves to Struggle.
    if !pokemon.has_usable_move() {
        return Ok(());
    }
    if let Some(locked) = pokemon.choice_lock {
        let locked_usable = pokemon.moves.get(locked).is_some_and(|slot| slot.pp > 0);
        if !pokemon.dynamaxed && locked != index && locked_usable {
            return Err(BattleError::ChoiceLocked { side, locked });
        }
    }
    if pokemon.moves[index].pp == 0 {
        return Err(BattleError::NoPpLeft { side, index });
    }
    Ok(())
}

fn validate_switch(
    state: &BattleState,
    side: Side,
    index: usize,
    kind: SwitchKind,
) -> Result<(), BattleError> {
    let team = state.team(side);
    if index >= team.members.len() {
        return Err(BattleError::SwitchOutOfRange { side, index });
    }
    if index == team.active {
        return Err(BattleError::SwitchToActive { side, index });
    }
    if team.members[index].is_fainted() {
        return Err(BattleError::SwitchTargetFainted { side, index });
    }
    if !can_switch(team.active_pokemon(), state.active(side.opponent()), kind) {
        return Err(BattleError::Trapped { side });
    }
    Ok(())
}

/// Every action `side` may submit right now.
pub fn legal_actions(state: &BattleState, side: Side) -> Vec<BattleTurnAction> {
    let team = state.team(side);
    match state.phase {
        Phase::ActionSelect => {
            let pokemon = team.active_pokemon();
            let move_slots = if pokemon.has_usable_move() {
                pokemon.moves.len()
            } else {
                pokemon.moves.len().min(1)
            };
            let mut actions = Vec::new();
            for index in 0..move_slots {
                for action in [
                    BattleTurnAction::Move(index),
                    BattleTurnAction::MegaEvolve(index),
                    BattleTurnAction::Terastallize(index),
                    BattleTurnAction::Dynamax(index),
                ] {
                    if validate_action(state, side, action).is_ok() {
                        actions.push(action);
                    }
                }
            }
            actions.extend(
                (0..team.members.len())
                    .map(BattleTurnAction::Switch)
                    .filter(|action| validate_action(state, side, *action).is_ok()),
            );
            actions
        }
        Phase::ForceSwitch if state.force_switch[side.index()] => (0..team.members.len())
            .filter(|index| validate_switch(state, side, *index, SwitchKind::Forced).is_ok())
            .map(BattleTurnAction::Switch)
            .collect(),
        _ => Vec::new(),
    }
}

/// Runs one full turn from both sides' actions.
pub fn execute_turn(
    state: &mut BattleState,
    p1_action: BattleTurnAction,
    p2_action: BattleTurnAction,
    rng: &mut SmallRng,
) -> Result<(), BattleError> {
    validate_action(state, Side::Player1, p1_action)?;
    validate_action(state, Side::Player2, p2_action)?;
    let actions = [p1_action, p2_action];
    debug!("turn {}: {:?} vs {:?}", state.turn, p1_action, p2_action);

    state.phase = Phase::Executing;
    let turn = state.turn;
    state.push_log(LogKind::Info, None, format!("Turn {turn}"));

    // Switches resolve first, then transformations, then moves.
    let switching: Vec<Side> = Side::BOTH
        .into_iter()
        .filter(|side| matches!(actions[side.index()], BattleTurnAction::Switch(_)))
        .collect();
    for side in speed_order(state, &switching) {
        if let BattleTurnAction::Switch(target) = actions[side.index()] {
            perform_switch(state, side, target);
        }
    }

    for side in speed_order(state, &Side::BOTH) {
        apply_transformation(state, side, actions[side.index()].mechanic());
    }

    let keys = Side::BOTH.map(|side| order_key(state, side, actions[side.index()]));
    for index in resolve_order(keys, rng) {
        let side = Side::BOTH[index];
        let Some(slot) = actions[index].move_index() else {
            continue;
        };
        if state.active(side).is_fainted() {
            continue;
        }
        use_move(state, side, slot, rng);
    }

    end_of_turn(state);
    finish_turn(state);
    state.assert_invariants();
    Ok(())
}

/// Fills a fainted active's slot. Switch-in abilities wait until every
/// pending replacement is in.
pub fn submit_force_switch(
    state: &mut BattleState,
    side: Side,
    index: usize,
) -> Result<(), BattleError> {
    if state.phase != Phase::ForceSwitch {
        return Err(BattleError::WrongPhase { phase: state.phase });
    }
    if !state.force_switch[side.index()] {
        return Err(BattleError::NoForcedSwitchPending { side });
    }
    validate_switch(state, side, index, SwitchKind::Forced)?;

    swap_in(state, side, index);
    state.force_switch[side.index()] = false;
    state.pending_entry[side.index()] = true;

    if !state.force_switch.iter().any(|pending| *pending) {
        let entering: Vec<Side> = Side::BOTH
            .into_iter()
            .filter(|side| state.pending_entry[side.index()])
            .collect();
        state.pending_entry = [false; 2];
        for side in speed_order(state, &entering) {
            run_switch_in(state, side);
        }
        state.turn += 1;
        state.phase = Phase::ActionSelect;
    }
    state.assert_invariants();
    Ok(())
}

fn speed_order(state: &BattleState, sides: &[Side]) -> Vec<Side> {
    let weather = state.field.weather;
    let mut ordered = sides.to_vec();
    // Stable sort keeps Player 1 first on a tie.
    ordered.sort_by_key(|side| std::cmp::Reverse(effective_speed(state.active(*side), weather)));
    ordered
}

fn order_key(state: &BattleState, side: Side, action: BattleTurnAction) -> OrderKey {
    let pokemon = state.active(side);
    let priority = match action.move_index() {
        Some(index) if pokemon.has_usable_move() => {
            pokemon.moves.get(index).map_or(0, |slot| slot.data.priority)
        }
        _ => 0,
    };
    OrderKey {
        is_switch: matches!(action, BattleTurnAction::Switch(_)),
        priority,
        speed: effective_speed(pokemon, state.field.weather),
    }
}

fn apply_transformation(state: &mut BattleState, side: Side, mechanic: Mechanic) {
    let name = state.name(side);
    let pokemon = state.active_mut(side);
    let message = match mechanic {
        Mechanic::None => return,
        Mechanic::Mega => {
            let previous_ability = pokemon.ability;
            if !mega_evolve(pokemon) {
                return;
            }
            let changed_ability = pokemon.ability != previous_ability;
            let message = format!("{name} has Mega Evolved into {}!", pokemon.species);
            state.team_mut(side).transformation_used = true;
            state.push_log(LogKind::Mega, Some(side), message);
            if changed_ability {
                run_switch_in(state, side);
            }
            return;
        }
        Mechanic::Tera => {
            if !terastallize(pokemon) {
                return;
            }
            let tera = pokemon.tera_type.map_or("???", Type::name);
            (LogKind::Tera, format!("{name} terastallized into the {tera} type!"))
        }
        Mechanic::Dynamax => {
            dynamax(pokemon);
            (LogKind::Dynamax, format!("{name} Dynamaxed!"))
        }
    };
    state.team_mut(side).transformation_used = true;
    state.push_log(message.0, Some(side), message.1);
}

fn perform_switch(state: &mut BattleState, side: Side, index: usize) {
    let message = format!("{} withdrew {}!", side.label(), state.active(side).species);
    state.push_log(LogKind::Switch, Some(side), message);
    swap_in(state, side, index);
    run_switch_in(state, side);
}

fn swap_in(state: &mut BattleState, side: Side, index: usize) {
    let team = state.team_mut(side);
    leave_field(team.active_pokemon_mut());
    team.active = index;
    enter_field(team.active_pokemon_mut());
    let message = format!("{} sent out {}!", side.label(), state.active(side).species);
    state.push_log(LogKind::Switch, Some(side), message);
}

fn run_switch_in(state: &mut BattleState, side: Side) {
    let pokemon = state.active(side);
    if pokemon.is_fainted() {
        return;
    }
    let Some(hook) = pokemon.ability_hooks().on_switch_in else {
        return;
    };
    let Some(effect) = hook(pokemon, state.active(side.opponent())) else {
        return;
    };
    let source = format!("{}'s {}", state.name(side), pokemon.ability.name());
    match effect {
        SwitchInEffect::StatDrop(change) => {
            let target = side.opponent();
            if state.active(target).is_fainted() {
                return;
            }
            state.push_log(LogKind::Info, Some(side), format!("{source}!"));
            apply_stat_change(state, target, change, true);
        }
        SwitchInEffect::Weather(weather) => {
            set_weather(state, side, weather, &source);
        }
        SwitchInEffect::Terrain(terrain) => {
            set_terrain(state, side, terrain, &source);
        }
    }
}

fn set_weather(state: &mut BattleState, side: Side, weather: Weather, source: &str) -> bool {
    if !state.field.set_weather(weather, DEFAULT_FIELD_TURNS) {
        return false;
    }
    state.push_log(LogKind::Weather, Some(side), format!("{source}: {}", weather.start_message()));
    true
}

fn set_terrain(state: &mut BattleState, side: Side, terrain: Terrain, source: &str) -> bool {
    if !state.field.set_terrain(terrain, DEFAULT_FIELD_TURNS) {
        return false;
    }
    let message = format!("{source}: {} covered the battlefield!", terrain.label());
    state.push_log(LogKind::Terrain, Some(side), message);
    true
}

fn stage_verb(delta: i8) -> &'static str {
    match delta {
        3.. => "rose drastically",
        2 => "rose sharply",
        1 => "rose",
        -1 => "fell",
        -2 => "harshly fell",
        _ => "severely fell",
    }
}

/// Applies one stage change. Drops caused by the opponent respect Clear Body
/// and trigger Defiant/Competitive.
fn apply_stat_change(
    state: &mut BattleState,
    target: Side,
    change: StatChange,
    from_opponent: bool,
) {
    if state.active(target).is_fainted() || change.stages == 0 {
        return;
    }
    let name = state.name(target);
    let hooks = state.active(target).ability_hooks();
    if from_opponent && change.stages < 0 && hooks.blocks_stat_drops {
        let ability = state.active(target).ability.name();
        let message = format!("{name}'s {ability} prevents its stats from being lowered!");
        state.push_log(LogKind::Info, Some(target), message);
        return;
    }
    let delta = state.active_mut(target).stages.apply(change.stat, change.stages);
    let label = change.stat.label();
    if delta == 0 {
        let direction = if change.stages > 0 { "higher" } else { "lower" };
        state.push_log(
            LogKind::Info,
            Some(target),
            format!("{name}'s {label} won't go any {direction}!"),
        );
        return;
    }
    state.push_log(LogKind::Info, Some(target), format!("{name}'s {label} {}!", stage_verb(delta)));
    if from_opponent && delta < 0 {
        let pokemon = state.active(target);
        let reaction = hooks.on_stat_drop.and_then(|hook| hook(pokemon, change.stat, delta));
        if let Some(reaction) = reaction {
            let message = format!("{name}'s {} activated!", pokemon.ability.name());
            state.push_log(LogKind::Info, Some(target), message);
            apply_stat_change(state, target, reaction, false);
        }
    }
}

fn inflicted_verb(status: Status) -> &'static str {
    match status {
        Status::Burn => "was burned",
        Status::Paralysis => "is paralyzed",
        Status::Poison => "was poisoned",
        Status::Toxic => "was badly poisoned",
        Status::Sleep => "fell asleep",
        Status::Freeze => "was frozen solid",
    }
}

fn roll_critical(stage: u8, rng: &mut SmallRng) -> bool {
    let chance = match stage {
        0 => 1.0 / 24.0,
        1 => 1.0 / 8.0,
        2 => 0.5,
        _ => 1.0,
    };
    rng.gen_bool(chance)
}

/// `numerator/denominator` of `amount`, at least 1.
fn fraction_of(amount: u16, (numerator, denominator): (u16, u16)) -> u16 {
    (amount as u32 * numerator as u32 / denominator.max(1) as u32).max(1) as u16
}

fn passes_accuracy(
    state: &BattleState,
    side: Side,
    move_data: &MoveData,
    rng: &mut SmallRng,
) -> bool {
    let Some(accuracy) = effective_accuracy(move_data, state.field.weather) else {
        return true;
    };
    let attacker = state.active(side);
    let defender = state.active(side.opponent());
    let stage = (attacker.stages.accuracy - defender.stages.evasion).clamp(MIN_STAGE, MAX_STAGE);
    let chance = (accuracy * accuracy_multiplier(stage)).clamp(0.0, 100.0);
    rng.gen_range(0.0f32..100.0) < chance
}

fn use_move(state: &mut BattleState, side: Side, index: usize, rng: &mut SmallRng) {
    let name = state.name(side);
    let target = side.opponent();
    match status::before_move(state.active_mut(side), rng) {
        BeforeMove::Act => {}
        BeforeMove::Thawed => {
            state.push_log(LogKind::Status, Some(side), format!("{name} thawed out!"))
        }
        BeforeMove::Asleep => {
            state.push_log(LogKind::Status, Some(side), format!("{name} is fast asleep."));
            return;
        }
        BeforeMove::Frozen => {
            state.push_log(LogKind::Status, Some(side), format!("{name} is frozen solid!"));
            return;
        }
        BeforeMove::FullyParalyzed => {
            state.push_log(LogKind::Status, Some(side), format!("{name} is fully paralyzed!"));
            return;
        }
    }

    let attacker = state.active_mut(side);
    let move_data = if attacker.has_usable_move() {
        let Some(slot) = attacker.moves.get_mut(index) else {
            return;
        };
        slot.pp = slot.pp.saturating_sub(1);
        let data = slot.data.clone();
        if attacker.item_hooks().choice_lock && attacker.choice_lock.is_none() {
            attacker.choice_lock = Some(index);
        }
        data
    } else {
        state.push_log(LogKind::Info, Some(side), format!("{name} has no moves left!"));
        MoveData::struggle()
    };
    let is_struggle = move_data.id == "struggle";
    let dynamaxed = state.active(side).dynamaxed;
    let power = if dynamaxed && !move_data.is_status() && !is_struggle {
        max_move_power(move_data.power)
    } else {
        move_data.power
    };
    let move_name = if power != move_data.power {
        format!("Max {}", move_data.name)
    } else {
        move_data.name.clone()
    };
    state.push_log(LogKind::Info, Some(side), format!("{name} used {move_name}!"));

    let targets_foe =
        !move_data.is_status() || move_data.status.is_some() || !move_data.boosts.is_empty();
    if targets_foe {
        if state.active(target).is_fainted() {
            state.push_log(LogKind::Info, Some(side), "But there was no target...");
            return;
        }
        if terrain_blocks_priority(state.field.terrain, state.active(target), move_data.priority) {
            let message = format!("{} is protected by the Psychic Terrain!", state.name(target));
            state.push_log(LogKind::Info, Some(target), message);
            return;
        }
        if !passes_accuracy(state, side, &move_data, rng) {
            state.push_log(LogKind::Miss, Some(side), format!("{name}'s attack missed!"));
            return;
        }
    }

    if move_data.is_status() {
        use_status_move(state, side, &move_data, rng);
    } else {
        use_damaging_move(state, side, &move_data, power, is_struggle, rng);
    }
}

fn use_status_move(state: &mut BattleState, side: Side, move_data: &MoveData, rng: &mut SmallRng) {
    let target = side.opponent();
    let target_name = state.name(target);
    let mut failed = true;

    if let Some(inflicted) = move_data.status {
        if effectiveness_types(move_data.move_type, state.active(target).defensive_types()) == 0.0 {
            state.push_log(
                LogKind::Info,
                Some(target),
                format!("It doesn't affect {target_name}..."),
            );
            return;
        }
        if absorb_incoming(state, side, move_data.move_type, 0) {
            return;
        }
        let terrain = state.field.terrain;
        match status::apply_status(state.active_mut(target), inflicted, terrain, rng) {
            Ok(()) => {
                let message = format!("{target_name} {}!", inflicted_verb(inflicted));
                state.push_log(LogKind::Status, Some(target), message);
                failed = false;
            }
            Err(block) => trace!("{} blocked: {:?}", inflicted.label(), block),
        }
    }
    for change in &move_data.boosts {
        apply_stat_change(state, target, *change, true);
        failed = false;
    }
    for change in &move_data.self_boosts {
        apply_stat_change(state, side, *change, false);
        failed = false;
    }
    if let Some(weather) = move_data.weather {
        if set_weather(state, side, weather, &move_data.name) {
            failed = false;
        }
    }
    if let Some(terrain) = move_data.terrain {
        if set_terrain(state, side, terrain, &move_data.name) {
            failed = false;
        }
    }
    if let Some(share) = move_data.heal {
        let user = state.active_mut(side);
        let amount = fraction_of(user.max_hp, share);
        let healed = user.heal(amount);
        if healed > 0 {
            let message = format!("{} restored {healed} HP!", state.name(side));
            state.push_log(LogKind::Heal, Some(side), message);
            failed = false;
        }
    }
    if failed {
        state.push_log(LogKind::Info, Some(side), "But it failed!");
    }
}

/// Runs the defender's incoming-damage ability for an immunity. Returns true
/// when the move was absorbed; otherwise the ability's multiplier (if any)
/// is left for the damage step.
fn absorb_incoming(state: &mut BattleState, side: Side, move_type: Type, power: u16) -> bool {
    let Some(result) = incoming_damage(state, side, move_type, power) else {
        return false;
    };
    if !result.is_immune() {
        return false;
    }
    let target = side.opponent();
    let name = state.name(target);
    let ability = state.active(target).ability.name();
    if let Some(amount) = result.heal_instead {
        let healed = state.active_mut(target).heal(amount);
        if healed > 0 {
            state.push_log(
                LogKind::Heal,
                Some(target),
                format!("{name}'s {ability} restored {healed} HP!"),
            );
        } else {
            state.push_log(
                LogKind::Info,
                Some(target),
                format!("It doesn't affect {name}... ({ability})"),
            );
        }
    } else if result.flash_fire_boost {
        state.active_mut(target).flash_fire = true;
        let message = format!("{name}'s {ability} raised the power of its Fire-type moves!");
        state.push_log(LogKind::Info, Some(target), message);
    } else {
        state.push_log(
            LogKind::Info,
            Some(target),
            format!("It doesn't affect {name}... ({ability})"),
        );
    }
    true
}

fn incoming_damage(
    state: &BattleState,
    side: Side,
    move_type: Type,
    power: u16,
) -> Option<IncomingDamage> {
    let attacker = state.active(side);
    let defender = state.active(side.opponent());
    defender
        .ability_hooks()
        .modify_incoming_damage
        .and_then(|hook| hook(defender, attacker, move_type, power))
}

fn build_damage_input<'a>(
    state: &'a BattleState,
    side: Side,
    move_data: &MoveData,
    power: u16,
    move_type: Option<Type>,
    critical: bool,
    incoming_multiplier: f32,
) -> DamageInput<'a> {
    let attacker = state.active(side);
    let defender = state.active(side.opponent());
    let physical = move_data.is_physical();
    let (attack, attack_stage, defense, defense_stage) = if physical {
        (attacker.stats.atk, attacker.stages.atk, defender.stats.def, defender.stages.def)
    } else {
        (attacker.stats.spa, attacker.stages.spa, defender.stats.spd, defender.stages.spd)
    };
    let hook_type = move_type.unwrap_or(move_data.move_type);

    let attack_modifier = chain_all(
        [
            attacker
                .ability_hooks()
                .modify_attack_stat
                .map(|hook| hook(attacker, hook_type, power, physical)),
            attacker.item_hooks().modify_attack_stat.map(|hook| hook(attacker, physical)),
        ]
        .into_iter()
        .flatten(),
    );
    let defense_modifier = chain_all(
        defender
            .item_hooks()
            .modify_defense_stat
            .map(|hook| hook(defender, physical)),
    );

    let stab = match move_type {
        Some(move_type) => {
            let tera = attacker.tera_type.filter(|_| attacker.terastallized);
            let stab = base_stab(move_type, &attacker.types, tera);
            match attacker.ability_hooks().modify_stab {
                Some(hook) => hook(attacker, stab),
                None => stab,
            }
        }
        None => 1.0,
    };

    let effectiveness =
        move_type.map_or(1.0, |t| effectiveness_types(t, defender.defensive_types()));
    let final_modifier = chain_all(
        [
            Some(incoming_multiplier),
            defender
                .ability_hooks()
                .modify_final_damage
                .map(|hook| hook(defender, effectiveness)),
            attacker
                .item_hooks()
                .modify_final_damage
                .map(|hook| hook(attacker, hook_type, effectiveness)),
            move_type.map(|_| {
                terrain_damage_modifier(state.field.terrain, attacker, defender, move_data)
            }),
        ]
        .into_iter()
        .flatten(),
    );

    DamageInput {
        level: attacker.level,
        attack,
        attack_stage,
        attack_modifier,
        defense,
        defense_stage,
        defense_modifier,
        power,
        move_type,
        defender_types: defender.defensive_types(),
        stab,
        critical,
        weather: state.field.weather,
        burned_physical: physical
            && attacker.status == Some(Status::Burn)
            && !ignores_burn_drop(attacker),
        final_modifier,
    }
}

fn use_damaging_move(
    state: &mut BattleState,
    side: Side,
    move_data: &MoveData,
    power: u16,
    is_struggle: bool,
    rng: &mut SmallRng,
) {
    let target = side.opponent();
    let name = state.name(side);
    let target_name = state.name(target);
    let move_type = (!is_struggle).then_some(move_data.move_type);

    let mut incoming_multiplier = 1.0;
    if let Some(move_type) = move_type {
        if absorb_incoming(state, side, move_type, power) {
            return;
        }
        if let Some(result) = incoming_damage(state, side, move_type, power) {
            incoming_multiplier = result.multiplier;
        }
    }
    let target_types = state.active(target).defensive_types();
    let effectiveness = move_type.map_or(1.0, |t| effectiveness_types(t, target_types));
    if effectiveness == 0.0 {
        state.push_log(LogKind::Info, Some(target), format!("It doesn't affect {target_name}..."));
        return;
    }

    let critical = roll_critical(move_data.crit_ratio, rng);
    let roll = rng.gen_range(MIN_ROLL..=MAX_ROLL);
    let mut damage = {
        let input = build_damage_input(
            state,
            side,
            move_data,
            power,
            move_type,
            critical,
            incoming_multiplier,
        );
        damage_at_roll(&input, roll)
    };
    trace!("{} -> {}: roll {roll}, crit {critical}, damage {damage}", move_data.name, target_name);

    let mut endured = None;
    if let Some((reduced, prevention)) = prevent_ko(state.active(target), damage) {
        damage = reduced;
        spend_ko_prevention(state.active_mut(target), prevention);
        endured = Some(prevention);
    }
    let dealt = state.active_mut(target).take_damage(damage);

    if critical {
        state.push_log(LogKind::Critical, Some(target), "A critical hit!");
    }
    if effectiveness > 1.0 {
        state.push_log(LogKind::Info, Some(target), "It's super effective!");
    } else if effectiveness < 1.0 {
        state.push_log(LogKind::Info, Some(target), "It's not very effective...");
    }
    let defender = state.active(target);
    let message = format!(
        "{target_name} took {dealt} damage ({}/{} HP)",
        defender.current_hp, defender.max_hp
    );
    state.push_log(LogKind::Damage, Some(target), message);
    if let Some(prevention) = endured {
        let source = match prevention {
            KoPrevention::Ability(ability) => ability.name(),
            KoPrevention::Item(item) => item.name(),
        };
        state.push_log(
            LogKind::Info,
            Some(target),
            format!("{target_name} endured the hit with {source}!"),
        );
    }

    let defender = state.active(target);
    if let Some(heal) = defender.item_hooks().on_after_damage.and_then(|hook| hook(defender)) {
        let item = state.active(target).item.map_or("its item", |item| item.name());
        let defender = state.active_mut(target);
        let healed = defender.heal(heal);
        if defender.item_hooks().consumed_on_use {
            defender.item = None;
        }
        state.push_log(
            LogKind::Heal,
            Some(target),
            format!("{target_name} restored {healed} HP with {item}!"),
        );
    }

    if let Some(share) = move_data.drain {
        if dealt > 0 {
            let amount = fraction_of(dealt, share);
            let healed = state.active_mut(side).heal(amount);
            if healed > 0 {
                state.push_log(
                    LogKind::Heal,
                    Some(side),
                    format!("{target_name} had its energy drained!"),
                );
            }
        }
    }

    let attacker = state.active(side);
    let recoil = if is_struggle {
        Some((attacker.max_hp / 4).max(1))
    } else if attacker.ability_hooks().prevents_indirect_damage {
        None
    } else {
        move_data
            .recoil
            .filter(|_| dealt > 0)
            .map(|share| fraction_of(dealt, share))
    };
    if let Some(amount) = recoil {
        let lost = state.active_mut(side).take_damage(amount);
        state.push_log(
            LogKind::Damage,
            Some(side),
            format!("{name} was damaged by the recoil! (-{lost} HP)"),
        );
    }
    if dealt > 0 {
        let attacker = state.active(side);
        if let Some(amount) = attacker.item_hooks().attack_recoil.and_then(|hook| hook(attacker)) {
            let item = attacker.item.map_or("its item", |item| item.name());
            let lost = state.active_mut(side).take_damage(amount);
            state.push_log(
                LogKind::Damage,
                Some(side),
                format!("{name} lost {lost} HP to its {item}!"),
            );
        }
    }

    if let Some(secondary) = &move_data.secondary {
        if !state.active(target).is_fainted() && rng.gen_range(0..100u8) < secondary.chance {
            if let Some(inflicted) = secondary.status {
                let terrain = state.field.terrain;
                if status::apply_status(state.active_mut(target), inflicted, terrain, rng).is_ok() {
                    let message = format!("{target_name} {}!", inflicted_verb(inflicted));
                    state.push_log(LogKind::Status, Some(target), message);
                }
            }
            for change in &secondary.boosts {
                apply_stat_change(state, target, *change, true);
            }
        }
    }
    for change in &move_data.self_boosts {
        apply_stat_change(state, side, *change, false);
    }

    if check_faint(state, target) {
        if let Some(change) = after_ko_boost(state.active(side)) {
            let message = format!("{name}'s {}!", state.active(side).ability.name());
            state.push_log(LogKind::Info, Some(side), message);
            apply_stat_change(state, side, change, false);
        }
    }
    check_faint(state, side);
}

/// Logs a faint the first time the active's HP hits zero. Returns true when
/// it just fainted.
fn check_faint(state: &mut BattleState, side: Side) -> bool {
    let name = state.name(side);
    let pokemon = state.active_mut(side);
    if !pokemon.is_fainted() || !pokemon.active {
        return false;
    }
    leave_field(pokemon);
    status::clear_status(pokemon);
    state.push_log(LogKind::Faint, Some(side), format!("{name} fainted!"));
    true
}

fn apply_end_of_turn_effect(
    state: &mut BattleState,
    side: Side,
    effect: EndOfTurnEffect,
    source: &str,
) {
    let name = state.name(side);
    match effect {
        EndOfTurnEffect::Boost(change) => {
            state.push_log(LogKind::Info, Some(side), format!("{name}'s {source}!"));
            apply_stat_change(state, side, change, false);
        }
        EndOfTurnEffect::Heal(amount) => {
            let healed = state.active_mut(side).heal(amount);
            if healed > 0 {
                state.push_log(
                    LogKind::Heal,
                    Some(side),
                    format!("{name} restored {healed} HP using its {source}!"),
                );
            }
        }
        EndOfTurnEffect::Damage(amount) => {
            let lost = state.active_mut(side).take_damage(amount);
            state.push_log(
                LogKind::Damage,
                Some(side),
                format!("{name} was hurt by its {source}! (-{lost} HP)"),
            );
        }
    }
}

fn end_of_turn(state: &mut BattleState) {
    let weather = state.field.weather;
    for side in speed_order(state, &Side::BOTH) {
        if state.active(side).is_fainted() {
            continue;
        }
        let name = state.name(side);

        let residual = weather_residual_damage(state.active(side), weather);
        if let (Some(amount), Some(current)) = (residual, weather) {
            let lost = state.active_mut(side).take_damage(amount);
            let message = format!("{name} is buffeted by the {}! (-{lost} HP)", current.label());
            state.push_log(LogKind::Weather, Some(side), message);
            if check_faint(state, side) {
                continue;
            }
        }

        let pokemon = state.active(side);
        let effect = pokemon.ability_hooks().on_end_of_turn.and_then(|hook| hook(pokemon, weather));
        if let Some(effect) = effect {
            let source = pokemon.ability.name();
            apply_end_of_turn_effect(state, side, effect, source);
            if check_faint(state, side) {
                continue;
            }
        }

        let pokemon = state.active(side);
        if let Some(effect) = pokemon.item_hooks().on_end_of_turn.and_then(|hook| hook(pokemon)) {
            let source = pokemon.item.map_or("item", |item| item.name());
            apply_end_of_turn_effect(state, side, effect, source);
            if check_faint(state, side) {
                continue;
            }
        }

        if let Some(amount) = grassy_heal(state.field.terrain, state.active(side)) {
            let healed = state.active_mut(side).heal(amount);
            state.push_log(
                LogKind::Heal,
                Some(side),
                format!("{name} is healed by the Grassy Terrain! (+{healed} HP)"),
            );
        }

        for tick in status::end_of_turn(state.active_mut(side)) {
            let (kind, message) = match tick {
                StatusTick::Damage { status, amount } => {
                    let cause = match status {
                        Status::Burn => "its burn",
                        _ => "poison",
                    };
                    (LogKind::Status, format!("{name} was hurt by {cause}! (-{amount} HP)"))
                }
                StatusTick::WokeUp => (LogKind::Status, format!("{name} woke up!")),
                StatusTick::Thawed => (LogKind::Status, format!("{name} thawed out!")),
                StatusTick::Expired(status) => {
                    (LogKind::Status, format!("{name} is no longer {}.", status.label()))
                }
            };
            state.push_log(kind, Some(side), message);
        }
        check_faint(state, side);
    }

    let expiry = state.field.decrement();
    if let Some(weather) = expiry.weather {
        state.push_log(LogKind::Weather, None, weather.end_message());
    }
    if let Some(terrain) = expiry.terrain {
        state.push_log(LogKind::Terrain, None, format!("The {} faded.", terrain.label()));
    }

    for side in Side::BOTH {
        if state.active(side).is_fainted() {
            continue;
        }
        if tick_dynamax(state.active_mut(side)) {
            let message = format!("{} returned to normal size!", state.name(side));
            state.push_log(LogKind::Dynamax, Some(side), message);
        }
    }
}

fn finish_turn(state: &mut BattleState) {
    let wiped = Side::BOTH.map(|side| state.team(side).all_fainted());
    match wiped {
        [true, true] => {
            state.winner = None;
            state.phase = Phase::Ended;
            state.push_log(LogKind::Info, None, "The battle ended in a draw!");
        }
        [true, false] | [false, true] => {
            let winner = if wiped[0] { Side::Player2 } else { Side::Player1 };
            state.winner = Some(winner);
            state.phase = Phase::Ended;
            state.push_log(
                LogKind::Info,
                Some(winner),
                format!("{} won the battle!", winner.label()),
            );
        }
        [false, false] => {
            let pending = Side::BOTH.map(|side| state.active(side).is_fainted());
            if pending.iter().any(|p| *p) {
                state.force_switch = pending;
                state.phase = Phase::ForceSwitch;
                for side in Side::BOTH.into_iter().filter(|side| pending[side.index()]) {
                    state.push_log(
                        LogKind::Info,
                        Some(side),
                        format!("{} must choose a replacement.", side.label()),
                    );
                }
            } else {
                state.turn += 1;
                state.phase = Phase::ActionSelect;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::moves::get_move;
    use crate::sim::abilities::Ability;
    use crate::sim::pokemon::{test_pokemon, MoveSlot};
    use assert_matches::assert_matches;
    use rand::SeedableRng;

    fn with_moves(mut pokemon: BattlePokemon, moves: &[&str]) -> BattlePokemon {
        pokemon.moves = moves
            .iter()
            .map(|id| MoveSlot::new(get_move(id).expect("move exists")))
            .collect();
        pokemon
    }

    fn started(p1: Vec<BattlePokemon>, p2: Vec<BattlePokemon>) -> BattleState {
        let mut state = BattleState::new(
            BattleTeam::new(p1, Mechanic::None).expect("team"),
            BattleTeam::new(p2, Mechanic::None).expect("team"),
        );
        start_battle(&mut state).expect("start");
        state
    }

    #[test]
    fn start_moves_to_action_select() {
        let a = test_pokemon("a", &[Type::Normal], Ability::NoAbility);
        let b = test_pokemon("b", &[Type::Normal], Ability::NoAbility);
        let mut state = started(vec![a], vec![b]);
        assert_eq!(state.phase, Phase::ActionSelect);
        assert_eq!(state.turn, 1);
        assert_matches!(
            start_battle(&mut state),
            Err(BattleError::WrongPhase { phase: Phase::ActionSelect })
        );
    }

    #[test]
    fn start_skips_fainted_leads() {
        let mut lead = test_pokemon("lead", &[Type::Normal], Ability::NoAbility);
        lead.current_hp = 0;
        let healthy = test_pokemon("healthy", &[Type::Normal], Ability::NoAbility);
        let b = test_pokemon("b", &[Type::Normal], Ability::NoAbility);
        let state = started(vec![lead, healthy], vec![b]);
        assert_eq!(state.team(Side::Player1).active, 1);
        assert!(!state.team(Side::Player1).members[0].active);
        assert_eq!(state.active(Side::Player1).species, "healthy");
    }

    #[test]
    fn start_rejects_team_without_healthy_members() {
        let a = test_pokemon("a", &[Type::Normal], Ability::NoAbility);
        let mut b = test_pokemon("b", &[Type::Normal], Ability::NoAbility);
        b.current_hp = 0;
        let mut state = BattleState::new(
            BattleTeam::new(vec![a], Mechanic::None).expect("team"),
            BattleTeam::new(vec![b], Mechanic::None).expect("team"),
        );
        let before = state.clone();
        assert_matches!(
            start_battle(&mut state),
            Err(BattleError::NoHealthyMembers { side: Side::Player2 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn rejected_action_leaves_state_untouched() {
        let a = test_pokemon("a", &[Type::Normal], Ability::NoAbility);
        let b = test_pokemon("b", &[Type::Normal], Ability::NoAbility);
        let mut state = started(vec![a], vec![b]);
        let before = state.clone();
        let mut rng = SmallRng::seed_from_u64(1);
        let out_of_range = BattleTurnAction::Move(3);
        let result = execute_turn(&mut state, out_of_range, BattleTurnAction::Move(0), &mut rng);
        assert_matches!(
            result,
            Err(BattleError::MoveOutOfRange { side: Side::Player1, index: 3 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn switch_validation_errors() {
        let a = test_pokemon("a", &[Type::Normal], Ability::NoAbility);
        let mut fainted = test_pokemon("fainted", &[Type::Normal], Ability::NoAbility);
        fainted.current_hp = 0;
        let b = test_pokemon("b", &[Type::Normal], Ability::NoAbility);
        let state = started(vec![a, fainted], vec![b]);
        assert_matches!(
            validate_action(&state, Side::Player1, BattleTurnAction::Switch(0)),
            Err(BattleError::SwitchToActive { .. })
        );
        assert_matches!(
            validate_action(&state, Side::Player1, BattleTurnAction::Switch(1)),
            Err(BattleError::SwitchTargetFainted { .. })
        );
        assert_matches!(
            validate_action(&state, Side::Player1, BattleTurnAction::Switch(4)),
            Err(BattleError::SwitchOutOfRange { .. })
        );
    }

    #[test]
    fn shadow_tag_traps_opponent() {
        let a = test_pokemon("a", &[Type::Normal], Ability::NoAbility);
        let bench = test_pokemon("bench", &[Type::Normal], Ability::NoAbility);
        let trapper = test_pokemon("trapper", &[Type::Psychic], Ability::ShadowTag);
        let state = started(vec![a, bench], vec![trapper]);
        assert_matches!(
            validate_action(&state, Side::Player1, BattleTurnAction::Switch(1)),
            Err(BattleError::Trapped { side: Side::Player1 })
        );
        assert!(!legal_actions(&state, Side::Player1).contains(&BattleTurnAction::Switch(1)));
    }

    #[test]
    fn no_pp_and_struggle() {
        let mut a = test_pokemon("a", &[Type::Normal], Ability::NoAbility);
        a.moves[0].pp = 0;
        let b = test_pokemon("b", &[Type::Normal], Ability::NoAbility);
        let mut state = started(vec![a], vec![b]);
        assert_eq!(legal_actions(&state, Side::Player1), vec![BattleTurnAction::Move(0)]);

        let mut rng = SmallRng::seed_from_u64(3);
        execute_turn(&mut state, BattleTurnAction::Move(0), BattleTurnAction::Move(0), &mut rng)
            .expect("turn");
        assert!(state.log.entries().iter().any(|e| e.message.contains("used Struggle")));
        // Struggle recoil is a quarter of max HP.
        assert!(state.log.entries().iter().any(|e| e.message.contains("recoil! (-25 HP)")));
    }

    #[test]
    fn choice_lock_restricts_moves() {
        let a = test_pokemon("a", &[Type::Normal], Ability::NoAbility);
        let mut a = with_moves(a, &["tackle", "growl"]);
        a.item = Some(crate::sim::items::Item::ChoiceScarf);
        let b = test_pokemon("b", &[Type::Normal], Ability::NoAbility);
        let mut state = started(vec![a], vec![b]);
        let mut rng = SmallRng::seed_from_u64(4);
        execute_turn(&mut state, BattleTurnAction::Move(0), BattleTurnAction::Move(0), &mut rng)
            .expect("turn");
        assert_matches!(
            validate_action(&state, Side::Player1, BattleTurnAction::Move(1)),
            Err(BattleError::ChoiceLocked { side: Side::Player1, locked: 0 })
        );
    }

    #[test]
    fn switch_goes_before_moves() {
        let a = test_pokemon("a", &[Type::Normal], Ability::NoAbility);
        let bench = test_pokemon("bench", &[Type::Normal], Ability::NoAbility);
        let mut b = test_pokemon("b", &[Type::Normal], Ability::NoAbility);
        b.stats.spe = 300;
        let mut state = started(vec![a, bench], vec![b]);
        let mut rng = SmallRng::seed_from_u64(5);
        execute_turn(&mut state, BattleTurnAction::Switch(1), BattleTurnAction::Move(0), &mut rng)
            .expect("turn");
        assert_eq!(state.team(Side::Player1).active, 1);
        assert!(state.team(Side::Player1).members[0].current_hp == 100);
    }

    #[test]
    fn intimidate_on_start_lowers_attack() {
        let a = test_pokemon("a", &[Type::Normal], Ability::Intimidate);
        let b = test_pokemon("b", &[Type::Normal], Ability::NoAbility);
        let state = started(vec![a], vec![b]);
        assert_eq!(state.active(Side::Player2).stages.atk, -1);
    }

    #[test]
    fn defiant_answers_intimidate() {
        let a = test_pokemon("a", &[Type::Normal], Ability::Intimidate);
        let b = test_pokemon("b", &[Type::Normal], Ability::Defiant);
        let state = started(vec![a], vec![b]);
        assert_eq!(state.active(Side::Player2).stages.atk, 1);
    }

    #[test]
    fn faint_leads_to_forced_switch() {
        let mut a = test_pokemon("a", &[Type::Normal], Ability::NoAbility);
        a.stats.atk = 400;
        a.stats.spe = 200;
        let mut b = test_pokemon("b", &[Type::Normal], Ability::NoAbility);
        b.current_hp = 1;
        let b2 = test_pokemon("b2", &[Type::Normal], Ability::NoAbility);
        let mut state = started(vec![a], vec![b, b2]);
        let mut rng = SmallRng::seed_from_u64(6);
        execute_turn(&mut state, BattleTurnAction::Move(0), BattleTurnAction::Move(0), &mut rng)
            .expect("turn");
        assert_eq!(state.phase, Phase::ForceSwitch);
        assert_eq!(state.force_switch, [false, true]);
        assert_eq!(legal_actions(&state, Side::Player2), vec![BattleTurnAction::Switch(1)]);
        assert_matches!(
            submit_force_switch(&mut state, Side::Player1, 0),
            Err(BattleError::NoForcedSwitchPending { side: Side::Player1 })
        );
        submit_force_switch(&mut state, Side::Player2, 1).expect("replacement");
        assert_eq!(state.phase, Phase::ActionSelect);
        assert_eq!(state.turn, 2);
        assert_eq!(state.active(Side::Player2).species, "b2");
    }

    #[test]
    fn last_faint_ends_battle() {
        let mut a = test_pokemon("a", &[Type::Normal], Ability::NoAbility);
        a.stats.atk = 400;
        a.stats.spe = 200;
        let mut b = test_pokemon("b", &[Type::Normal], Ability::NoAbility);
        b.current_hp = 1;
        let mut state = started(vec![a], vec![b]);
        let mut rng = SmallRng::seed_from_u64(7);
        execute_turn(&mut state, BattleTurnAction::Move(0), BattleTurnAction::Move(0), &mut rng)
            .expect("turn");
        assert_eq!(state.phase, Phase::Ended);
        assert_eq!(state.winner, Some(Side::Player1));
        assert!(legal_actions(&state, Side::Player1).is_empty());
    }

    #[test]
    fn type_immunity_logs_and_deals_nothing() {
        let a = test_pokemon("a", &[Type::Normal], Ability::NoAbility);
        let b = test_pokemon("b", &[Type::Ghost], Ability::NoAbility);
        let mut state = started(vec![a], vec![b]);
        let mut rng = SmallRng::seed_from_u64(8);
        execute_turn(&mut state, BattleTurnAction::Move(0), BattleTurnAction::Move(0), &mut rng)
            .expect("turn");
        assert_eq!(state.active(Side::Player2).current_hp, 100);
        assert!(state.log.entries().iter().any(|e| e.message.contains("doesn't affect")));
    }

    #[test]
    fn stage_verbs() {
        assert_eq!(stage_verb(1), "rose");
        assert_eq!(stage_verb(2), "rose sharply");
        assert_eq!(stage_verb(-2), "harshly fell");
        assert_eq!(stage_verb(-3), "severely fell");
    }
}
