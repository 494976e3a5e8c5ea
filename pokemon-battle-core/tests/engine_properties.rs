use pokemon_battle_core::prelude::*;
use serde_json::json;

fn roster() -> Vec<PokemonSet> {
    serde_json::from_value(json!([
        {
            "species": "Garchomp",
            "types": ["dragon", "ground"],
            "baseStats": {"hp": 108, "atk": 130, "def": 95, "spa": 80, "spd": 85, "spe": 102},
            "ability": "Sand Rush",
            "item": "Life Orb",
            "moves": ["earthquake", "dragonclaw", "swordsdance", "stoneedge"]
        },
        {
            "species": "Rotom-Wash",
            "types": ["electric", "water"],
            "baseStats": {"hp": 50, "atk": 65, "def": 107, "spa": 105, "spd": 107, "spe": 86},
            "ability": "Levitate",
            "item": "Leftovers",
            "teraType": "water",
            "moves": ["hydropump", "thunderbolt", "willowisp", "thunderwave"]
        },
        {
            "species": "Ferrothorn",
            "types": ["grass", "steel"],
            "baseStats": {"hp": 74, "atk": 94, "def": 131, "spa": 54, "spd": 116, "spe": 20},
            "ability": "Sturdy",
            "item": "Sitrus Berry",
            "moves": ["gigadrain", "toxic", "flashcannon", "bodyslam"]
        }
    ]))
    .expect("valid roster")
}

fn rival() -> Vec<PokemonSet> {
    serde_json::from_value(json!([
        {
            "species": "Charizard",
            "types": ["fire", "flying"],
            "baseStats": {"hp": 78, "atk": 84, "def": 78, "spa": 109, "spd": 85, "spe": 100},
            "ability": "Blaze",
            "item": "Charizardite Y",
            "moves": ["flamethrower", "airslash", "roost", "energyball"],
            "mega": {
                "species": "Mega Charizard Y",
                "types": ["fire", "flying"],
                "baseStats": {"hp": 78, "atk": 104, "def": 78, "spa": 159, "spd": 115, "spe": 100},
                "ability": "Drought"
            }
        },
        {
            "species": "Gyarados",
            "types": ["water", "flying"],
            "baseStats": {"hp": 95, "atk": 125, "def": 79, "spa": 60, "spd": 100, "spe": 81},
            "ability": "Intimidate",
            "item": "Choice Band",
            "moves": ["waterfall", "earthquake", "icebeam", "bodyslam"]
        },
        {
            "species": "Gengar",
            "types": ["ghost", "poison"],
            "baseStats": {"hp": 60, "atk": 65, "def": 60, "spa": 130, "spd": 75, "spe": 110},
            "ability": "Competitive",
            "item": "Focus Sash",
            "moves": ["shadowball", "sludgebomb", "spore", "thunderbolt"]
        }
    ]))
    .expect("valid roster")
}

fn engine(mechanics: [Mechanic; 2], seed: u64) -> BattleEngine {
    BattleEngine::from_sets(&roster(), &rival(), mechanics, MoveDex::builtin(), seed)
        .expect("engine")
}

fn play(
    engine: &mut BattleEngine,
    p1: &mut dyn BattleAI,
    p2: &mut dyn BattleAI,
) -> Option<BattleOutcome> {
    for _ in 0..300 {
        let state = engine.state();
        for side in Side::BOTH {
            for member in &state.team(side).members {
                assert!(member.current_hp <= member.max_hp, "{} over max HP", member.species);
            }
        }
        match state.phase {
            Phase::Ended => return engine.outcome(),
            Phase::ActionSelect => {
                let legal1 = engine.legal_actions(Side::Player1);
                let legal2 = engine.legal_actions(Side::Player2);
                let a1 = p1.choose_action(state, Side::Player1, &legal1);
                let a2 = p2.choose_action(state, Side::Player2, &legal2);
                engine.step(a1, a2).expect("AI picks legal actions");
            }
            Phase::ForceSwitch => {
                let pending: Vec<Side> = Side::BOTH
                    .into_iter()
                    .filter(|side| state.force_switch[side.index()])
                    .collect();
                for side in pending {
                    let legal = engine.legal_actions(side);
                    let Some(BattleTurnAction::Switch(index)) = legal.first().copied() else {
                        panic!("forced switch without a replacement");
                    };
                    engine.force_switch(side, index).expect("replacement");
                }
            }
            phase => panic!("engine idle in {phase:?}"),
        }
    }
    None
}

#[test]
fn hp_stays_within_bounds_across_seeds() {
    for seed in 0..20 {
        let mut engine = engine([Mechanic::Tera, Mechanic::Mega], seed);
        let mut p1 = RandomAI::new(seed);
        let mut p2 = ScoringAI::new(Difficulty::Normal, seed + 1000);
        let outcome = play(&mut engine, &mut p1, &mut p2);
        if let Some(outcome) = outcome {
            assert!(engine.is_terminal());
            if let BattleOutcome::Winner(side) = outcome {
                let loser = engine.state().team(side.opponent());
                assert!(loser.members.iter().all(|member| member.is_fainted()));
            }
        }
    }
}

#[test]
fn identical_seeds_replay_identically() {
    let run = |seed: u64| {
        let mut engine = engine([Mechanic::Dynamax, Mechanic::Mega], seed);
        let mut p1 = ScoringAI::new(Difficulty::Hard, seed);
        let mut p2 = ScoringAI::new(Difficulty::Easy, seed ^ 0x5eed);
        play(&mut engine, &mut p1, &mut p2);
        serde_json::to_string(engine.state()).expect("state serializes")
    };
    for seed in [3, 99, 4242] {
        assert_eq!(run(seed), run(seed));
    }
}

#[test]
fn transformation_is_spent_at_most_once() {
    for seed in 0..10 {
        let mut engine = engine([Mechanic::Tera, Mechanic::Mega], seed);
        let mut p1 = ScoringAI::new(Difficulty::Hard, seed);
        let mut p2 = ScoringAI::new(Difficulty::Hard, seed + 1);
        play(&mut engine, &mut p1, &mut p2);
        let log = &engine.state().log;
        assert!(log.count(LogKind::Tera) <= 1);
        assert!(log.count(LogKind::Mega) <= 1);
    }
}
