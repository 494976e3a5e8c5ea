use crate::data::moves::{MoveData, MoveDex};
use crate::data::types::Type;
use crate::sim::abilities::{Ability, AbilityHooks};
use crate::sim::items::{item_hooks, Item, ItemHooks};
use crate::sim::stats::{Nature, StatStages, StatsSet};
use crate::sim::status::Status;
use anyhow::{anyhow, bail, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

pub const MAX_MOVES: usize = 4;
pub const MAX_TEAM_SIZE: usize = 6;

fn default_level() -> u8 {
    50
}

/// Alternate forme entered through Mega Evolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MegaSet {
    #[serde(default)]
    pub species: Option<String>,
    pub types: Vec<Type>,
    #[serde(default)]
    pub stats: Option<StatsSet>,
    #[serde(default)]
    pub base_stats: Option<StatsSet>,
    #[serde(default)]
    pub ability: Option<String>,
}

/// Roster entry handed to the engine by a collaborator.
///
/// Either `stats` (already computed) or `baseStats` with optional
/// `evs`/`ivs`/`nature` must be present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonSet {
    pub species: String,
    #[serde(default = "default_level")]
    pub level: u8,
    pub types: Vec<Type>,
    #[serde(default)]
    pub stats: Option<StatsSet>,
    #[serde(default)]
    pub base_stats: Option<StatsSet>,
    #[serde(default)]
    pub evs: Option<[u8; 6]>,
    #[serde(default)]
    pub ivs: Option<[u8; 6]>,
    #[serde(default)]
    pub nature: Nature,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    pub moves: Vec<String>,
    #[serde(default)]
    pub tera_type: Option<Type>,
    #[serde(default)]
    pub mega: Option<MegaSet>,
}

impl PokemonSet {
    fn resolve_stats(
        &self,
        stats: Option<StatsSet>,
        base_stats: Option<StatsSet>,
    ) -> Result<StatsSet> {
        match (stats, base_stats) {
            (Some(stats), _) => Ok(stats),
            (None, Some(base)) => Ok(StatsSet::from_base(
                &base,
                self.level,
                self.evs.unwrap_or([0; 6]),
                self.ivs.unwrap_or([31; 6]),
                self.nature,
            )),
            (None, None) => Err(anyhow!("{} needs either stats or baseStats", self.species)),
        }
    }

    pub fn build(&self, dex: &MoveDex) -> Result<BattlePokemon> {
        if self.types.is_empty() || self.types.len() > 2 {
            bail!("{} must have one or two types, got {}", self.species, self.types.len());
        }
        if self.moves.is_empty() || self.moves.len() > MAX_MOVES {
            bail!("{} must know between 1 and {MAX_MOVES} moves", self.species);
        }
        let stats = self.resolve_stats(self.stats, self.base_stats)?;
        if stats.hp == 0 {
            bail!("{} has 0 max HP", self.species);
        }
        let moves = self
            .moves
            .iter()
            .map(|name| {
                dex.get(name)
                    .map(MoveSlot::new)
                    .ok_or_else(|| anyhow!("unknown move '{name}'"))
            })
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("resolving moves for {}", self.species))?;
        let mega = match &self.mega {
            Some(mega) => Some(self.resolve_mega(mega, stats)?),
            None => None,
        };
        Ok(BattlePokemon {
            species: self.species.clone(),
            level: self.level,
            types: self.types.clone(),
            stats,
            current_hp: stats.hp,
            max_hp: stats.hp,
            ability: parse_ability(self.ability.as_deref(), &self.species),
            item: parse_item(self.item.as_deref(), &self.species),
            moves,
            status: None,
            sleep_turns: 0,
            toxic_counter: 0,
            freeze_turns: 0,
            stages: StatStages::default(),
            active: false,
            choice_lock: None,
            sturdy_used: false,
            flash_fire: false,
            mega,
            mega_evolved: false,
            tera_type: self.tera_type,
            terastallized: false,
            dynamaxed: false,
            dynamax_turns: 0,
        })
    }

    fn resolve_mega(&self, mega: &MegaSet, base_form: StatsSet) -> Result<MegaForme> {
        if mega.types.is_empty() || mega.types.len() > 2 {
            bail!("mega forme of {} must have one or two types", self.species);
        }
        let mut stats = self
            .resolve_stats(mega.stats, mega.base_stats)
            .with_context(|| format!("resolving mega forme of {}", self.species))?;
        // Mega Evolution never changes HP.
        stats.hp = base_form.hp;
        Ok(MegaForme {
            species: mega
                .species
                .clone()
                .unwrap_or_else(|| format!("Mega {}", self.species)),
            types: mega.types.clone(),
            stats,
            ability: parse_ability(mega.ability.as_deref(), &self.species),
        })
    }
}

fn parse_ability(name: Option<&str>, species: &str) -> Ability {
    let Some(name) = name else {
        return Ability::NoAbility;
    };
    Ability::from_name(name).unwrap_or_else(|| {
        warn!("{species}: ability '{name}' has no battle effect here, treating as no ability");
        Ability::NoAbility
    })
}

fn parse_item(name: Option<&str>, species: &str) -> Option<Item> {
    let name = name?;
    let item = Item::from_name(name);
    if item.is_none() {
        warn!("{species}: item '{name}' has no battle effect here, ignoring it");
    }
    item
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MoveSlot {
    pub data: MoveData,
    pub pp: u8,
    pub max_pp: u8,
}

impl MoveSlot {
    pub fn new(data: &MoveData) -> Self {
        Self {
            data: data.clone(),
            pp: data.pp,
            max_pp: data.pp,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MegaForme {
    pub species: String,
    pub types: Vec<Type>,
    pub stats: StatsSet,
    pub ability: Ability,
}

/// Live combatant. Only the turn executor and the status engine write to it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BattlePokemon {
    pub species: String,
    pub level: u8,
    pub types: Vec<Type>,
    /// `stats.hp` is the max HP outside Dynamax.
    pub stats: StatsSet,
    pub current_hp: u16,
    pub max_hp: u16,
    pub ability: Ability,
    pub item: Option<Item>,
    pub moves: Vec<MoveSlot>,
    pub status: Option<Status>,
    pub sleep_turns: u8,
    pub toxic_counter: u8,
    pub freeze_turns: u8,
    pub stages: StatStages,
    pub active: bool,
    pub choice_lock: Option<usize>,
    pub sturdy_used: bool,
    pub flash_fire: bool,
    pub mega: Option<MegaForme>,
    pub mega_evolved: bool,
    pub tera_type: Option<Type>,
    pub terastallized: bool,
    pub dynamaxed: bool,
    pub dynamax_turns: u8,
}

impl BattlePokemon {
    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f32 / self.max_hp as f32
    }

    /// Types used when this combatant is hit: the tera type once terastallized.
    pub fn defensive_types(&self) -> &[Type] {
        if self.terastallized {
            if let Some(tera) = self.tera_type.as_ref() {
                return std::slice::from_ref(tera);
            }
        }
        &self.types
    }

    pub fn ability_hooks(&self) -> &'static AbilityHooks {
        self.ability.hooks()
    }

    pub fn item_hooks(&self) -> &'static ItemHooks {
        item_hooks(self.item)
    }

    /// Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        if self.is_fainted() {
            return 0;
        }
        let healed = amount.min(self.max_hp - self.current_hp);
        self.current_hp += healed;
        healed
    }

    pub fn has_usable_move(&self) -> bool {
        self.moves.iter().any(|slot| slot.pp > 0)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mechanic {
    Mega,
    Tera,
    Dynamax,
    #[default]
    None,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BattleTeam {
    pub members: Vec<BattlePokemon>,
    pub active: usize,
    pub mechanic: Mechanic,
    pub transformation_used: bool,
}

impl BattleTeam {
    pub fn new(members: Vec<BattlePokemon>, mechanic: Mechanic) -> Result<Self> {
        if members.is_empty() || members.len() > MAX_TEAM_SIZE {
            bail!("a team needs between 1 and {MAX_TEAM_SIZE} members, got {}", members.len());
        }
        Ok(Self {
            members,
            active: 0,
            mechanic,
            transformation_used: false,
        })
    }

    pub fn from_sets(sets: &[PokemonSet], dex: &MoveDex, mechanic: Mechanic) -> Result<Self> {
        let members = sets
            .iter()
            .map(|set| set.build(dex))
            .collect::<Result<Vec<_>>>()?;
        Self::new(members, mechanic)
    }

    pub fn active_pokemon(&self) -> &BattlePokemon {
        &self.members[self.active]
    }

    pub fn active_pokemon_mut(&mut self) -> &mut BattlePokemon {
        &mut self.members[self.active]
    }

    pub fn all_fainted(&self) -> bool {
        self.members.iter().all(BattlePokemon::is_fainted)
    }

    pub fn remaining(&self) -> usize {
        self.members.iter().filter(|p| !p.is_fainted()).count()
    }

    /// Benched members that could switch in.
    pub fn switch_candidates(&self) -> impl Iterator<Item = usize> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(move |(idx, p)| *idx != self.active && !p.is_fainted())
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
pub(crate) fn test_pokemon(species: &str, types: &[Type], ability: Ability) -> BattlePokemon {
    let stats = StatsSet {
        hp: 100,
        atk: 100,
        def: 100,
        spa: 100,
        spd: 100,
        spe: 100,
    };
    let tackle = crate::data::moves::get_move("tackle").expect("tackle");
    BattlePokemon {
        species: species.to_string(),
        level: 50,
        types: types.to_vec(),
        stats,
        current_hp: 100,
        max_hp: 100,
        ability,
        item: None,
        moves: vec![MoveSlot::new(tackle)],
        status: None,
        sleep_turns: 0,
        toxic_counter: 0,
        freeze_turns: 0,
        stages: StatStages::default(),
        active: true,
        choice_lock: None,
        sturdy_used: false,
        flash_fire: false,
        mega: None,
        mega_evolved: false,
        tera_type: None,
        terastallized: false,
        dynamaxed: false,
        dynamax_turns: 0,
    }
}
