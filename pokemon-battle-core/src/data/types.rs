use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Type {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

static TYPE_IDS: phf::Map<&'static str, Type> = phf::phf_map! {
    "normal" => Type::Normal,
    "fire" => Type::Fire,
    "water" => Type::Water,
    "electric" => Type::Electric,
    "grass" => Type::Grass,
    "ice" => Type::Ice,
    "fighting" => Type::Fighting,
    "poison" => Type::Poison,
    "ground" => Type::Ground,
    "flying" => Type::Flying,
    "psychic" => Type::Psychic,
    "bug" => Type::Bug,
    "rock" => Type::Rock,
    "ghost" => Type::Ghost,
    "dragon" => Type::Dragon,
    "dark" => Type::Dark,
    "steel" => Type::Steel,
    "fairy" => Type::Fairy,
};

impl Type {
    pub const ALL: [Type; 18] = [
        Type::Normal,
        Type::Fire,
        Type::Water,
        Type::Electric,
        Type::Grass,
        Type::Ice,
        Type::Fighting,
        Type::Poison,
        Type::Ground,
        Type::Flying,
        Type::Psychic,
        Type::Bug,
        Type::Rock,
        Type::Ghost,
        Type::Dragon,
        Type::Dark,
        Type::Steel,
        Type::Fairy,
    ];

    /// Case-insensitive lookup ("Fire", "FIRE", "fire").
    pub fn from_name(name: &str) -> Option<Type> {
        TYPE_IDS.get(crate::data::normalize_id(name).as_str()).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Electric => "Electric",
            Type::Grass => "Grass",
            Type::Ice => "Ice",
            Type::Fighting => "Fighting",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Flying => "Flying",
            Type::Psychic => "Psychic",
            Type::Bug => "Bug",
            Type::Rock => "Rock",
            Type::Ghost => "Ghost",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Steel => "Steel",
            Type::Fairy => "Fairy",
        }
    }
}

impl TryFrom<String> for Type {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Type::from_name(&value).ok_or_else(|| format!("unknown type '{value}'"))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Gen 6+ chart.
pub fn effectiveness_against(attacking: Type, defending: Type) -> f32 {
    use Type::*;
    match attacking {
        Normal => match defending {
            Rock | Steel => 0.5,
            Ghost => 0.0,
            _ => 1.0,
        },
        Fire => match defending {
            Fire | Water | Rock | Dragon => 0.5,
            Grass | Ice | Bug | Steel => 2.0,
            _ => 1.0,
        },
        Water => match defending {
            Water | Grass | Dragon => 0.5,
            Fire | Ground | Rock => 2.0,
            _ => 1.0,
        },
        Electric => match defending {
            Electric | Grass | Dragon => 0.5,
            Water | Flying => 2.0,
            Ground => 0.0,
            _ => 1.0,
        },
        Grass => match defending {
            Fire | Grass | Poison | Flying | Bug | Dragon | Steel => 0.5,
            Water | Ground | Rock => 2.0,
            _ => 1.0,
        },
        Ice => match defending {
            Fire | Water | Ice | Steel => 0.5,
            Grass | Ground | Flying | Dragon => 2.0,
            _ => 1.0,
        },
        Fighting => match defending {
            Normal | Ice | Rock | Dark | Steel => 2.0,
            Poison | Flying | Psychic | Bug | Fairy => 0.5,
            Ghost => 0.0,
            _ => 1.0,
        },
        Poison => match defending {
            Grass | Fairy => 2.0,
            Poison | Ground | Rock | Ghost => 0.5,
            Steel => 0.0,
            _ => 1.0,
        },
        Ground => match defending {
            Fire | Electric | Poison | Rock | Steel => 2.0,
            Grass | Bug => 0.5,
            Flying => 0.0,
            _ => 1.0,
        },
        Flying => match defending {
            Grass | Fighting | Bug => 2.0,
            Electric | Rock | Steel => 0.5,
            _ => 1.0,
        },
        Psychic => match defending {
            Fighting | Poison => 2.0,
            Psychic | Steel => 0.5,
            Dark => 0.0,
            _ => 1.0,
        },
        Bug => match defending {
            Grass | Psychic | Dark => 2.0,
            Fire | Fighting | Poison | Flying | Ghost | Steel | Fairy => 0.5,
            _ => 1.0,
        },
        Rock => match defending {
            Fire | Ice | Flying | Bug => 2.0,
            Fighting | Ground | Steel => 0.5,
            _ => 1.0,
        },
        Ghost => match defending {
            Ghost | Psychic => 2.0,
            Dark => 0.5,
            Normal => 0.0,
            _ => 1.0,
        },
        Dragon => match defending {
            Dragon => 2.0,
            Steel => 0.5,
            Fairy => 0.0,
            _ => 1.0,
        },
        Dark => match defending {
            Psychic | Ghost => 2.0,
            Fighting | Dark | Fairy => 0.5,
            _ => 1.0,
        },
        Steel => match defending {
            Rock | Ice | Fairy => 2.0,
            Fire | Water | Electric | Steel => 0.5,
            _ => 1.0,
        },
        Fairy => match defending {
            Fighting | Dragon | Dark => 2.0,
            Fire | Poison | Steel => 0.5,
            _ => 1.0,
        },
    }
}

/// Product over the defender's types. A mono-typed defender passes the same type
/// in both slots or uses [`effectiveness_types`].
pub fn effectiveness_dual(attacking: Type, primary: Type, secondary: Type) -> f32 {
    if primary == secondary {
        return effectiveness_against(attacking, primary);
    }
    effectiveness_against(attacking, primary) * effectiveness_against(attacking, secondary)
}

pub fn effectiveness_types(attacking: Type, defending: &[Type]) -> f32 {
    defending
        .iter()
        .fold(1.0, |acc, defending| acc * effectiveness_against(attacking, *defending))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ice_vs_dragon_flying_is_quad() {
        let effectiveness = effectiveness_dual(Type::Ice, Type::Dragon, Type::Flying);
        assert!((effectiveness - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn ground_vs_flying_is_immune() {
        assert_eq!(effectiveness_types(Type::Ground, &[Type::Fire, Type::Flying]), 0.0);
    }

    #[test]
    fn mono_type_is_not_squared() {
        assert_eq!(effectiveness_dual(Type::Water, Type::Fire, Type::Fire), 2.0);
    }

    #[test]
    fn type_names_parse_case_insensitively() {
        assert_eq!(Type::from_name("FIRE"), Some(Type::Fire));
        assert_eq!(Type::from_name("Fairy"), Some(Type::Fairy));
        assert_eq!(Type::from_name("Shadow"), None);
    }

    #[test]
    fn type_deserializes_from_display_name() {
        let parsed: Type = serde_json::from_str("\"Steel\"").expect("valid type");
        assert_eq!(parsed, Type::Steel);
        assert!(serde_json::from_str::<Type>("\"Cosmic\"").is_err());
    }
}
