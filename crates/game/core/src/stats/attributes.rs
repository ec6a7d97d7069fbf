//! Base attributes and the values derived from them.

use crate::config::BattleConfig;

/// Attribute selector used by weapon requirements and governing rules.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttributeKind {
    #[default]
    Strength,
    Agility,
    Endurance,
}

/// Persistent base attributes of a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: i32,
    pub agility: i32,
    pub endurance: i32,
}

impl Attributes {
    pub const fn new(strength: i32, agility: i32, endurance: i32) -> Self {
        Self {
            strength,
            agility,
            endurance,
        }
    }

    pub fn get(&self, kind: AttributeKind) -> i32 {
        match kind {
            AttributeKind::Strength => self.strength,
            AttributeKind::Agility => self.agility,
            AttributeKind::Endurance => self.endurance,
        }
    }

    /// Modifier contributed by an attribute: `value - 3`.
    pub fn modifier(&self, kind: AttributeKind) -> i32 {
        self.get(kind) - BattleConfig::ATTRIBUTE_BASELINE
    }

    /// Replaces every non-positive attribute with the default value.
    pub fn sanitized(self, owner: &str) -> Self {
        let fix = |kind: AttributeKind, value: i32| {
            if value > 0 {
                return value;
            }
            tracing::warn!(
                %owner,
                attribute = %kind,
                value,
                fallback = BattleConfig::DEFAULT_ATTRIBUTE,
                "non-positive attribute; using default"
            );
            BattleConfig::DEFAULT_ATTRIBUTE
        };

        Self {
            strength: fix(AttributeKind::Strength, self.strength),
            agility: fix(AttributeKind::Agility, self.agility),
            endurance: fix(AttributeKind::Endurance, self.endurance),
        }
    }

    /// Formula: `10 + 3 × endurance`
    pub fn max_hp(&self) -> i32 {
        BattleConfig::BASE_HP + BattleConfig::HP_PER_ENDURANCE * self.endurance
    }

    /// Initiative gained per tick before modifiers.
    ///
    /// Formula: `10 + 2 × agility`
    pub fn base_initiative(&self) -> i32 {
        BattleConfig::BASE_INITIATIVE + BattleConfig::INITIATIVE_PER_AGILITY * self.agility
    }
}

impl Default for Attributes {
    fn default() -> Self {
        let v = BattleConfig::DEFAULT_ATTRIBUTE;
        Self::new(v, v, v)
    }
}
