//! Battle-time combatant state and the uniform target capability.

use core::fmt;

use crate::modifier::{
    HookContext, ModifierDeltas, ModifierPipeline, PerkId, StanceKind, TimedBuff,
};
use crate::stats::{ArmorBreakdown, ArmorClass, AttributeKind, Attributes, Health};
use crate::weapon::EffectTag;

/// Index of a participant within one battle, in registration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl UnitId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the battle a combatant fights for.
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
pub enum Side {
    /// Directly controlled through player intents.
    #[default]
    Player,
    Enemy,
}

/// Anything that can be attacked.
///
/// Attack resolution only talks to targets through this trait.
pub trait Target {
    fn name(&self) -> &str;

    /// AC recomputed at call time.
    fn current_ac(&self) -> i32;

    fn current_hp(&self) -> i32;

    /// Applies damage (clamped at zero HP) and returns the amount removed.
    fn take_damage(&mut self, amount: i32) -> i32;

    /// Subtracted from incoming hit values.
    fn evasion(&self) -> i32 {
        0
    }

    /// Lets the target's own modifiers adjust incoming melee damage.
    fn on_take_melee_damage(&mut self, _damage: &mut i32) {}

    /// Applies a weapon effect and returns a log line when something changed.
    fn apply_effect(&mut self, _effect: EffectTag) -> Option<String> {
        None
    }

    fn is_alive(&self) -> bool {
        self.current_hp() > 0
    }
}

/// One participant's mutable battle state.
///
/// Created from a character record at battle start and discarded at battle end.
#[derive(Debug)]
pub struct Combatant {
    id: UnitId,
    name: String,
    side: Side,
    attributes: Attributes,
    health: Health,
    armor: ArmorClass,
    pipeline: ModifierPipeline,
    grappled: bool,
}

impl Combatant {
    /// Creates a combatant at full HP with sanitized attributes.
    pub fn new(id: UnitId, name: impl Into<String>, side: Side, attributes: Attributes) -> Self {
        let name = name.into();
        let attributes = attributes.sanitized(&name);
        Self {
            id,
            health: Health::full(attributes.max_hp()),
            name,
            side,
            attributes,
            armor: ArmorClass::default(),
            pipeline: ModifierPipeline::default(),
            grappled: false,
        }
    }

    pub fn with_current_hp(mut self, hp: i32) -> Self {
        self.health = Health::new(hp, self.health.maximum());
        self
    }

    pub fn with_armor(mut self, armor: ArmorClass) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_perk(mut self, perk: Option<PerkId>) -> Self {
        self.pipeline = ModifierPipeline::new(perk);
        self
    }

    pub fn with_pipeline(mut self, pipeline: ModifierPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, kind: AttributeKind) -> i32 {
        self.attributes.get(kind)
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn pipeline(&self) -> &ModifierPipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut ModifierPipeline {
        &mut self.pipeline
    }

    pub fn stance(&self) -> StanceKind {
        self.pipeline.stance()
    }

    pub fn is_grappled(&self) -> bool {
        self.grappled
    }

    pub fn set_grappled(&mut self, grappled: bool) {
        self.grappled = grappled;
    }

    /// Effective modifier from stance, perk and timed buffs.
    pub fn modifiers(&self) -> ModifierDeltas {
        self.pipeline.effective()
    }

    /// Current AC split into its additive terms.
    pub fn armor_breakdown(&self) -> ArmorBreakdown {
        let agility = if self.grappled {
            0
        } else {
            self.attributes.modifier(AttributeKind::Agility)
        };

        ArmorBreakdown {
            base: self.armor.base,
            agility,
            stance: self.pipeline.stance_deltas().ac,
            perk: self.pipeline.perk_deltas().ac,
            temporary: self.armor.temporary + self.pipeline.buff_deltas().ac,
            equipment: self.armor.equipment,
            other: self.armor.other,
        }
    }

    /// Gauge gained per scheduler tick. Never below 1.
    pub fn initiative_per_round(&self) -> i32 {
        (self.attributes.base_initiative() + self.modifiers().initiative).max(1)
    }

    pub fn switch_stance(&mut self, stance: StanceKind) -> Option<StanceKind> {
        self.pipeline.switch_stance(stance)
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        self.health.heal(amount)
    }

    /// Runs battle-start hooks. Returns the log lines they produced.
    pub fn begin_battle(&mut self) -> Vec<String> {
        let mut ctx = HookContext::new(&self.health);
        self.pipeline.on_battle_start(&mut ctx);
        self.apply_hooks(ctx)
    }

    /// Runs turn-start hooks. Returns the log lines they produced.
    pub fn begin_turn(&mut self) -> Vec<String> {
        let mut ctx = HookContext::new(&self.health);
        self.pipeline.on_turn_start(&mut ctx);
        self.apply_hooks(ctx)
    }

    /// Runs turn-end hooks, ages timed buffs and releases a grapple.
    pub fn end_turn(&mut self) -> Vec<String> {
        let mut ctx = HookContext::new(&self.health);
        let expired = self.pipeline.on_turn_end(&mut ctx);
        let mut notes = self.apply_hooks(ctx);

        notes.extend(expired.into_iter().map(|name| format!("{name} wears off")));
        if self.grappled {
            self.grappled = false;
            notes.push("breaks free of the grapple".to_string());
        }
        notes
    }

    fn apply_hooks(&mut self, ctx: HookContext) -> Vec<String> {
        let (heal, grants, notes) = ctx.into_parts();
        if heal > 0 {
            self.health.heal(heal);
        }
        for buff in grants {
            self.pipeline.grant(buff);
        }
        for note in &notes {
            tracing::debug!(unit = %self.id, name = %self.name, "{note}");
        }
        notes
    }

    fn grant_debuff(&mut self, buff: TimedBuff) -> Option<String> {
        self.pipeline.grant(buff).then(|| {
            format!(
                "{} is {} ({}) for {} turn(s)",
                self.name,
                buff.name,
                buff.deltas,
                buff.remaining_turns
            )
        })
    }
}

impl Target for Combatant {
    fn name(&self) -> &str {
        &self.name
    }

    fn current_ac(&self) -> i32 {
        self.armor_breakdown().total()
    }

    fn current_hp(&self) -> i32 {
        self.health.current()
    }

    fn take_damage(&mut self, amount: i32) -> i32 {
        self.health.damage(amount)
    }

    fn evasion(&self) -> i32 {
        self.modifiers().evasion
    }

    fn on_take_melee_damage(&mut self, damage: &mut i32) {
        self.pipeline.on_take_damage(damage);
    }

    fn apply_effect(&mut self, effect: EffectTag) -> Option<String> {
        match effect {
            EffectTag::None => None,
            EffectTag::Stagger => {
                self.grant_debuff(TimedBuff::new("staggered", ModifierDeltas::hit(-2), 1))
            }
            EffectTag::Sunder => {
                self.grant_debuff(TimedBuff::new("sundered", ModifierDeltas::ac(-2), 2))
            }
            EffectTag::Grapple => {
                if self.grappled {
                    return None;
                }
                self.grappled = true;
                Some(format!("{} is grappled", self.name))
            }
        }
    }
}
