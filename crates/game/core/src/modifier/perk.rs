//! Character perks: fixed at creation, one per character.

use super::{HookContext, ModifierDeltas, ModifierSource, TimedBuff};

/// Identifier of a perk as stored on a character record.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PerkId {
    /// Damage +1.
    Brawler,
    /// Hit +1.
    Marksman,
    /// Initiative +6.
    Quickdraw,
    /// AC +1.
    Bulwark,
    /// Incoming melee damage -1.
    ThickSkin,
    /// Once per battle, heal 3 at turn start while at or below half HP.
    SecondWind,
    /// Hit +2 for the first two turns of a battle.
    Adrenaline,
    /// The first melee hit each turn deals +2.
    Bloodlust,
}

impl PerkId {
    /// Builds the runtime behavior for this perk.
    pub fn instantiate(self) -> Box<dyn ModifierSource> {
        match self {
            PerkId::Brawler => Box::new(FlatPerk::new(self, ModifierDeltas::damage(1))),
            PerkId::Marksman => Box::new(FlatPerk::new(self, ModifierDeltas::hit(1))),
            PerkId::Quickdraw => Box::new(FlatPerk::new(self, ModifierDeltas::initiative(6))),
            PerkId::Bulwark => Box::new(FlatPerk::new(self, ModifierDeltas::ac(1))),
            PerkId::ThickSkin => Box::new(ThickSkin),
            PerkId::SecondWind => Box::new(SecondWind { spent: false }),
            PerkId::Adrenaline => Box::new(Adrenaline),
            PerkId::Bloodlust => Box::new(Bloodlust { primed: true }),
        }
    }
}

/// Perk with constant deltas and no hooks.
#[derive(Debug)]
struct FlatPerk {
    id: PerkId,
    deltas: ModifierDeltas,
}

impl FlatPerk {
    fn new(id: PerkId, deltas: ModifierDeltas) -> Self {
        Self { id, deltas }
    }
}

impl ModifierSource for FlatPerk {
    fn name(&self) -> &str {
        self.id.as_ref()
    }

    fn deltas(&self) -> ModifierDeltas {
        self.deltas
    }
}

#[derive(Debug)]
struct ThickSkin;

impl ModifierSource for ThickSkin {
    fn name(&self) -> &str {
        PerkId::ThickSkin.as_ref()
    }

    fn on_take_damage(&mut self, damage: &mut i32) {
        *damage = (*damage - 1).max(0);
    }
}

#[derive(Debug)]
struct SecondWind {
    spent: bool,
}

impl SecondWind {
    const HEAL: i32 = 3;
}

impl ModifierSource for SecondWind {
    fn name(&self) -> &str {
        PerkId::SecondWind.as_ref()
    }

    fn on_turn_start(&mut self, ctx: &mut HookContext) {
        if self.spent || ctx.current_hp <= 0 || ctx.current_hp * 2 > ctx.max_hp {
            return;
        }
        self.spent = true;
        ctx.heal(Self::HEAL);
        ctx.note(format!("second wind restores {} HP", Self::HEAL));
    }
}

#[derive(Debug)]
struct Adrenaline;

impl ModifierSource for Adrenaline {
    fn name(&self) -> &str {
        PerkId::Adrenaline.as_ref()
    }

    fn on_battle_start(&mut self, ctx: &mut HookContext) {
        ctx.grant(TimedBuff::new("adrenaline", ModifierDeltas::hit(2), 2));
        ctx.note("adrenaline surges (hit +2 for 2 turns)");
    }
}

#[derive(Debug)]
struct Bloodlust {
    primed: bool,
}

impl Bloodlust {
    const BONUS: i32 = 2;
}

impl ModifierSource for Bloodlust {
    fn name(&self) -> &str {
        PerkId::Bloodlust.as_ref()
    }

    fn on_turn_start(&mut self, _ctx: &mut HookContext) {
        self.primed = true;
    }

    fn on_deal_damage(&mut self, damage: &mut i32) {
        if self.primed {
            self.primed = false;
            *damage += Self::BONUS;
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::stats::Health;

    #[test]
    fn every_perk_reports_its_id() {
        for id in PerkId::iter() {
            assert_eq!(id.instantiate().name(), id.as_ref());
        }
    }

    #[test]
    fn thick_skin_floors_at_zero() {
        let mut perk = PerkId::ThickSkin.instantiate();
        let mut damage = 1;
        perk.on_take_damage(&mut damage);
        assert_eq!(damage, 0);
        perk.on_take_damage(&mut damage);
        assert_eq!(damage, 0);
    }

    #[test]
    fn second_wind_fires_once_below_half() {
        let mut perk = PerkId::SecondWind.instantiate();

        let mut healthy = HookContext::new(&Health::new(8, 10));
        perk.on_turn_start(&mut healthy);
        assert_eq!(healthy.requested_heal(), 0);

        let mut hurt = HookContext::new(&Health::new(5, 10));
        perk.on_turn_start(&mut hurt);
        assert_eq!(hurt.requested_heal(), 3);

        let mut again = HookContext::new(&Health::new(2, 10));
        perk.on_turn_start(&mut again);
        assert_eq!(again.requested_heal(), 0);
    }

    #[test]
    fn bloodlust_applies_once_per_turn() {
        let mut perk = PerkId::Bloodlust.instantiate();
        let mut first = 4;
        let mut second = 4;
        perk.on_deal_damage(&mut first);
        perk.on_deal_damage(&mut second);
        assert_eq!((first, second), (6, 4));

        perk.on_turn_start(&mut HookContext::default());
        let mut next_turn = 4;
        perk.on_deal_damage(&mut next_turn);
        assert_eq!(next_turn, 6);
    }

    #[test]
    fn adrenaline_grants_buff_at_battle_start() {
        let mut perk = PerkId::Adrenaline.instantiate();
        let mut ctx = HookContext::default();
        perk.on_battle_start(&mut ctx);
        let (_, grants, _) = ctx.into_parts();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].deltas.hit, 2);
    }
}
