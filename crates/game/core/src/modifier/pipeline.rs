use super::{HookContext, ModifierDeltas, ModifierSource, PerkId, StanceKind, TimedBuff, TimedBuffs};

/// Ordered registry of every modifier source on one combatant.
///
/// Hook dispatch order is fixed: stance, then perk. Timed buffs contribute
/// deltas only.
#[derive(Debug, Default)]
pub struct ModifierPipeline {
    stance: StanceKind,
    perk: Option<Box<dyn ModifierSource>>,
    buffs: TimedBuffs,
}

impl ModifierPipeline {
    pub fn new(perk: Option<PerkId>) -> Self {
        Self {
            stance: StanceKind::default(),
            perk: perk.map(PerkId::instantiate),
            buffs: TimedBuffs::new(),
        }
    }

    /// Uses an already-built perk instead of one from the catalog.
    pub fn with_perk_source(mut self, perk: Box<dyn ModifierSource>) -> Self {
        self.perk = Some(perk);
        self
    }

    pub fn stance(&self) -> StanceKind {
        self.stance
    }

    pub fn perk_name(&self) -> Option<&str> {
        self.perk.as_deref().map(ModifierSource::name)
    }

    pub fn buffs(&self) -> &TimedBuffs {
        &self.buffs
    }

    /// Sum of every active source's deltas.
    pub fn effective(&self) -> ModifierDeltas {
        self.stance_deltas() + self.perk_deltas() + self.buff_deltas()
    }

    pub fn stance_deltas(&self) -> ModifierDeltas {
        self.stance.deltas()
    }

    pub fn perk_deltas(&self) -> ModifierDeltas {
        self.perk
            .as_deref()
            .map_or(ModifierDeltas::ZERO, ModifierSource::deltas)
    }

    pub fn buff_deltas(&self) -> ModifierDeltas {
        self.buffs.total()
    }

    /// Replaces the active stance.
    ///
    /// Returns the previous stance, or `None` when `stance` is already active.
    pub fn switch_stance(&mut self, stance: StanceKind) -> Option<StanceKind> {
        if self.stance == stance {
            return None;
        }
        Some(core::mem::replace(&mut self.stance, stance))
    }

    /// Adds a timed buff; returns `false` if there was no room for it.
    pub fn grant(&mut self, buff: TimedBuff) -> bool {
        let added = self.buffs.add(buff);
        if !added {
            tracing::debug!(buff = buff.name, "timed buff dropped; buff slots full");
        }
        added
    }

    pub fn on_battle_start(&mut self, ctx: &mut HookContext) {
        self.for_each_source(|source| source.on_battle_start(ctx));
    }

    pub fn on_turn_start(&mut self, ctx: &mut HookContext) {
        self.for_each_source(|source| source.on_turn_start(ctx));
    }

    /// Runs turn-end hooks, then ages timed buffs by one turn.
    ///
    /// Returns the names of buffs that expired.
    pub fn on_turn_end(&mut self, ctx: &mut HookContext) -> Vec<&'static str> {
        self.for_each_source(|source| source.on_turn_end(ctx));
        self.buffs.tick_turn_end()
    }

    pub fn on_deal_damage(&mut self, damage: &mut i32) {
        self.for_each_source(|source| source.on_deal_damage(damage));
    }

    pub fn on_take_damage(&mut self, damage: &mut i32) {
        self.for_each_source(|source| source.on_take_damage(damage));
    }

    fn for_each_source(&mut self, mut f: impl FnMut(&mut dyn ModifierSource)) {
        f(&mut self.stance);
        if let Some(perk) = self.perk.as_deref_mut() {
            f(perk);
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn stance_round_trip_leaves_no_residue() {
        let mut pipeline = ModifierPipeline::new(Some(PerkId::Bulwark));
        let baseline = pipeline.effective();

        for a in StanceKind::iter() {
            for b in StanceKind::iter().filter(|b| *b != a) {
                pipeline.switch_stance(a);
                let at_a = pipeline.effective();
                pipeline.switch_stance(b);
                pipeline.switch_stance(a);
                assert_eq!(pipeline.effective(), at_a, "{a} -> {b} -> {a}");
            }
        }

        pipeline.switch_stance(StanceKind::Neutral);
        assert_eq!(pipeline.effective(), baseline);
    }

    #[test]
    fn redundant_switch_is_reported() {
        let mut pipeline = ModifierPipeline::default();
        assert_eq!(pipeline.switch_stance(StanceKind::Neutral), None);
        assert_eq!(
            pipeline.switch_stance(StanceKind::Focused),
            Some(StanceKind::Neutral)
        );
        assert_eq!(pipeline.stance(), StanceKind::Focused);
    }

    #[test]
    fn effective_sums_stance_perk_and_buffs() {
        let mut pipeline = ModifierPipeline::new(Some(PerkId::Marksman));
        pipeline.switch_stance(StanceKind::Focused);
        pipeline.grant(TimedBuff::new("staggered", ModifierDeltas::hit(-2), 1));
        assert_eq!(pipeline.effective().hit, 1);

        let expired = pipeline.on_turn_end(&mut HookContext::default());
        assert_eq!(expired, vec!["staggered"]);
        assert_eq!(pipeline.effective().hit, 3);
    }

    #[test]
    fn damage_hooks_run_stance_then_perk() {
        let mut pipeline = ModifierPipeline::new(Some(PerkId::ThickSkin));
        let mut damage = 3;
        pipeline.on_take_damage(&mut damage);
        assert_eq!(damage, 2);
        assert_eq!(pipeline.perk_name(), Some("thick_skin"));
    }
}
