//! Resolution records produced by attacks.

use core::fmt;

use super::hit::HitBreakdown;

/// Outcome of one resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Miss,
    Hit,
}

/// One independent, renderable resolution (a melee swing or a single shot).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotRecord {
    /// 0-based position within the activation.
    pub index: u32,
    pub hit: HitBreakdown,
    pub target_ac: i32,
    pub outcome: AttackOutcome,
    /// Damage dealt; `None` on a miss.
    pub damage: Option<i32>,
    /// Effect applied to the target, if any.
    pub effect: Option<String>,
}

impl ShotRecord {
    pub fn is_hit(&self) -> bool {
        self.outcome == AttackOutcome::Hit
    }
}

impl fmt::Display for ShotRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shot {}: roll {} (penalty -{}) = {} vs AC {}",
            self.index + 1,
            self.hit.roll,
            self.hit.burst_penalty + self.hit.strength_penalty,
            self.hit.total(),
            self.target_ac
        )?;
        match self.damage {
            Some(damage) => write!(f, " -> hit for {damage}")?,
            None => write!(f, " -> miss")?,
        }
        if let Some(effect) = &self.effect {
            write!(f, "; {effect}")?;
        }
        Ok(())
    }
}

/// Everything that happened during one attack activation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub attacker: String,
    pub target: String,
    pub weapon: String,
    /// Shots the caller asked for (1 for melee).
    pub requested: u32,
    pub shots: Vec<ShotRecord>,
    /// Recoil damage taken by the attacker after the activation.
    pub self_damage: i32,
    pub target_hp: i32,
}

impl AttackReport {
    pub fn shots_fired(&self) -> u32 {
        self.shots.len() as u32
    }

    pub fn hits(&self) -> usize {
        self.shots.iter().filter(|s| s.is_hit()).count()
    }

    pub fn total_damage(&self) -> i32 {
        self.shots.iter().filter_map(|s| s.damage).sum()
    }

    pub fn target_defeated(&self) -> bool {
        self.target_hp <= 0
    }

    /// One line for the header, one per shot, one for recoil and one for a kill.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.shots.len() + 3);
        lines.push(format!(
            "{} attacks {} with {} ({} of {} shot(s))",
            self.attacker,
            self.target,
            self.weapon,
            self.shots_fired(),
            self.requested
        ));
        lines.extend(self.shots.iter().map(|s| format!("  {s}")));
        if self.self_damage > 0 {
            lines.push(format!(
                "  {} takes {} recoil damage",
                self.attacker, self.self_damage
            ));
        }
        if self.target_defeated() {
            lines.push(format!("  {} is down", self.target));
        }
        lines
    }
}

impl fmt::Display for AttackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(index: u32, damage: Option<i32>) -> ShotRecord {
        ShotRecord {
            index,
            hit: HitBreakdown {
                roll: 12,
                burst_penalty: 3 * index as i32,
                ..HitBreakdown::default()
            },
            target_ac: 10,
            outcome: if damage.is_some() {
                AttackOutcome::Hit
            } else {
                AttackOutcome::Miss
            },
            damage,
            effect: None,
        }
    }

    #[test]
    fn report_renders_one_line_per_shot() {
        let report = AttackReport {
            attacker: "Vex".into(),
            target: "Raider".into(),
            weapon: "Pistol".into(),
            requested: 5,
            shots: vec![shot(0, Some(4)), shot(1, None)],
            self_damage: 2,
            target_hp: 3,
        };

        let lines = report.lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "  shot 1: roll 12 (penalty -0) = 12 vs AC 10 -> hit for 4");
        assert_eq!(lines[2], "  shot 2: roll 12 (penalty -3) = 9 vs AC 10 -> miss");
        assert_eq!(report.hits(), 1);
        assert_eq!(report.total_damage(), 4);
        assert!(!report.target_defeated());
    }
}
