//! DamageRoll - the outcome of one damage computation

use serde::{Deserialize, Serialize};

/// What produced a damage roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackSource {
    BasicAttack,
    PhysicalSkill,
    MagicalSkill,
}

impl AttackSource {
    pub fn is_skill(self) -> bool {
        !matches!(self, AttackSource::BasicAttack)
    }

    pub fn is_magical(self) -> bool {
        matches!(self, AttackSource::MagicalSkill)
    }
}

/// Rolled damage before it is applied to the defender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRoll {
    pub source: AttackSource,
    /// `max(1, offense - defense / 2)`
    pub raw: i32,
    /// Inclusive bounds of the variance draw
    pub low: i32,
    pub high: i32,
    /// Result of the variance draw
    pub rolled: i32,
    pub is_critical: bool,
    /// Final amount, after the critical multiplier
    pub amount: i32,
}

impl DamageRoll {
    /// Range the final amount can fall in, given the crit multiplier
    pub fn final_range(&self, crit_multiplier: i32) -> (i32, i32) {
        if self.is_critical {
            (
                self.low.saturating_mul(crit_multiplier),
                self.high.saturating_mul(crit_multiplier),
            )
        } else {
            (self.low, self.high)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_range() {
        let roll = DamageRoll {
            source: AttackSource::BasicAttack,
            raw: 10,
            low: 8,
            high: 12,
            rolled: 10,
            is_critical: true,
            amount: 20,
        };
        assert_eq!(roll.final_range(2), (16, 24));
        assert!(!roll.source.is_skill());
        assert!(AttackSource::MagicalSkill.is_magical());
    }
}
