//! Hit resolution.
//!
//! ```text
//! final = max(minimum, base + floor(attack / divisor) - defense - temporary_defense)
//! ```
//!
//! Elemental bonuses are folded into `base` by the caller, so defense
//! mitigates them as well. Resolving a hit always consumes the target's
//! temporary defense, including hits that land on the floor.

use crate::config::CombatConfig;
use crate::state::Unit;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageResolver {
    attack_divisor: i32,
    minimum: u32,
}

impl Default for DamageResolver {
    fn default() -> Self {
        Self::from_config(&CombatConfig::default())
    }
}

impl DamageResolver {
    pub fn from_config(config: &CombatConfig) -> Self {
        Self {
            // A zero divisor would panic in div_euclid.
            attack_divisor: config.attack_divisor.max(1),
            minimum: config.minimum_damage.max(1),
        }
    }

    /// Computes final damage without touching any unit.
    pub fn calculate(&self, base: i32, attack: i32, defense: i32, temporary_defense: i32) -> u32 {
        let raw = i64::from(base) + i64::from(attack.div_euclid(self.attack_divisor))
            - i64::from(defense)
            - i64::from(temporary_defense);
        let floor = i64::from(self.minimum);
        u32::try_from(raw.max(floor)).unwrap_or(u32::MAX)
    }

    /// Computes final damage against `target` and consumes its temporary
    /// defense. Does not change hp.
    pub fn resolve(&self, base: i32, attack: i32, target: &mut Unit) -> u32 {
        let damage = self.calculate(base, attack, target.defense, target.temporary_defense);
        target.temporary_defense = 0;
        damage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Archetype;
    use crate::state::{UnitId, UnitStats};

    fn goblin(defense: i32) -> Unit {
        Unit::enemy(
            UnitId(10),
            "Goblin",
            UnitStats::new(30, 8, defense),
            Archetype::Aggressive,
            Vec::new(),
        )
    }

    #[test]
    fn basic_formula() {
        let resolver = DamageResolver::default();
        assert_eq!(resolver.calculate(15, 25, 5, 0), 15);
    }

    #[test]
    fn never_below_one() {
        let resolver = DamageResolver::default();
        for base in [-50, 0, 1, 7] {
            for attack in [-20, 0, 4, 99] {
                for defense in [0, 10, 500] {
                    assert!(resolver.calculate(base, attack, defense, 3) >= 1);
                }
            }
        }
    }

    #[test]
    fn negative_attack_floors_toward_negative_infinity() {
        let resolver = DamageResolver::default();
        // floor(-1 / 5) = -1
        assert_eq!(resolver.calculate(10, -1, 0, 0), 9);
    }

    #[test]
    fn temporary_defense_is_consumed_even_on_floor_hits() {
        let resolver = DamageResolver::default();
        let mut target = goblin(50);
        target.temporary_defense = 7;

        assert_eq!(resolver.resolve(5, 0, &mut target), 1);
        assert_eq!(target.temporary_defense, 0);
        assert_eq!(target.hp, 30);
    }
}
