//! Archetype dispatch.

use tracing::{debug, warn};

use super::patterns::{first_living, most_wounded, weakest};
use super::{Archetype, EnemyAction};
use crate::config::CombatConfig;
use crate::env::{AbilityKind, CombatEnv, PcgRng, RngOracle, compute_seed, roll_context};
use crate::state::{AbilityId, Unit};

/// Chooses one action for an enemy. Pure: reads units, mutates nothing.
#[derive(Clone, Debug)]
pub struct EnemyPolicy {
    config: CombatConfig,
}

impl Default for EnemyPolicy {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl EnemyPolicy {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }

    /// Decides what `enemy` does this turn.
    ///
    /// `allies` includes the enemy itself. `round` feeds the seed of any
    /// random roll. Returns `None` only when no hero is alive.
    pub fn decide(
        &self,
        enemy: &Unit,
        heroes: &[&Unit],
        allies: &[&Unit],
        env: &CombatEnv<'_>,
        round: u32,
    ) -> Option<EnemyAction> {
        first_living(heroes)?;

        let archetype = enemy.archetype().unwrap_or(Archetype::Aggressive);
        let action = match archetype {
            Archetype::Aggressive => self.aggressive(enemy, heroes),
            Archetype::Sniper => self.sniper(enemy, heroes),
            Archetype::Healer => self
                .healer(enemy, allies, env)
                .or_else(|| self.aggressive(enemy, heroes)),
            Archetype::Berserker => self.berserker(enemy, heroes),
            Archetype::Defensive => self.defensive(enemy, heroes, env, round),
            Archetype::Tactical => self
                .tactical(enemy, heroes, allies, env)
                .or_else(|| self.sniper(enemy, heroes)),
        };

        if let Some(action) = &action {
            debug!(
                target: "combat::ai",
                enemy = %enemy.id,
                %archetype,
                action = action.name(),
                target_unit = %action.target(),
                "enemy decided"
            );
        }
        action
    }

    fn aggressive(&self, enemy: &Unit, heroes: &[&Unit]) -> Option<EnemyAction> {
        let target = first_living(heroes)?;
        Some(attack(enemy, target, enemy.attack))
    }

    fn sniper(&self, enemy: &Unit, heroes: &[&Unit]) -> Option<EnemyAction> {
        let target = weakest(heroes)?;
        Some(attack(enemy, target, enemy.attack))
    }

    fn healer(&self, enemy: &Unit, allies: &[&Unit], env: &CombatEnv<'_>) -> Option<EnemyAction> {
        let threshold = self.config.healer_threshold_percent;
        let target = most_wounded(allies, |ally| ally.hp_below_percent(threshold))?;
        let amount = enemy
            .abilities()
            .iter()
            .filter_map(|id| lookup(env, enemy, id))
            .find_map(|kind| kind.heal_amount())?;

        Some(EnemyAction::Heal {
            source: enemy.id,
            target: target.id,
            amount,
        })
    }

    fn berserker(&self, enemy: &Unit, heroes: &[&Unit]) -> Option<EnemyAction> {
        let target = first_living(heroes)?;
        let multiplier = if enemy.hp_below_percent(self.config.berserk_critical_percent) {
            self.config.berserk_critical_multiplier
        } else if enemy.hp_below_percent(self.config.berserk_wounded_percent) {
            self.config.berserk_wounded_multiplier
        } else {
            100
        };
        Some(attack(enemy, target, scale(enemy.attack, multiplier)))
    }

    fn defensive(
        &self,
        enemy: &Unit,
        heroes: &[&Unit],
        env: &CombatEnv<'_>,
        round: u32,
    ) -> Option<EnemyAction> {
        if enemy.hp_above_percent(self.config.defensive_threshold_percent) {
            return self.aggressive(enemy, heroes);
        }

        let seed = compute_seed(self.config.seed, round, enemy.id.0, roll_context::DEFEND);
        let defends = match env.rng() {
            Ok(rng) => rng.chance(seed, self.config.defend_chance_percent),
            Err(_) => PcgRng.chance(seed, self.config.defend_chance_percent),
        };
        if defends {
            return Some(EnemyAction::Defend {
                source: enemy.id,
                bonus: self.config.defend_bonus,
            });
        }
        self.aggressive(enemy, heroes)
    }

    fn tactical(
        &self,
        enemy: &Unit,
        heroes: &[&Unit],
        allies: &[&Unit],
        env: &CombatEnv<'_>,
    ) -> Option<EnemyAction> {
        enemy
            .abilities()
            .iter()
            .filter_map(|id| lookup(env, enemy, id))
            .filter(|kind| !kind.is_basic_attack())
            .find_map(|kind| self.try_ability(kind, enemy, heroes, allies))
    }

    fn try_ability(
        &self,
        kind: AbilityKind,
        enemy: &Unit,
        heroes: &[&Unit],
        allies: &[&Unit],
    ) -> Option<EnemyAction> {
        match kind {
            AbilityKind::BasicAttack => None,
            AbilityKind::PowerStrike { percent } => {
                let target = weakest(heroes)?;
                Some(attack(enemy, target, scale(enemy.attack, percent)))
            }
            AbilityKind::Heal { amount } => {
                let target = most_wounded(allies, Unit::is_wounded)?;
                Some(EnemyAction::Heal {
                    source: enemy.id,
                    target: target.id,
                    amount,
                })
            }
            AbilityKind::Debuff {
                kind,
                duration,
                magnitude,
            } => {
                let target = heroes
                    .iter()
                    .find(|hero| hero.is_alive() && !hero.statuses.has(kind))?;
                Some(EnemyAction::Debuff {
                    source: enemy.id,
                    target: target.id,
                    kind,
                    duration,
                    magnitude,
                })
            }
            AbilityKind::Guard { bonus } => {
                if enemy.hp_above_percent(self.config.defensive_threshold_percent) {
                    return None;
                }
                Some(EnemyAction::Defend {
                    source: enemy.id,
                    bonus,
                })
            }
        }
    }
}

fn attack(enemy: &Unit, target: &Unit, damage: i32) -> EnemyAction {
    EnemyAction::Attack {
        source: enemy.id,
        target: target.id,
        damage,
    }
}

/// `floor(value * percent / 100)`.
fn scale(value: i32, percent: u32) -> i32 {
    let scaled = i64::from(value) * i64::from(percent);
    i32::try_from(scaled.div_euclid(100)).unwrap_or(i32::MAX)
}

fn lookup(env: &CombatEnv<'_>, enemy: &Unit, id: &AbilityId) -> Option<AbilityKind> {
    let oracle = env.abilities().ok()?;
    match oracle.ability(id) {
        Some(ability) => Some(ability.kind),
        None => {
            warn!(
                target: "combat::ai",
                enemy = %enemy.id,
                ability = %id,
                "unknown ability skipped"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::env::{Ability, AbilityOracle, Env};
    use crate::state::{AbilityId, StatusEffectKind, UnitId, UnitStats};

    struct Abilities(HashMap<AbilityId, Ability>);

    impl Abilities {
        fn standard() -> Self {
            let rows = [
                ("strike", AbilityKind::BasicAttack),
                ("mend", AbilityKind::Heal { amount: 12 }),
                ("power", AbilityKind::PowerStrike { percent: 200 }),
                (
                    "hex",
                    AbilityKind::Debuff {
                        kind: StatusEffectKind::Poison,
                        duration: 3,
                        magnitude: 2,
                    },
                ),
            ];
            Self(
                rows.into_iter()
                    .map(|(id, kind)| {
                        let id = AbilityId::from(id);
                        (id.clone(), Ability { id, name: String::new(), kind })
                    })
                    .collect(),
            )
        }
    }

    impl AbilityOracle for Abilities {
        fn ability(&self, id: &AbilityId) -> Option<Ability> {
            self.0.get(id).cloned()
        }
    }

    fn hero(id: u32, hp: u32) -> Unit {
        Unit::hero(UnitId(id), "hero", UnitStats::new(40, 10, 0), Vec::new()).with_hp(hp)
    }

    fn enemy(archetype: Archetype, hp: u32, abilities: &[&str]) -> Unit {
        Unit::enemy(
            UnitId(10),
            "enemy",
            UnitStats::new(100, 20, 0),
            archetype,
            abilities.iter().map(|id| AbilityId::from(*id)).collect(),
        )
        .with_hp(hp)
    }

    fn decide(
        policy: &EnemyPolicy,
        enemy: &Unit,
        heroes: &[&Unit],
        allies: &[&Unit],
    ) -> Option<EnemyAction> {
        let abilities = Abilities::standard();
        let env: CombatEnv<'_> = Env::new(
            None,
            Some(&abilities as &dyn AbilityOracle),
            Some(&PcgRng as &dyn RngOracle),
        );
        policy.decide(enemy, heroes, allies, &env, 1)
    }

    #[test]
    fn no_living_heroes_means_no_action() {
        let me = enemy(Archetype::Aggressive, 100, &[]);
        let dead = hero(1, 0);
        assert_eq!(decide(&EnemyPolicy::default(), &me, &[&dead], &[&me]), None);
    }

    #[test]
    fn aggressive_hits_first_living_hero() {
        let me = enemy(Archetype::Aggressive, 100, &[]);
        let (a, b) = (hero(1, 0), hero(2, 30));
        assert_eq!(
            decide(&EnemyPolicy::default(), &me, &[&a, &b], &[&me]),
            Some(EnemyAction::Attack { source: UnitId(10), target: UnitId(2), damage: 20 })
        );
    }

    #[test]
    fn sniper_targets_lowest_hp() {
        let me = enemy(Archetype::Sniper, 100, &[]);
        let (a, b, c) = (hero(1, 30), hero(2, 7), hero(3, 7));
        let action = decide(&EnemyPolicy::default(), &me, &[&a, &b, &c], &[&me]);
        assert_eq!(action.map(|a| a.target()), Some(UnitId(2)));
    }

    #[test]
    fn berserker_multiplier_steps() {
        let policy = EnemyPolicy::default();
        let target = hero(1, 40);
        let damage = |hp| {
            let me = enemy(Archetype::Berserker, hp, &[]);
            match decide(&policy, &me, &[&target], &[]) {
                Some(EnemyAction::Attack { damage, .. }) => damage,
                other => panic!("unexpected {other:?}"),
            }
        };

        assert_eq!(damage(29), 30);
        assert_eq!(damage(30), 25);
        assert_eq!(damage(49), 25);
        assert_eq!(damage(50), 20);
    }

    #[test]
    fn healer_needs_a_heal_ability() {
        let target = hero(1, 40);
        let stats = UnitStats::new(50, 5, 0);
        let wounded =
            Unit::enemy(UnitId(11), "ally", stats, Archetype::Aggressive, Vec::new()).with_hp(20);

        let without = enemy(Archetype::Healer, 100, &["strike"]);
        assert!(matches!(
            decide(&EnemyPolicy::default(), &without, &[&target], &[&without, &wounded]),
            Some(EnemyAction::Attack { .. })
        ));

        let with = enemy(Archetype::Healer, 100, &["strike", "mend"]);
        assert_eq!(
            decide(&EnemyPolicy::default(), &with, &[&target], &[&with, &wounded]),
            Some(EnemyAction::Heal {
                source: UnitId(10),
                target: UnitId(11),
                amount: 12
            })
        );
    }

    #[test]
    fn healthy_defensive_always_attacks() {
        let me = enemy(Archetype::Defensive, 51, &[]);
        let target = hero(1, 40);
        assert!(matches!(
            decide(&EnemyPolicy::default(), &me, &[&target], &[&me]),
            Some(EnemyAction::Attack { .. })
        ));
    }

    #[test]
    fn wounded_defensive_roll_is_deterministic() {
        let me = enemy(Archetype::Defensive, 40, &[]);
        let target = hero(1, 40);
        let policy = EnemyPolicy::new(CombatConfig::default().with_seed(7));
        let first = decide(&policy, &me, &[&target], &[&me]);
        assert_eq!(first, decide(&policy, &me, &[&target], &[&me]));

        let always = EnemyPolicy::new(CombatConfig {
            defend_chance_percent: 100,
            ..CombatConfig::default()
        });
        assert_eq!(
            decide(&always, &me, &[&target], &[&me]),
            Some(EnemyAction::Defend {
                source: UnitId(10),
                bonus: CombatConfig::DEFAULT_DEFEND_BONUS
            })
        );
    }

    #[test]
    fn tactical_skips_basic_attack_and_afflicted_targets() {
        let me = enemy(Archetype::Tactical, 100, &["strike", "missing", "hex"]);
        let mut poisoned = hero(1, 40);
        poisoned.statuses.upsert(StatusEffectKind::Poison, 2, 1);
        let clean = hero(2, 40);

        assert_eq!(
            decide(&EnemyPolicy::default(), &me, &[&poisoned, &clean], &[&me]),
            Some(EnemyAction::Debuff {
                source: UnitId(10),
                target: UnitId(2),
                kind: StatusEffectKind::Poison,
                duration: 3,
                magnitude: 2,
            })
        );
    }

    #[test]
    fn tactical_falls_back_to_sniper() {
        let me = enemy(Archetype::Tactical, 100, &["strike", "mend"]);
        let (a, b) = (hero(1, 30), hero(2, 12));
        assert_eq!(
            decide(&EnemyPolicy::default(), &me, &[&a, &b], &[&me]),
            Some(EnemyAction::Attack { source: UnitId(10), target: UnitId(2), damage: 20 })
        );
    }
}
