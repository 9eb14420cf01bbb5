/// Combat tuning constants and policy thresholds.
///
/// All percentages are whole numbers (`50` means 50%). Multipliers are also
/// expressed in percent (`150` means ×1.5) so every computation stays in
/// integer arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Base seed mixed into every random roll of an encounter.
    pub seed: u64,

    /// The attacker contributes `floor(attack / attack_divisor)` to each hit.
    pub attack_divisor: i32,
    /// Lower bound of every resolved hit.
    pub minimum_damage: u32,

    /// Healer heals allies strictly below this hp percentage.
    pub healer_threshold_percent: u32,

    /// Berserker hp percentage (strict) for the critical multiplier.
    pub berserk_critical_percent: u32,
    pub berserk_critical_multiplier: u32,
    /// Berserker hp percentage (strict) for the wounded multiplier.
    pub berserk_wounded_percent: u32,
    pub berserk_wounded_multiplier: u32,

    /// Defensive enemies above this hp percentage always attack.
    pub defensive_threshold_percent: u32,
    /// Chance (d100 roll at or below) that a wounded Defensive enemy defends.
    pub defend_chance_percent: u32,
    /// Temporary defense granted by a Defend action.
    pub defend_bonus: i32,
}

impl CombatConfig {
    // ===== compile-time constants =====
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_DIVISOR: i32 = 5;
    pub const DEFAULT_MINIMUM_DAMAGE: u32 = 1;
    pub const DEFAULT_HEALER_THRESHOLD: u32 = 50;
    pub const DEFAULT_DEFEND_BONUS: i32 = 5;

    pub fn new() -> Self {
        Self {
            seed: 0,
            attack_divisor: Self::DEFAULT_ATTACK_DIVISOR,
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
            healer_threshold_percent: Self::DEFAULT_HEALER_THRESHOLD,
            berserk_critical_percent: 30,
            berserk_critical_multiplier: 150,
            berserk_wounded_percent: 50,
            berserk_wounded_multiplier: 125,
            defensive_threshold_percent: 50,
            defend_chance_percent: 50,
            defend_bonus: Self::DEFAULT_DEFEND_BONUS,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
