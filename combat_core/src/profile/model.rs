//! CombatProfile - An actor's derived combat numbers
//!
//! A profile is transient: it is recomputed from base stats, class, race and
//! active effects on every attack and never cached across rounds. All
//! percentage-like fields are dimensionless fractions (0.5 = 50%) except
//! resistances, which are percentage scalars (100 = neutral, lower is more
//! resistant).

use crate::types::DamageType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::constants::{NEUTRAL_RESISTANCE, PENETRATION_PCT_CAP};

/// Derived combat attributes for one actor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatProfile {
    /// Tendency to land a hit
    pub accuracy: f64,
    /// Tendency to avoid a hit
    pub evasion: f64,
    /// Scales raw damage before mitigation
    pub attack_power: f64,
    /// Feeds the diminishing-returns damage-reduction formula
    pub armor_rating: f64,
    /// Flat damage absorbed before percentage reduction
    pub soak: f64,
    /// Reduces the defender's effective soak for one attack
    pub penetration_flat: f64,
    /// Reduces the defender's armor-derived reduction for one attack (fraction, capped at 0.50)
    pub penetration_pct: f64,
    /// Shifts the margin attackers need to score a critical against this actor
    pub critical_margin_bonus: f64,
    /// Per-damage-type multiplier; absent entry means 100 (neutral)
    resistance: HashMap<DamageType, f64>,
}

impl CombatProfile {
    /// Create an empty (all-zero, resistance-neutral) profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the resistance scalar for a damage type (100 = neutral)
    pub fn resistance(&self, damage_type: DamageType) -> f64 {
        self.resistance
            .get(&damage_type)
            .copied()
            .unwrap_or(NEUTRAL_RESISTANCE)
    }

    /// Set the resistance scalar for a damage type
    pub fn set_resistance(&mut self, damage_type: DamageType, value: f64) {
        self.resistance.insert(damage_type, value);
    }

    /// Builder-style resistance setter
    pub fn with_resistance(mut self, damage_type: DamageType, value: f64) -> Self {
        self.set_resistance(damage_type, value);
        self
    }

    /// Combine two profiles into one effective profile
    ///
    /// Additive for accuracy, evasion, attack power, armor rating, soak,
    /// penetration and the critical margin shift. `penetration_pct` is
    /// additive-then-capped at 0.50. Resistances combine by per-type
    /// **minimum**: the value most favorable to the defender always wins,
    /// so resistance stacking is non-additive.
    pub fn combine(&self, other: &CombatProfile) -> CombatProfile {
        let mut resistance = HashMap::new();
        for dt in self.resistance.keys().chain(other.resistance.keys()) {
            resistance.insert(*dt, self.resistance(*dt).min(other.resistance(*dt)));
        }

        CombatProfile {
            accuracy: self.accuracy + other.accuracy,
            evasion: self.evasion + other.evasion,
            attack_power: self.attack_power + other.attack_power,
            armor_rating: self.armor_rating + other.armor_rating,
            soak: self.soak + other.soak,
            penetration_flat: self.penetration_flat + other.penetration_flat,
            penetration_pct: (self.penetration_pct + other.penetration_pct)
                .min(PENETRATION_PCT_CAP),
            critical_margin_bonus: self.critical_margin_bonus + other.critical_margin_bonus,
            resistance,
        }
    }
}
