//! Hit resolution - margin roll against fixed outcome thresholds
//!
//! One uniform roll perturbs the attacker's accuracy; the defender's evasion
//! is subtracted and the margin is classified against fixed thresholds.
//! Accuracy and evasion are soft-capped *before* the comparison, so stacking
//! bonuses past the cap yields no further benefit. The roll spread is wide
//! enough that no realistic stat gap produces a certain outcome.

use crate::config::HitConstants;
use crate::profile::CombatProfile;
use rand::Rng;

use super::result::Outcome;

/// Resolve one attack attempt into an outcome
///
/// Pure function of the two profiles, the constants and the RNG stream.
/// The defender's `critical_margin_bonus` raises the margin the attacker
/// needs for a Critical.
pub fn resolve_hit(
    attacker: &CombatProfile,
    defender: &CombatProfile,
    constants: &HitConstants,
    rng: &mut impl Rng,
) -> Outcome {
    let roll = rng.gen_range(-constants.roll_spread..=constants.roll_spread);
    resolve_hit_with_roll(attacker, defender, constants, roll)
}

/// Classify a margin given a fixed roll (exposed for exact-threshold tests)
pub fn resolve_hit_with_roll(
    attacker: &CombatProfile,
    defender: &CombatProfile,
    constants: &HitConstants,
    roll: f64,
) -> Outcome {
    let accuracy = attacker.accuracy.min(constants.accuracy_cap);
    let evasion = defender.evasion.min(constants.evasion_cap);
    let margin = (accuracy + roll) - evasion;

    if margin >= constants.critical_margin + defender.critical_margin_bonus {
        Outcome::Critical
    } else if margin >= constants.hit_margin {
        Outcome::Hit
    } else if margin >= constants.glancing_margin {
        Outcome::Glancing
    } else {
        Outcome::Miss
    }
}
