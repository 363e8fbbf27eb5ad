//! Mitigation pipeline - soak, diminishing-returns armor, resistance
//!
//! Stages run in a fixed order: flat soak (less the attacker's flat
//! penetration), then armor-derived percentage reduction with diminishing
//! returns, then the per-damage-type resistance scalar. The armor formula
//! `ar / (ar + K)` uses a K tiered by the *defender's* level band, so the
//! same armor rating protects low-level characters more.

use crate::config::MitigationConstants;
use crate::profile::constants::PENETRATION_PCT_CAP;
use crate::profile::CombatProfile;
use crate::types::DamageType;

/// Armor constant for a defender level band
pub fn armor_k(defender_level: u32, constants: &MitigationConstants) -> f64 {
    if defender_level <= constants.tier1_max_level {
        constants.k_tier1
    } else if defender_level <= constants.tier2_max_level {
        constants.k_tier2
    } else {
        constants.k_tier3
    }
}

/// Diminishing-returns damage reduction fraction from armor
///
/// `clamp(ar / (ar + K), 0, dr_cap)`. Non-positive armor yields exactly
/// zero; K is always positive so the denominator needs no guard.
pub fn damage_reduction_pct(
    armor_rating: f64,
    defender_level: u32,
    constants: &MitigationConstants,
) -> f64 {
    if armor_rating <= 0.0 {
        return 0.0;
    }
    let k = armor_k(defender_level, constants);
    (armor_rating / (armor_rating + k)).clamp(0.0, constants.dr_cap)
}

/// Run raw damage through the full mitigation pipeline
///
/// Order: effective soak -> armor DR (after percentage penetration) ->
/// resistance scaling. The caller floors the result at
/// `constants.minimum_damage` for any attack that was not a miss; the
/// pipeline itself does not know the outcome.
pub fn mitigate(
    raw_damage: f64,
    attacker: &CombatProfile,
    defender: &CombatProfile,
    damage_type: DamageType,
    defender_level: u32,
    constants: &MitigationConstants,
) -> f64 {
    let effective_soak = (defender.soak - attacker.penetration_flat).max(0.0);
    let after_soak = (raw_damage - effective_soak).max(0.0);

    let dr_pct = damage_reduction_pct(defender.armor_rating, defender_level, constants);
    // Clamped before use, not after, to keep the formula monotonic
    let penetration_pct = attacker.penetration_pct.clamp(0.0, PENETRATION_PCT_CAP);
    let effective_dr = dr_pct * (1.0 - penetration_pct);

    let after_armor = after_soak * (1.0 - effective_dr);

    after_armor * defender.resistance(damage_type) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> MitigationConstants {
        MitigationConstants::default()
    }

    #[test]
    fn test_armor_k_tiers() {
        let c = defaults();
        assert!((armor_k(1, &c) - 40.0).abs() < f64::EPSILON);
        assert!((armor_k(20, &c) - 40.0).abs() < f64::EPSILON);
        assert!((armor_k(21, &c) - 60.0).abs() < f64::EPSILON);
        assert!((armor_k(50, &c) - 60.0).abs() < f64::EPSILON);
        assert!((armor_k(51, &c) - 80.0).abs() < f64::EPSILON);
        assert!((armor_k(99, &c) - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_armor_gives_exactly_zero_dr() {
        let c = defaults();
        assert!((damage_reduction_pct(0.0, 10, &c) - 0.0).abs() < f64::EPSILON);
        assert!((damage_reduction_pct(-50.0, 10, &c) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dr_caps_at_three_quarters() {
        // armor 1000 at level 10: 1000/1040 = 0.9615..., capped to 0.75 exactly
        let c = defaults();
        let dr = damage_reduction_pct(1000.0, 10, &c);
        assert!((dr - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dr_monotonic_in_armor() {
        let c = defaults();
        let mut prev = 0.0;
        for armor in (0..2000).step_by(25) {
            let dr = damage_reduction_pct(f64::from(armor), 30, &c);
            assert!(dr >= prev);
            assert!(dr <= 0.75);
            prev = dr;
        }
    }

    #[test]
    fn test_soak_only_case() {
        // soak 5, no armor, raw 10, no penetration -> exactly 5
        let attacker = CombatProfile::new();
        let mut defender = CombatProfile::new();
        defender.soak = 5.0;

        let dmg = mitigate(10.0, &attacker, &defender, DamageType::Physical, 10, &defaults());
        assert!((dmg - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dr_only_case() {
        // No soak, dr_pct 0.5 (armor 40 at level 10, K=40), raw 10 -> exactly 5
        let attacker = CombatProfile::new();
        let mut defender = CombatProfile::new();
        defender.armor_rating = 40.0;

        let dmg = mitigate(10.0, &attacker, &defender, DamageType::Physical, 10, &defaults());
        assert!((dmg - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_chained_case_exact() {
        // soak 5, dr_pct 0.4, pen_flat 3, pen_pct 0.5, raw 10:
        // effective soak 2, after soak 8, effective DR 0.2, final 6.4
        let mut attacker = CombatProfile::new();
        attacker.penetration_flat = 3.0;
        attacker.penetration_pct = 0.5;

        let mut defender = CombatProfile::new();
        defender.soak = 5.0;
        // dr_pct 0.4 needs ar/(ar+40) = 0.4 -> ar = 26.666...
        defender.armor_rating = 40.0 * 0.4 / 0.6;

        let dmg = mitigate(10.0, &attacker, &defender, DamageType::Physical, 10, &defaults());
        assert!((dmg - 6.4).abs() < 1e-9);
    }

    #[test]
    fn test_resistance_scaling() {
        // 50 fire resistance halves post-armor damage
        let attacker = CombatProfile::new();
        let defender = CombatProfile::new().with_resistance(DamageType::Fire, 50.0);

        let dmg = mitigate(20.0, &attacker, &defender, DamageType::Fire, 10, &defaults());
        assert!((dmg - 10.0).abs() < f64::EPSILON);

        // Physical is untouched by the fire entry
        let phys = mitigate(20.0, &attacker, &defender, DamageType::Physical, 10, &defaults());
        assert!((phys - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_soak_cannot_go_negative() {
        // Penetration larger than soak leaves effective soak at zero, not negative
        let mut attacker = CombatProfile::new();
        attacker.penetration_flat = 50.0;
        let mut defender = CombatProfile::new();
        defender.soak = 5.0;

        let dmg = mitigate(10.0, &attacker, &defender, DamageType::Physical, 10, &defaults());
        assert!((dmg - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overcapped_penetration_pct_is_clamped_before_use() {
        let mut attacker = CombatProfile::new();
        attacker.penetration_pct = 0.9; // beyond the 0.50 cap
        let mut defender = CombatProfile::new();
        defender.armor_rating = 40.0; // dr 0.5 at level 10

        // effective DR = 0.5 * (1 - 0.5) = 0.25 -> 10 * 0.75 = 7.5
        let dmg = mitigate(10.0, &attacker, &defender, DamageType::Physical, 10, &defaults());
        assert!((dmg - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stage_order_round_trip() {
        // Manually compute each stage and compare against the pipeline
        let mut attacker = CombatProfile::new();
        attacker.penetration_flat = 1.0;
        attacker.penetration_pct = 0.25;

        let mut defender = CombatProfile::new();
        defender.soak = 4.0;
        defender.armor_rating = 120.0;
        let defender = defender.with_resistance(DamageType::Cold, 80.0);

        let c = defaults();
        let raw = 30.0;
        let effective_soak: f64 = 4.0 - 1.0;
        let after_soak: f64 = raw - effective_soak;
        let dr = (120.0f64 / 160.0).clamp(0.0, 0.75);
        let after_armor = after_soak * (1.0 - dr * 0.75);
        let expected = after_armor * 0.8;

        let dmg = mitigate(raw, &attacker, &defender, DamageType::Cold, 25, &c);
        assert!((dmg - expected).abs() < 1e-9);
    }
}
