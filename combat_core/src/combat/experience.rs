//! Kill experience from level difference

use crate::config::ExperienceConstants;

/// Experience awarded for a kill
///
/// Base share scales with the victim's level; killing something above your
/// own level adds a bonus that caps out `level_diff_cap` levels up. The
/// award is clamped to `[1, max_gain]`, so even a trivial kill is worth one
/// point and no kill breaks the ceiling.
pub fn experience_for_kill(
    killer_level: u32,
    victim_level: u32,
    constants: &ExperienceConstants,
) -> i64 {
    let base = i64::from(victim_level) * constants.exp_per_level;

    let diff = i64::from(victim_level) - i64::from(killer_level);
    let bonus = if diff > 0 {
        base * diff.min(constants.level_diff_cap) / constants.level_diff_cap
    } else {
        0
    };

    (base + bonus).clamp(1, constants.max_gain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ExperienceConstants {
        ExperienceConstants::default()
    }

    #[test]
    fn test_equal_levels_award_base() {
        assert_eq!(experience_for_kill(10, 10, &defaults()), 1_000);
    }

    #[test]
    fn test_underdog_bonus() {
        // Victim 4 levels up: base 1400 + 1400 * 4/8 = 2100
        assert_eq!(experience_for_kill(10, 14, &defaults()), 2_100);
    }

    #[test]
    fn test_bonus_caps_at_diff_cap() {
        // 8 levels up and 20 levels up award the same doubled base
        let at_cap = experience_for_kill(10, 18, &defaults());
        assert_eq!(at_cap, 3_600);
        assert_eq!(experience_for_kill(10, 30, &defaults()), 6_000);
        // diff 20 clamps to 8 -> 3000 + 3000 = 6000
    }

    #[test]
    fn test_no_penalty_below_but_never_zero() {
        // Out-leveling the victim gives no bonus, and the floor is one point
        assert_eq!(experience_for_kill(50, 10, &defaults()), 1_000);
        let constants = ExperienceConstants {
            exp_per_level: 0,
            ..defaults()
        };
        assert_eq!(experience_for_kill(50, 10, &constants), 1);
    }

    #[test]
    fn test_max_gain_ceiling() {
        assert_eq!(experience_for_kill(1, 90, &defaults()), 10_000);
    }
}
