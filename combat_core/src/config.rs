//! Tunable combat constants
//!
//! Everything the resolver, mitigation pipeline, scheduler and experience
//! calculation read is carried here explicitly rather than baked in, so a
//! host can tune per zone or difficulty. Defaults are the engine's design
//! values; a TOML file may override any subset.

use serde::{Deserialize, Serialize};

/// Tunable combat constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatConstants {
    #[serde(default)]
    pub hit: HitConstants,
    #[serde(default)]
    pub mitigation: MitigationConstants,
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub rounds: RoundConstants,
    #[serde(default)]
    pub experience: ExperienceConstants,
}

impl CombatConstants {
    /// Parse constants from a TOML document, filling gaps with defaults
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// Hit resolver constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitConstants {
    /// Accuracy is soft-capped here before the margin comparison
    #[serde(default = "default_accuracy_cap")]
    pub accuracy_cap: f64,
    /// Evasion is soft-capped here before the margin comparison
    #[serde(default = "default_evasion_cap")]
    pub evasion_cap: f64,
    /// Uniform roll drawn from [-roll_spread, roll_spread]; wide enough that
    /// a 20-point accuracy edge is never deterministic
    #[serde(default = "default_roll_spread")]
    pub roll_spread: f64,
    /// Margin at or above this (plus the defender's critical margin shift) is a Critical
    #[serde(default = "default_critical_margin")]
    pub critical_margin: f64,
    /// Margin at or above this is a Hit
    #[serde(default = "default_hit_margin")]
    pub hit_margin: f64,
    /// Margin at or above this is a Glancing blow; below is a Miss
    #[serde(default = "default_glancing_margin")]
    pub glancing_margin: f64,
}

impl Default for HitConstants {
    fn default() -> Self {
        HitConstants {
            accuracy_cap: 200.0,
            evasion_cap: 150.0,
            roll_spread: 150.0,
            critical_margin: 50.0,
            hit_margin: 10.0,
            glancing_margin: -10.0,
        }
    }
}

fn default_accuracy_cap() -> f64 {
    200.0
}
fn default_evasion_cap() -> f64 {
    150.0
}
fn default_roll_spread() -> f64 {
    150.0
}
fn default_critical_margin() -> f64 {
    50.0
}
fn default_hit_margin() -> f64 {
    10.0
}
fn default_glancing_margin() -> f64 {
    -10.0
}

/// Mitigation pipeline constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MitigationConstants {
    /// Armor-derived damage reduction never exceeds this fraction
    #[serde(default = "default_dr_cap")]
    pub dr_cap: f64,
    /// Armor K for defenders up to `tier1_max_level`
    #[serde(default = "default_k_tier1")]
    pub k_tier1: f64,
    /// Armor K for defenders up to `tier2_max_level`
    #[serde(default = "default_k_tier2")]
    pub k_tier2: f64,
    /// Armor K for defenders above `tier2_max_level`
    #[serde(default = "default_k_tier3")]
    pub k_tier3: f64,
    /// Highest level in the first K band
    #[serde(default = "default_tier1_max_level")]
    pub tier1_max_level: u32,
    /// Highest level in the second K band
    #[serde(default = "default_tier2_max_level")]
    pub tier2_max_level: u32,
    /// Floor for any attack that was not a miss
    #[serde(default = "default_minimum_damage")]
    pub minimum_damage: f64,
}

impl Default for MitigationConstants {
    fn default() -> Self {
        MitigationConstants {
            dr_cap: 0.75,
            k_tier1: 40.0,
            k_tier2: 60.0,
            k_tier3: 80.0,
            tier1_max_level: 20,
            tier2_max_level: 50,
            minimum_damage: 1.0,
        }
    }
}

fn default_dr_cap() -> f64 {
    0.75
}
fn default_k_tier1() -> f64 {
    40.0
}
fn default_k_tier2() -> f64 {
    60.0
}
fn default_k_tier3() -> f64 {
    80.0
}
fn default_tier1_max_level() -> u32 {
    20
}
fn default_tier2_max_level() -> u32 {
    50
}
fn default_minimum_damage() -> f64 {
    1.0
}

/// Raw damage constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageConstants {
    /// Raw damage = weapon base + attack power * this scale
    #[serde(default = "default_attack_power_scale")]
    pub attack_power_scale: f64,
    /// Critical outcome damage multiplier
    #[serde(default = "default_critical_multiplier")]
    pub critical_multiplier: f64,
    /// Glancing outcome damage multiplier
    #[serde(default = "default_glancing_multiplier")]
    pub glancing_multiplier: f64,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            attack_power_scale: 0.5,
            critical_multiplier: 2.0,
            glancing_multiplier: 0.5,
        }
    }
}

fn default_attack_power_scale() -> f64 {
    0.5
}
fn default_critical_multiplier() -> f64 {
    2.0
}
fn default_glancing_multiplier() -> f64 {
    0.5
}

/// Round scheduler constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundConstants {
    /// Seconds between automatic attack exchanges for an engaged pair
    #[serde(default = "default_round_interval_secs")]
    pub round_interval_secs: f64,
}

impl Default for RoundConstants {
    fn default() -> Self {
        RoundConstants {
            round_interval_secs: 4.0,
        }
    }
}

fn default_round_interval_secs() -> f64 {
    4.0
}

/// Kill experience constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceConstants {
    /// Base experience per victim level
    #[serde(default = "default_exp_per_level")]
    pub exp_per_level: i64,
    /// Level-difference bonus caps at this many levels
    #[serde(default = "default_level_diff_cap")]
    pub level_diff_cap: i64,
    /// Upper bound for any single kill
    #[serde(default = "default_max_gain")]
    pub max_gain: i64,
}

impl Default for ExperienceConstants {
    fn default() -> Self {
        ExperienceConstants {
            exp_per_level: 100,
            level_diff_cap: 8,
            max_gain: 10_000,
        }
    }
}

fn default_exp_per_level() -> i64 {
    100
}
fn default_level_diff_cap() -> i64 {
    8
}
fn default_max_gain() -> i64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = CombatConstants::default();
        assert!((constants.hit.accuracy_cap - 200.0).abs() < f64::EPSILON);
        assert!((constants.hit.evasion_cap - 150.0).abs() < f64::EPSILON);
        assert!((constants.mitigation.dr_cap - 0.75).abs() < f64::EPSILON);
        assert!((constants.damage.critical_multiplier - 2.0).abs() < f64::EPSILON);
        assert!((constants.rounds.round_interval_secs - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_constants() {
        let toml = r#"
[hit]
accuracy_cap = 180
evasion_cap = 140

[mitigation]
dr_cap = 0.70
k_tier1 = 35

[rounds]
round_interval_secs = 3.0
"#;

        let constants = CombatConstants::from_toml_str(toml).unwrap();
        assert!((constants.hit.accuracy_cap - 180.0).abs() < f64::EPSILON);
        assert!((constants.mitigation.dr_cap - 0.70).abs() < f64::EPSILON);
        assert!((constants.rounds.round_interval_secs - 3.0).abs() < f64::EPSILON);
        // Unspecified sections and fields fall back to defaults
        assert!((constants.mitigation.k_tier2 - 60.0).abs() < f64::EPSILON);
        assert!((constants.damage.glancing_multiplier - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_empty_document() {
        let constants = CombatConstants::from_toml_str("").unwrap();
        assert!((constants.hit.roll_spread - 150.0).abs() < f64::EPSILON);
    }
}
