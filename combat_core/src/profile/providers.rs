//! Modifier providers - class and race contributions to a combat profile
//!
//! Pure lookup tables keyed by enumerated class/race variants. Adding a class
//! means adding a table entry here; the hit resolver and mitigation pipeline
//! never branch on class or race themselves.

use crate::actor::ActorState;
use crate::types::{Class, DamageType, Race};

use super::model::CombatProfile;

/// Per-level combat contribution for a class
///
/// `Commoner` (the safe default for unknown class names) contributes nothing.
pub fn class_bonus(class: Class, level: u32) -> CombatProfile {
    let lvl = f64::from(level);
    let mut bonus = CombatProfile::new();

    match class {
        Class::Warrior => {
            bonus.accuracy = 1.5 * lvl;
            bonus.attack_power = 2.0 * lvl;
            bonus.armor_rating = 1.0 * lvl;
        }
        Class::Cleric => {
            bonus.accuracy = 0.75 * lvl;
            bonus.attack_power = 1.0 * lvl;
            bonus.armor_rating = 1.5 * lvl;
            bonus.soak = 0.2 * lvl;
            bonus.critical_margin_bonus = 5.0;
        }
        Class::Thief => {
            bonus.accuracy = 1.25 * lvl;
            bonus.evasion = 1.5 * lvl;
            bonus.attack_power = 1.25 * lvl;
            bonus.penetration_flat = 0.25 * lvl;
        }
        Class::Mage => {
            bonus.accuracy = 0.5 * lvl;
            bonus.evasion = 0.5 * lvl;
            bonus.attack_power = 1.5 * lvl;
            bonus.set_resistance(DamageType::Magic, 75.0);
        }
        Class::Commoner => {}
    }

    bonus
}

/// Fixed combat contribution for a race
///
/// `Human` (the safe default for unknown race names) is neutral.
pub fn race_bonus(race: Race) -> CombatProfile {
    let mut bonus = CombatProfile::new();

    match race {
        Race::Human => {}
        Race::Elf => {
            bonus.accuracy = 5.0;
            bonus.evasion = 10.0;
            bonus.set_resistance(DamageType::Magic, 90.0);
        }
        Race::Dwarf => {
            bonus.evasion = -5.0;
            bonus.armor_rating = 20.0;
            bonus.soak = 3.0;
            bonus.set_resistance(DamageType::Poison, 80.0);
        }
        Race::Orc => {
            bonus.attack_power = 10.0;
            bonus.soak = 2.0;
        }
        Race::Gnome => {
            bonus.evasion = 5.0;
            bonus.set_resistance(DamageType::Lightning, 85.0);
        }
    }

    bonus
}

/// Build an actor's effective profile for one attack
///
/// `base ⊕ class ⊕ race ⊕ active effect bonuses`, folded left to right.
/// Recomputed on demand per attack; equipment and effects can change between
/// rounds, so the result is never cached.
pub fn effective_profile(actor: &ActorState) -> CombatProfile {
    let mut profile = actor
        .base
        .combine(&class_bonus(actor.class, actor.level))
        .combine(&race_bonus(actor.race));

    for effect in &actor.effect_bonuses {
        profile = profile.combine(effect);
    }

    profile
}
