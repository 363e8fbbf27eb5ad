//! Combat attribute profiles - derived numbers and their providers

mod model;
mod providers;

pub use model::CombatProfile;
pub use providers::{class_bonus, effective_profile, race_bonus};

/// Profile composition constants
pub mod constants {
    /// Combined `penetration_pct` can never exceed this fraction.
    /// Part of the composition operator itself, not a tunable.
    pub const PENETRATION_PCT_CAP: f64 = 0.50;

    /// Resistance scalar meaning "no change" (absent map entries read as this)
    pub const NEUTRAL_RESISTANCE: f64 = 100.0;
}
