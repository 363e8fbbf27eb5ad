//! AttackResult - Outcome of one resolved attack

use serde::{Deserialize, Serialize};

/// Classification of a single attack attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The attack did not land
    Miss,
    /// Landed weakly; damage is halved before mitigation
    Glancing,
    /// A clean hit
    Hit,
    /// Landed exceptionally; damage is doubled before mitigation
    Critical,
    /// The hit landed and the target's health reached zero
    TargetDied,
}

impl Outcome {
    /// Whether any damage can result from this outcome
    pub fn is_hit(&self) -> bool {
        !matches!(self, Outcome::Miss)
    }
}

/// Result of one resolved attack
///
/// The narration slots are opaque to the engine: they start empty and the
/// presentation layer fills them from the outcome and damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    /// How the attack resolved
    pub outcome: Outcome,
    /// Final damage after the full mitigation pipeline (0 on a miss,
    /// at least 1 otherwise)
    pub damage: f64,
    /// Experience awarded to the attacker; populated only when the target died
    pub experience: i64,
    /// Narration shown to the attacker
    pub attacker_message: String,
    /// Narration shown to the target
    pub target_message: String,
    /// Narration shown to bystanders in the room
    pub room_message: String,
}

impl AttackResult {
    /// Create a result with empty narration slots
    pub fn new(outcome: Outcome, damage: f64) -> Self {
        AttackResult {
            outcome,
            damage,
            experience: 0,
            attacker_message: String::new(),
            target_message: String::new(),
            room_message: String::new(),
        }
    }

    /// Create a zero-damage miss result
    pub fn miss() -> Self {
        Self::new(Outcome::Miss, 0.0)
    }
}
