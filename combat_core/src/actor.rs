//! Actor boundary - the engine's view of the hosting entity system
//!
//! The engine owns no actors. It reads combat inputs (level, class, race,
//! base profile, active effect bonuses) and writes exactly two things back:
//! the health pool and the single `fighting` flag. Everything else about an
//! actor belongs to the host.

use crate::profile::CombatProfile;
use crate::types::{ActorId, Class, DamageType, Race};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Combat-relevant state for one actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorState {
    /// Handle issued by the entity system
    pub id: ActorId,
    /// Display name (used only for logging)
    pub name: String,
    /// Character level (drives class bonuses, armor K-tier, experience)
    pub level: u32,
    /// Character class
    pub class: Class,
    /// Character race
    pub race: Race,
    /// Base combat numbers from stats and equipment
    pub base: CombatProfile,
    /// Contributions from active effects (buffs, debuffs, auras)
    pub effect_bonuses: Vec<CombatProfile>,
    /// Current health
    pub health: f64,
    /// Maximum health
    pub max_health: f64,
    /// Base damage of the wielded weapon or natural attack
    pub weapon_damage: f64,
    /// Damage type of the actor's attacks
    pub attack_type: DamageType,
    /// Whether this actor is currently in combat; set and cleared only by
    /// the engine's engage/disengage paths
    pub fighting: bool,
}

impl ActorState {
    /// Create an actor with neutral combat numbers and full health
    pub fn new(id: ActorId, name: &str, level: u32, class: Class, race: Race) -> Self {
        ActorState {
            id,
            name: name.to_string(),
            level,
            class,
            race,
            base: CombatProfile::new(),
            effect_bonuses: Vec::new(),
            health: 100.0,
            max_health: 100.0,
            weapon_damage: 5.0,
            attack_type: DamageType::Physical,
            fighting: false,
        }
    }

    /// Whether the actor is alive
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Apply a damage delta to the health pool, clamped at zero
    ///
    /// Returns the health remaining after the hit.
    pub fn apply_damage(&mut self, amount: f64) -> f64 {
        self.health = (self.health - amount).max(0.0);
        self.health
    }
}

/// Read/write access to the actors the engine may touch
///
/// Implemented by the hosting entity system. `get` returning `None` means
/// the actor has been removed from the world; the registry treats such
/// actors as invalid and retires their pairs.
pub trait ActorStore {
    /// Look up an actor by id
    fn get(&self, id: ActorId) -> Option<&ActorState>;
    /// Look up an actor mutably by id
    fn get_mut(&mut self, id: ActorId) -> Option<&mut ActorState>;
}

/// Simple HashMap-backed store for hosts and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryActors {
    actors: HashMap<ActorId, ActorState>,
}

impl InMemoryActors {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an actor, replacing any existing actor with the same id
    pub fn insert(&mut self, actor: ActorState) {
        self.actors.insert(actor.id, actor);
    }

    /// Remove an actor from the world
    pub fn remove(&mut self, id: ActorId) -> Option<ActorState> {
        self.actors.remove(&id)
    }

    /// Number of actors in the store
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

impl ActorStore for InMemoryActors {
    fn get(&self, id: ActorId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    fn get_mut(&mut self, id: ActorId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }
}
