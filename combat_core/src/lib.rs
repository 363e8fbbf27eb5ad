//! combat_core - Combat resolution engine for a persistent multiplayer text world
//!
//! This library provides:
//! - CombatProfile: an actor's derived combat numbers and their composition
//! - Modifier providers: class/race lookup tables feeding the profile
//! - Hit resolution and the staged damage mitigation pipeline
//! - CombatEngine: attack orchestration plus the pair registry and round scheduler
//! - EventBus: how scripting, narration and logging observe combat outcomes
//!
//! The engine owns no actors and no I/O. Hosts implement `ActorStore`, call
//! `process_combat_rounds` once per tick, and subscribe to events for
//! everything downstream of resolution.

pub mod actor;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod profile;
pub mod registry;
pub mod types;

// Re-export core types for convenience
pub use actor::{ActorState, ActorStore, InMemoryActors};
pub use combat::{
    armor_k, damage_reduction_pct, experience_for_kill, mitigate, resolve_hit,
    resolve_hit_with_roll, AttackResult, Outcome,
};
pub use config::CombatConstants;
pub use engine::CombatEngine;
pub use error::CombatError;
pub use events::{CombatEvent, EventBus, EventHandler, EventKind};
pub use profile::{class_bonus, effective_profile, race_bonus, CombatProfile};
pub use registry::{CombatPair, PairRegistry};
pub use types::{ActorId, Class, DamageType, Race};
