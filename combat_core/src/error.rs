//! Combat error taxonomy
//!
//! Every variant is a recoverable, caller-visible outcome. Nothing here is
//! used for ordinary control flow, and none of these abort the round loop.

use crate::types::ActorId;
use thiserror::Error;

/// Errors reported by the combat engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CombatError {
    /// An actor tried to attack or engage itself
    #[error("actor {0:?} cannot target itself")]
    SelfTarget(ActorId),

    /// The referenced actor is not in the store (removed from the world)
    #[error("actor {0:?} does not exist")]
    MissingActor(ActorId),

    /// The referenced actor is already dead
    #[error("actor {0:?} is dead")]
    ActorDead(ActorId),

    /// `engage` was called on an actor that already has a pair
    #[error("actor {0:?} is already fighting; disengage or rescue first")]
    AlreadyFighting(ActorId),

    /// `rescue` targeted an actor that is not currently engaged
    #[error("actor {0:?} is not fighting")]
    NotFighting(ActorId),
}
