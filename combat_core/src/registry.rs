//! Pair registry - who is fighting whom, and when their round is due
//!
//! Pairs are the only combat state that outlives a single attack. The
//! registry is pure bookkeeping over actor ids: it never touches the actor
//! store, so the engine can serialize registry mutation behind `&mut self`
//! and keep the numeric resolution functions lock-free.

use crate::error::CombatError;
use crate::types::ActorId;
use std::time::{Duration, Instant};
use tracing::debug;

/// A tracked engagement between exactly two actors
#[derive(Debug, Clone, Copy)]
pub struct CombatPair {
    /// One side of the engagement
    pub first: ActorId,
    /// The other side
    pub second: ActorId,
    /// When this pair last exchanged round attacks
    pub last_round: Instant,
}

impl CombatPair {
    /// Whether the pair involves the given actor
    pub fn contains(&self, id: ActorId) -> bool {
        self.first == id || self.second == id
    }

    /// The other participant, if `id` is in this pair
    pub fn opponent_of(&self, id: ActorId) -> Option<ActorId> {
        if self.first == id {
            Some(self.second)
        } else if self.second == id {
            Some(self.first)
        } else {
            None
        }
    }

    /// Whether this pair is the given unordered couple
    pub fn is_couple(&self, a: ActorId, b: ActorId) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

/// Registry of all active combat pairs
///
/// At most one pair exists per unordered actor couple. A single actor may
/// appear in several pairs (many-on-one fights created by `rescue`).
#[derive(Debug)]
pub struct PairRegistry {
    pairs: Vec<CombatPair>,
    round_interval: Duration,
}

impl PairRegistry {
    /// Create an empty registry with the given round interval
    pub fn new(round_interval: Duration) -> Self {
        PairRegistry {
            pairs: Vec::new(),
            round_interval,
        }
    }

    /// The fixed interval between automatic rounds
    pub fn round_interval(&self) -> Duration {
        self.round_interval
    }

    /// Whether the actor appears in any pair
    pub fn is_in_combat(&self, id: ActorId) -> bool {
        self.pairs.iter().any(|pair| pair.contains(id))
    }

    /// Every opponent the actor is currently paired against
    pub fn opponents_of(&self, id: ActorId) -> Vec<ActorId> {
        self.pairs
            .iter()
            .filter_map(|pair| pair.opponent_of(id))
            .collect()
    }

    /// Number of active pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no combat is in progress
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Create a pair between two idle actors
    ///
    /// Fails if the actors are the same, or if either already has a pair;
    /// the caller must `disengage` or use `rescue` to re-target an engaged
    /// actor.
    pub fn engage(&mut self, a: ActorId, b: ActorId, now: Instant) -> Result<(), CombatError> {
        if a == b {
            return Err(CombatError::SelfTarget(a));
        }
        if self.is_in_combat(a) {
            return Err(CombatError::AlreadyFighting(a));
        }
        if self.is_in_combat(b) {
            return Err(CombatError::AlreadyFighting(b));
        }

        debug!(?a, ?b, "engage");
        self.pairs.push(CombatPair {
            first: a,
            second: b,
            last_round: now,
        });
        Ok(())
    }

    /// Remove every pair containing the actor
    ///
    /// Idempotent: disengaging an actor not in combat is a no-op. Returns
    /// the former opponents so the caller can clear fighting flags.
    pub fn disengage(&mut self, actor: ActorId) -> Vec<ActorId> {
        let mut freed = Vec::new();
        self.pairs.retain(|pair| {
            if let Some(opponent) = pair.opponent_of(actor) {
                freed.push(opponent);
                false
            } else {
                true
            }
        });
        if !freed.is_empty() {
            debug!(?actor, opponents = freed.len(), "disengage");
        }
        freed
    }

    /// Redirect everyone fighting `target` to fight `rescuer` instead
    ///
    /// Old pairs are removed and fresh pairs against the rescuer created;
    /// the target ends up out of combat unless something else still holds a
    /// pair with it. Fails if the target is not engaged.
    pub fn rescue(
        &mut self,
        rescuer: ActorId,
        target: ActorId,
        now: Instant,
    ) -> Result<Vec<ActorId>, CombatError> {
        if rescuer == target {
            return Err(CombatError::SelfTarget(rescuer));
        }
        if !self.is_in_combat(target) {
            return Err(CombatError::NotFighting(target));
        }

        let opponents = self.disengage(target);
        let mut redirected = Vec::new();
        for opponent in opponents {
            // The rescuer stepping in against itself, or against an actor it
            // already fights, creates no new pair.
            if opponent == rescuer {
                continue;
            }
            if self.pairs.iter().any(|p| p.is_couple(opponent, rescuer)) {
                continue;
            }
            self.pairs.push(CombatPair {
                first: opponent,
                second: rescuer,
                last_round: now,
            });
            redirected.push(opponent);
        }

        debug!(?rescuer, ?target, redirected = redirected.len(), "rescue");
        Ok(redirected)
    }

    /// Remove one specific couple, if present
    pub fn remove_couple(&mut self, a: ActorId, b: ActorId) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|pair| !pair.is_couple(a, b));
        before != self.pairs.len()
    }

    /// Snapshot the couples whose round is due and stamp them as processed
    ///
    /// Couples come back in registry insertion order, so processing order is
    /// consistent within one pass.
    pub fn due_couples(&mut self, now: Instant) -> Vec<(ActorId, ActorId)> {
        let mut due = Vec::new();
        for pair in &mut self.pairs {
            if now.saturating_duration_since(pair.last_round) >= self.round_interval {
                pair.last_round = now;
                due.push((pair.first, pair.second));
            }
        }
        due
    }
}
