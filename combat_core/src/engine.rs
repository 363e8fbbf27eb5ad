//! CombatEngine - attack orchestration and the round scheduler
//!
//! The engine owns the pair registry and the event bus; all registry
//! mutation funnels through `&mut self`, so the two call paths (explicit
//! attacks and the host's round tick) can never race each other. The
//! numeric resolution functions it calls are pure and hold no state.

use crate::actor::ActorStore;
use crate::combat::{experience_for_kill, mitigate, resolve_hit, AttackResult, Outcome};
use crate::config::CombatConstants;
use crate::error::CombatError;
use crate::events::{CombatEvent, EventBus, EventHandler, EventKind};
use crate::profile::effective_profile;
use crate::registry::PairRegistry;
use crate::types::ActorId;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// The combat resolution engine
pub struct CombatEngine {
    constants: CombatConstants,
    registry: PairRegistry,
    events: EventBus,
}

impl Default for CombatEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatEngine {
    /// Create an engine with default constants
    pub fn new() -> Self {
        Self::with_constants(CombatConstants::default())
    }

    /// Create an engine with tuned constants
    pub fn with_constants(constants: CombatConstants) -> Self {
        let interval = Duration::from_secs_f64(constants.rounds.round_interval_secs);
        CombatEngine {
            constants,
            registry: PairRegistry::new(interval),
            events: EventBus::new(),
        }
    }

    /// The constants this engine runs with
    pub fn constants(&self) -> &CombatConstants {
        &self.constants
    }

    /// Subscribe a handler to a combat event kind
    ///
    /// Handlers are registered once during host initialization; the engine
    /// never inspects who is subscribed.
    pub fn register_event_handler(&mut self, kind: EventKind, handler: EventHandler) {
        self.events.register_event_handler(kind, handler);
    }

    /// Whether the actor has any active pair
    pub fn is_in_combat(&self, id: ActorId) -> bool {
        self.registry.is_in_combat(id)
    }

    /// Every opponent the actor is currently paired against
    pub fn opponents_of(&self, id: ActorId) -> Vec<ActorId> {
        self.registry.opponents_of(id)
    }

    /// Number of active pairs
    pub fn active_pairs(&self) -> usize {
        self.registry.len()
    }

    // === Pair lifecycle ===

    /// Engage two idle actors, starting their round cycle now
    pub fn engage(
        &mut self,
        store: &mut impl ActorStore,
        a: ActorId,
        b: ActorId,
    ) -> Result<(), CombatError> {
        self.engage_at(store, a, b, Instant::now())
    }

    /// Engage with an explicit timestamp (deterministic tests)
    pub fn engage_at(
        &mut self,
        store: &mut impl ActorStore,
        a: ActorId,
        b: ActorId,
        now: Instant,
    ) -> Result<(), CombatError> {
        for id in [a, b] {
            let actor = store.get(id).ok_or(CombatError::MissingActor(id))?;
            if !actor.is_alive() {
                return Err(CombatError::ActorDead(id));
            }
        }

        self.registry.engage(a, b, now)?;
        self.sync_fighting_flag(store, a);
        self.sync_fighting_flag(store, b);
        Ok(())
    }

    /// Remove the actor from all combat; idempotent
    ///
    /// Returns the number of pairs removed (zero when the actor was not
    /// fighting, which is a no-op rather than an error).
    pub fn disengage(&mut self, store: &mut impl ActorStore, actor: ActorId) -> usize {
        let freed = self.registry.disengage(actor);
        self.sync_fighting_flag(store, actor);
        for opponent in &freed {
            self.sync_fighting_flag(store, *opponent);
        }
        freed.len()
    }

    /// Redirect everyone fighting `target` onto `rescuer`
    pub fn rescue(
        &mut self,
        store: &mut impl ActorStore,
        rescuer: ActorId,
        target: ActorId,
    ) -> Result<usize, CombatError> {
        self.rescue_at(store, rescuer, target, Instant::now())
    }

    /// Rescue with an explicit timestamp (deterministic tests)
    pub fn rescue_at(
        &mut self,
        store: &mut impl ActorStore,
        rescuer: ActorId,
        target: ActorId,
        now: Instant,
    ) -> Result<usize, CombatError> {
        let actor = store
            .get(rescuer)
            .ok_or(CombatError::MissingActor(rescuer))?;
        if !actor.is_alive() {
            return Err(CombatError::ActorDead(rescuer));
        }
        if store.get(target).is_none() {
            return Err(CombatError::MissingActor(target));
        }

        let redirected = self.registry.rescue(rescuer, target, now)?;
        self.sync_fighting_flag(store, rescuer);
        self.sync_fighting_flag(store, target);
        for opponent in &redirected {
            self.sync_fighting_flag(store, *opponent);
        }
        Ok(redirected.len())
    }

    // === Attack orchestration ===

    /// Resolve one explicit attack outside the round cycle
    pub fn perform_attack(
        &mut self,
        store: &mut impl ActorStore,
        attacker: ActorId,
        target: ActorId,
    ) -> Result<AttackResult, CombatError> {
        let mut rng = rand::thread_rng();
        self.perform_attack_with_rng(store, attacker, target, &mut rng)
    }

    /// Resolve one attack with a provided RNG (deterministic tests)
    pub fn perform_attack_with_rng(
        &mut self,
        store: &mut impl ActorStore,
        attacker: ActorId,
        target: ActorId,
        rng: &mut impl Rng,
    ) -> Result<AttackResult, CombatError> {
        let result = self.attack_once(store, attacker, target, rng)?;
        if result.outcome == Outcome::TargetDied {
            self.retire_dead(store, target);
        }
        Ok(result)
    }

    /// Resolve one attack without touching the registry
    ///
    /// Preconditions are rejected before any state mutation and fire no
    /// events. The round scheduler calls this directly and defers registry
    /// cleanup to the end of its pass.
    fn attack_once(
        &mut self,
        store: &mut impl ActorStore,
        attacker_id: ActorId,
        target_id: ActorId,
        rng: &mut impl Rng,
    ) -> Result<AttackResult, CombatError> {
        if attacker_id == target_id {
            return Err(CombatError::SelfTarget(attacker_id));
        }
        let attacker = store
            .get(attacker_id)
            .ok_or(CombatError::MissingActor(attacker_id))?;
        if !attacker.is_alive() {
            return Err(CombatError::ActorDead(attacker_id));
        }
        let target = store
            .get(target_id)
            .ok_or(CombatError::MissingActor(target_id))?;
        if !target.is_alive() {
            return Err(CombatError::ActorDead(target_id));
        }

        // Profiles are rebuilt per attack; equipment and effects may have
        // changed since the last round.
        let attacker_profile = effective_profile(attacker);
        let defender_profile = effective_profile(target);
        let attacker_level = attacker.level;
        let target_level = target.level;
        let weapon_damage = attacker.weapon_damage;
        let attack_type = attacker.attack_type;

        let outcome = resolve_hit(&attacker_profile, &defender_profile, &self.constants.hit, rng);
        if outcome == Outcome::Miss {
            self.events.fire_event(
                &CombatEvent::new(EventKind::AttackMiss, attacker_id).with_target(target_id),
            );
            return Ok(AttackResult::miss());
        }

        let mut raw = weapon_damage
            + attacker_profile.attack_power * self.constants.damage.attack_power_scale;
        match outcome {
            Outcome::Critical => raw *= self.constants.damage.critical_multiplier,
            Outcome::Glancing => raw *= self.constants.damage.glancing_multiplier,
            _ => {}
        }

        let mitigated = mitigate(
            raw,
            &attacker_profile,
            &defender_profile,
            attack_type,
            target_level,
            &self.constants.mitigation,
        );
        let damage = mitigated.max(self.constants.mitigation.minimum_damage);

        self.events.fire_event(
            &CombatEvent::new(EventKind::AttackHit, attacker_id)
                .with_target(target_id)
                .with_damage(damage),
        );

        let remaining = match store.get_mut(target_id) {
            Some(target) => target.apply_damage(damage),
            None => return Err(CombatError::MissingActor(target_id)),
        };

        self.events.fire_event(
            &CombatEvent::new(EventKind::DamageDealt, attacker_id)
                .with_target(target_id)
                .with_damage(damage),
        );

        let mut result = AttackResult::new(outcome, damage);
        if remaining <= 0.0 {
            result.outcome = Outcome::TargetDied;
            result.experience =
                experience_for_kill(attacker_level, target_level, &self.constants.experience);
            self.events.fire_event(
                &CombatEvent::new(EventKind::ActorDeath, target_id).with_target(attacker_id),
            );
            debug!(victim = ?target_id, killer = ?attacker_id, "actor died");
        }

        Ok(result)
    }

    // === Round scheduling ===

    /// Advance every due pair; called once per host tick
    ///
    /// Performs no blocking and no sleeping; returns promptly regardless of
    /// how many pairs are active.
    pub fn process_combat_rounds(&mut self, store: &mut impl ActorStore) {
        let mut rng = rand::thread_rng();
        self.process_rounds_at(store, Instant::now(), &mut rng);
    }

    /// Advance rounds against an explicit clock and RNG (deterministic tests)
    pub fn process_rounds_at(
        &mut self,
        store: &mut impl ActorStore,
        now: Instant,
        rng: &mut impl Rng,
    ) {
        let due = self.registry.due_couples(now);
        let mut finished: Vec<(ActorId, ActorId)> = Vec::new();
        let mut dead: Vec<ActorId> = Vec::new();

        for (first, second) in due {
            let first_valid = store.get(first).map(|a| a.is_alive());
            let second_valid = store.get(second).map(|a| a.is_alive());

            match (first_valid, second_valid) {
                (None, _) | (_, None) => {
                    // Should be prevented by construction: pairs are retired
                    // when their actors die or leave the world. One bad pair
                    // must not stall the rest of the pass.
                    error!(?first, ?second, "combat pair references a missing actor; retiring");
                    finished.push((first, second));
                    continue;
                }
                (Some(false), _) | (_, Some(false)) => {
                    error!(?first, ?second, "combat pair references a dead actor; retiring");
                    finished.push((first, second));
                    continue;
                }
                (Some(true), Some(true)) => {}
            }

            // Each combatant gets one attack opportunity per round; the
            // return swing is skipped if the first one killed.
            let mut pair_over = false;
            match self.attack_once(store, first, second, rng) {
                Ok(result) if result.outcome == Outcome::TargetDied => {
                    dead.push(second);
                    pair_over = true;
                }
                Ok(_) => {}
                Err(err) => {
                    error!(?first, ?second, %err, "round attack failed; retiring pair");
                    pair_over = true;
                }
            }

            if !pair_over {
                match self.attack_once(store, second, first, rng) {
                    Ok(result) if result.outcome == Outcome::TargetDied => {
                        dead.push(first);
                        pair_over = true;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        error!(?second, ?first, %err, "round attack failed; retiring pair");
                        pair_over = true;
                    }
                }
            }

            if pair_over {
                finished.push((first, second));
            }
        }

        // Cleanup runs after the pass, never during it.
        for (a, b) in finished {
            self.registry.remove_couple(a, b);
            self.sync_fighting_flag(store, a);
            self.sync_fighting_flag(store, b);
        }
        for id in dead {
            self.retire_dead(store, id);
        }
    }

    /// Pull a dead actor out of every pair it was part of
    fn retire_dead(&mut self, store: &mut impl ActorStore, id: ActorId) {
        let freed = self.registry.disengage(id);
        self.sync_fighting_flag(store, id);
        for opponent in freed {
            self.sync_fighting_flag(store, opponent);
        }
    }

    /// Make the actor's fighting flag agree with the registry
    ///
    /// The engage/disengage paths are the only writers of this flag.
    fn sync_fighting_flag(&self, store: &mut impl ActorStore, id: ActorId) {
        let fighting = self.registry.is_in_combat(id);
        if let Some(actor) = store.get_mut(id) {
            actor.fighting = fighting;
        }
    }
}
