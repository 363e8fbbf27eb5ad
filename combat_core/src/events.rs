//! Event bus - how non-combat systems observe combat
//!
//! A single owned bus with explicit lifecycle: created with the engine,
//! handlers registered during initialization. Scripting triggers, narration
//! formatters and log sinks all subscribe here; the engine fires events and
//! never inspects who is listening.

use crate::types::ActorId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// Kinds of combat events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An attack attempt that did not land
    AttackMiss,
    /// An attack attempt that landed (any non-miss outcome)
    AttackHit,
    /// Final mitigated damage was applied to a target
    DamageDealt,
    /// An actor's health reached zero
    ActorDeath,
}

/// Immutable record describing one combat event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    /// What happened
    pub kind: EventKind,
    /// Actor that caused the event
    pub source: ActorId,
    /// Actor it happened to, if any
    pub target: Option<ActorId>,
    /// Damage amount, for damage-carrying events
    pub damage: Option<f64>,
}

impl CombatEvent {
    /// Create an event with no target or damage payload
    pub fn new(kind: EventKind, source: ActorId) -> Self {
        CombatEvent {
            kind,
            source,
            target: None,
            damage: None,
        }
    }

    /// Builder-style target setter
    pub fn with_target(mut self, target: ActorId) -> Self {
        self.target = Some(target);
        self
    }

    /// Builder-style damage setter
    pub fn with_damage(mut self, damage: f64) -> Self {
        self.damage = Some(damage);
        self
    }
}

/// Handler invoked for each event of a registered kind
pub type EventHandler = Box<dyn Fn(&CombatEvent)>;

/// Publish-only event bus
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<EventKind, Vec<EventHandler>>,
}

impl EventBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler to one event kind
    pub fn register_event_handler(&mut self, kind: EventKind, handler: EventHandler) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Deliver an event to every handler registered for its kind
    pub fn fire_event(&self, event: &CombatEvent) {
        trace!(kind = ?event.kind, source = ?event.source, target = ?event.target, "combat event");
        if let Some(handlers) = self.handlers.get(&event.kind) {
            for handler in handlers {
                handler(event);
            }
        }
    }

    /// Number of handlers registered for a kind
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<_, _> = self
            .handlers
            .iter()
            .map(|(kind, handlers)| (kind, handlers.len()))
            .collect();
        f.debug_struct("EventBus").field("handlers", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_handlers_receive_matching_events() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        bus.register_event_handler(
            EventKind::DamageDealt,
            Box::new(move |event| sink.borrow_mut().push(*event)),
        );

        let hit = CombatEvent::new(EventKind::DamageDealt, ActorId(1))
            .with_target(ActorId(2))
            .with_damage(12.5);
        bus.fire_event(&hit);
        // A different kind is not delivered to this handler
        bus.fire_event(&CombatEvent::new(EventKind::AttackMiss, ActorId(1)));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].target, Some(ActorId(2)));
        assert!((seen[0].damage.unwrap() - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_multiple_handlers_same_kind() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0u32));

        for _ in 0..3 {
            let sink = Rc::clone(&count);
            bus.register_event_handler(
                EventKind::ActorDeath,
                Box::new(move |_| *sink.borrow_mut() += 1),
            );
        }

        bus.fire_event(&CombatEvent::new(EventKind::ActorDeath, ActorId(9)));
        assert_eq!(*count.borrow(), 3);
        assert_eq!(bus.handler_count(EventKind::ActorDeath), 3);
    }

    #[test]
    fn test_fire_with_no_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.fire_event(&CombatEvent::new(EventKind::AttackHit, ActorId(1)));
    }

    #[test]
    fn test_event_json_round_trip() {
        let event = CombatEvent::new(EventKind::ActorDeath, ActorId(3)).with_target(ActorId(4));
        let json = serde_json::to_string(&event).unwrap();
        let back: CombatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
