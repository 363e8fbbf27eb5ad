//! Attack resolution - hit classification, mitigation, results, experience

mod experience;
mod hit;
mod mitigation;
mod result;

pub use experience::experience_for_kill;
pub use hit::{resolve_hit, resolve_hit_with_roll};
pub use mitigation::{armor_k, damage_reduction_pct, mitigate};
pub use result::{AttackResult, Outcome};
