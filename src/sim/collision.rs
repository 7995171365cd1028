//! Player-versus-enemy collision resolution
//!
//! One hit per injury window: once the player takes damage, every other
//! overlap in the same pass and for the rest of the window is ignored.

use super::enemy::{Enemy, EnemyId};
use super::hitbox::HitBox;
use super::state::StatePatch;
use super::store::StateStore;
use crate::consts::{PROXIMITY_THRESHOLD, SHAKE_DURATION_TICKS, SHAKE_STRENGTH};

/// What the resolver is allowed to do to the player
///
/// It may read the hitbox and flags and trigger injury or death; it never
/// touches kinematics.
pub trait Damageable {
    fn hit_box(&self) -> HitBox;
    fn is_injured(&self) -> bool;
    fn is_dead(&self) -> bool;
    /// Start (or restart) the injury window
    fn set_injured(&mut self);
    /// Terminal: mark dead and publish game over
    fn kill(&mut self, store: &StateStore);
}

/// Result of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Enemy that dealt damage, if any
    pub hit: Option<EnemyId>,
    pub damage: i32,
    /// Health after the hit
    pub health: i32,
    /// Screen shake requested for the presentation layer
    pub shake: Option<(f32, u32)>,
    pub killed: bool,
}

impl CollisionOutcome {
    pub fn miss() -> Self {
        Self::default()
    }
}

/// Check the player against every live enemy and apply at most one hit
pub fn resolve_collisions<P: Damageable>(
    player: &mut P,
    enemies: &[Enemy],
    store: &StateStore,
) -> CollisionOutcome {
    if enemies.is_empty() || player.is_injured() || player.is_dead() {
        return CollisionOutcome::miss();
    }

    let player_box = player.hit_box();

    // First overlap wins; the pass ends with it
    for enemy in enemies {
        let enemy_box = enemy.hit_box();
        if !player_box.is_close(&enemy_box, PROXIMITY_THRESHOLD) {
            continue;
        }
        if !player_box.overlaps(&enemy_box) {
            continue;
        }

        player.set_injured();

        let damage = enemy.damage();
        store.update_state(|s| StatePatch::health((s.health - damage).max(0)));
        let health = store.state().health;
        log::debug!(
            "Hit by {:?} #{} for {} (health {})",
            enemy.kind,
            enemy.id.0,
            damage,
            health
        );

        let killed = health <= 0;
        if killed {
            player.kill(store);
        }

        return CollisionOutcome {
            hit: Some(enemy.id),
            damage,
            health,
            shake: Some((SHAKE_STRENGTH, SHAKE_DURATION_TICKS)),
            killed,
        };
    }

    CollisionOutcome::miss()
}
