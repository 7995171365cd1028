//! Idle/demo mode: synthesised input that tries to stay alive
//!
//! Looks at enemies that are about to reach the player's row and steers away
//! from the nearest one, dashing when it is already close. With nothing
//! threatening, drifts back toward the middle of the screen.

use super::collision::Damageable;
use super::enemy::Enemy;
use super::hitbox::HitBox;
use super::input::{Key, KeyState};
use super::player::Player;
use crate::config::Viewport;

/// How far above the player an enemy counts as a threat
const LOOKAHEAD: f32 = 180.0;
/// Extra horizontal margin around the player when judging threats
const SIDE_MARGIN: f32 = 16.0;
/// Dash when the threat's bottom edge is this close above the player
const DASH_DISTANCE: f32 = 60.0;
/// Distance from a wall at which fleeing toward it is pointless
const WALL_MARGIN: f32 = 40.0;
/// Dead zone around screen center when idling
const CENTER_DEAD_ZONE: f32 = 24.0;

/// Keys the autopilot would hold this tick
pub fn autopilot_input(player: &Player, enemies: &[Enemy], screen: Viewport) -> KeyState {
    let mut keys = KeyState::new();
    if player.is_dead() {
        return keys;
    }

    let me = player.hit_box();
    let (my_x, _) = me.center();

    let threat = enemies
        .iter()
        .map(|e| e.hit_box())
        .filter(|hb| is_threat(&me, hb))
        .max_by(|a, b| a.bottom().total_cmp(&b.bottom()));

    let Some(threat) = threat else {
        let center = screen.width / 2.0;
        if my_x < center - CENTER_DEAD_ZONE {
            keys.press(Key::Right);
        } else if my_x > center + CENTER_DEAD_ZONE {
            keys.press(Key::Left);
        }
        return keys;
    };

    let (threat_x, _) = threat.center();
    let mut go_left = threat_x > my_x;
    if go_left && me.x < WALL_MARGIN {
        go_left = false;
    } else if !go_left && me.right() > screen.width - WALL_MARGIN {
        go_left = true;
    }
    keys.press(if go_left { Key::Left } else { Key::Right });

    // Dash only once facing the escape direction
    let facing_left = player.direction() < 0.0;
    if me.y - threat.bottom() < DASH_DISTANCE && facing_left == go_left {
        keys.press(Key::Dash);
    }

    keys
}

/// Above the player (or already level with it), close and horizontally in the way
fn is_threat(me: &HitBox, enemy: &HitBox) -> bool {
    let in_column = enemy.x < me.right() + SIDE_MARGIN && enemy.right() > me.x - SIDE_MARGIN;
    let approaching = enemy.bottom() > me.y - LOOKAHEAD && enemy.y < me.bottom();
    in_column && approaching
}
