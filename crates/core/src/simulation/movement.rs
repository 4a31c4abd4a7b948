//! Actor movement against the map: axis-wise sliding, gravity and jumping.

use glam::Vec3;

use crate::config::PlayerConfig;
use crate::entities::{Actor, ActorKind, Facing};
use crate::map::GridMap;
use crate::physics::boxes_intersect;

/// Result of testing an actor's box against the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapContact {
    /// The actor overlaps a wall or has left the map volume.
    pub blocked: bool,
    /// The player's base is resting on a wall's top face.
    pub ground_contact: bool,
}

/// Ground rules for vertical-sensitive actors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundRules {
    /// Hard floor for the actor's base.
    pub level: f32,
    /// How close the base must be to a wall top to stand on it.
    pub tolerance: f32,
}

impl From<&PlayerConfig> for GroundRules {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            level: config.ground_level,
            tolerance: config.landing_tolerance,
        }
    }
}

/// Test an actor against the map volume and the solid cells around it.
pub fn map_contact(actor: &Actor, map: &GridMap, tolerance: f32) -> MapContact {
    let bounds = actor.bounds();
    if !boxes_intersect(&bounds, &map.bounds()) {
        return MapContact {
            blocked: true,
            ground_contact: false,
        };
    }

    let mut contact = MapContact::default();
    let top = map.cell_top();
    for (x, z) in map.solid_neighbors(actor.position) {
        if !boxes_intersect(&bounds, &map.cell_bounds(x, z)) {
            continue;
        }
        if actor.kind.is_vertical_sensitive() && (actor.position.y - top).abs() < tolerance {
            contact.ground_contact = true;
        } else {
            contact.blocked = true;
            if actor.kind == ActorKind::Enemy {
                break;
            }
        }
    }
    contact
}

/// Collision probe used by movement. The player is re-grounded as a side
/// effect when it touches a wall top or sits at the floor.
fn collides(actor: &mut Actor, map: &GridMap, rules: GroundRules) -> bool {
    let contact = map_contact(actor, map, rules.tolerance);
    if actor.kind.is_vertical_sensitive()
        && (contact.ground_contact || actor.position.y <= rules.level)
    {
        actor.grounded = true;
    }
    contact.blocked
}

/// Axes whose move was undone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blocked {
    pub x: bool,
    pub z: bool,
}

/// Move horizontally by `delta`, X first then Z. Each axis is reverted on
/// its own when it collides, so diagonal moves slide along walls.
pub fn slide(actor: &mut Actor, delta: Vec3, map: &GridMap, rules: GroundRules) -> Blocked {
    let before = actor.position;
    let mut blocked = Blocked::default();

    actor.position.x += delta.x;
    if collides(actor, map, rules) {
        actor.position.x = before.x;
        blocked.x = true;
    }

    actor.position.z += delta.z;
    if collides(actor, map, rules) {
        actor.position.z = before.z;
        blocked.z = true;
    }

    blocked
}

/// Face the direction of the requested move. Z wins over X.
pub fn update_facing(actor: &mut Actor, horizontal: i8, vertical: i8) {
    match horizontal {
        1 => actor.facing = Facing::Right,
        -1 => actor.facing = Facing::Left,
        _ => {}
    }
    match vertical {
        1 => actor.facing = Facing::Down,
        -1 => actor.facing = Facing::Up,
        _ => {}
    }
}

/// Start a jump. Only allowed while grounded.
pub fn jump(actor: &mut Actor, impulse: f32) -> bool {
    if !actor.grounded {
        return false;
    }
    actor.velocity.y = impulse;
    actor.grounded = false;
    true
}

/// One tick of gravity, floor clamp and landing on wall tops.
pub fn integrate_vertical(actor: &mut Actor, map: &GridMap, rules: GroundRules, gravity: f32) {
    if !actor.grounded {
        actor.velocity.y -= gravity;
    } else if actor.velocity.y < 0.0 {
        actor.velocity.y = 0.0;
    }

    actor.position.y += actor.velocity.y;

    if actor.position.y < rules.level {
        actor.position.y = rules.level;
        actor.velocity.y = 0.0;
        actor.grounded = true;
        return;
    }

    actor.grounded = false;
    if actor.velocity.y >= 0.0 {
        return;
    }

    // Falling: brushing a wall top counts as ground even without a landing.
    collides(actor, map, rules);

    let bounds = actor.bounds();
    let base = bounds.min.y;
    let landing = map.solid_neighbors(actor.position).find_map(|(x, z)| {
        let cell = map.cell_bounds(x, z);
        let top = cell.max.y;
        (base <= top && base >= top - rules.tolerance && boxes_intersect(&bounds, &cell))
            .then_some(top)
    });

    if let Some(top) = landing {
        actor.position.y = top;
        actor.velocity.y = 0.0;
        actor.grounded = true;
    }
}
