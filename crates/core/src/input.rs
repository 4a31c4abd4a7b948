//! Player intent for one tick.
//!
//! The presentation layer polls its devices and packs the result here; the
//! simulation never sees keys or mice.

use bincode::{Decode, Encode};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Bitflags for held actions plus a world-space aim direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct PlayerInput {
    /// Raw bitfield of pressed inputs
    pub bits: u16,

    /// Where to shoot, from the muzzle. Vertical component is ignored.
    #[bincode(with_serde)]
    pub aim: Vec3,
}

impl PlayerInput {
    // Movement (UP/DOWN run along -Z/+Z)
    pub const UP: u16 = 1 << 0;
    pub const DOWN: u16 = 1 << 1;
    pub const LEFT: u16 = 1 << 2;
    pub const RIGHT: u16 = 1 << 3;

    // Actions
    pub const JUMP: u16 = 1 << 4;
    pub const FIRE: u16 = 1 << 5;

    pub const fn new() -> Self {
        Self {
            bits: 0,
            aim: Vec3::ZERO,
        }
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self {
            bits,
            aim: Vec3::ZERO,
        }
    }

    pub const fn with_aim(bits: u16, aim: Vec3) -> Self {
        Self { bits, aim }
    }

    #[inline]
    pub const fn is_pressed(&self, input: u16) -> bool {
        self.bits & input != 0
    }

    #[inline]
    pub fn set(&mut self, input: u16, pressed: bool) {
        if pressed {
            self.bits |= input;
        } else {
            self.bits &= !input;
        }
    }

    #[inline]
    pub const fn up(&self) -> bool {
        self.is_pressed(Self::UP)
    }

    #[inline]
    pub const fn down(&self) -> bool {
        self.is_pressed(Self::DOWN)
    }

    #[inline]
    pub const fn left(&self) -> bool {
        self.is_pressed(Self::LEFT)
    }

    #[inline]
    pub const fn right(&self) -> bool {
        self.is_pressed(Self::RIGHT)
    }

    #[inline]
    pub const fn jump(&self) -> bool {
        self.is_pressed(Self::JUMP)
    }

    #[inline]
    pub const fn fire(&self) -> bool {
        self.is_pressed(Self::FIRE)
    }

    /// X axis as -1, 0 or 1. RIGHT wins when both are held.
    pub const fn horizontal(&self) -> i8 {
        if self.right() {
            1
        } else if self.left() {
            -1
        } else {
            0
        }
    }

    /// Z axis as -1, 0 or 1. DOWN wins when both are held.
    pub const fn vertical(&self) -> i8 {
        if self.down() {
            1
        } else if self.up() {
            -1
        } else {
            0
        }
    }
}

/// Turn a picking ray into a horizontal aim direction.
///
/// Intersects the ray with the plane `y = muzzle.y` and returns the unit
/// direction from the muzzle to that point. `None` when the ray is parallel
/// to the plane or the hit point is straight above or below the muzzle.
pub fn aim_from_screen_ray(ray_origin: Vec3, ray_dir: Vec3, muzzle: Vec3) -> Option<Vec3> {
    if ray_dir.y.abs() <= f32::EPSILON {
        return None;
    }
    let t = (muzzle.y - ray_origin.y) / ray_dir.y;
    let target = ray_origin + ray_dir * t;
    let flat = Vec3::new(target.x - muzzle.x, 0.0, target.z - muzzle.z);
    let dir = flat.normalize_or_zero();
    (dir != Vec3::ZERO).then_some(dir)
}
