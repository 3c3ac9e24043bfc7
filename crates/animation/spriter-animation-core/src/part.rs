//! Animated parts: the mutable per-frame state of bones and sprites.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::project::AssetRef;

/// The 2D affine state of one bone or attachment at one instant.
///
/// Negative scale components encode axis flips. Angles are degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatedPart {
    pub position: Vec2,
    pub scale: Vec2,
    pub angle: f32,
}

impl Default for AnimatedPart {
    /// The identity transform, also used as the synthetic root.
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            angle: 0.0,
        }
    }
}

impl AnimatedPart {
    pub fn new(position: Vec2, scale: Vec2, angle: f32) -> Self {
        Self {
            position,
            scale,
            angle,
        }
    }

    /// Copies all values from `other`.
    pub fn set(&mut self, other: &AnimatedPart) {
        *self = *other;
    }

    /// Maps this part from its parent's coordinate system to a global one.
    ///
    /// The parent must already be fully resolved. A parent axis flip inverts
    /// the child's rotation direction before the parent angle is added.
    pub fn unmap(&mut self, parent: &AnimatedPart) {
        self.angle *= parent.scale.x.signum() * parent.scale.y.signum();
        self.angle += parent.angle;
        self.scale *= parent.scale;
        self.position *= parent.scale;
        self.position = Vec2::from_angle(parent.angle.to_radians()).rotate(self.position);
        self.position += parent.position;
    }

    pub fn is_flipped_x(&self) -> bool {
        self.scale.x < 0.0
    }

    pub fn set_flipped_x(&mut self, flip: bool) {
        if flip != self.is_flipped_x() {
            self.scale.x *= -1.0;
        }
    }

    pub fn is_flipped_y(&self) -> bool {
        self.scale.y < 0.0
    }

    pub fn set_flipped_y(&mut self, flip: bool) {
        if flip != self.is_flipped_y() {
            self.scale.y *= -1.0;
        }
    }

    pub fn set_flipped(&mut self, x: bool, y: bool) {
        self.set_flipped_x(x);
        self.set_flipped_y(y);
    }
}

/// A drawable part: a transform plus the visual properties the renderer needs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub part: AnimatedPart,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Opaque handle into the external atlas/asset collaborator.
    pub asset: Option<AssetRef>,
    /// Draw order key, lower draws first.
    pub z_index: i32,
    /// Runtime flag, reset every frame by the sampler.
    pub visible: bool,
    /// Authored flag, a disabled sprite is never drawn.
    pub enabled: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            part: AnimatedPart::default(),
            alpha: 1.0,
            asset: None,
            z_index: 0,
            visible: true,
            enabled: true,
        }
    }
}

impl Sprite {
    pub fn new(part: AnimatedPart, alpha: f32, asset: Option<AssetRef>, z_index: i32) -> Self {
        Self {
            part,
            alpha,
            asset,
            z_index,
            visible: true,
            enabled: true,
        }
    }

    /// Copies the authored values from `other`, leaving the runtime
    /// `visible`/`enabled` flags alone.
    pub fn set(&mut self, other: &Sprite) {
        self.part.set(&other.part);
        self.alpha = other.alpha;
        self.asset = other.asset;
        self.z_index = other.z_index;
    }
}

/// A bone or a sprite. The sampler branches on this tag exactly once per
/// reference; everything below the tag works on the embedded part.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AnimatedObject {
    Part(AnimatedPart),
    Sprite(Sprite),
}

impl AnimatedObject {
    pub fn part(&self) -> &AnimatedPart {
        match self {
            AnimatedObject::Part(part) => part,
            AnimatedObject::Sprite(sprite) => &sprite.part,
        }
    }

    pub fn part_mut(&mut self) -> &mut AnimatedPart {
        match self {
            AnimatedObject::Part(part) => part,
            AnimatedObject::Sprite(sprite) => &mut sprite.part,
        }
    }

    pub fn is_sprite(&self) -> bool {
        matches!(self, AnimatedObject::Sprite(_))
    }

    pub fn as_sprite(&self) -> Option<&Sprite> {
        match self {
            AnimatedObject::Sprite(sprite) => Some(sprite),
            AnimatedObject::Part(_) => None,
        }
    }

    pub fn as_sprite_mut(&mut self) -> Option<&mut Sprite> {
        match self {
            AnimatedObject::Sprite(sprite) => Some(sprite),
            AnimatedObject::Part(_) => None,
        }
    }

    /// Copies values from `other`. Timeline homogeneity guarantees matching
    /// variants; a mismatch still copies the shared transform.
    pub fn set_from(&mut self, other: &AnimatedObject) {
        match (self, other) {
            (AnimatedObject::Part(part), AnimatedObject::Part(from)) => part.set(from),
            (AnimatedObject::Sprite(sprite), AnimatedObject::Sprite(from)) => sprite.set(from),
            (target, from) => target.part_mut().set(from.part()),
        }
    }

    /// Resolves this object into world space via its resolved parent.
    pub fn unmap(&mut self, parent: &AnimatedPart) {
        self.part_mut().unmap(parent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identity_parent_leaves_child_unchanged() {
        let mut child = AnimatedPart::new(Vec2::new(3.0, -2.0), Vec2::new(2.0, 0.5), 37.0);
        let expected = child;
        child.unmap(&AnimatedPart::default());
        assert_eq!(child, expected);
    }

    #[test]
    fn parent_flip_inverts_child_rotation() {
        let parent = AnimatedPart::new(Vec2::ZERO, Vec2::new(-1.0, 1.0), 0.0);
        let mut child = AnimatedPart::new(Vec2::ZERO, Vec2::ONE, 30.0);
        child.unmap(&parent);
        assert_abs_diff_eq!(child.angle, -30.0, epsilon = 1e-5);
        assert_eq!(child.scale, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn unmap_scales_rotates_then_translates() {
        let parent = AnimatedPart::new(Vec2::new(10.0, 20.0), Vec2::new(2.0, 2.0), 90.0);
        let mut child = AnimatedPart::new(Vec2::new(1.0, 0.0), Vec2::ONE, 0.0);
        child.unmap(&parent);

        // (1,0) scaled to (2,0), rotated 90 degrees to (0,2), translated.
        assert_abs_diff_eq!(child.position.x, 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(child.position.y, 22.0, epsilon = 1e-4);
        assert_abs_diff_eq!(child.angle, 90.0, epsilon = 1e-5);
        assert_eq!(child.scale, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn flip_helpers_toggle_sign_once() {
        let mut part = AnimatedPart::default();
        part.set_flipped_x(true);
        assert!(part.is_flipped_x());
        part.set_flipped_x(true);
        assert!(part.is_flipped_x());
        part.set_flipped(false, true);
        assert!(!part.is_flipped_x());
        assert!(part.is_flipped_y());
    }

    #[test]
    fn sprite_set_keeps_runtime_flags() {
        let mut sprite = Sprite::default();
        sprite.visible = false;

        let mut authored = Sprite::default();
        authored.alpha = 0.25;
        authored.z_index = 7;

        sprite.set(&authored);
        assert_eq!(sprite.alpha, 0.25);
        assert_eq!(sprite.z_index, 7);
        assert!(!sprite.visible);
    }
}
