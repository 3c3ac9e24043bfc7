//! Entities: named collections of animations for one game object.

use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::error::{AnimationError, Result};
use crate::project::AssetRef;

/// A set of animations under a common name, usually one per game object
/// kind. Cloning an entity deep-copies every animation, so independent game
/// instances animate independently.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entity {
    name: String,
    animations: Vec<Animation>,
}

impl Entity {
    pub fn new(name: impl Into<String>, animations: Vec<Animation>) -> Self {
        Self {
            name: name.into(),
            animations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn animations_mut(&mut self) -> &mut [Animation] {
        &mut self.animations
    }

    /// Animation by index.
    pub fn animation(&self, index: usize) -> Option<&Animation> {
        self.animations.get(index)
    }

    pub fn animation_mut(&mut self, index: usize) -> Option<&mut Animation> {
        self.animations.get_mut(index)
    }

    /// Animation by name.
    pub fn animation_by_name(&self, name: &str) -> Result<&Animation> {
        self.animations
            .iter()
            .find(|animation| animation.name() == name)
            .ok_or_else(|| AnimationError::AnimationNotFound {
                entity: self.name.clone(),
                name: name.to_string(),
            })
    }

    pub fn animation_by_name_mut(&mut self, name: &str) -> Result<&mut Animation> {
        // Split lookup to keep the error construction out of the borrow.
        let index = self
            .animations
            .iter()
            .position(|animation| animation.name() == name)
            .ok_or_else(|| AnimationError::AnimationNotFound {
                entity: self.name.clone(),
                name: name.to_string(),
            })?;
        Ok(&mut self.animations[index])
    }

    /// Index of the named animation, if present.
    pub fn animation_index(&self, name: &str) -> Option<usize> {
        self.animations
            .iter()
            .position(|animation| animation.name() == name)
    }

    /// Rebinds the asset of the named sprite in every animation and
    /// timeline.
    pub fn set_sprite_asset(&mut self, name: &str, asset: AssetRef) {
        for animation in &mut self.animations {
            animation.set_sprite_asset(name, asset);
        }
    }

    /// Sets the alpha multiplier on every animation.
    pub fn set_alpha(&mut self, alpha: f32) {
        for animation in &mut self.animations {
            animation.set_alpha(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mainline::{Mainline, MainlineKey};
    use crate::math::Curve;

    fn entity() -> Entity {
        let mainline = Mainline::new(vec![MainlineKey::new(0, Curve::default(), vec![])]);
        let idle = Animation::new("idle", 500, true, mainline.clone(), vec![]).unwrap();
        let run = Animation::new("run", 700, true, mainline, vec![]).unwrap();
        Entity::new("hero", vec![idle, run])
    }

    #[test]
    fn lookup_by_name_and_index() {
        let entity = entity();
        assert_eq!(entity.animation_by_name("run").unwrap().length(), 700);
        assert_eq!(entity.animation(0).unwrap().name(), "idle");
        assert_eq!(entity.animation_index("run"), Some(1));
        assert_eq!(entity.animation_index("swim"), None);
    }

    #[test]
    fn missing_animation_is_an_error() {
        let entity = entity();
        assert!(matches!(
            entity.animation_by_name("swim"),
            Err(AnimationError::AnimationNotFound { .. })
        ));
    }

    #[test]
    fn set_alpha_fans_out() {
        let mut entity = entity();
        entity.set_alpha(0.5);
        assert!(entity.animations().iter().all(|a| a.alpha() == 0.5));
    }
}
