//! Timelines: per-part ordered sequences of authored keyframes.

use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};
use crate::math::{Curve, Spin};
use crate::part::AnimatedObject;

/// One authored keyframe.
///
/// The curve governs interpolation from this key to the *next* one; the spin
/// picks the rotation direction over that same segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineKey {
    /// Timestamp in milliseconds, non-decreasing within a timeline.
    pub time: u32,
    #[serde(default)]
    pub spin: Spin,
    #[serde(default)]
    pub curve: Curve,
    pub object: AnimatedObject,
}

impl TimelineKey {
    pub fn new(time: u32, spin: Spin, curve: Curve, object: AnimatedObject) -> Self {
        Self {
            time,
            spin,
            curve,
            object,
        }
    }
}

/// Ordered keyframes for a single animated part.
///
/// The `id` is the join key referenced by the mainline, not an array
/// position; ids may be sparse. A timeline is homogeneous: either every key
/// is a bone or every key is a sprite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub id: u32,
    pub name: String,
    pub keys: Vec<TimelineKey>,
}

impl Timeline {
    pub fn new(id: u32, name: impl Into<String>, keys: Vec<TimelineKey>) -> Self {
        Self {
            id,
            name: name.into(),
            keys,
        }
    }

    /// Whether this timeline animates a drawable sprite.
    ///
    /// Only meaningful on validated (non-empty, homogeneous) timelines.
    pub fn is_sprite(&self) -> bool {
        self.keys.first().is_some_and(|key| key.object.is_sprite())
    }

    /// Checks the timeline invariants: at least one key, homogeneous kind,
    /// non-decreasing timestamps, finite curve constraints.
    pub fn validate(&self) -> Result<()> {
        let first = match self.keys.first() {
            Some(first) => first,
            None => {
                return Err(AnimationError::EmptyTimeline {
                    timeline: self.id,
                    name: self.name.clone(),
                })
            }
        };

        let sprite = first.object.is_sprite();
        let mut last_time = 0;

        for key in &self.keys {
            if key.object.is_sprite() != sprite {
                return Err(AnimationError::MixedTimeline {
                    timeline: self.id,
                    name: self.name.clone(),
                });
            }
            if key.time < last_time {
                return Err(AnimationError::TimesOutOfOrder {
                    context: format!("timeline {} ('{}')", self.id, self.name),
                    time: last_time,
                    next: key.time,
                });
            }
            last_time = key.time;

            key.curve
                .validate(&format!("timeline {} key at {}ms", self.id, key.time))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{AnimatedPart, Sprite};

    fn bone_key(time: u32) -> TimelineKey {
        TimelineKey::new(
            time,
            Spin::Forward,
            Curve::default(),
            AnimatedObject::Part(AnimatedPart::default()),
        )
    }

    fn sprite_key(time: u32) -> TimelineKey {
        TimelineKey::new(
            time,
            Spin::Forward,
            Curve::default(),
            AnimatedObject::Sprite(Sprite::default()),
        )
    }

    #[test]
    fn validate_accepts_ordered_homogeneous_keys() {
        let timeline = Timeline::new(0, "torso", vec![bone_key(0), bone_key(250), bone_key(250)]);
        assert!(timeline.validate().is_ok());
        assert!(!timeline.is_sprite());
    }

    #[test]
    fn validate_rejects_empty() {
        let timeline = Timeline::new(3, "arm", vec![]);
        assert!(matches!(
            timeline.validate(),
            Err(AnimationError::EmptyTimeline { timeline: 3, .. })
        ));
    }

    #[test]
    fn validate_rejects_mixed_kinds() {
        let timeline = Timeline::new(1, "arm", vec![bone_key(0), sprite_key(100)]);
        assert!(matches!(
            timeline.validate(),
            Err(AnimationError::MixedTimeline { timeline: 1, .. })
        ));
    }

    #[test]
    fn validate_rejects_decreasing_times() {
        let timeline = Timeline::new(2, "arm", vec![bone_key(500), bone_key(100)]);
        assert!(matches!(
            timeline.validate(),
            Err(AnimationError::TimesOutOfOrder { .. })
        ));
    }
}
