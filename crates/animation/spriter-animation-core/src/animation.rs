//! Animations: playback clock, per-frame sampling and world-space pose.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};
use crate::mainline::{Mainline, MainlineKey, ObjectRef};
use crate::part::{AnimatedObject, AnimatedPart, Sprite};
use crate::project::AssetRef;
use crate::timeline::Timeline;

/// Hook applied to a tweened object after interpolation and before it is
/// unmapped into world space.
pub type Transformation = Box<dyn Fn(&mut AnimatedObject) + Send + Sync>;

fn one() -> f32 {
    1.0
}

/// Pose buffers of a prepared animation instance.
///
/// `slots` runs parallel to the timeline list; `slot_by_id` resolves the
/// authored timeline id (which may be sparse) to a slot.
#[derive(Clone, Debug)]
struct Pose {
    slots: Vec<AnimatedObject>,
    slot_by_id: HashMap<u32, usize>,
    /// Slot indices of sprite timelines, kept in draw order.
    sprite_order: Vec<usize>,
    /// Set when a sprite's z-index moved; the order is re-sorted lazily.
    z_changed: bool,
}

/// A single named animation: a mainline, its timelines and an independent
/// playback clock.
///
/// Constructed once from parsed data via [`Animation::new`] (which validates
/// the cross-reference invariants), then either played in place or cloned.
/// Cloning yields an independent instance: fresh clock, fresh pose buffers,
/// no transformation hooks.
#[derive(Serialize, Deserialize)]
pub struct Animation {
    name: String,
    /// Total duration in milliseconds.
    length: u32,
    looping: bool,

    mainline: Mainline,
    timelines: Vec<Timeline>,

    /// Playback position in milliseconds.
    #[serde(skip)]
    time: f32,
    #[serde(skip, default = "one")]
    speed: f32,
    #[serde(skip, default = "one")]
    alpha: f32,

    /// Synthetic world transform every parentless reference is resolved
    /// against.
    #[serde(skip)]
    root: AnimatedPart,

    #[serde(skip)]
    transformations: HashMap<String, Transformation>,

    #[serde(skip)]
    pose: Option<Pose>,
}

impl Animation {
    /// Builds and validates an animation from parsed data.
    ///
    /// All cross-reference invariants are checked here so that sampling can
    /// assume them: dangling timeline ids or key indices, parents that do
    /// not precede their children, heterogeneous timelines and malformed
    /// curves are construction errors, never sampling errors.
    pub fn new(
        name: impl Into<String>,
        length: u32,
        looping: bool,
        mainline: Mainline,
        timelines: Vec<Timeline>,
    ) -> Result<Self> {
        let animation = Self {
            name: name.into(),
            length,
            looping,
            mainline,
            timelines,
            time: 0.0,
            speed: 1.0,
            alpha: 1.0,
            root: AnimatedPart::default(),
            transformations: HashMap::new(),
            pose: None,
        };
        animation.validate()?;
        Ok(animation)
    }

    /// Re-checks every construction invariant. Useful after deserializing
    /// authored data directly instead of going through [`Animation::new`].
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(AnimationError::ZeroLength {
                animation: self.name.clone(),
            });
        }
        if self.mainline.keys.is_empty() {
            return Err(AnimationError::EmptyMainline {
                animation: self.name.clone(),
            });
        }

        let mut by_id: HashMap<u32, &Timeline> = HashMap::with_capacity(self.timelines.len());
        for timeline in &self.timelines {
            timeline.validate()?;
            if by_id.insert(timeline.id, timeline).is_some() {
                return Err(AnimationError::DuplicateTimeline {
                    timeline: timeline.id,
                });
            }
        }

        let mut last_time = 0;
        for (snapshot, key) in self.mainline.keys.iter().enumerate() {
            if key.time < last_time {
                return Err(AnimationError::TimesOutOfOrder {
                    context: format!("mainline of '{}'", self.name),
                    time: last_time,
                    next: key.time,
                });
            }
            last_time = key.time;

            key.curve
                .validate(&format!("mainline snapshot at {}ms", key.time))?;

            for (reference, object_ref) in key.refs.iter().enumerate() {
                let timeline = by_id.get(&object_ref.timeline).copied().ok_or(
                    AnimationError::TimelineNotFound {
                        snapshot,
                        timeline: object_ref.timeline,
                    },
                )?;

                if object_ref.key >= timeline.keys.len() {
                    return Err(AnimationError::KeyframeNotFound {
                        snapshot,
                        timeline: object_ref.timeline,
                        key: object_ref.key,
                        key_count: timeline.keys.len(),
                    });
                }

                if object_ref.z_index.is_some() != timeline.is_sprite() {
                    return Err(AnimationError::DrawOrderMismatch {
                        snapshot,
                        reference,
                        timeline: object_ref.timeline,
                    });
                }

                if let Some(parent) = object_ref.parent {
                    if parent >= reference {
                        return Err(AnimationError::ParentOutOfOrder {
                            snapshot,
                            reference,
                            parent,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Allocates the pose buffers. Must be called once before [`update`].
    ///
    /// [`update`]: Animation::update
    pub fn prepare(&mut self) {
        let mut slots = Vec::with_capacity(self.timelines.len());
        let mut slot_by_id = HashMap::with_capacity(self.timelines.len());
        let mut sprite_order = Vec::new();

        for (slot, timeline) in self.timelines.iter().enumerate() {
            slot_by_id.insert(timeline.id, slot);
            if timeline.is_sprite() {
                slots.push(AnimatedObject::Sprite(Sprite::default()));
                sprite_order.push(slot);
            } else {
                slots.push(AnimatedObject::Part(AnimatedPart::default()));
            }
        }

        self.pose = Some(Pose {
            slots,
            slot_by_id,
            sprite_order,
            z_changed: true,
        });
    }

    pub fn is_prepared(&self) -> bool {
        self.pose.is_some()
    }

    /// Advances the clock by `delta` milliseconds (scaled by the playback
    /// speed) and recomputes the world-space pose of every referenced part.
    ///
    /// # Panics
    ///
    /// Panics if the animation was never [`prepared`](Animation::prepare);
    /// sampling without pose buffers is a programmer error.
    pub fn update(&mut self, delta: f32) {
        self.set_time(self.time + self.speed * delta);

        let Some(pose) = self.pose.as_mut() else {
            panic!("animation '{}' not prepared", self.name);
        };

        let now = self.time as u32;
        let current = self.mainline.key_before_time(now);

        // Parts absent from this snapshot must drop out instead of keeping a
        // stale pose.
        for slot in &mut pose.slots {
            if let AnimatedObject::Sprite(sprite) = slot {
                sprite.visible = false;
            }
        }

        for object_ref in &current.refs {
            Self::update_object(
                &self.timelines,
                &self.transformations,
                &self.root,
                self.length,
                self.looping,
                current,
                object_ref,
                now,
                pose,
            );
        }
    }

    /// Tweens one reference and resolves it into world space.
    #[allow(clippy::too_many_arguments)]
    fn update_object(
        timelines: &[Timeline],
        transformations: &HashMap<String, Transformation>,
        root: &AnimatedPart,
        length: u32,
        looping: bool,
        current: &MainlineKey,
        object_ref: &ObjectRef,
        now: u32,
        pose: &mut Pose,
    ) {
        let slot = pose.slot_by_id[&object_ref.timeline];
        let timeline = &timelines[slot];
        let key = &timeline.keys[object_ref.key];

        // The parent is resolved already: references are validated to list
        // parents before children, and we process them in order.
        let parent = match object_ref.parent {
            Some(parent) => {
                let parent_slot = pose.slot_by_id[&current.refs[parent].timeline];
                *pose.slots[parent_slot].part()
            }
            None => *root,
        };

        let transform = transformations.get(timeline.name.as_str());

        if object_ref.key + 1 == timeline.keys.len() && !looping {
            // Terminal state of a non-looping timeline: freeze on the last
            // key, no tween.
            let tweened = &mut pose.slots[slot];
            let old_z = tweened.as_sprite().map(|sprite| sprite.z_index);

            tweened.set_from(&key.object);

            if let AnimatedObject::Sprite(sprite) = tweened {
                if let Some(z_index) = object_ref.z_index {
                    sprite.z_index = z_index;
                }
                sprite.visible = true;
                if old_z != Some(sprite.z_index) {
                    pose.z_changed = true;
                }
            }

            let tweened = &mut pose.slots[slot];
            if let Some(transform) = transform {
                transform(tweened);
            }
            tweened.unmap(&parent);
            return;
        }

        let (next_key, time_of_next) = if object_ref.key + 1 == timeline.keys.len() {
            // Looping: wrap to the first key, one animation length later.
            let first = &timeline.keys[0];
            (first, (first.time + length) as f32)
        } else {
            let next = &timeline.keys[object_ref.key + 1];
            (next, next.time as f32)
        };

        let time_diff = time_of_next - key.time as f32;
        // A zero-length segment counts as fully arrived at the next key; no
        // NaN may reach the pose.
        let raw_ratio = if time_diff <= 0.0 {
            1.0
        } else {
            (now as f32 - key.time as f32) / time_diff
        };
        // Snapshot-level easing composes with the per-key easing below.
        let ratio = current.curve.interpolate(0.0, 1.0, raw_ratio);

        let from = &key.object;
        let to = &next_key.object;
        let curve = &key.curve;

        let tweened = &mut pose.slots[slot];
        let part = tweened.part_mut();
        part.angle =
            curve.interpolate_angle(from.part().angle, to.part().angle, ratio, key.spin);
        part.position = curve.interpolate_vec2(from.part().position, to.part().position, ratio);
        part.scale = curve.interpolate_vec2(from.part().scale, to.part().scale, ratio);

        if let AnimatedObject::Sprite(sprite) = tweened {
            if let (Some(from), Some(to)) = (from.as_sprite(), to.as_sprite()) {
                sprite.alpha = curve.interpolate(from.alpha, to.alpha, ratio);
                sprite.asset = from.asset;
            }

            if let Some(z_index) = object_ref.z_index {
                if sprite.z_index != z_index {
                    sprite.z_index = z_index;
                    pose.z_changed = true;
                }
            }
            sprite.visible = true;
        }

        let tweened = &mut pose.slots[slot];
        if let Some(transform) = transform {
            transform(tweened);
        }
        tweened.unmap(&parent);
    }

    /// Rewinds to time zero and samples the first pose.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.update(0.0);
    }

    /// Sprites in draw order. Re-sorts only when a z-index changed since the
    /// last call.
    ///
    /// # Panics
    ///
    /// Panics if the animation is not prepared.
    pub fn drawables(&mut self) -> impl Iterator<Item = &Sprite> {
        let Some(pose) = self.pose.as_mut() else {
            panic!("animation '{}' not prepared", self.name);
        };

        let Pose {
            slots,
            sprite_order,
            z_changed,
            ..
        } = pose;

        if *z_changed {
            sprite_order.sort_by_key(|&slot| slots[slot].as_sprite().map_or(0, |s| s.z_index));
            *z_changed = false;
        }

        let slots: &[AnimatedObject] = slots;
        sprite_order
            .iter()
            .filter_map(move |&slot| slots[slot].as_sprite())
    }

    /// Resolved pose of the part animated by the given timeline id.
    pub fn object(&self, timeline: u32) -> Option<&AnimatedObject> {
        let pose = self.pose.as_ref()?;
        pose.slot_by_id
            .get(&timeline)
            .map(|&slot| &pose.slots[slot])
    }

    /// Resolved pose of the part animated by the given timeline id, mutable
    /// so gameplay can suppress a sprite via its `enabled` flag. The sampler
    /// overwrites everything else on the next update.
    pub fn object_mut(&mut self, timeline: u32) -> Option<&mut AnimatedObject> {
        let pose = self.pose.as_mut()?;
        let slot = *pose.slot_by_id.get(&timeline)?;
        Some(&mut pose.slots[slot])
    }

    /// Resolved pose of the part animated by the timeline with this name.
    pub fn object_by_name(&self, name: &str) -> Option<&AnimatedObject> {
        let pose = self.pose.as_ref()?;
        self.timelines
            .iter()
            .position(|timeline| timeline.name == name)
            .map(|slot| &pose.slots[slot])
    }

    /// Registers a hook applied to the named timeline's tweened object every
    /// frame, after interpolation and before unmapping.
    pub fn add_transformation(
        &mut self,
        name: impl Into<String>,
        transformation: impl Fn(&mut AnimatedObject) + Send + Sync + 'static,
    ) {
        self.transformations
            .insert(name.into(), Box::new(transformation));
    }

    /// Rebinds the asset of every sprite key on timelines with this name.
    pub fn set_sprite_asset(&mut self, name: &str, asset: AssetRef) {
        for timeline in &mut self.timelines {
            if timeline.name != name {
                continue;
            }
            for key in &mut timeline.keys {
                if let AnimatedObject::Sprite(sprite) = &mut key.object {
                    sprite.asset = Some(asset);
                }
            }
        }
    }

    /// Opacity a renderer should draw this sprite with, folding in the
    /// animation-level alpha.
    pub fn resolved_alpha(&self, sprite: &Sprite) -> f32 {
        sprite.alpha * self.alpha
    }

    pub fn root(&self) -> &AnimatedPart {
        &self.root
    }

    /// The synthetic root every parentless part is resolved against; mutate
    /// it to position or flip a whole instance before the next update.
    pub fn root_mut(&mut self) -> &mut AnimatedPart {
        &mut self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mainline(&self) -> &Mainline {
        &self.mainline
    }

    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    /// Current playback position in milliseconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Moves the clock. Looping animations wrap into `[0, length)` no matter
    /// how far the input overshoots; non-looping animations clamp to
    /// `[0, length]`.
    pub fn set_time(&mut self, mut time: f32) {
        let length = self.length as f32;
        if length <= 0.0 {
            self.time = 0.0;
            return;
        }

        if self.looping {
            while time < 0.0 {
                time += length;
            }
            while time >= length {
                time -= length;
            }
        } else {
            time = time.clamp(0.0, length);
        }

        self.time = time;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    /// Total duration in milliseconds.
    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// True once a non-looping animation has reached its end boundary.
    pub fn is_done(&self) -> bool {
        self.time == self.length as f32
    }
}

impl Clone for Animation {
    /// Deep-copies the authored data into an independent playback instance:
    /// the clock and controls reset, transformation hooks are not carried
    /// over, and the clone is prepared exactly when the source was.
    fn clone(&self) -> Self {
        let mut copy = Self {
            name: self.name.clone(),
            length: self.length,
            looping: self.looping,
            mainline: self.mainline.clone(),
            timelines: self.timelines.clone(),
            time: 0.0,
            speed: 1.0,
            alpha: 1.0,
            root: AnimatedPart::default(),
            transformations: HashMap::new(),
            pose: None,
        };
        if self.is_prepared() {
            copy.prepare();
        }
        copy
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("name", &self.name)
            .field("length", &self.length)
            .field("looping", &self.looping)
            .field("timelines", &self.timelines.len())
            .field("time", &self.time)
            .field("prepared", &self.is_prepared())
            .finish()
    }
}
