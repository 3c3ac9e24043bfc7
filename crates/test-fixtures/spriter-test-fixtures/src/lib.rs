//! Shared builders for animation-core tests and benches.
//!
//! Everything here constructs small, hand-checkable object graphs; the
//! canned animations double as documentation of the model's shape.

use glam::Vec2;
use spriter_animation_core::{
    AnimatedObject, AnimatedPart, Animation, AssetRef, Curve, Mainline, MainlineKey, ObjectRef,
    Spin, Sprite, Timeline, TimelineKey,
};

/// A bone snapshot at the given position and angle, unit scale.
pub fn bone(position: (f32, f32), angle: f32) -> AnimatedObject {
    AnimatedObject::Part(AnimatedPart::new(
        Vec2::new(position.0, position.1),
        Vec2::ONE,
        angle,
    ))
}

/// A sprite snapshot at the given position with the given alpha.
pub fn sprite(position: (f32, f32), alpha: f32, asset: AssetRef) -> AnimatedObject {
    AnimatedObject::Sprite(Sprite::new(
        AnimatedPart::new(Vec2::new(position.0, position.1), Vec2::ONE, 0.0),
        alpha,
        Some(asset),
        0,
    ))
}

/// A keyframe with forward spin and a linear curve.
pub fn key(time: u32, object: AnimatedObject) -> TimelineKey {
    TimelineKey::new(time, Spin::Forward, Curve::default(), object)
}

pub fn timeline(id: u32, name: &str, keys: Vec<TimelineKey>) -> Timeline {
    Timeline::new(id, name, keys)
}

pub fn snapshot(time: u32, refs: Vec<ObjectRef>) -> MainlineKey {
    MainlineKey::new(time, Curve::default(), refs)
}

/// One bone swinging from 0 to 90 degrees while moving 100 units right.
///
/// Length 1000ms, keys and snapshots at 0 and 500ms, so the second half of a
/// looping playback tweens back toward the wrapped first key. The keyframe
/// curve of the first key is configurable to exercise curve families through
/// the full sampling path.
pub fn single_bone(looping: bool, curve: Curve) -> Animation {
    let keys = vec![
        TimelineKey::new(0, Spin::Forward, curve, bone((0.0, 0.0), 0.0)),
        key(500, bone((100.0, 0.0), 90.0)),
    ];
    let timelines = vec![timeline(0, "bone", keys)];
    let mainline = Mainline::new(vec![
        snapshot(0, vec![ObjectRef::bone(0, 0, None)]),
        snapshot(500, vec![ObjectRef::bone(0, 1, None)]),
    ]);

    Animation::new("swing", 1000, looping, mainline, timelines).unwrap()
}

/// A two-bone chain (torso -> arm) with a sprite on each bone.
///
/// The torso rotates from 0 to 90 degrees over the first 500ms; the arm and
/// both sprites are static relative to their parents, which makes world
/// positions easy to compute by hand. Length 1000ms.
pub fn skeleton(looping: bool) -> Animation {
    let torso = timeline(
        0,
        "torso",
        vec![
            key(0, bone((0.0, 10.0), 0.0)),
            key(500, bone((0.0, 10.0), 90.0)),
        ],
    );
    let arm = timeline(
        1,
        "arm",
        vec![
            key(0, bone((20.0, 0.0), 0.0)),
            key(500, bone((20.0, 0.0), 0.0)),
        ],
    );
    let body = timeline(
        2,
        "body",
        vec![
            key(0, sprite((0.0, 0.0), 1.0, AssetRef::new(0, 0))),
            key(500, sprite((0.0, 0.0), 1.0, AssetRef::new(0, 0))),
        ],
    );
    let hand = timeline(
        3,
        "hand",
        vec![
            key(0, sprite((5.0, 0.0), 1.0, AssetRef::new(0, 1))),
            key(500, sprite((5.0, 0.0), 0.5, AssetRef::new(0, 1))),
        ],
    );

    let refs_at = |key_index: usize| {
        vec![
            ObjectRef::bone(0, key_index, None),
            ObjectRef::bone(1, key_index, Some(0)),
            ObjectRef::sprite(2, key_index, Some(0), 0),
            ObjectRef::sprite(3, key_index, Some(1), 1),
        ]
    };
    let mainline = Mainline::new(vec![snapshot(0, refs_at(0)), snapshot(500, refs_at(1))]);

    Animation::new("wave", 1000, looping, mainline, vec![torso, arm, body, hand]).unwrap()
}
