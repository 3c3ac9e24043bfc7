//! The mainline: per-instant snapshots of which keyframes and which
//! parent-child structure are active.

use serde::{Deserialize, Serialize};

use crate::math::Curve;

/// A pointer into a timeline at one mainline snapshot.
///
/// `parent` is an index into the owning snapshot's reference arena, which
/// keeps the hierarchy a flat array: cloning a snapshot is a plain vector
/// copy, and the parent-precedes-child invariant (`parent <` own index,
/// validated at animation construction) makes cycles unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Timeline id (join key, not an array position).
    pub timeline: u32,
    /// Keyframe index within that timeline.
    pub key: usize,
    /// Arena index of the parent reference within the same snapshot.
    #[serde(default)]
    pub parent: Option<usize>,
    /// Draw order, present exactly on references to sprite timelines.
    #[serde(default)]
    pub z_index: Option<i32>,
}

impl ObjectRef {
    /// A reference to a bone timeline.
    pub fn bone(timeline: u32, key: usize, parent: Option<usize>) -> Self {
        Self {
            timeline,
            key,
            parent,
            z_index: None,
        }
    }

    /// A reference to a sprite timeline, carrying its draw order.
    pub fn sprite(timeline: u32, key: usize, parent: Option<usize>, z_index: i32) -> Self {
        Self {
            timeline,
            key,
            parent,
            z_index: Some(z_index),
        }
    }
}

/// One mainline snapshot: the set of references active at `time`, plus the
/// curve governing timing across the whole snapshot transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MainlineKey {
    /// Timestamp in milliseconds, non-decreasing within the mainline.
    pub time: u32,
    #[serde(default)]
    pub curve: Curve,
    pub refs: Vec<ObjectRef>,
}

impl MainlineKey {
    pub fn new(time: u32, curve: Curve, refs: Vec<ObjectRef>) -> Self {
        Self { time, curve, refs }
    }
}

/// The ordered snapshot sequence of one animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mainline {
    pub keys: Vec<MainlineKey>,
}

impl Mainline {
    pub fn new(keys: Vec<MainlineKey>) -> Self {
        Self { keys }
    }

    /// Returns the snapshot with the greatest `time <=` the given time,
    /// ties broken toward the later snapshot. A time before the first
    /// snapshot wraps to the last one.
    ///
    /// The mainline must hold at least one key (validated at animation
    /// construction).
    pub fn key_before_time(&self, time: u32) -> &MainlineKey {
        let mut found = &self.keys[self.keys.len() - 1];

        for key in &self.keys {
            if key.time > time {
                break;
            }
            found = key;
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mainline(times: &[u32]) -> Mainline {
        Mainline::new(
            times
                .iter()
                .map(|&time| MainlineKey::new(time, Curve::default(), vec![]))
                .collect(),
        )
    }

    #[test]
    fn picks_greatest_key_at_or_before_time() {
        let mainline = mainline(&[0, 100, 400]);
        assert_eq!(mainline.key_before_time(0).time, 0);
        assert_eq!(mainline.key_before_time(99).time, 0);
        assert_eq!(mainline.key_before_time(100).time, 100);
        assert_eq!(mainline.key_before_time(250).time, 100);
        assert_eq!(mainline.key_before_time(400).time, 400);
        assert_eq!(mainline.key_before_time(9999).time, 400);
    }

    #[test]
    fn equal_times_break_toward_later_snapshot() {
        let keys = vec![
            MainlineKey::new(100, Curve::default(), vec![ObjectRef::bone(0, 0, None)]),
            MainlineKey::new(100, Curve::default(), vec![ObjectRef::bone(1, 0, None)]),
        ];
        let mainline = Mainline::new(keys);
        assert_eq!(mainline.key_before_time(100).refs[0].timeline, 1);
    }

    #[test]
    fn time_before_first_key_wraps_to_last() {
        let mainline = mainline(&[200, 500]);
        assert_eq!(mainline.key_before_time(50).time, 500);
    }

    #[test]
    fn snapshot_clone_is_independent() {
        let key = MainlineKey::new(
            0,
            Curve::default(),
            vec![
                ObjectRef::bone(0, 0, None),
                ObjectRef::sprite(1, 0, Some(0), 3),
            ],
        );
        let mut copy = key.clone();
        copy.refs[1].z_index = Some(9);
        assert_eq!(key.refs[1].z_index, Some(3));
    }
}
