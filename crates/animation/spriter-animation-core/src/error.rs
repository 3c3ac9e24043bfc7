//! Error types for the animation core.

use serde::{Deserialize, Serialize};

/// Errors surfaced while building or looking up animation data.
///
/// Everything here is fatal for the operation that produced it: malformed
/// authored data is rejected when the model is constructed, never patched
/// over at sample time.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// Entity lookup by name failed
    #[error("entity with name '{name}' could not be found")]
    EntityNotFound { name: String },

    /// Animation lookup by name failed
    #[error("animation '{name}' could not be found in entity '{entity}'")]
    AnimationNotFound { entity: String, name: String },

    /// A mainline reference points to a timeline id that does not exist
    #[error("reference in snapshot {snapshot} points to unknown timeline {timeline}")]
    TimelineNotFound { snapshot: usize, timeline: u32 },

    /// A mainline reference points outside a timeline's key sequence
    #[error("reference in snapshot {snapshot} points to key {key} of timeline {timeline} which has {key_count} keys")]
    KeyframeNotFound {
        snapshot: usize,
        timeline: u32,
        key: usize,
        key_count: usize,
    },

    /// A reference's parent does not precede it in its snapshot
    #[error("reference {reference} in snapshot {snapshot} has parent {parent}, parents must precede children")]
    ParentOutOfOrder {
        snapshot: usize,
        reference: usize,
        parent: usize,
    },

    /// A drawable reference is missing its draw order, or a bone reference has one
    #[error("reference {reference} in snapshot {snapshot} disagrees with timeline {timeline} about being drawable")]
    DrawOrderMismatch {
        snapshot: usize,
        reference: usize,
        timeline: u32,
    },

    /// A timeline has no keys
    #[error("timeline {timeline} ('{name}') has no keys")]
    EmptyTimeline { timeline: u32, name: String },

    /// A timeline mixes plain parts and sprites
    #[error("timeline {timeline} ('{name}') mixes bone and sprite keys")]
    MixedTimeline { timeline: u32, name: String },

    /// Key or snapshot times are not in order
    #[error("{context}: time {time} comes after {next}")]
    TimesOutOfOrder {
        context: String,
        time: u32,
        next: u32,
    },

    /// A curve carries non-finite constraints
    #[error("{context}: curve constraints must be finite")]
    MalformedCurve { context: String },

    /// Two timelines claim the same id
    #[error("duplicate timeline id {timeline}")]
    DuplicateTimeline { timeline: u32 },

    /// An animation's mainline has no snapshots
    #[error("animation '{animation}' has an empty mainline")]
    EmptyMainline { animation: String },

    /// An animation must span a positive duration
    #[error("animation '{animation}' must be longer than 0 ms")]
    ZeroLength { animation: String },
}

/// Animation core result type.
pub type Result<T> = core::result::Result<T, AnimationError>;
