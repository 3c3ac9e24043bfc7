//! Spriter Animation Core (engine-agnostic)
//!
//! The runtime core of a Spriter-style skeletal animation system: given the
//! validated in-memory model of an authored file (entities, animations,
//! mainline snapshots, timelines, keyframes, curves), it resolves for any
//! point in time the world-space transform, opacity, visibility and draw
//! order of every part. File parsing and rendering are external
//! collaborators; this crate consumes their model and hands back flat,
//! indexable poses.

pub mod animation;
pub mod entity;
pub mod error;
pub mod mainline;
pub mod math;
pub mod part;
pub mod project;
pub mod timeline;

// Re-exports for consumers (parsers and renderers)
pub use animation::{Animation, Transformation};
pub use entity::Entity;
pub use error::{AnimationError, Result};
pub use mainline::{Mainline, MainlineKey, ObjectRef};
pub use math::{Constraints, Curve, CurveType, Spin};
pub use part::{AnimatedObject, AnimatedPart, Sprite};
pub use project::{AssetRef, Project};
pub use timeline::{Timeline, TimelineKey};
