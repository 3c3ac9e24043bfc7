//! Projects: the registry of entities produced by the parsing collaborator.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{AnimationError, Result};

/// Opaque handle to a drawable managed by the external atlas/asset
/// collaborator, addressed the way the authored format does: a folder id
/// and a file id within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    pub folder: u32,
    pub file: u32,
}

impl AssetRef {
    pub fn new(folder: u32, file: u32) -> Self {
        Self { folder, file }
    }

    /// Packs folder and file into a single lookup key.
    pub fn key(&self) -> u64 {
        ((self.folder as u64) << 32) | self.file as u64
    }
}

/// An authored project: every entity of one animation file.
///
/// The project is the shared immutable source; playback goes through
/// [`Project::instantiate`], which hands out deep copies with independent
/// clocks and pose buffers.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Project {
    entities: Vec<Entity>,
}

impl Project {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Borrows the named source entity for inspection.
    pub fn entity(&self, name: &str) -> Result<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.name() == name)
            .ok_or_else(|| AnimationError::EntityNotFound {
                name: name.to_string(),
            })
    }

    /// Deep-copies the named entity into an independent playable instance.
    pub fn instantiate(&self, name: &str) -> Result<Entity> {
        self.entity(name).cloned()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}
