//! Entity and Material types
//!
//! An Entity is one drawable element of a demo: a textured sphere for a body,
//! or a loaded model.

use bitflags::bitflags;
use blplanet_math::Vec3;
use blplanet_physics::BodyRole;

use crate::asset_cache::AssetHandle;

bitflags! {
    /// Flags indicating which parts of an entity have changed since the
    /// renderer last consumed it
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Position or spin has changed
        const TRANSFORM = 1 << 0;
        /// Mesh (or its model handle) has changed
        const MESH = 1 << 1;
        /// A texture slot has changed
        const MATERIAL = 1 << 2;
        /// All flags set - entity needs full rebuild
        const ALL = Self::TRANSFORM.bits() | Self::MESH.bits() | Self::MATERIAL.bits();
    }
}

/// Geometry of an entity
#[derive(Clone, Debug, PartialEq)]
pub enum Mesh {
    /// A sphere of the given radius
    Sphere { radius: f64 },
    /// A loaded model; `None` until the model asset arrives
    Model { handle: Option<AssetHandle> },
}

/// Placement of an entity
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation about +Y in radians
    pub spin: f64,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self { position, spin: 0.0 }
    }
}

/// Texture slot of a [`Material`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Diffuse,
    Normal,
}

/// Texture handles of an entity
///
/// A slot stays `None` while its texture loads and forever if the load fails.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    pub diffuse: Option<AssetHandle>,
    pub normal: Option<AssetHandle>,
}

impl Material {
    pub fn get(&self, slot: TextureSlot) -> Option<&AssetHandle> {
        match slot {
            TextureSlot::Diffuse => self.diffuse.as_ref(),
            TextureSlot::Normal => self.normal.as_ref(),
        }
    }

    pub fn set(&mut self, slot: TextureSlot, handle: AssetHandle) {
        match slot {
            TextureSlot::Diffuse => self.diffuse = Some(handle),
            TextureSlot::Normal => self.normal = Some(handle),
        }
    }
}

/// An element of the world
///
/// Each entity has:
/// - An optional name (for lookup by name)
/// - A mesh, transform and material
/// - The body role it mirrors, if it is a celestial body
/// - Dirty flags (for change tracking)
#[derive(Clone, Debug)]
pub struct Entity {
    pub name: Option<String>,
    pub mesh: Mesh,
    pub transform: Transform,
    pub material: Material,
    /// Which orbit body drives this entity's transform
    pub role: Option<BodyRole>,
    dirty: DirtyFlags,
}

impl Entity {
    /// Create a new entity with the given mesh
    pub fn new(mesh: Mesh) -> Self {
        Self {
            name: None,
            mesh,
            transform: Transform::default(),
            material: Material::default(),
            role: None,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Set the name of this entity (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Bind this entity to an orbit body
    pub fn with_role(mut self, role: BodyRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Whether the entity has geometry to draw
    ///
    /// Models are hidden until their asset has been attached.
    pub fn is_visible(&self) -> bool {
        match &self.mesh {
            Mesh::Sphere { .. } => true,
            Mesh::Model { handle } => handle.is_some(),
        }
    }

    /// Radius used for instancing; models report 1
    pub fn radius(&self) -> f64 {
        match self.mesh {
            Mesh::Sphere { radius } => radius,
            Mesh::Model { .. } => 1.0,
        }
    }

    // --- Dirty tracking methods ---

    /// Check if this entity has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this entity as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }

    /// Set the transform and mark it as dirty
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Fill a texture slot and mark the material as dirty
    pub fn attach_texture(&mut self, slot: TextureSlot, handle: AssetHandle) {
        self.material.set(slot, handle);
        self.mark_dirty(DirtyFlags::MATERIAL);
    }

    /// Attach a loaded model and mark the mesh as dirty
    ///
    /// Has no effect on sphere meshes.
    pub fn attach_model(&mut self, model: AssetHandle) {
        if let Mesh::Model { handle } = &mut self.mesh {
            *handle = Some(model);
            self.mark_dirty(DirtyFlags::MESH);
        }
    }
}
