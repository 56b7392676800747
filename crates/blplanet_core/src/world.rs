//! World container for entities
//!
//! The World owns the entities of a running demo and the two-body orbit state
//! that drives the celestial ones.

use slotmap::{new_key_type, SlotMap};

use blplanet_physics::{BodyRole, OrbitState, PhysicsConfig};

use crate::asset_cache::AssetHandle;
use crate::entity::{Entity, Transform};

new_key_type! {
    /// Generational key for an entity in a [`World`]
    pub struct EntityKey;
}

/// The demo world containing all entities
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
    /// Orbit of the two bodies (None = static scene)
    orbit: Option<OrbitState>,
    /// Environment map, once loaded
    environment: Option<AssetHandle>,
    /// Set after the first non-finite orbit warning
    reported_non_finite: bool,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            orbit: None,
            environment: None,
            reported_non_finite: false,
        }
    }

    /// Enable orbital motion for this world
    pub fn with_orbit(mut self, orbit: OrbitState) -> Self {
        self.orbit = Some(orbit);
        self
    }

    /// Current orbit state (if enabled)
    pub fn orbit(&self) -> Option<&OrbitState> {
        self.orbit.as_ref()
    }

    pub fn environment(&self) -> Option<&AssetHandle> {
        self.environment.as_ref()
    }

    pub fn set_environment(&mut self, handle: AssetHandle) {
        self.environment = Some(handle);
    }

    /// Add an entity to the world, returning its key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Get a reference to an entity by key
    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable reference to an entity by key
    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find the first entity with the given name
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        self.entities
            .iter()
            .find(|(_, entity)| entity.name.as_deref() == Some(name))
    }

    /// Find the entity bound to an orbit body
    pub fn body_entity(&self, role: BodyRole) -> Option<EntityKey> {
        self.entities
            .iter()
            .find(|(_, entity)| entity.role == Some(role))
            .map(|(key, _)| key)
    }

    /// Get the number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over keys and entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// Advance the orbit by `dt` simulated seconds and sync entity transforms
    ///
    /// Non-finite positions are reported once and carried on.
    pub fn update(&mut self, dt: f64, physics: &PhysicsConfig) {
        let Some(orbit) = self.orbit.as_ref() else {
            return;
        };

        let next = orbit.advance(dt, physics);
        if !next.satellite.position.is_finite() && !self.reported_non_finite {
            log::warn!(
                "Orbit state is no longer finite (separation {}); the step size is too large",
                next.separation()
            );
            self.reported_non_finite = true;
        }
        self.orbit = Some(next);

        for (_, entity) in self.entities.iter_mut() {
            if let Some(role) = entity.role {
                let body = next.body(role);
                entity.set_transform(Transform {
                    position: body.position,
                    spin: body.spin,
                });
            }
        }
    }

    /// Check if any entity has pending changes
    pub fn has_dirty_entities(&self) -> bool {
        self.entities.values().any(Entity::is_dirty)
    }

    /// Clear dirty flags on every entity
    pub fn clear_all_dirty(&mut self) {
        for entity in self.entities.values_mut() {
            entity.clear_dirty();
        }
    }
}
