//! Scene serialization
//!
//! A [`Scene`] is loaded from a RON file and describes one demo: the two
//! celestial bodies with their textures, any models, and an optional
//! environment map. [`Scene::instantiate`] turns it into a [`World`] plus the
//! list of assets that still have to be loaded.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use blplanet_math::Vec3;
use blplanet_physics::{
    BodyRole, CelestialBody, OrbitState, DEFAULT_MASS, DEFAULT_ORBITAL_RATE, DEFAULT_RADIUS,
    DEFAULT_ROTATION_RATE,
};

use crate::assets::AssetKind;
use crate::entity::{Entity, Mesh, TextureSlot, Transform};
use crate::world::{EntityKey, World};

fn default_mass() -> f64 {
    DEFAULT_MASS
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

fn default_rotation_rate() -> f64 {
    DEFAULT_ROTATION_RATE
}

fn default_orbital_rate() -> f64 {
    DEFAULT_ORBITAL_RATE
}

fn default_required() -> bool {
    true
}

/// Texture paths of a body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureSet {
    #[serde(default)]
    pub diffuse: Option<String>,
    #[serde(default)]
    pub normal: Option<String>,
}

/// A celestial body as written in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    pub name: String,
    pub role: BodyRole,
    pub position: Vec3,
    /// Initial velocity; circular orbit velocity when omitted
    #[serde(default)]
    pub velocity: Option<Vec3>,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Spin rate in rad/s
    #[serde(default = "default_rotation_rate")]
    pub rotation_rate: f64,
    /// Rate of the kinematic orbit in rad/s
    #[serde(default = "default_orbital_rate")]
    pub orbital_rate: f64,
    #[serde(default)]
    pub textures: TextureSet,
}

impl BodyTemplate {
    /// Create a template with default mass, radius and rates
    pub fn new(name: impl Into<String>, role: BodyRole, position: Vec3) -> Self {
        Self {
            name: name.into(),
            role,
            position,
            velocity: None,
            mass: DEFAULT_MASS,
            radius: DEFAULT_RADIUS,
            rotation_rate: DEFAULT_ROTATION_RATE,
            orbital_rate: DEFAULT_ORBITAL_RATE,
            textures: TextureSet::default(),
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_rates(mut self, rotation_rate: f64, orbital_rate: f64) -> Self {
        self.rotation_rate = rotation_rate;
        self.orbital_rate = orbital_rate;
        self
    }

    pub fn with_textures(mut self, diffuse: Option<&str>, normal: Option<&str>) -> Self {
        self.textures = TextureSet {
            diffuse: diffuse.map(str::to_string),
            normal: normal.map(str::to_string),
        };
        self
    }

    /// Physics body described by this template
    pub fn to_body(&self) -> CelestialBody {
        let body = CelestialBody::new(self.position)
            .with_mass(self.mass)
            .with_radius(self.radius)
            .with_rotation_rate(self.rotation_rate)
            .with_orbital_rate(self.orbital_rate);
        match self.velocity {
            Some(velocity) => body.with_velocity(velocity),
            None => body,
        }
    }
}

/// A model as written in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTemplate {
    pub name: String,
    pub path: String,
    /// Whether the demo waits for this model before running
    #[serde(default = "default_required")]
    pub required: bool,
}

/// A serializable demo scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Either empty or exactly one primary and one satellite
    #[serde(default)]
    pub bodies: Vec<BodyTemplate>,
    #[serde(default)]
    pub models: Vec<ModelTemplate>,
    /// Environment map path
    #[serde(default)]
    pub environment: Option<String>,
}

/// What a finished asset load is attached to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetTarget {
    Texture { entity: EntityKey, slot: TextureSlot },
    Model { entity: EntityKey },
    Environment,
}

/// An asset the instantiated world is waiting for
#[derive(Clone, Debug, PartialEq)]
pub struct AssetRequest {
    pub path: PathBuf,
    pub kind: AssetKind,
    pub target: AssetTarget,
    /// Whether the frame loop stays in `Loading` until this completes
    pub required: bool,
}

/// A scene turned into a world plus its outstanding asset loads
pub struct SceneInstance {
    pub world: World,
    pub requests: Vec<AssetRequest>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: Vec::new(),
            models: Vec::new(),
            environment: None,
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn with_body(mut self, body: BodyTemplate) -> Self {
        self.bodies.push(body);
        self
    }

    pub fn with_model(mut self, name: impl Into<String>, path: impl Into<String>, required: bool) -> Self {
        self.models.push(ModelTemplate {
            name: name.into(),
            path: path.into(),
            required,
        });
        self
    }

    pub fn with_environment(mut self, path: impl Into<String>) -> Self {
        self.environment = Some(path.into());
        self
    }

    fn body(&self, role: BodyRole) -> Option<&BodyTemplate> {
        self.bodies.iter().find(|b| b.role == role)
    }

    /// Check the scene for structural errors
    pub fn validate(&self) -> Result<(), SceneError> {
        if !self.bodies.is_empty() {
            for role in [BodyRole::Primary, BodyRole::Satellite] {
                let count = self.bodies.iter().filter(|b| b.role == role).count();
                if count != 1 {
                    return Err(SceneError::Invalid(format!(
                        "scene '{}' needs exactly one {} body, found {}",
                        self.name,
                        role.label(),
                        count
                    )));
                }
            }
        }

        for body in &self.bodies {
            if !(body.mass > 0.0 && body.mass.is_finite()) {
                return Err(SceneError::Invalid(format!(
                    "body '{}' has non-positive mass {}",
                    body.name, body.mass
                )));
            }
            if !(body.radius > 0.0 && body.radius.is_finite()) {
                return Err(SceneError::Invalid(format!(
                    "body '{}' has non-positive radius {}",
                    body.name, body.radius
                )));
            }
        }

        Ok(())
    }

    /// Build the world and collect the asset loads it needs
    pub fn instantiate(&self) -> Result<SceneInstance, SceneError> {
        self.validate()?;

        let mut world = match (self.body(BodyRole::Primary), self.body(BodyRole::Satellite)) {
            (Some(primary), Some(satellite)) => {
                World::new().with_orbit(OrbitState::new(primary.to_body(), satellite.to_body()))
            }
            _ => World::new(),
        };
        let mut requests = Vec::new();

        for template in &self.bodies {
            let entity = world.add_entity(
                Entity::new(Mesh::Sphere {
                    radius: template.radius,
                })
                .with_name(template.name.clone())
                .with_role(template.role)
                .with_transform(Transform::at(template.position)),
            );

            let slots = [
                (TextureSlot::Diffuse, &template.textures.diffuse),
                (TextureSlot::Normal, &template.textures.normal),
            ];
            for (slot, path) in slots {
                if let Some(path) = path {
                    requests.push(AssetRequest {
                        path: PathBuf::from(path),
                        kind: AssetKind::Texture,
                        target: AssetTarget::Texture { entity, slot },
                        required: false,
                    });
                }
            }
        }

        for template in &self.models {
            let entity = world.add_entity(
                Entity::new(Mesh::Model { handle: None }).with_name(template.name.clone()),
            );
            requests.push(AssetRequest {
                path: PathBuf::from(&template.path),
                kind: AssetKind::Model,
                target: AssetTarget::Model { entity },
                required: template.required,
            });
        }

        if let Some(path) = &self.environment {
            requests.push(AssetRequest {
                path: PathBuf::from(path),
                kind: AssetKind::Texture,
                target: AssetTarget::Environment,
                required: false,
            });
        }

        log::info!(
            "Instantiated scene '{}': {} entities, {} asset loads",
            self.name,
            world.entity_count(),
            requests.len()
        );

        Ok(SceneInstance { world, requests })
    }
}

/// Error type for scene operations
#[derive(Debug)]
pub enum SceneError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
    /// The scene parsed but describes an impossible setup
    Invalid(String),
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::Parse(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::Serialize(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "IO error: {}", e),
            SceneError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneError::Serialize(e) => write!(f, "Serialize error: {}", e),
            SceneError::Invalid(msg) => write!(f, "Invalid scene: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth_moon() -> Scene {
        Scene::new("Earth and Moon")
            .with_body(
                BodyTemplate::new("earth", BodyRole::Primary, Vec3::ZERO)
                    .with_mass(597.2)
                    .with_radius(6.371)
                    .with_rates(7.292e-5, 0.0)
                    .with_textures(Some("textures/earth.jpg"), Some("textures/earth_normal.png")),
            )
            .with_body(
                BodyTemplate::new("moon", BodyRole::Satellite, Vec3::new(384.4, 0.0, 0.0))
                    .with_mass(7.342)
                    .with_radius(1.737)
                    .with_rates(2.66e-6, 2.66e-6)
                    .with_textures(Some("textures/moon.jpg"), None),
            )
    }

    #[test]
    fn test_scene_new() {
        let scene = Scene::new("Empty");
        assert_eq!(scene.name, "Empty");
        assert!(scene.bodies.is_empty());
        assert!(scene.models.is_empty());
        assert!(scene.environment.is_none());
    }

    #[test]
    fn test_ron_defaults() {
        let ron_str = r#"
            Scene(
                name: "Minimal",
                bodies: [
                    (name: "a", role: Primary, position: (x: 0.0, y: 0.0, z: 0.0)),
                    (name: "b", role: Satellite, position: (x: 10.0, y: 0.0, z: 0.0), mass: 2.0),
                ],
            )
        "#;
        let scene: Scene = ron::from_str(ron_str).unwrap();

        let a = &scene.bodies[0];
        assert_eq!(a.mass, DEFAULT_MASS);
        assert_eq!(a.radius, DEFAULT_RADIUS);
        assert_eq!(a.rotation_rate, DEFAULT_ROTATION_RATE);
        assert_eq!(a.orbital_rate, DEFAULT_ORBITAL_RATE);
        assert!(a.velocity.is_none());
        assert_eq!(a.textures, TextureSet::default());
        assert_eq!(scene.bodies[1].mass, 2.0);
        assert!(scene.models.is_empty());
    }

    #[test]
    fn test_model_required_defaults_true() {
        let ron_str = r#"
            Scene(
                name: "Chessboard",
                models: [(name: "board", path: "models/chess.glb")],
                environment: Some("textures/cafe.hdr"),
            )
        "#;
        let scene: Scene = ron::from_str(ron_str).unwrap();
        assert!(scene.models[0].required);
        assert_eq!(scene.environment.as_deref(), Some("textures/cafe.hdr"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join("blplanet_scene_round_trip.ron");
        let scene = earth_moon().with_environment("textures/stars.hdr");

        scene.save(&path).unwrap();
        let loaded = Scene::load(&path).unwrap();
        assert_eq!(loaded, scene);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(Scene::load("/nonexistent/scene.ron"), Err(SceneError::Io(_))));

        let path = std::env::temp_dir().join("blplanet_scene_bad.ron");
        fs::write(&path, "Scene(name: ").unwrap();
        assert!(matches!(Scene::load(&path), Err(SceneError::Parse(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_rejects_missing_satellite() {
        let scene = Scene::new("Lonely")
            .with_body(BodyTemplate::new("earth", BodyRole::Primary, Vec3::ZERO));
        let err = scene.validate().unwrap_err();
        assert!(err.to_string().contains("satellite"));
    }

    #[test]
    fn test_validate_rejects_two_primaries() {
        let scene = Scene::new("Binary")
            .with_body(BodyTemplate::new("a", BodyRole::Primary, Vec3::ZERO))
            .with_body(BodyTemplate::new("b", BodyRole::Primary, Vec3::X))
            .with_body(BodyTemplate::new("c", BodyRole::Satellite, Vec3::Z));
        assert!(matches!(scene.validate(), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_bad_mass() {
        let mut scene = earth_moon();
        scene.bodies[1].mass = 0.0;
        assert!(matches!(scene.validate(), Err(SceneError::Invalid(_))));

        scene.bodies[1].mass = f64::NAN;
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_instantiate_earth_moon() {
        let instance = earth_moon().instantiate().unwrap();
        let world = &instance.world;

        assert_eq!(world.entity_count(), 2);
        let orbit = world.orbit().unwrap();
        assert_eq!(orbit.primary.mass, 597.2);
        assert_eq!(orbit.satellite.position, Vec3::new(384.4, 0.0, 0.0));

        // earth diffuse + normal, moon diffuse
        assert_eq!(instance.requests.len(), 3);
        assert!(instance.requests.iter().all(|r| r.kind == AssetKind::Texture && !r.required));

        let moon = world.body_entity(BodyRole::Satellite).unwrap();
        assert!(instance.requests.iter().any(|r| r.target
            == AssetTarget::Texture {
                entity: moon,
                slot: TextureSlot::Diffuse
            }));
    }

    #[test]
    fn test_instantiate_models_and_environment() {
        let instance = Scene::new("Chessboard")
            .with_model("board", "models/chess.glb", true)
            .with_environment("textures/cafe.hdr")
            .instantiate()
            .unwrap();

        assert!(instance.world.orbit().is_none());
        let (board, entity) = instance.world.get_by_name("board").unwrap();
        assert!(!entity.is_visible());

        assert_eq!(
            instance.requests,
            vec![
                AssetRequest {
                    path: PathBuf::from("models/chess.glb"),
                    kind: AssetKind::Model,
                    target: AssetTarget::Model { entity: board },
                    required: true,
                },
                AssetRequest {
                    path: PathBuf::from("textures/cafe.hdr"),
                    kind: AssetKind::Texture,
                    target: AssetTarget::Environment,
                    required: false,
                },
            ]
        );
    }

    #[test]
    fn test_instantiate_rejects_invalid_scene() {
        let scene = Scene::new("Broken")
            .with_body(BodyTemplate::new("moon", BodyRole::Satellite, Vec3::X));
        assert!(scene.instantiate().is_err());
    }
}
