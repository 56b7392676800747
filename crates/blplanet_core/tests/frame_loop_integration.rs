//! Integration tests for the scene → loader → frame loop pipeline
//!
//! These tests use real files on disk:
//! 1. Scene files load and instantiate into a world
//! 2. Completed texture/model loads attach to the waiting entities
//! 3. Failed loads leave the element absent without stopping the loop
//! 4. Running ticks advance the orbit and calendar and render once each

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use blplanet_core::{
    BodyRole, BodyTemplate, Frame, FrameLoop, LoopState, Mesh, Month, PhysicsConfig, Renderer,
    Scene, SimOptions, TextureSlot,
};
use blplanet_math::Vec3;

const WAIT: Duration = Duration::from_secs(5);

const PNG: [u8; 16] = [
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13, b'I', b'H', b'D', b'R',
];
const JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

fn fixture_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("blplanet_frame_loop_it").join(test);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &Path, name: &str, bytes: &[u8]) -> String {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path.to_string_lossy().into_owned()
}

fn glb() -> Vec<u8> {
    let mut bytes = b"glTF".to_vec();
    bytes.extend_from_slice(&2u32.to_le_bytes());
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

/// Records every call the frame loop makes
#[derive(Default)]
struct RecordingRenderer {
    dates: Vec<Option<String>>,
    instance_counts: Vec<usize>,
    hide_calls: usize,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.dates.push(frame.date_panel.clone());
        self.instance_counts.push(frame.instances().len());
    }

    fn hide_loading_indicator(&mut self) {
        self.hide_calls += 1;
    }
}

fn earth_moon(diffuse: Option<&str>, normal: Option<&str>, moon_diffuse: Option<&str>) -> Scene {
    Scene::new("Earth and Moon")
        .with_body(
            BodyTemplate::new("earth", BodyRole::Primary, Vec3::ZERO)
                .with_mass(597.2)
                .with_radius(6.371)
                .with_rates(7.292e-5, 0.0)
                .with_textures(diffuse, normal),
        )
        .with_body(
            BodyTemplate::new("moon", BodyRole::Satellite, Vec3::new(384.4, 0.0, 0.0))
                .with_mass(7.342)
                .with_radius(1.737)
                .with_rates(2.66e-6, 2.66e-6)
                .with_textures(moon_diffuse, None),
        )
}

// ==================== Asset Attachment Tests ====================

#[test]
fn test_textures_attach_and_failures_stay_absent() {
    let dir = fixture_dir("textures");
    let earth = write(&dir, "earth.jpg", &JPEG);
    let missing = dir.join("earth_normal_missing.png").to_string_lossy().into_owned();
    let moon = write(&dir, "moon.png", &PNG);

    let scene = earth_moon(Some(&earth), Some(&missing), Some(&moon));
    let mut frame_loop = FrameLoop::new(&scene, PhysicsConfig::default(), SimOptions::default()).unwrap();
    assert!(frame_loop.wait_for_pending_loads(WAIT));

    let mut renderer = RecordingRenderer::default();
    let report = frame_loop.tick(0.016, &mut renderer);
    assert_eq!(report.state, LoopState::Running);

    let world = frame_loop.world();
    let (_, earth_entity) = world.get_by_name("earth").unwrap();
    assert!(earth_entity.material.get(TextureSlot::Diffuse).is_some());
    assert!(earth_entity.material.get(TextureSlot::Normal).is_none());

    let (_, moon_entity) = world.get_by_name("moon").unwrap();
    assert!(moon_entity.material.diffuse.is_some());

    assert_eq!(frame_loop.cache().asset_count(), 2);
}

#[test]
fn test_shared_texture_is_loaded_once() {
    let dir = fixture_dir("shared");
    let rock = write(&dir, "rock.jpg", &JPEG);

    let scene = earth_moon(Some(&rock), None, Some(&rock));
    let mut frame_loop = FrameLoop::new(&scene, PhysicsConfig::default(), SimOptions::default()).unwrap();
    assert_eq!(frame_loop.pending_loads(), 1);
    assert!(frame_loop.wait_for_pending_loads(WAIT));

    let world = frame_loop.world();
    let earth = world.get_by_name("earth").unwrap().1.material.diffuse.clone();
    let moon = world.get_by_name("moon").unwrap().1.material.diffuse.clone();
    assert!(earth.is_some());
    assert_eq!(earth, moon);
    assert_eq!(frame_loop.cache().asset_count(), 1);
}

#[test]
fn test_invalid_texture_bytes_are_rejected() {
    let dir = fixture_dir("invalid");
    let bogus = write(&dir, "earth.jpg", b"not an image at all");

    let scene = earth_moon(Some(&bogus), None, None);
    let mut frame_loop = FrameLoop::new(&scene, PhysicsConfig::default(), SimOptions::default()).unwrap();
    assert!(frame_loop.wait_for_pending_loads(WAIT));

    let (_, earth) = frame_loop.world().get_by_name("earth").unwrap();
    assert!(earth.material.diffuse.is_none());
    assert_eq!(frame_loop.cache().asset_count(), 0);
}

// ==================== Loading Transition Tests ====================

#[test]
fn test_chessboard_model_and_environment() {
    let dir = fixture_dir("chessboard");
    let model = write(&dir, "chess.glb", &glb());
    let hdr = write(&dir, "cafe.hdr", b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n");

    let scene = Scene::new("Chessboard")
        .with_model("board", model, true)
        .with_environment(hdr);
    let mut frame_loop = FrameLoop::new(&scene, PhysicsConfig::default(), SimOptions::default()).unwrap();
    assert_eq!(frame_loop.state(), LoopState::Loading);
    assert!(frame_loop.has_required_loads_pending());

    assert!(frame_loop.wait_for_pending_loads(WAIT));
    assert!(!frame_loop.has_required_loads_pending());

    let mut renderer = RecordingRenderer::default();
    for _ in 0..3 {
        frame_loop.tick(0.016, &mut renderer);
    }

    assert_eq!(frame_loop.state(), LoopState::Running);
    assert_eq!(renderer.hide_calls, 1);
    assert_eq!(renderer.dates.len(), 3);
    assert_eq!(renderer.instance_counts, vec![1, 1, 1]);

    let (_, board) = frame_loop.world().get_by_name("board").unwrap();
    assert!(matches!(board.mesh, Mesh::Model { handle: Some(_) }));
    assert!(frame_loop.world().environment().is_some());
    // No orbit in this scene; the clock still advances
    assert!(frame_loop.world().orbit().is_none());
    assert!(frame_loop.clock().elapsed() > 1_000.0);
}

#[test]
fn test_failed_required_model_still_starts_loop() {
    let dir = fixture_dir("missing_model");
    let model = dir.join("nowhere.glb").to_string_lossy().into_owned();

    let scene = Scene::new("Chessboard").with_model("board", model, true);
    let mut frame_loop = FrameLoop::new(&scene, PhysicsConfig::default(), SimOptions::default()).unwrap();
    assert!(frame_loop.wait_for_pending_loads(WAIT));

    let mut renderer = RecordingRenderer::default();
    let report = frame_loop.tick(0.016, &mut renderer);

    assert_eq!(report.state, LoopState::Running);
    assert_eq!(renderer.hide_calls, 1);
    // The board never became visible
    assert_eq!(renderer.instance_counts, vec![0]);
}

// ==================== Simulation Tests ====================

#[test]
fn test_running_ticks_advance_orbit_and_calendar() {
    let scene = earth_moon(None, None, None);
    let mut frame_loop = FrameLoop::new(&scene, PhysicsConfig::default(), SimOptions::default()).unwrap();
    let mut renderer = RecordingRenderer::default();

    // 31 simulated days, one per tick
    for _ in 0..31 {
        frame_loop.tick(1.0, &mut renderer);
    }

    let date = frame_loop.clock().date();
    assert_eq!((date.year, date.month, date.day), (0, Month::Feb, 1));
    assert_eq!(renderer.dates.last().unwrap().as_deref(), Some("Year 0, Feb 1, 00:00:00"));

    let orbit = frame_loop.world().orbit().unwrap();
    assert_eq!(orbit.primary.position, Vec3::ZERO);
    // Roughly one lunar month; the orbit stays bound
    let separation = orbit.separation();
    assert!(separation > 300.0 && separation < 500.0, "separation {separation}");

    let (_, moon) = frame_loop.world().get_by_name("moon").unwrap();
    assert_eq!(moon.transform.position, orbit.satellite.position);
}

#[test]
fn test_scene_file_round_trip_drives_loop() {
    let dir = fixture_dir("scene_file");
    let path = dir.join("earth_moon.ron");
    earth_moon(None, None, None).save(&path).unwrap();

    let scene = Scene::load(&path).unwrap();
    assert_eq!(scene.bodies.len(), 2);

    let mut frame_loop = FrameLoop::new(&scene, PhysicsConfig::default(), SimOptions::default()).unwrap();
    let mut renderer = RecordingRenderer::default();
    let report = frame_loop.tick(0.5, &mut renderer);
    assert_eq!(report.sim_dt, 43_200.0);
    assert_eq!(renderer.instance_counts, vec![2]);
}
