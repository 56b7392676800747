//! BLPlanet - Earth and Moon orbit demo
//!
//! Loads a scene, waits for its assets and runs the frame loop against the
//! console renderer.

use std::process::ExitCode;
use std::time::Duration;

use blplanet::config::AppConfig;
use blplanet::systems::{ConsoleRenderer, FrameTimer};
use blplanet_core::{FrameLoop, LoopState, Scene};

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

fn main() -> ExitCode {
    // Config is read before logging starts; remember the failure and report it after
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.debug.log_level);
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let scene = match Scene::load(&config.scene.path) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to load scene '{}': {}", config.scene.path, e);
            return ExitCode::FAILURE;
        }
    };

    let mut frame_loop = match FrameLoop::new(&scene, config.physics_config(), config.sim_options()) {
        Ok(frame_loop) => frame_loop,
        Err(e) => {
            log::error!("Failed to start scene '{}': {}", scene.name, e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Running '{}' at {} fps, {}x time ({:?} orbit)",
        scene.name,
        config.simulation.target_fps,
        config.simulation.time_multiplier,
        config.simulation.orbit_model
    );

    let mut renderer = ConsoleRenderer::new(config.display.log_every_frames);
    let mut timer = FrameTimer::new(config.simulation.max_frame_dt);
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(config.simulation.target_fps.max(1)));
    let max_frames = config.simulation.max_frames;

    loop {
        let report = frame_loop.tick(timer.delta(), &mut renderer);

        if report.state == LoopState::Running && max_frames > 0 && frame_loop.frames_rendered() >= max_frames {
            break;
        }
        timer.wait_for_next_frame(frame_time);
    }

    log::info!(
        "Stopped after {} frames at {}",
        frame_loop.frames_rendered(),
        frame_loop.clock().date()
    );
    ExitCode::SUCCESS
}
