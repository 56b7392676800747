//! Per-demo frame loop
//!
//! A [`FrameLoop`] starts in [`LoopState::Loading`] with every asset of its
//! scene queued on the background loader. Completed loads are drained at the
//! start of each tick. Once no required load is outstanding the loop switches
//! to [`LoopState::Running`] for good; from then on every tick scales the wall
//! clock delta, advances the world and the simulated clock, and renders
//! exactly once.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use blplanet_physics::PhysicsConfig;

use crate::asset_cache::{AssetCache, AssetHandle};
use crate::asset_loader::{AssetLoader, LoadResult};
use crate::assets::AssetKind;
use crate::calendar::CalendarDate;
use crate::clock::SimClock;
use crate::render::{Frame, Renderer};
use crate::scene::{AssetRequest, AssetTarget, Scene, SceneError};
use crate::world::World;

/// Default simulated seconds per wall-clock second (one day per second)
pub const DEFAULT_TIME_MULTIPLIER: f64 = 86_400.0;

/// Lifecycle state of a [`FrameLoop`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Required assets are still in flight
    Loading,
    /// The loop simulates and renders every tick
    Running,
}

/// Options adjustable while the loop runs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimOptions {
    /// Simulated seconds per wall-clock second; zero pauses, negative rewinds
    pub time_multiplier: f64,
    pub show_date_panel: bool,
    pub show_markers: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            time_multiplier: DEFAULT_TIME_MULTIPLIER,
            show_date_panel: true,
            show_markers: false,
        }
    }
}

/// Outcome of one [`FrameLoop::tick`]
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// State after the tick
    pub state: LoopState,
    /// Simulated seconds applied this tick (zero while loading)
    pub sim_dt: f64,
    /// Calendar reading after the tick, when running
    pub date: Option<CalendarDate>,
    /// Whether the renderer was called
    pub rendered: bool,
    /// Asset loads finished during this tick, successful or not
    pub completed_loads: usize,
}

/// State machine driving one demo
pub struct FrameLoop {
    scene_name: String,
    state: LoopState,
    world: World,
    cache: AssetCache,
    loader: AssetLoader,
    /// Outstanding requests grouped by what the loader was asked for
    pending: HashMap<(PathBuf, AssetKind), Vec<AssetRequest>>,
    clock: SimClock,
    physics: PhysicsConfig,
    options: SimOptions,
    frames_rendered: u64,
}

impl FrameLoop {
    /// Instantiate `scene` and queue all of its assets
    pub fn new(scene: &Scene, physics: PhysicsConfig, options: SimOptions) -> Result<Self, SceneError> {
        let instance = scene.instantiate()?;
        let loader = AssetLoader::new();

        let mut pending: HashMap<(PathBuf, AssetKind), Vec<AssetRequest>> = HashMap::new();
        for request in instance.requests {
            let key = (request.path.clone(), request.kind);
            let waiting = pending.entry(key).or_default();
            if waiting.is_empty() {
                loader.request(request.path.clone(), request.kind);
            }
            waiting.push(request);
        }

        log::info!(
            "Frame loop for '{}' waiting on {} asset loads",
            scene.name,
            pending.len()
        );

        Ok(Self {
            scene_name: scene.name.clone(),
            state: LoopState::Loading,
            world: instance.world,
            cache: AssetCache::new(),
            loader,
            pending,
            clock: SimClock::new(),
            physics,
            options,
            frames_rendered: 0,
        })
    }

    /// Run one frame with `wall_dt` wall-clock seconds since the last one
    pub fn tick(&mut self, wall_dt: f64, renderer: &mut dyn Renderer) -> TickReport {
        let completed_loads = self.drain_completed_loads();

        if self.state == LoopState::Loading {
            if self.has_required_loads_pending() {
                return TickReport {
                    state: LoopState::Loading,
                    sim_dt: 0.0,
                    date: None,
                    rendered: false,
                    completed_loads,
                };
            }
            self.state = LoopState::Running;
            renderer.hide_loading_indicator();
            log::info!("Scene '{}' ready, starting frame loop", self.scene_name);
        }

        let sim_dt = wall_dt * self.options.time_multiplier;
        self.world.update(sim_dt, &self.physics);
        self.clock.advance(sim_dt);
        let date = self.clock.date();

        let frame = Frame {
            world: &self.world,
            date_panel: self.options.show_date_panel.then(|| date.to_string()),
            markers: if self.options.show_markers {
                self.world.orbit().map(|orbit| orbit.markers)
            } else {
                None
            },
            frame_index: self.frames_rendered,
            sim_time: self.clock.elapsed(),
        };
        renderer.render(&frame);
        self.frames_rendered += 1;
        self.world.clear_all_dirty();

        TickReport {
            state: LoopState::Running,
            sim_dt,
            date: Some(date),
            rendered: true,
            completed_loads,
        }
    }

    /// Block until every queued load has completed or `timeout` passes
    ///
    /// Returns `true` when nothing is left outstanding.
    pub fn wait_for_pending_loads(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !self.pending.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.loader.poll_timeout(remaining) {
                Some(result) => self.complete_load(result),
                None => break,
            }
        }
        self.pending.is_empty()
    }

    fn drain_completed_loads(&mut self) -> usize {
        let results = self.loader.poll_all();
        let count = results.len();
        for result in results {
            self.complete_load(result);
        }
        count
    }

    fn complete_load(&mut self, result: LoadResult) {
        let waiting = self
            .pending
            .remove(&(result.path.clone(), result.kind))
            .unwrap_or_default();

        match result.result {
            Ok(asset) => {
                let handle = asset.insert_into(&mut self.cache, &result.path);
                log::debug!(
                    "Loaded {} for {} target(s)",
                    result.path.display(),
                    waiting.len()
                );
                for request in waiting {
                    self.attach(request.target, handle.clone());
                }
            }
            Err(err) => {
                log::error!("Failed to load {}: {}", result.path.display(), err);
            }
        }
    }

    fn attach(&mut self, target: AssetTarget, handle: AssetHandle) {
        match target {
            AssetTarget::Texture { entity, slot } => {
                if let Some(entity) = self.world.get_entity_mut(entity) {
                    entity.attach_texture(slot, handle);
                }
            }
            AssetTarget::Model { entity } => {
                if let Some(entity) = self.world.get_entity_mut(entity) {
                    entity.attach_model(handle);
                }
            }
            AssetTarget::Environment => self.world.set_environment(handle),
        }
    }

    /// Whether a load the loop must wait for is still in flight
    pub fn has_required_loads_pending(&self) -> bool {
        self.pending.values().flatten().any(|request| request.required)
    }

    /// Number of distinct loads still in flight
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn options(&self) -> &SimOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut SimOptions {
        &mut self.options
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}
