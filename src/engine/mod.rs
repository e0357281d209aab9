//! Game engine composed from a clock, a loader, a simulator and a renderer
//!
//! The platform owns the loop: it calls `GameEngine::frame` once per
//! animation frame with the current time, and the engine decides whether a
//! tick is due.

pub mod actor;
pub mod clock;
pub mod input;
pub mod loader;
pub mod simulator;

pub use actor::{Actor, ActorId, RenderContext, UpdateContext};
pub use clock::{GameClock, SYSTEM_TICKER, TickerOptions};
pub use input::PointerState;
pub use loader::{Loader, Texture, TextureHandle};
pub use simulator::Simulator;

use crate::renderer::Renderer;
use crate::settings::Settings;

/// Something the engine can drive each tick
pub trait Scene {
    /// Runs after the physics step, with this step's collision events
    fn update(&mut self, ctx: &mut UpdateContext<'_>);

    /// Fill renderer layers
    fn render(&mut self, renderer: &mut Renderer, ctx: &RenderContext<'_>);
}

pub struct GameEngine {
    pub clock: GameClock,
    pub loader: Loader,
    pub simulator: Simulator,
    pub renderer: Renderer,
    pub pointer: PointerState,
    time: f32,
    frames: u64,
    is_stopped: bool,
}

impl GameEngine {
    pub fn new(settings: &Settings) -> Self {
        Self {
            clock: GameClock::new(settings.physics.tick_rate),
            loader: Loader::new(),
            simulator: Simulator::new(&settings.physics),
            renderer: Renderer::new(&settings.render),
            pointer: PointerState::default(),
            time: 0.0,
            frames: 0,
            is_stopped: true,
        }
    }

    /// Start ticking; fires the loader on the first run
    pub fn run(&mut self) {
        self.is_stopped = false;
        if !self.loader.has_load_fired() {
            self.loader.load();
        }
        self.clock.start(SYSTEM_TICKER);
        log::info!("engine running");
    }

    pub fn stop(&mut self) {
        self.is_stopped = true;
        self.clock.stop(SYSTEM_TICKER);
    }

    pub fn is_running(&self) -> bool {
        !self.is_stopped
    }

    /// Simulated seconds since start
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Ticks run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Poll the system ticker at `now` (seconds) and step if due
    ///
    /// Nothing ticks until every resource has loaded.
    pub fn frame<S: Scene + ?Sized>(&mut self, now: f64, scene: &mut S) -> bool {
        if self.is_stopped {
            return false;
        }
        if !self.loader.is_complete() {
            log::debug!("loading progress: {:.2}", self.loader.progress());
            return false;
        }
        let Some(dt) = self.clock.poll(SYSTEM_TICKER, now) else {
            return false;
        };
        self.step(dt, scene);
        true
    }

    /// One tick: physics, scene update, scene render, tessellation
    pub fn step<S: Scene + ?Sized>(&mut self, dt: f32, scene: &mut S) {
        self.simulator.update(dt);
        self.time += dt;

        let mut ctx = UpdateContext {
            world: self.simulator.world_mut(),
            pointer: &self.pointer,
            dt,
            time: self.time,
        };
        scene.update(&mut ctx);

        let ctx = RenderContext {
            world: self.simulator.world(),
            time: self.time,
        };
        scene.render(&mut self.renderer, &ctx);
        self.renderer.render();
        self.frames += 1;
    }

    /// Tear every component down
    pub fn destroy(&mut self) {
        self.stop();
        self.clock.destroy();
        self.loader.destroy();
        self.simulator.destroy();
        self.renderer.destroy();
        log::info!("engine destroyed after {} frames", self.frames);
    }
}
