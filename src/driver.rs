//! Frame driver
//!
//! Owns the world and input state and runs the Idle -> Running <-> Over
//! state machine. The host supplies frame callbacks through a
//! [`FrameScheduler`]; the driver guarantees at most one request is ever
//! pending, cancelling before it reschedules.

use crate::platform;
use crate::renderer::{Surface, render};
use crate::sim::{Control, FrameTime, InputState, World, step};
use crate::tuning::Tuning;

/// Handle returned by a frame request (`requestAnimationFrame` id on the web)
pub type FrameId = i32;

/// Source of frame callbacks
pub trait FrameScheduler {
    /// Ask for one callback on the next frame
    fn request_frame(&mut self) -> FrameId;

    /// Revoke a request that has not fired yet
    fn cancel_frame(&mut self, id: FrameId);
}

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// Not initialized yet
    Idle,
    Running,
    Over,
}

/// Result of handling one frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Next frame was scheduled
    Continue,
    /// Game ended this frame; the loop stops until restart
    Halted,
    /// Callback arrived before initialization and was dropped
    Ignored,
}

/// Number of frame timestamps kept for the FPS estimate
const FPS_WINDOW: usize = 60;

pub struct FrameDriver {
    tuning: Tuning,
    world: Option<World>,
    input: InputState,
    /// The single outstanding frame request
    pending: Option<FrameId>,
    /// Timestamp of the previous frame (milliseconds)
    last_time_ms: f64,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl FrameDriver {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            world: None,
            input: InputState::default(),
            pending: None,
            last_time_ms: 0.0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn phase(&self) -> DriverPhase {
        match &self.world {
            None => DriverPhase::Idle,
            Some(w) if w.is_over() => DriverPhase::Over,
            Some(_) => DriverPhase::Running,
        }
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Outstanding frame request, if any
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending
    }

    /// Frames per second over the last `FPS_WINDOW` frames
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Idle -> Running: build the world and schedule the first tick.
    /// `clock_seed` is used unless the tuning pins a seed.
    pub fn init(&mut self, clock_seed: u64, scheduler: &mut impl FrameScheduler) {
        if self.world.is_some() {
            log::warn!("init called twice; ignoring");
            return;
        }
        let seed = self.tuning.seed.unwrap_or(clock_seed);
        self.world = Some(World::new(seed, self.tuning.clone()));
        log::info!("Game initialized with seed: {}", seed);
        self.schedule(scheduler);
    }

    /// Handle one frame callback: simulate, draw, and reschedule unless the game just ended
    pub fn on_frame(
        &mut self,
        timestamp_ms: f64,
        surface: &mut impl Surface,
        scheduler: &mut impl FrameScheduler,
    ) -> FrameOutcome {
        // This callback consumed the outstanding request
        self.pending = None;

        let Some(world) = self.world.as_mut() else {
            return FrameOutcome::Ignored;
        };

        let time = FrameTime {
            now_ms: timestamp_ms,
            elapsed_ms: timestamp_ms - self.last_time_ms,
        };
        self.last_time_ms = timestamp_ms;

        let events = step(world, &self.input, time);
        if let Some(enemy) = events.collisions.player_hit_by {
            log::debug!("Player hit by enemy {}", enemy);
        }

        let fps = self.tuning.show_fps.then_some(self.fps);
        render(world, fps, surface);

        if world.is_over() {
            return FrameOutcome::Halted;
        }

        self.track_frame(timestamp_ms);
        self.schedule(scheduler);
        FrameOutcome::Continue
    }

    /// Over -> Running (or Running -> Running): new game, same session high score
    pub fn restart(&mut self, scheduler: &mut impl FrameScheduler) {
        let Some(world) = self.world.as_mut() else {
            log::warn!("restart before init; ignoring");
            return;
        };
        log::info!("Resetting game...");
        world.reset();
        self.schedule(scheduler);
    }

    /// Key pressed. Restart while over starts a new game.
    pub fn key_down(&mut self, control: Control, scheduler: &mut impl FrameScheduler) {
        self.input.press(control);
        if control == Control::Restart {
            if self.phase() == DriverPhase::Over {
                self.restart(scheduler);
            } else {
                log::debug!("Restart ignored: game is not over");
            }
        }
    }

    pub fn key_up(&mut self, control: Control) {
        self.input.release(control);
    }

    /// Pointer click in logical screen coordinates.
    /// Returns true if it triggered a restart.
    pub fn click(&mut self, x: f32, y: f32, scheduler: &mut impl FrameScheduler) -> bool {
        if self.phase() != DriverPhase::Over || !platform::hits_restart_button(x, y) {
            return false;
        }
        self.restart(scheduler);
        true
    }

    /// Drop every held control (focus lost)
    pub fn release_all(&mut self) {
        self.input.clear();
    }

    /// Cancel any outstanding request, then request a fresh one
    fn schedule(&mut self, scheduler: &mut impl FrameScheduler) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel_frame(id);
        }
        self.pending = Some(scheduler.request_frame());
    }

    fn track_frame(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot after the newest is the oldest sample
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

/// Deterministic scheduler that just records requests.
/// The host (or a test) fires frames by taking them off the queue.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: FrameId,
    pending: Vec<FrameId>,
    /// Total requests made
    pub requested: usize,
    /// Total cancellations made
    pub cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that have neither fired nor been cancelled
    pub fn pending(&self) -> &[FrameId] {
        &self.pending
    }

    /// Fire the oldest pending request
    pub fn take_next(&mut self) -> Option<FrameId> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        self.requested += 1;
        self.pending.push(self.next_id);
        self.next_id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.cancelled += 1;
        self.pending.retain(|&p| p != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use glam::Vec2;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    struct Harness {
        driver: FrameDriver,
        sched: ManualScheduler,
        surface: RecordingSurface,
        now: f64,
    }

    impl Harness {
        fn new() -> Self {
            let mut h = Self {
                driver: FrameDriver::new(Tuning::default()),
                sched: ManualScheduler::new(),
                surface: RecordingSurface::default(),
                now: 0.0,
            };
            h.driver.init(2024, &mut h.sched);
            h
        }

        /// Fire the pending frame, if there is one
        fn frame(&mut self) -> Option<FrameOutcome> {
            self.sched.take_next()?;
            self.now += FRAME_MS;
            self.surface.clear();
            Some(self.driver.on_frame(self.now, &mut self.surface, &mut self.sched))
        }

        fn world(&mut self) -> &mut World {
            self.driver.world_mut().unwrap()
        }

        /// Park every enemy motionless far above the screen
        fn park_enemies(&mut self) {
            for (i, e) in self.world().enemies.iter_mut().enumerate() {
                e.rect.pos = Vec2::new(i as f32 * 40.0, -1000.0);
                e.vel = Vec2::ZERO;
            }
        }

        /// Put enemy 0 on top of the player so the next frame ends the game
        fn doom_player(&mut self) {
            let p = self.world().player.rect.pos;
            let e = &mut self.world().enemies[0];
            e.rect.pos = p + Vec2::new(10.0, 10.0);
            e.vel = Vec2::ZERO;
        }
    }

    #[test]
    fn test_idle_until_init() {
        let mut driver = FrameDriver::new(Tuning::default());
        let mut sched = ManualScheduler::new();
        let mut surface = RecordingSurface::default();
        assert_eq!(driver.phase(), DriverPhase::Idle);
        assert_eq!(driver.on_frame(16.0, &mut surface, &mut sched), FrameOutcome::Ignored);
        assert!(surface.commands.is_empty());

        driver.init(1, &mut sched);
        assert_eq!(driver.phase(), DriverPhase::Running);
        assert_eq!(sched.pending().len(), 1);
        assert_eq!(driver.pending_frame(), Some(sched.pending()[0]));
    }

    #[test]
    fn test_init_twice_is_noop() {
        let mut h = Harness::new();
        let seed = h.world().seed;
        h.driver.init(99, &mut h.sched);
        assert_eq!(h.world().seed, seed);
        assert_eq!(h.sched.pending().len(), 1);
    }

    #[test]
    fn test_tuning_seed_overrides_clock() {
        let tuning = Tuning {
            seed: Some(77),
            ..Tuning::default()
        };
        let mut driver = FrameDriver::new(tuning);
        driver.init(12345, &mut ManualScheduler::new());
        assert_eq!(driver.world().unwrap().seed, 77);
    }

    #[test]
    fn test_running_frames_reschedule() {
        let mut h = Harness::new();
        h.park_enemies();
        for _ in 0..10 {
            assert_eq!(h.frame(), Some(FrameOutcome::Continue));
            assert_eq!(h.sched.pending().len(), 1);
        }
        assert!(h.surface.has_text("Score: 0"));
    }

    #[test]
    fn test_game_over_halts_loop() {
        let mut h = Harness::new();
        h.park_enemies();
        h.doom_player();

        assert_eq!(h.frame(), Some(FrameOutcome::Halted));
        assert_eq!(h.driver.phase(), DriverPhase::Over);
        // The ending frame still shows the overlay
        assert!(h.surface.has_text("GAME OVER"));
        // Nothing left to fire
        assert!(h.sched.pending().is_empty());
        assert_eq!(h.driver.pending_frame(), None);
        assert_eq!(h.frame(), None);
    }

    #[test]
    fn test_restart_scenario() {
        let mut h = Harness::new();
        h.park_enemies();
        h.frame();
        h.world().score = 5;
        h.doom_player();
        assert_eq!(h.frame(), Some(FrameOutcome::Halted));
        assert_eq!(h.world().high_score, 5);

        h.driver.restart(&mut h.sched);
        let w = h.world();
        assert_eq!(w.score, 0);
        assert_eq!(w.high_score, 5);
        assert!(w.is_running());
        assert!(!w.is_over());
        assert_eq!(w.enemies.len(), 8);
        assert_eq!(w.stars.len(), 100);
        assert!(w.bullets.is_empty());
        assert_eq!(h.sched.pending().len(), 1);
        assert_eq!(h.frame(), Some(FrameOutcome::Continue));
    }

    #[test]
    fn test_restart_twice_is_idempotent() {
        let mut h = Harness::new();
        h.world().score = 3;
        h.driver.restart(&mut h.sched);
        assert_eq!(h.world().high_score, 3);
        h.driver.restart(&mut h.sched);
        assert_eq!(h.world().high_score, 3);
        assert_eq!(h.world().score, 0);
    }

    #[test]
    fn test_restart_never_duplicates_tick_chain() {
        let mut h = Harness::new();
        for _ in 0..5 {
            h.driver.restart(&mut h.sched);
            assert_eq!(h.sched.pending().len(), 1);
        }
        // Every restart cancelled the request before it
        assert_eq!(h.sched.cancelled, 5);
        assert_eq!(h.sched.requested, 6);
    }

    #[test]
    fn test_restart_key_only_when_over() {
        let mut h = Harness::new();
        h.park_enemies();
        h.world().score = 2;
        h.driver.key_down(Control::Restart, &mut h.sched);
        h.driver.key_up(Control::Restart);
        // Still the same game
        assert_eq!(h.world().score, 2);

        h.doom_player();
        h.frame();
        assert_eq!(h.driver.phase(), DriverPhase::Over);
        h.driver.key_down(Control::Restart, &mut h.sched);
        assert_eq!(h.driver.phase(), DriverPhase::Running);
        assert_eq!(h.world().score, 0);
        assert_eq!(h.world().high_score, 2);
        assert_eq!(h.sched.pending().len(), 1);
    }

    #[test]
    fn test_click_restart_button() {
        let mut h = Harness::new();
        h.park_enemies();

        // Clicks while running do nothing
        assert!(!h.driver.click(400.0, 370.0, &mut h.sched));

        h.doom_player();
        h.frame();
        // Outside the button
        assert!(!h.driver.click(400.0, 300.0, &mut h.sched));
        assert!(!h.driver.click(501.0, 370.0, &mut h.sched));
        assert_eq!(h.driver.phase(), DriverPhase::Over);
        // Inclusive edge of the button
        assert!(h.driver.click(300.0, 390.0, &mut h.sched));
        assert_eq!(h.driver.phase(), DriverPhase::Running);
        assert_eq!(h.sched.pending().len(), 1);
    }

    #[test]
    fn test_input_visible_next_frame() {
        let mut h = Harness::new();
        h.park_enemies();
        let x0 = h.world().player.rect.pos.x;
        h.driver.key_down(Control::Right, &mut h.sched);
        h.frame();
        assert_eq!(h.world().player.rect.pos.x, x0 + 8.0);
        h.driver.key_up(Control::Right);
        h.frame();
        assert_eq!(h.world().player.rect.pos.x, x0 + 8.0);
    }

    #[test]
    fn test_release_all_stops_movement() {
        let mut h = Harness::new();
        h.park_enemies();
        h.driver.key_down(Control::Left, &mut h.sched);
        h.driver.key_down(Control::Shoot, &mut h.sched);
        h.driver.release_all();
        let x0 = h.world().player.rect.pos.x;
        h.frame();
        assert_eq!(h.world().player.rect.pos.x, x0);
        assert!(!h.driver.input().is_held(Control::Shoot));
    }

    #[test]
    fn test_fps_estimate() {
        let mut h = Harness::new();
        h.park_enemies();
        for _ in 0..120 {
            h.frame();
        }
        assert_eq!(h.driver.fps(), 60);
    }

    #[test]
    fn test_fps_readout_when_enabled() {
        let tuning = Tuning {
            show_fps: true,
            ..Tuning::default()
        };
        let mut driver = FrameDriver::new(tuning);
        let mut sched = ManualScheduler::new();
        let mut surface = RecordingSurface::default();
        driver.init(1, &mut sched);
        driver.on_frame(16.0, &mut surface, &mut sched);
        assert!(surface.has_text("FPS: 0"));
    }
}
