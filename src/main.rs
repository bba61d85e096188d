//! Space Shooter entry point
//!
//! wasm32: wires the canvas, input listeners and the requestAnimationFrame loop.
//! Native: runs the game headless with a scripted autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use space_shooter::driver::FrameId;
    use space_shooter::platform::{control_for_key, prevents_default};
    use space_shooter::renderer::CanvasSurface;
    use space_shooter::{Error, FrameDriver, FrameScheduler, Result, Tuning};

    /// Canvas element ids we look for, in order
    const CANVAS_IDS: [&str; 2] = ["canvas", "gameCanvas"];

    struct WebGame {
        driver: FrameDriver,
        surface: CanvasSurface,
    }

    /// Schedules frames through `window.requestAnimationFrame`
    struct BrowserScheduler {
        window: Window,
        game: Rc<RefCell<WebGame>>,
    }

    impl BrowserScheduler {
        fn new(window: Window, game: Rc<RefCell<WebGame>>) -> Self {
            Self { window, game }
        }
    }

    impl FrameScheduler for BrowserScheduler {
        fn request_frame(&mut self) -> FrameId {
            let game = self.game.clone();
            let window = self.window.clone();
            // Frees itself once the frame fires
            let callback = Closure::once_into_js(move |time: f64| {
                game_loop(window, game, time);
            });
            self.window
                .request_animation_frame(callback.unchecked_ref())
                .unwrap_or_else(|e| {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    0
                })
        }

        fn cancel_frame(&mut self, id: FrameId) {
            let _ = self.window.cancel_animation_frame(id);
        }
    }

    fn game_loop(window: Window, game: Rc<RefCell<WebGame>>, time: f64) {
        let mut scheduler = BrowserScheduler::new(window, game.clone());
        let mut g = game.borrow_mut();
        let WebGame { driver, surface } = &mut *g;
        driver.on_frame(time, surface, &mut scheduler);
    }

    fn find_canvas(window: &Window) -> Result<HtmlCanvasElement> {
        let document = window
            .document()
            .ok_or_else(|| Error::Platform("no document".into()))?;
        let element = CANVAS_IDS
            .iter()
            .find_map(|id| document.get_element_by_id(id))
            .ok_or_else(|| Error::Platform("no canvas element".into()))?;
        element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::Platform("element is not a canvas".into()))
    }

    /// Tuning from the canvas `data-tuning` attribute, defaults otherwise
    fn read_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        let Some(json) = canvas.get_attribute("data-tuning") else {
            return Tuning::default();
        };
        Tuning::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring data-tuning ({}); using defaults", e);
            Tuning::default()
        })
    }

    pub fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| Error::Platform(format!("logger init failed: {e}")))?;

        log::info!("Space Shooter starting...");

        let window = web_sys::window().ok_or_else(|| Error::Platform("no window".into()))?;
        let canvas = find_canvas(&window)?;
        let tuning = read_tuning(&canvas);
        let surface = CanvasSurface::new(canvas)?;

        let game = Rc::new(RefCell::new(WebGame {
            driver: FrameDriver::new(tuning),
            surface,
        }));

        setup_input_handlers(&window, game.clone());

        let seed = js_sys::Date::now() as u64;
        let mut scheduler = BrowserScheduler::new(window, game.clone());
        game.borrow_mut().driver.init(seed, &mut scheduler);

        log::info!("Space Shooter running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, game: Rc<RefCell<WebGame>>) {
        // Keyboard down
        {
            let game = game.clone();
            let win = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let Some(control) = control_for_key(&key) else {
                    return;
                };
                if prevents_default(&key) {
                    event.prevent_default();
                }
                let mut scheduler = BrowserScheduler::new(win.clone(), game.clone());
                game.borrow_mut().driver.key_down(control, &mut scheduler);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(control) = control_for_key(&event.key()) {
                    game.borrow_mut().driver.key_up(control);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart button click
        {
            let game = game.clone();
            let win = window.clone();
            let canvas = game.borrow().surface.canvas().clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut scheduler = BrowserScheduler::new(win.clone(), game.clone());
                let mut g = game.borrow_mut();
                let (x, y) = g
                    .surface
                    .to_logical(event.client_x() as f64, event.client_y() as f64);
                if g.driver.click(x, y, &mut scheduler) {
                    log::info!("Restarted from button");
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keys released elsewhere never reach us
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().driver.release_all();
                log::debug!("Controls released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {}", e);
        web_sys::console::error_1(&format!("Space Shooter failed to start: {e}").into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use space_shooter::consts::FPS;
    use space_shooter::driver::DriverPhase;
    use space_shooter::renderer::RecordingSurface;
    use space_shooter::sim::Control;
    use space_shooter::{FrameDriver, FrameOutcome, ManualScheduler, Result, Tuning};

    const DEFAULT_FRAMES: u64 = 3600;
    /// Frames spent sweeping in one direction
    const SWEEP_FRAMES: u64 = 90;
    const AUTO_RESTARTS: u32 = 1;

    /// Hold fire and sweep the ship side to side
    fn autopilot(driver: &mut FrameDriver, frame: u64, scheduler: &mut ManualScheduler) {
        let (hold, release) = if (frame / SWEEP_FRAMES) % 2 == 0 {
            (Control::Left, Control::Right)
        } else {
            (Control::Right, Control::Left)
        };
        driver.key_up(release);
        driver.key_down(hold, scheduler);
        driver.key_down(Control::Shoot, scheduler);
    }

    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let tuning = match args.next() {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        let max_frames = match args.next() {
            Some(n) => n.parse().unwrap_or_else(|_| {
                log::warn!("Invalid frame count {:?}; using {}", n, DEFAULT_FRAMES);
                DEFAULT_FRAMES
            }),
            None => DEFAULT_FRAMES,
        };

        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut driver = FrameDriver::new(tuning);
        let mut scheduler = ManualScheduler::new();
        let mut surface = RecordingSurface::default();
        driver.init(seed, &mut scheduler);

        let frame_ms = 1000.0 / FPS;
        let mut now = 0.0;
        let mut frame = 0;
        let mut games = 1;
        let mut restarts_left = AUTO_RESTARTS;

        while frame < max_frames {
            if scheduler.take_next().is_none() {
                if driver.phase() == DriverPhase::Over && restarts_left > 0 {
                    restarts_left -= 1;
                    games += 1;
                    driver.key_down(Control::Restart, &mut scheduler);
                    driver.key_up(Control::Restart);
                    continue;
                }
                break;
            }

            autopilot(&mut driver, frame, &mut scheduler);
            now += frame_ms;
            surface.clear();
            if driver.on_frame(now, &mut surface, &mut scheduler) == FrameOutcome::Halted {
                log::info!("Game {} ended at frame {}", games, frame);
            }
            frame += 1;
        }

        if let Some(world) = driver.world() {
            log::info!(
                "Headless run finished: {} frames, {} game(s), score {}, high score {}",
                frame,
                games,
                world.score,
                world.high_score
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Space Shooter (native, headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
