//! Hop Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::Clamped;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement,
        KeyboardEvent, MouseEvent, TouchEvent,
    };

    use hop_runner::audio::AudioManager;
    use hop_runner::consts::*;
    use hop_runner::platform::Command;
    use hop_runner::platform::input::Controls;
    use hop_runner::renderer::{FrameBatch, RenderState, TextItem, draw_frame};
    use hop_runner::sim::{GameState, tick};
    use hop_runner::{Settings, SpriteSheet};

    const SHEET_URL: &str = "assets/character_sheet.png";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        controls: Controls,
        audio: AudioManager,
        settings: Settings,
        sheet: SpriteSheet,
        render_state: Option<RenderState>,
        /// Last HUD text written to the DOM
        hud_texts: Vec<TextItem>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                controls: Controls::default(),
                audio: AudioManager::from_settings(&settings),
                settings,
                sheet: SpriteSheet::new(),
                render_state: None,
                hud_texts: Vec::new(),
            }
        }

        /// Every input event goes through here
        fn handle(&mut self, command: Command) {
            self.audio.unlock();

            if command == Command::ToggleMute {
                self.settings.muted = !self.settings.muted;
                self.audio.apply_settings(&self.settings);
                self.settings.save();
                log::info!("Muted: {}", self.settings.muted);
                return;
            }

            if let Some(event) = self.controls.apply(command, &mut self.state) {
                self.audio.play(event);
            }
        }

        /// Run one simulation tick and play its cues
        fn update(&mut self) {
            if let Some(event) = self.controls.drive(&mut self.state) {
                self.audio.play(event);
            }
            let outcome = tick(&mut self.state);
            for event in outcome.events {
                self.audio.play(event);
            }
        }

        /// Render the current frame, returning the HUD text to show
        fn render(&mut self) -> Vec<TextItem> {
            let mut batch = FrameBatch::new(self.sheet.info());
            draw_frame(&self.state, &self.sheet, &mut batch);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&batch) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            batch.texts
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, texts: Vec<TextItem>) {
            if texts == self.hud_texts {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Some(hud) = document.get_element_by_id("hud") else {
                return;
            };

            hud.set_text_content(None);
            for item in &texts {
                let Ok(el) = document.create_element("div") else {
                    continue;
                };
                // Canvas text is positioned by its baseline
                let left = item.x / self.state.world.width * 100.0;
                let top = (item.y - item.size) / self.state.world.height * 100.0;
                let _ = el.set_attribute("class", "hud-text");
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{left:.2}%;top:{top:.2}%;font-size:{}px",
                        item.size
                    ),
                );
                el.set_text_content(Some(&item.text));
                let _ = hud.append_child(&el);
            }

            self.hud_texts = texts;
        }

        /// Decoded sprite sheet pixels arrived
        fn sheet_loaded(&mut self, width: u32, height: u32, pixels: &[u8]) {
            let Some(render_state) = self.render_state.as_mut() else {
                log::warn!("Sprite sheet loaded before the renderer, ignoring");
                return;
            };

            let mut sheet = SpriteSheet::new();
            match sheet
                .mark_ready(width, height)
                .and_then(|_| render_state.upload_sheet(width, height, pixels))
            {
                Ok(()) => self.sheet = sheet,
                Err(e) => log::warn!("Sprite sheet unusable, drawing blocks: {}", e),
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hop Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution, field coordinates stay fixed
        let dpr = window.device_pixel_ratio();
        let width = (FIELD_WIDTH as f64 * dpr) as u32;
        let height = (FIELD_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let pixel_art = settings.pixel_art;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU, falling back to WebGL
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (FIELD_WIDTH, FIELD_HEIGHT),
            pixel_art,
        )
        .await;
        game.borrow_mut().render_state = Some(render_state);

        load_sprite_sheet(game.clone());
        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Hop Runner running!");
    }

    /// Decode the sheet through a 2D canvas to get RGBA pixels
    fn load_sprite_sheet(game: Rc<RefCell<Game>>) {
        let Ok(img) = HtmlImageElement::new() else {
            log::warn!("Cannot create image element, drawing blocks");
            return;
        };

        {
            let img_clone = img.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let (w, h) = (img_clone.natural_width(), img_clone.natural_height());
                match decode_image(&img_clone, w, h) {
                    Some(pixels) => game.borrow_mut().sheet_loaded(w, h, &pixels),
                    None => log::warn!("Failed to decode sprite sheet"),
                }
            });
            img.set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut()>::new(move || {
                log::warn!("Sprite sheet {} failed to load, drawing blocks", SHEET_URL);
            });
            img.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        img.set_src(SHEET_URL);
    }

    fn decode_image(img: &HtmlImageElement, width: u32, height: u32) -> Option<Vec<u8>> {
        let document = web_sys::window()?.document()?;
        let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
        ctx.draw_image_with_html_image_element(img, 0.0, 0.0).ok()?;
        let data = ctx
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .ok()?;
        let Clamped(pixels) = data.data();
        Some(pixels)
    }

    /// Pointer and keyboard listeners go on the window so a press anywhere counts
    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.unlock();
                if let Some(command) = Command::from_key_code(&event.code()) {
                    if command == Command::Jump {
                        // Keep Space from scrolling the page
                        event.prevent_default();
                    }
                    g.handle(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                let command = Command::from_pointer(g.state.phase);
                g.handle(command);
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let command = Command::from_pointer(g.state.phase);
                g.handle(command);
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One tick per display frame
    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            let texts = g.render();
            g.update_hud(texts);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless autopilot run: `hop-runner [seed] [ticks]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hop_runner::audio::AudioManager;
    use hop_runner::platform::input::Controls;
    use hop_runner::sim::{GameEvent, GameState, tick};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10_000);

    log::info!("Hop Runner (native) starting headless run, seed {}", seed);

    let mut state = GameState::new(seed);
    let controls = Controls { autopilot: true };
    let mut audio = AudioManager::new();
    audio.unlock();

    let (mut runs, mut jumps, mut milestones) = (1u32, 0u32, 0u32);
    for _ in 0..max_ticks {
        if !state.is_running() {
            state.reset();
            runs += 1;
        }
        if let Some(event) = controls.drive(&mut state) {
            audio.play(event);
            jumps += 1;
        }
        for event in tick(&mut state).events {
            audio.play(event);
            if event == GameEvent::Milestone {
                milestones += 1;
            }
        }
    }

    log::info!(
        "Done: {} ticks, {} runs, {} jumps, {} milestones, score {}, best {}",
        max_ticks,
        runs,
        jumps,
        milestones,
        state.score,
        state.best.max(state.score)
    );
    println!(
        "seed {}: best {} over {runs} run(s), final score {}",
        state.seed,
        state.best.max(state.score),
        state.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
