//! Herdsman entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use herdsman::GameConfig;
    use herdsman::audio::AudioManager;
    use herdsman::platform::HostKey;
    use herdsman::renderer::{RenderError, RenderState};
    use herdsman::scene::Scene;
    use herdsman::sim::{GameState, TickInput, UpgradeKind, tick};
    use herdsman::ui::{self, HudView, ShopLabels};

    /// Longest frame the simulation will integrate in one step
    const MAX_FRAME_DT: f32 = 0.1;

    /// Game instance holding all state
    struct Game {
        config: GameConfig,
        /// `None` while the main menu is showing
        state: Option<GameState>,
        render_state: Option<RenderState>,
        audio: AudioManager,
        input: TickInput,
        last_time: f64,
    }

    impl Game {
        fn new(config: GameConfig) -> Self {
            let audio = AudioManager::new(&config);
            Self {
                config,
                state: None,
                render_state: None,
                audio,
                input: TickInput::default(),
                last_time: 0.0,
            }
        }

        /// Leave the menu and begin a fresh session
        fn start(&mut self, seed: u64) {
            self.state = Some(GameState::new(self.config.clone(), seed));
            self.input = TickInput::default();
            self.last_time = 0.0;
            self.audio.unlock();
        }

        /// Run one simulation step
        fn update(&mut self, dt: f32) {
            let Some(state) = self.state.as_mut() else {
                return;
            };
            tick(state, &self.input, dt.min(MAX_FRAME_DT));

            // Clear one-shot inputs after processing
            self.input.purchases.clear();
            self.input.toggle_shop_pin = false;

            for event in state.drain_events() {
                log::trace!("{:?}", event);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(state) = self.state.as_ref() else {
                return;
            };
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&Scene::from_state(state)) {
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
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let muted = self.audio.is_muted();
            for id in ["mute-btn", "menu-sound-btn"] {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(ui::mute_icon(muted)));
                }
            }

            let Some(state) = self.state.as_ref() else {
                return;
            };

            let hud = HudView::new(state.score, muted);
            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&hud.score_text));
            }

            set_visible(&document, "shop", state.shop_open);
            if state.shop_open {
                let labels = ShopLabels::from_state(state);
                if let Some(el) = document.get_element_by_id("shop-score") {
                    el.set_text_content(Some(&labels.score));
                }
                for kind in UpgradeKind::ALL {
                    if let Some(el) = document.get_element_by_id(ui::button_id(kind)) {
                        el.set_text_content(Some(labels.label(kind)));
                    }
                }
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Herdsman starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        set_visible(&document, "loading", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = GameConfig::default();

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let render_state = match init_renderer(canvas, width, height).await {
            Ok(rs) => rs,
            Err(e) => {
                log::error!("Renderer startup failed: {}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game::new(config)));
        game.borrow_mut().render_state = Some(render_state);

        if let Some(el) = document.get_element_by_id("menu-title") {
            el.set_text_content(Some(ui::MENU_TITLE));
        }
        if let Some(el) = document.get_element_by_id("menu-rules") {
            el.set_text_content(Some(ui::MENU_RULES));
        }
        set_visible(&document, "menu", true);

        setup_input_handlers(game.clone());
        setup_menu(game.clone());
        setup_shop_buttons(game.clone());

        game.borrow().update_hud();
        request_animation_frame(game);

        log::info!("Herdsman running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let Some(key) = HostKey::from_code(&event.code()) else {
                    return;
                };
                let mut g = game.borrow_mut();
                if key.is_direction() {
                    event.prevent_default();
                    g.input.keys.set(key, true);
                    return;
                }
                if event.repeat() {
                    return;
                }
                match key {
                    HostKey::Shop => g.input.toggle_shop_pin = true,
                    HostKey::Mute => {
                        g.audio.toggle_mute();
                        g.update_hud();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(key) = HostKey::from_code(&event.code()) {
                    game.borrow_mut().input.keys.set(key, false);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu(game: Rc<RefCell<Game>>) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().start(seed);
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    set_visible(&document, "menu", false);
                    set_visible(&document, "hud", true);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Sound toggles on the menu and on the HUD
        for id in ["menu-sound-btn", "mute-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let mut g = game.borrow_mut();
                    g.audio.toggle_mute();
                    g.update_hud();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_shop_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");

        for kind in UpgradeKind::ALL {
            if let Some(btn) = document.get_element_by_id(ui::button_id(kind)) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().input.purchases.push(kind);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Herdsman (native) starting...");
    log::info!("Native mode runs the simulation headless - run with `trunk serve` for the web version");

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| herdsman::GameConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => herdsman::GameConfig::default(),
    };

    headless::run(config, 120.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted play-through used by the native binary
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use herdsman::GameConfig;
    use herdsman::platform::HeldKeys;
    use herdsman::sim::{GameEvent, GameState, TickInput, UpgradeKind, nearest_free, tick};

    const DT: f32 = 1.0 / 60.0;

    /// Walk to the nearest free sheep until the chain is full, then to the yard
    fn autopilot(state: &GameState) -> HeldKeys {
        let yard = state.yard.center();
        let target = if state.followers.len() >= state.capacity() {
            yard
        } else {
            match nearest_free(&state.animals, state.player.pos()) {
                Some((index, _)) => state.animals[index].pos(),
                None => yard,
            }
        };

        let d = target - state.player.pos();
        let dead_zone = state.player.arrival_radius;
        HeldKeys {
            up: d.y < -dead_zone,
            down: d.y > dead_zone,
            left: d.x < -dead_zone,
            right: d.x > dead_zone,
        }
    }

    pub fn run(config: GameConfig, seconds: f32) {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let mut state = GameState::new(config, seed);

        let mut delivered = 0u32;
        let mut spawned = 0u32;
        let frames = (seconds / DT) as u32;
        for frame in 0..frames {
            let input = TickInput {
                keys: autopilot(&state),
                purchases: vec![UpgradeKind::Capacity, UpgradeKind::ScorePer, UpgradeKind::Assistant],
                // Pin the shop open so purchases go through anywhere on the field
                toggle_shop_pin: frame == 0,
            };
            tick(&mut state, &input, DT);

            for event in state.drain_events() {
                match event {
                    GameEvent::AnimalDelivered { .. } => delivered += 1,
                    GameEvent::AnimalSpawned { .. } => spawned += 1,
                    _ => {}
                }
            }
        }

        let up = &state.upgrades;
        log::info!(
            "Simulated {:.0}s (seed {}): score {}, delivered {}, spawned {}, population {}",
            state.time_secs,
            state.seed,
            state.score,
            delivered,
            spawned,
            state.animals.len()
        );
        log::info!(
            "Upgrades: capacity {}, score-per {}, assistant {}",
            up.capacity_level,
            up.score_per_level,
            if up.assistant_hired { "hired" } else { "not hired" }
        );
    }
}
