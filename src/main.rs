//! Fortune Catch entry point
//!
//! Browser: preloads assets, wires DOM input into the game and drives it from
//! `requestAnimationFrame`. Native: plays one headless session with a simple
//! autopilot and prints the summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlCanvasElement,
        HtmlElement, KeyboardEvent, MouseEvent, TouchEvent, Window,
    };

    use fortune_catch::assets;
    use fortune_catch::audio::SoundBoard;
    use fortune_catch::platform::web::{DomHud, HtmlAudio};
    use fortune_catch::renderer::CanvasSurface;
    use fortune_catch::sim::{Arena, ArrowKey, Game, InputEvent};
    use fortune_catch::{Config, Frontend};

    type WebFrontend = Frontend<CanvasSurface, HtmlAudio, DomHud>;

    /// Everything the event handlers and the frame callback share
    struct App {
        game: Game,
        frontend: WebFrontend,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// Canvas-relative x of a viewport coordinate
        fn canvas_x(&self, client_x: i32) -> f32 {
            let rect = self.canvas.get_bounding_client_rect();
            client_x as f32 - rect.left() as f32
        }

        fn fit_to_window(&mut self, window: &Window) {
            let (w, h) = window_size(window);
            self.frontend.surface.resize(w, h);
            self.game.resize(Arena::new(w as f32, h as f32));
        }
    }

    fn window_size(window: &Window) -> (u32, u32) {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (
            dim(window.inner_width()) as u32,
            dim(window.inner_height()) as u32,
        )
    }

    fn set_display(document: &Document, selector: &str, display: &str) {
        if let Some(el) = document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }

    fn set_progress(document: &Document, loaded: usize, total: usize) {
        if let Some(el) = document
            .query_selector(".progress")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let pct = loaded as f64 / total.max(1) as f64 * 100.0;
            let _ = el.style().set_property("width", &format!("{pct}%"));
        }
    }

    fn listen(target: &EventTarget, name: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Same as `listen`, but the handler may call `preventDefault`
    fn listen_active(target: &EventTarget, name: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            closure.as_ref().unchecked_ref(),
            &options,
        );
        closure.forget();
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        log::info!("Fortune Catch starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .query_selector("#gameCanvas")
            .ok()
            .flatten()
            .expect("no #gameCanvas")
            .dyn_into()
            .expect("#gameCanvas is not a canvas");

        let progress_doc = document.clone();
        let assets = match assets::web::load_all(move |loaded, total| {
            set_progress(&progress_doc, loaded, total);
        })
        .await
        {
            Ok(assets) => assets,
            Err(err) => {
                log::error!("preload failed: {}", err);
                let _ = window
                    .alert_with_message("Failed to load game resources, please refresh and try again.");
                return;
            }
        };

        let surface = CanvasSurface::new(canvas.clone()).expect("canvas has no 2d context");
        let seed = js_sys::Date::now() as u64;
        let frontend = Frontend::new(
            surface,
            SoundBoard::new(HtmlAudio, seed),
            DomHud::new(document.clone()),
            assets,
        );

        let (w, h) = window_size(&window);
        let app = Rc::new(RefCell::new(App {
            game: Game::new(Config::default(), Arena::new(w as f32, h as f32)),
            frontend,
            canvas: canvas.clone(),
        }));
        app.borrow_mut().fit_to_window(&window);

        set_display(&document, ".loading-screen", "none");
        set_display(&document, ".welcome-page", "flex");

        setup_input(&app, &window, &document, &canvas);
        setup_start_buttons(&app, &document);

        request_animation_frame(app);
    }

    fn setup_input(
        app: &Rc<RefCell<App>>,
        window: &Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
    ) {
        {
            let app = app.clone();
            listen(document, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                let mut a = app.borrow_mut();
                if let Some(arrow) = ArrowKey::from_key(&key) {
                    a.game.handle_input(InputEvent::KeyDown(arrow));
                } else if key == "m" || key == "M" {
                    let muted = !a.frontend.sounds.is_muted();
                    a.frontend.set_muted(muted);
                    log::info!("sound {}", if muted { "off" } else { "on" });
                }
            });
        }

        {
            let app = app.clone();
            listen(document, "keyup", move |event| {
                if let Some(arrow) = event
                    .dyn_ref::<KeyboardEvent>()
                    .and_then(|e| ArrowKey::from_key(&e.key()))
                {
                    app.borrow_mut().game.handle_input(InputEvent::KeyUp(arrow));
                }
            });
        }

        {
            let app = app.clone();
            listen(canvas, "touchstart", move |event| {
                let Some(touch) = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|e| e.touches().get(0))
                else {
                    return;
                };
                let mut a = app.borrow_mut();
                let x = a.canvas_x(touch.client_x());
                a.game.handle_input(InputEvent::TouchStart { x });
            });
        }

        {
            let app = app.clone();
            listen_active(canvas, "touchmove", move |event| {
                let mut a = app.borrow_mut();
                if !a.game.is_running() {
                    return;
                }
                event.prevent_default();
                if let Some(touch) = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|e| e.touches().get(0))
                {
                    let x = a.canvas_x(touch.client_x());
                    a.game.handle_input(InputEvent::TouchMove { x });
                }
            });
        }

        {
            let app = app.clone();
            listen(canvas, "touchend", move |_| {
                app.borrow_mut().game.handle_input(InputEvent::TouchEnd);
            });
        }

        {
            let app = app.clone();
            listen(canvas, "mousedown", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let mut a = app.borrow_mut();
                    let x = a.canvas_x(event.client_x());
                    a.game.handle_input(InputEvent::PointerDown { x });
                }
            });
        }

        {
            let app = app.clone();
            listen(document, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let mut a = app.borrow_mut();
                    let x = a.canvas_x(event.client_x());
                    a.game.handle_input(InputEvent::PointerMove { x });
                }
            });
        }

        {
            let app = app.clone();
            listen(document, "mouseup", move |_| {
                app.borrow_mut().game.handle_input(InputEvent::PointerUp);
            });
        }

        // No text selection while dragging the player around
        {
            let app = app.clone();
            listen(document, "selectstart", move |event| {
                if app.borrow().game.is_running() {
                    event.prevent_default();
                }
            });
        }

        {
            let app = app.clone();
            let win = window.clone();
            listen(window, "resize", move |_| {
                app.borrow_mut().fit_to_window(&win);
            });
        }
    }

    /// Every `.start-button` (welcome page and result modal) starts a session
    fn setup_start_buttons(app: &Rc<RefCell<App>>, document: &Document) {
        let app = app.clone();
        let doc = document.clone();
        listen(document, "click", move |event| {
            let is_start = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| el.class_list().contains("start-button"));
            if !is_start {
                return;
            }

            set_display(&doc, ".welcome-page", "none");
            set_display(&doc, ".game-page", "block");

            let seed = js_sys::Date::now() as u64;
            let mut a = app.borrow_mut();
            a.frontend.play_button();
            a.game.start(seed);
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let App { game, frontend, .. } = &mut *a;
            game.frame(time);
            frontend.present(game);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fortune_catch::Config;

    env_logger::init();
    log::info!("Fortune Catch (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the real game");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match Config::from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("bad config {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);

    let summary = demo::play(config, seed);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("could not serialise summary: {}", err),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use fortune_catch::audio::SoundBoard;
    use fortune_catch::platform::headless::{
        RecordingAudio, RecordingHud, RecordingSurface, headless_assets,
    };
    use fortune_catch::sim::{Arena, Game, GameSession, InputEvent, SessionSummary};
    use fortune_catch::{Config, Frontend};

    const FRAME_MS: f64 = 16.0;
    /// Horizontal clearance kept from any bomb in the lower half of the screen
    const BOMB_CLEARANCE: f32 = 140.0;

    /// Where the autopilot wants the player's center to be
    fn aim(session: &GameSession) -> f32 {
        let arena = session.arena;
        let center = session.player.x + session.player.size / 2.0;

        let threat = session
            .entities
            .iter()
            .filter(|e| e.kind.is_bomb() && e.pos.y > arena.height / 2.0)
            .map(|e| e.pos.x + e.size.x / 2.0)
            .find(|x| (x - center).abs() < BOMB_CLEARANCE);
        if let Some(bomb_x) = threat {
            return if bomb_x > arena.width / 2.0 {
                bomb_x - BOMB_CLEARANCE * 2.0
            } else {
                bomb_x + BOMB_CLEARANCE * 2.0
            };
        }

        // Lowest item still above the player
        session
            .entities
            .iter()
            .filter(|e| !e.kind.is_bomb())
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map_or(center, |e| e.pos.x + e.size.x / 2.0)
    }

    pub fn play(config: Config, seed: u64) -> SessionSummary {
        let mut game = Game::new(config, Arena::new(800.0, 600.0));
        let mut frontend = Frontend::new(
            RecordingSurface::default(),
            SoundBoard::new(RecordingAudio::default(), seed),
            RecordingHud::default(),
            headless_assets(),
        );

        game.start(seed);
        let mut t = 0.0;
        while game.is_running() {
            let x = aim(game.session());
            game.handle_input(InputEvent::PointerDown { x });
            game.frame(t);
            frontend.present(&mut game);
            t += FRAME_MS;
        }

        log::info!(
            "demo finished after {} frames, {} sounds played",
            frontend.surface.frames,
            frontend.sounds.sink().calls.len()
        );
        game.summary()
    }
}
