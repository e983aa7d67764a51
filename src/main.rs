//! Shuriken Defense entry point
//!
//! Web: canvas host wiring keyboard/pointer/touch input and DOM HUD to the
//! game loop. Native: headless run driven by the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, KeyboardEvent,
        PointerEvent,
    };

    use shuriken_defense::Settings;
    use shuriken_defense::consts::*;
    use shuriken_defense::platform::{Direction, FrameSink, GameLoop, InputQueue};
    use shuriken_defense::sim::Action;
    use shuriken_defense::ui::{HudSnapshot, Overlay, RenderSnapshot};

    /// Draws to a 2D canvas and writes HUD text into the page
    struct CanvasSink {
        ctx: CanvasRenderingContext2d,
        document: Document,
    }

    impl CanvasSink {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn circle(&self, pos: Vec2, radius: f32) {
            self.ctx.begin_path();
            let _ = self
                .ctx
                .arc(pos.x as f64, pos.y as f64, radius as f64, 0.0, TAU);
            self.ctx.fill();
        }

        fn draw_background(&self, size: Vec2) {
            let ctx = &self.ctx;
            let (w, h) = (size.x as f64, size.y as f64);
            ctx.set_fill_style_str("#2f6d37");
            ctx.fill_rect(0.0, 0.0, w, h);

            // Grass blades
            ctx.set_stroke_style_str("rgba(70, 110, 62, 0.35)");
            ctx.set_line_width(2.0);
            let mut x = 0.0;
            while x < w {
                let mut y = 0.0;
                while y < h {
                    ctx.begin_path();
                    ctx.move_to(x, y + 8.0);
                    ctx.line_to(x + 2.0, y);
                    ctx.stroke();
                    y += 28.0;
                }
                x += 34.0;
            }

            // Home
            ctx.set_fill_style_str("#7f5136");
            ctx.fill_rect(w / 2.0 - 48.0, h / 2.0 - 110.0, 96.0, 64.0);
            ctx.set_fill_style_str("#4b2f1d");
            ctx.begin_path();
            ctx.move_to(w / 2.0 - 56.0, h / 2.0 - 110.0);
            ctx.line_to(w / 2.0, h / 2.0 - 146.0);
            ctx.line_to(w / 2.0 + 56.0, h / 2.0 - 110.0);
            ctx.close_path();
            ctx.fill();
        }
    }

    impl FrameSink for CanvasSink {
        fn draw(&mut self, frame: &RenderSnapshot) {
            self.draw_background(frame.world_size);
            let ctx = &self.ctx;

            // Shuriken
            ctx.set_fill_style_str("#d9dadb");
            for p in &frame.projectiles {
                let (x, y) = (p.pos.x as f64, p.pos.y as f64);
                ctx.begin_path();
                ctx.move_to(x, y - 7.0);
                ctx.line_to(x + 7.0, y);
                ctx.line_to(x, y + 7.0);
                ctx.line_to(x - 7.0, y);
                ctx.close_path();
                ctx.fill();
            }

            // Enemies
            for e in &frame.enemies {
                ctx.set_fill_style_str("#a33c31");
                self.circle(e.pos, e.radius);
                ctx.set_fill_style_str("#2f1312");
                ctx.fill_rect(e.pos.x as f64 - 5.0, e.pos.y as f64 - 1.0, 10.0, 2.0);
            }

            // Player
            let player = &frame.player;
            ctx.set_fill_style_str(if player.flashing { "#ffffb4" } else { "#f8f0d0" });
            self.circle(player.pos, player.radius);

            let tip = player.pos + player.facing * (player.radius + 8.0);
            ctx.set_stroke_style_str("#1b1f22");
            ctx.set_line_width(3.0);
            ctx.begin_path();
            ctx.move_to(player.pos.x as f64, player.pos.y as f64);
            ctx.line_to(tip.x as f64, tip.y as f64);
            ctx.stroke();

            if player.swinging {
                ctx.set_stroke_style_str("#d9dde2");
                ctx.set_line_width(6.0);
                ctx.begin_path();
                let _ = ctx.arc(
                    player.pos.x as f64,
                    player.pos.y as f64,
                    SWORD_ARC_RADIUS as f64,
                    -0.8,
                    0.8,
                );
                ctx.stroke();
            }

            if let Some(wave) = frame.wave_banner {
                let cx = frame.world_size.x as f64 / 2.0;
                ctx.set_fill_style_str("rgba(14, 20, 12, 0.35)");
                ctx.fill_rect(cx - 78.0, 10.0, 156.0, 36.0);
                ctx.set_fill_style_str("#ecf2de");
                ctx.set_font("bold 18px Trebuchet MS");
                ctx.set_text_align("center");
                let _ = ctx.fill_text(&format!("Wave {}", wave), cx, 34.0);
            }
        }

        fn update_hud(&mut self, hud: &HudSnapshot) {
            self.set_text("heartsText", &hud.hearts);
            self.set_text("waveText", &hud.wave);
            self.set_text("enemiesLeftText", &hud.enemies_left.to_string());
            self.set_text("shurikenText", &hud.shuriken.to_string());
        }

        fn show_overlay(&mut self, overlay: &Overlay) {
            show_overlay(&self.document, overlay);
        }
    }

    fn show_overlay(document: &Document, overlay: &Overlay) {
        if let Some(el) = document.get_element_by_id("overlay") {
            let _ = el.class_list().add_1("active");
            el.set_inner_html(&format!(
                r#"<div class="overlay-card"><h1>{}</h1><p>{}</p><button id="startBtn" class="primary-btn">{}</button></div>"#,
                overlay.title, overlay.message, overlay.restart_label
            ));
        }
    }

    /// Game instance holding all state
    struct Game {
        game_loop: GameLoop,
        input: InputQueue,
        sink: CanvasSink,
        /// False until the title card's start button is pressed
        started: bool,
    }

    impl Game {
        fn start(&mut self) {
            self.input.clear();
            self.game_loop.reset(&mut self.sink);
            self.started = true;
            if let Some(el) = self.sink.document.get_element_by_id("overlay") {
                let _ = el.class_list().remove_1("active");
            }
        }

        fn tick(&mut self, time: f64) {
            if self.started {
                let _ = self.game_loop.frame(time, &mut self.input, &mut self.sink);
            } else {
                self.game_loop.redraw(&mut self.sink);
            }
        }
    }

    fn window() -> web_sys::Window {
        web_sys::window().expect("no global window")
    }

    fn request_animation_frame(f: &Closure<dyn FnMut(f64)>) {
        let _ = window().request_animation_frame(f.as_ref().unchecked_ref());
    }

    fn parse_direction(name: &str) -> Option<Direction> {
        match name {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    fn on<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let target: &web_sys::EventTarget = &window();
        {
            let game = game.clone();
            on(target, "keydown", move |e: KeyboardEvent| {
                if game.borrow_mut().input.handle_key(&e.key(), true) {
                    e.prevent_default();
                }
            });
        }
        on(target, "keyup", move |e: KeyboardEvent| {
            if game.borrow_mut().input.handle_key(&e.key(), false) {
                e.prevent_default();
            }
        });
    }

    fn setup_pointer(game: Rc<RefCell<Game>>, canvas: HtmlCanvasElement, world_size: Vec2) {
        let target: &web_sys::EventTarget = &canvas.clone();
        on(target, "pointerdown", move |e: PointerEvent| {
            let rect = canvas.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            let px = (e.client_x() as f64 - rect.left()) / rect.width() * world_size.x as f64;
            let py = (e.client_y() as f64 - rect.top()) / rect.height() * world_size.y as f64;
            game.borrow_mut()
                .input
                .throw_at(Vec2::new(px as f32, py as f32));
        });
    }

    fn setup_touch_controls(game: Rc<RefCell<Game>>, document: &Document) {
        if let Some(btn) = document.get_element_by_id("swordBtn") {
            let game = game.clone();
            on(&btn, "pointerdown", move |e: PointerEvent| {
                e.prevent_default();
                game.borrow_mut().input.push_action(Action::Strike);
            });
        }
        if let Some(btn) = document.get_element_by_id("shurikenBtn") {
            let game = game.clone();
            on(&btn, "pointerdown", move |e: PointerEvent| {
                e.prevent_default();
                game.borrow_mut().input.push_action(Action::Throw { aim: None });
            });
        }

        let Ok(buttons) = document.query_selector_all("#dpad button[data-dir]") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(dir) = button.get_attribute("data-dir").and_then(|d| parse_direction(&d))
            else {
                continue;
            };
            for (event, held) in [
                ("pointerdown", true),
                ("pointerup", false),
                ("pointercancel", false),
                ("pointerleave", false),
            ] {
                let game = game.clone();
                on(&button, event, move |e: PointerEvent| {
                    e.prevent_default();
                    game.borrow_mut().input.set_direction(dir, held);
                });
            }
        }
    }

    fn setup_overlay(game: Rc<RefCell<Game>>, document: &Document) {
        let Some(overlay) = document.get_element_by_id("overlay") else {
            log::warn!("No #overlay element, starting immediately");
            game.borrow_mut().start();
            return;
        };
        on(&overlay, "click", move |e: web_sys::Event| {
            let clicked_start = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| el.id() == "startBtn");
            if clicked_start {
                game.borrow_mut().start();
                log::info!("Session started");
            }
        });
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let document = window().document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas element")?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let settings = Settings {
            world_width: canvas.width() as f32,
            world_height: canvas.height() as f32,
            ..Settings::default()
        };
        let seed = settings
            .seed
            .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64);
        let world = settings.world();

        let sink = CanvasSink {
            ctx,
            document: document.clone(),
        };
        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::from_settings(&settings, seed),
            input: InputQueue::new(),
            sink,
            started: false,
        }));

        {
            let mut g = game.borrow_mut();
            let hud = HudSnapshot::capture(&g.game_loop.state);
            g.sink.update_hud(&hud);
        }
        show_overlay(&document, &Overlay::title_card());

        setup_keyboard(game.clone());
        setup_pointer(game.clone(), canvas, Vec2::new(world.width, world.height));
        setup_touch_controls(game.clone(), &document);
        setup_overlay(game.clone(), &document);

        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(Closure::new(move |time: f64| {
            game.borrow_mut().tick(time);
            if let Some(cb) = f.borrow().as_ref() {
                request_animation_frame(cb);
            }
        }));
        if let Some(cb) = g.borrow().as_ref() {
            request_animation_frame(cb);
        }

        log::info!("Shuriken Defense ready (seed {})", seed);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use rand::Rng;

    use shuriken_defense::Settings;
    use shuriken_defense::platform::{Autopilot, FrameSink, GameLoop};
    use shuriken_defense::sim::GamePhase;
    use shuriken_defense::ui::{HudSnapshot, Overlay, RenderSnapshot};

    /// Logs HUD changes instead of drawing
    #[derive(Default)]
    struct LogSink {
        last_wave: Option<String>,
    }

    impl FrameSink for LogSink {
        fn draw(&mut self, _frame: &RenderSnapshot) {}

        fn update_hud(&mut self, hud: &HudSnapshot) {
            if self.last_wave.as_deref() != Some(hud.wave.as_str()) {
                log::info!("Wave {} | hearts {} | shuriken {}", hud.wave, hud.hearts, hud.shuriken);
                self.last_wave = Some(hud.wave.clone());
            }
            log::debug!(
                "hearts {} wave {} enemies left {} shuriken {}",
                hud.hearts,
                hud.wave,
                hud.enemies_left,
                hud.shuriken
            );
        }

        fn show_overlay(&mut self, overlay: &Overlay) {
            log::info!("{}: {}", overlay.title, overlay.message);
        }
    }

    pub fn run() {
        let settings = std::env::args()
            .nth(1)
            .map(|path| Settings::load(Path::new(&path)))
            .unwrap_or_default();
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());

        let mut game = GameLoop::from_settings(&settings, seed);
        let mut pilot = Autopilot::new();
        let mut sink = LogSink::default();

        for frame in 0..settings.max_frames {
            let timestamp = frame as f64 * settings.frame_interval_ms;
            game.frame(timestamp, &mut pilot, &mut sink);
            if game.state.phase != GamePhase::Running {
                break;
            }
        }

        let state = &game.state;
        println!(
            "Seed {}: {:?} on wave {} with {:.1} hearts after {} frames",
            seed,
            state.phase,
            state.wave,
            state.hearts(),
            game.frames()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shuriken Defense (native) starting headless autopilot run...");
    native::run();
}
