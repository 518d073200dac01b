//! Vault Door entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f32::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlImageElement, KeyboardEvent, PointerEvent};

    use vault_door::consts::{BASE_HEIGHT, BASE_WIDTH};
    use vault_door::sim::{AnimTarget, Command, Easing, PuzzleSession, TickInput, tick};
    use vault_door::stage::{Layout, Placement, Pose, SequencePlayer, TextureSizes, Tween};
    use vault_door::GameConfig;

    /// Decoration spin speed (radians per second)
    const DECORATION_SPIN: f32 = 0.8;
    /// Duration of the per-click handle turn
    const ROTATE_SECONDS: f32 = 0.5;
    /// Door scale the close animation starts from
    const DOOR_CLOSE_FROM: f32 = 0.53;

    /// Game instance holding all state
    struct Game {
        session: PuzzleSession,
        input: TickInput,
        layout: Layout,
        pose: Pose,
        /// Free-running handle turn (per click, or the door-open spin)
        rotate_tween: Option<Tween>,
        /// Sequence the session is waiting on
        sequence: Option<SequencePlayer>,
        /// Door-open pulse; its completion is not reported
        pulse: Option<SequencePlayer>,
        door_open: bool,
        handle_interactive: bool,
        decoration_angle: f32,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, config: GameConfig, layout: Layout) -> Self {
            Self {
                session: PuzzleSession::new(seed, config),
                input: TickInput::default(),
                layout,
                pose: Pose::default(),
                rotate_tween: None,
                sequence: None,
                pulse: None,
                door_open: false,
                handle_interactive: false,
                decoration_angle: 0.0,
                last_time: 0.0,
            }
        }

        /// Run one frame: feed events, apply commands, animate
        fn update(&mut self, dt: f32, document: &Document) {
            let dt = dt.min(0.1);
            tick(&mut self.session, &self.input, dt);
            self.input.clear();

            for command in self.session.drain_commands() {
                self.apply(command, document);
            }

            if let Some(tween) = self.rotate_tween.as_mut() {
                self.pose.handle_angle = tween.advance(dt);
                if tween.is_finished() {
                    self.rotate_tween = None;
                }
            }

            if let Some(player) = self.sequence.as_mut() {
                if let Some(id) = player.advance(dt, &mut self.pose) {
                    // Reported on the next tick
                    self.input.completed_sequences.push(id);
                    self.sequence = None;
                }
            }

            if let Some(player) = self.pulse.as_mut() {
                if player.advance(dt, &mut self.pose).is_some() {
                    self.pulse = None;
                }
            }

            self.decoration_angle = (self.decoration_angle + dt * DECORATION_SPIN) % TAU;
        }

        fn apply(&mut self, command: Command, document: &Document) {
            log::debug!("{:?}", command);
            match command {
                Command::PlayRotate { target_angle, .. } => {
                    self.rotate_tween = Some(Tween::new(
                        self.pose.handle_angle,
                        target_angle,
                        ROTATE_SECONDS,
                        Easing::Power2InOut,
                    ));
                }
                Command::ShowTimerText(text) => {
                    if let Some(el) = document.get_element_by_id("timer-text") {
                        el.set_text_content(Some(&text));
                    }
                }
                Command::PlayDoorOpen(pulse) => {
                    self.door_open = true;
                    let from = self.pose.handle_angle;
                    self.rotate_tween = Some(Tween::new(from, from + 4.0 * TAU, 5.0, Easing::Linear));
                    self.pulse = Some(SequencePlayer::new(pulse));
                }
                Command::PlayDoorClose(sequence) => {
                    self.door_open = false;
                    self.rotate_tween = None;
                    self.pulse = None;
                    self.pose.handle_scale = 1.0;
                    self.pose.door_scale = DOOR_CLOSE_FROM;
                    self.sequence = Some(SequencePlayer::new(sequence));
                }
                Command::PlaySpinReset(sequence) => {
                    self.rotate_tween = None;
                    self.sequence = Some(SequencePlayer::new(sequence));
                }
                Command::SpawnDecorations => spawn_decorations(document, &self.layout),
                Command::ClearDecorations => {
                    if let Some(el) = document.get_element_by_id("decorations") {
                        el.set_inner_html("");
                    }
                }
                Command::SetHandleInteractive(enabled) => self.handle_interactive = enabled,
            }
        }

        /// Push layout and pose into the DOM
        fn render(&self, document: &Document) {
            let layout = &self.layout;
            place(document, "background", layout.background, 0.0, true);
            set_visible(document, "door", !self.door_open);
            set_visible(document, "door-open", self.door_open);
            set_visible(document, "door-open-shadow", self.door_open);

            let door = Placement {
                scale: layout.door.scale * self.pose.door_scale,
                ..layout.door
            };
            place(document, "door", door, 0.0, false);
            place(document, "door-open", layout.door_open, 0.0, false);
            place(document, "door-open-shadow", layout.door_open_shadow, 0.0, false);

            let handle_scale = self.pose.handle_scale;
            let handle = Placement {
                scale: layout.handle.scale * handle_scale,
                ..layout.handle
            };
            let shadow = Placement {
                scale: layout.handle_shadow.scale * handle_scale,
                ..layout.handle_shadow
            };
            place(document, "handle-shadow", shadow, self.pose.handle_angle, false);
            place(document, "handle", handle, self.pose.handle_angle, false);

            // Handle is off the door while the door rescales
            let door_rescaling = self
                .sequence
                .as_ref()
                .and_then(|p| p.current_step())
                .is_some_and(|step| step.target == AnimTarget::Door);
            set_visible(document, "handle", !door_rescaling);
            set_visible(document, "handle-shadow", !door_rescaling);
            place(document, "timer", layout.timer, 0.0, false);

            if let Some(el) = document.get_element_by_id("handle") {
                let _ = el
                    .class_list()
                    .toggle_with_force("disabled", !self.handle_interactive);
            }

            if let Some(container) = document.get_element_by_id("decorations") {
                let children = container.children();
                for i in 0..children.length() {
                    if let (Some(el), Some(p)) = (children.item(i), layout.decorations.get(i as usize)) {
                        if let Ok(el) = el.dyn_into::<HtmlElement>() {
                            set_transform(&el, *p, self.decoration_angle, false);
                        }
                    }
                }
            }
        }

        fn resize(&mut self, document: &Document) {
            self.layout = compute_layout(document);
            log::debug!("Resized to {:?} (scale {:.3})", self.layout.screen, self.layout.scale);
        }

        fn on_handle_press(&mut self, point: Vec2) {
            if !self.handle_interactive {
                return;
            }
            let local = self.layout.to_handle_local(point, self.pose.handle_angle);
            self.input.pointer_downs.push(local.x);
        }
    }

    fn compute_layout(document: &Document) -> Layout {
        let window = web_sys::window();
        let dim = |v: Option<Result<JsValue, JsValue>>, fallback: f32| {
            v.and_then(|r| r.ok())
                .and_then(|j| j.as_f64())
                .map_or(fallback, |f| f as f32)
        };
        let screen = Vec2::new(
            dim(window.as_ref().map(|w| w.inner_width()), BASE_WIDTH),
            dim(window.as_ref().map(|w| w.inner_height()), BASE_HEIGHT),
        );
        let textures = TextureSizes {
            background: image_size(document, "background").unwrap_or(Vec2::new(BASE_WIDTH, BASE_HEIGHT)),
            door: image_size(document, "door").unwrap_or(Vec2::splat(1000.0)),
        };
        Layout::compute(screen, textures)
    }

    fn image_size(document: &Document, id: &str) -> Option<Vec2> {
        let img: HtmlImageElement = document.get_element_by_id(id)?.dyn_into().ok()?;
        let (w, h) = (img.natural_width(), img.natural_height());
        (w > 0 && h > 0).then(|| Vec2::new(w as f32, h as f32))
    }

    fn set_transform(el: &HtmlElement, p: Placement, angle: f32, top_left: bool) {
        let style = el.style();
        let _ = style.set_property("left", &format!("{}px", p.pos.x));
        let _ = style.set_property("top", &format!("{}px", p.pos.y));
        let transform = if top_left {
            format!("scale({})", p.scale)
        } else {
            format!("translate(-50%, -50%) rotate({}rad) scale({})", angle, p.scale)
        };
        let _ = style.set_property("transform", &transform);
    }

    fn place(document: &Document, id: &str, p: Placement, angle: f32, top_left: bool) {
        match document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            Some(el) => set_transform(&el, p, angle, top_left),
            None => log::warn!("Missing #{} element", id),
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn spawn_decorations(document: &Document, layout: &Layout) {
        let Some(container) = document.get_element_by_id("decorations") else {
            log::warn!("Missing #decorations element");
            return;
        };
        for _ in &layout.decorations {
            match document.create_element("img") {
                Ok(img) => {
                    let _ = img.set_attribute("src", "assets/blink.png");
                    let _ = img.set_attribute("class", "sprite decoration");
                    let _ = container.append_child(&img);
                }
                Err(e) => log::error!("Failed to create decoration: {:?}", e),
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Vault Door starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let config = GameConfig::load();
        // Stored copy mirrors the running config, ready to edit in devtools
        config.save();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, config, compute_layout(&document))));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&document, game.clone());
        request_animation_frame(game);

        log::info!("Vault Door running!");
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Pointer down on the handle
        if let Some(handle) = document.get_element_by_id("handle") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let point = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                game.borrow_mut().on_handle_press(point);
            });
            let _ = handle
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::error!("Missing #handle element - input disabled");
        }

        // Window resize (layout only)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    game.borrow_mut().resize(&document);
                }
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "c" | "C" => g.input.force_close = true, // Debug: close the door now
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
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
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt, &document);
            g.render(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Vault Door (native) starting...");
    log::info!("Native mode plays a scripted demo - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64);
    demo::run(seed, vault_door::GameConfig::load());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless rounds driven by a scripted player
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use vault_door::sim::{Command, Direction, PuzzleSession, RoundState};
    use vault_door::GameConfig;

    /// Simulated frame length
    const FRAME: f32 = 1.0 / 60.0;

    pub fn run(seed: u64, config: GameConfig) {
        let start_delay = config.start_delay_seconds;
        let mut session = PuzzleSession::new(seed, config);
        log::info!("Seed {}", seed);

        run_for(&mut session, start_delay);

        log::info!("-- Round: entering the secret");
        let secret = session.combination().clone();
        for step in secret.steps() {
            press(&mut session, step.direction, step.rotation_count);
        }
        run_until(&mut session, |s| s.round() == RoundState::CountingDown);

        log::info!("-- Round: every step in the wrong direction");
        let secret = session.combination().clone();
        for step in secret.steps() {
            let wrong = match step.direction {
                Direction::Clockwise => Direction::CounterClockwise,
                Direction::CounterClockwise => Direction::Clockwise,
            };
            press(&mut session, wrong, step.rotation_count);
        }
        run_until(&mut session, |s| s.accepts_input());

        log::info!("-- Round: letting the clock run out");
        run_until(&mut session, |s| s.round() == RoundState::TimedOut);
        run_until(&mut session, |s| s.accepts_input());

        log::info!(
            "Demo finished after {} rounds, next secret is {}",
            session.rounds(),
            session.combination()
        );
    }

    fn press(session: &mut PuzzleSession, direction: Direction, times: u8) {
        let local_x = direction.sign() * 10.0;
        for _ in 0..times {
            session.pointer_down(local_x);
        }
    }

    /// Play frames for `seconds`, completing animations as they are requested
    fn run_for(session: &mut PuzzleSession, seconds: f32) {
        let mut elapsed = 0.0;
        while elapsed < seconds {
            frame(session);
            elapsed += FRAME;
        }
    }

    fn run_until(session: &mut PuzzleSession, done: impl Fn(&PuzzleSession) -> bool) {
        // Give up after a few minutes of game time
        for _ in 0..(60 * 240) {
            if done(session) {
                return;
            }
            frame(session);
        }
        log::warn!("Demo step did not settle in {:?}", session.round());
    }

    fn frame(session: &mut PuzzleSession) {
        session.advance(FRAME);
        for command in session.drain_commands() {
            match command {
                Command::PlayDoorClose(sequence) | Command::PlaySpinReset(sequence) => {
                    log::debug!("Playing {:?} ({:.1}s)", sequence.kind, sequence.duration());
                    session.sequence_complete(sequence.id);
                }
                Command::ShowTimerText(text) => log::debug!("Timer: {}", text),
                other => log::trace!("{:?}", other),
            }
        }
    }
}
