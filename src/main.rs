//! Soul Tap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, PointerEvent};

    use soul_tap::audio::{AudioManager, SoundEffect};
    use soul_tap::consts::*;
    use soul_tap::gesture::SwipeRecognizer;
    use soul_tap::persistence::SaveData;
    use soul_tap::platform::now_ms;
    use soul_tap::sim::{BattleEvent, BattleState, TickInput, tick};

    /// Which screen is active
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Scene {
        Title,
        Battle,
    }

    /// Game instance holding all state
    struct Game {
        state: BattleState,
        input: TickInput,
        swipe: SwipeRecognizer,
        audio: AudioManager,
        scene: Scene,
        last_time: f64,
        autosave_timer: f64,
        /// Set by the swipe listener, consumed by the pointer-up handler
        swiped: Rc<Cell<bool>>,
    }

    impl Game {
        fn new(state: BattleState) -> Self {
            let swiped = Rc::new(Cell::new(false));
            let mut swipe = SwipeRecognizer::new();

            // Listener runs synchronously inside on_pointer_up, so it only
            // flags the swipe; the handler reacts after dispatch returns.
            let flag = swiped.clone();
            swipe.on_swipe(move |s| {
                log::info!(
                    "Swipe: length={:.1} duration={:.3}s rotation={:.2} velocity=({:.0}, {:.0})",
                    s.length,
                    s.duration,
                    s.rotation,
                    s.velocity.x,
                    s.velocity.y
                );
                flag.set(true);
            });

            Self {
                state,
                input: TickInput::default(),
                swipe,
                audio: AudioManager::new(),
                scene: Scene::Title,
                last_time: 0.0,
                autosave_timer: 0.0,
                swiped,
            }
        }

        /// Run one frame of battle simulation
        fn update(&mut self, dt: f32) {
            if self.scene != Scene::Battle {
                return;
            }

            let input = self.input;
            let events = tick(&mut self.state, &input, dt);
            // Clear one-shot inputs after processing
            self.input.tap = false;
            self.input.buy_bolt = false;

            for event in &events {
                match event {
                    BattleEvent::MonsterSlain { name, souls } => {
                        log::info!("{} slain, {} souls", name, souls);
                        self.audio.play(SoundEffect::MonsterSlain);
                        self.save_now();
                    }
                    BattleEvent::MonsterSpawned { name, hp } => {
                        log::info!("{} appears ({} hp)", name, hp);
                        self.show_monster();
                    }
                    BattleEvent::BoltUpgraded { level } => {
                        log::info!("Bolt upgraded to level {}", level);
                        self.audio.play(SoundEffect::UpgradeBought);
                    }
                }
            }

            // Autosave
            self.autosave_timer += dt as f64;
            if self.autosave_timer >= AUTOSAVE_INTERVAL_SECS {
                self.autosave_timer = 0.0;
                self.save_now();
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let document = document();

            if let Some(el) = document.get_element_by_id("hud-souls") {
                el.set_text_content(Some(&format!("Souls: {}", self.state.souls)));
            }
            if let Some(el) = document.get_element_by_id("hud-hp") {
                el.set_text_content(Some(&self.state.monster.hp.max(0).to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-bolt") {
                el.set_text_content(Some(&format!("Bolt Lv {}", self.state.levels.bolt)));
            }
        }

        /// Point the monster element at the current monster's image
        fn show_monster(&self) {
            let document = document();
            if let Some(el) = document.get_element_by_id("monster") {
                let spec = self.state.monster.spec();
                let _ = el.set_attribute("src", &format!("./assets/{}", spec.image));
                let _ = el.set_attribute("alt", spec.name);
            }
        }

        /// Save progress to LocalStorage
        fn save_now(&self) {
            SaveData::capture(&self.state, now_ms()).save();
        }

        fn enter_battle(&mut self) {
            self.scene = Scene::Battle;
            self.autosave_timer = 0.0;
            self.show_monster();
            // Save once on entry, to set the offline progress timestamp
            self.save_now();
            set_screen_visibility("title-screen", false);
            set_screen_visibility("battle-screen", true);
        }

        fn exit_to_title(&mut self) {
            self.save_now();
            self.swipe.cancel();
            self.scene = Scene::Title;
            set_screen_visibility("battle-screen", false);
            set_screen_visibility("title-screen", true);
        }
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn set_screen_visibility(id: &str, visible: bool) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "screen" } else { "screen hidden" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Soul Tap starting...");

        let document = document();

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = now_ms() as u64;

        // Restore progress, granting souls for time away
        let state = match SaveData::load() {
            Some(save) => {
                let (state, gained) = save.into_battle_state(seed, now_ms());
                if gained > 0 {
                    log::info!("Welcome back! Gained {} souls while away", gained);
                }
                state
            }
            None => {
                log::info!("No save found, starting fresh");
                BattleState::new(seed)
            }
        };

        let game = Rc::new(RefCell::new(Game::new(state)));
        log::info!("Game initialized with seed: {}", seed);

        setup_title_screen(game.clone());
        setup_battle_input(game.clone());
        setup_auto_save(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Soul Tap running!");
    }

    fn setup_title_screen(game: Rc<RefCell<Game>>) {
        if let Some(el) = document().get_element_by_id("title-screen") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().enter_battle();
            });
            let _ = el
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_battle_input(game: Rc<RefCell<Game>>) {
        let document = document();

        // Gesture tracking covers the whole battle screen
        if let Some(el) = document.get_element_by_id("battle-screen") {
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    let mut g = game.borrow_mut();
                    g.swipe
                        .on_pointer_down(event.offset_x() as f32, event.offset_y() as f32);
                });
                let _ = el.add_event_listener_with_callback(
                    "pointerdown",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    let mut g = game.borrow_mut();
                    g.swipe
                        .on_pointer_up(event.offset_x() as f32, event.offset_y() as f32);
                    if g.swiped.replace(false) {
                        g.audio.play(SoundEffect::Swipe);
                    }
                });
                let _ = el.add_event_listener_with_callback(
                    "pointerup",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
        }

        // Tapping the monster deals damage
        if let Some(el) = document.get_element_by_id("monster") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.input.tap = true;
                g.audio.play(SoundEffect::MonsterHit);
            });
            let _ = el
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Bolt upgrade icon
        if let Some(el) = document.get_element_by_id("bolt-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().input.buy_bolt = true;
            });
            let _ = el
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Door saves and returns to the title screen
        if let Some(el) = document.get_element_by_id("door-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().exit_to_title();
            });
            let _ = el
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_save(game: Rc<RefCell<Game>>) {
        let document = document();

        // Save when the tab is hidden (close, navigate away, switch)
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let g = game.borrow();
                if g.scene == Scene::Battle {
                    g.save_now();
                    log::info!("Saved (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
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
                (((time - g.last_time) / 1000.0) as f32).min(0.25)
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.update_hud();
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
    env_logger::init();
    log::info!("Soul Tap (native) starting...");
    log::info!("Native mode has no UI - run with `trunk serve` for the web version");

    demo_battle();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Short headless battle to sanity-check the simulation from the CLI
#[cfg(not(target_arch = "wasm32"))]
fn demo_battle() {
    use soul_tap::sim::{BattleState, TickInput, tick};

    let mut state = BattleState::new(12345);
    let input = TickInput {
        tap: true,
        ..Default::default()
    };

    // Ten simulated seconds of frantic tapping at 60 fps
    for _ in 0..600 {
        tick(&mut state, &input, 1.0 / 60.0);
    }

    println!(
        "After 10s: {} kills, {} souls, fighting {} ({} hp)",
        state.kills,
        state.souls,
        state.monster.spec().name,
        state.monster.hp
    );
    assert!(state.kills > 0, "tapping should kill something in 10s");
    println!("✓ Battle simulation ticks!");
}
