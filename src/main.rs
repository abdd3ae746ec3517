//! Plinko Odds entry point
//!
//! In the browser this wires the page (start button, bet input, results panel,
//! help chat) to a `Session` and renders the board every animation frame.
//! Natively it runs a batch of headless drops and prints the house edge.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, EventTarget, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
        HtmlInputElement, MouseEvent,
    };

    use plinko_odds::consts::{DEFAULT_WAGER, MAX_SUBSTEPS, SIM_DT};
    use plinko_odds::renderer::scene::slot_rect;
    use plinko_odds::renderer::{RenderState, build_scene};
    use plinko_odds::sim::Session;
    use plinko_odds::{Ledger, Settings, Settlement, advice, format_amount, parse_wager};

    const NET_LOSS_COLOR: &str = "#FF6B6B";
    const NET_GAIN_COLOR: &str = "#0B7D5C";

    /// Page state shared by the DOM callbacks
    struct App {
        session: Session,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        drop_button: Option<HtmlButtonElement>,
        bet_input: Option<HtmlInputElement>,
        accumulator: f32,
        last_time: f64,
        /// Set once the simulation section is shown
        active: bool,
    }

    impl App {
        fn container_width(&self) -> f32 {
            self.canvas
                .parent_element()
                .map(|parent| parent.client_width() as f32)
                .unwrap_or(0.0)
        }

        /// Size board, canvas and surface to the canvas container
        fn fit_canvas(&mut self) {
            self.session.resize(self.container_width());
            let board = self.session.board();
            let (width, height) = (board.width.round() as u32, board.height.round() as u32);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
                render_state.set_board_size(board.width, board.height);
            }
            update_slot_labels(&self.session);
        }

        fn drop_ball(&mut self) {
            let wager = self
                .bet_input
                .as_ref()
                .map(|input| parse_wager(&input.value()))
                .unwrap_or(DEFAULT_WAGER);
            if self.session.start_drop(wager) {
                self.set_drop_enabled(false);
            }
        }

        fn set_drop_enabled(&self, enabled: bool) {
            if let Some(button) = &self.drop_button {
                button.set_disabled(!enabled);
            }
        }

        /// Run simulation steps
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                if let Some(settlement) = self.session.advance() {
                    self.set_drop_enabled(true);
                    show_results(&settlement, self.session.ledger());
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Drop any backlog a slow frame left behind
            if substeps == MAX_SUBSTEPS {
                self.accumulator = self.accumulator.min(SIM_DT);
            }
        }

        fn render(&mut self) {
            if !self.active {
                return;
            }
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            let vertices = build_scene(
                self.session.board(),
                self.session.paytable(),
                self.session.ball(),
            );
            match render_state.render(&vertices) {
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

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn on_click(target: &EventTarget, handler: impl FnMut(MouseEvent) + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Write one settled drop and the session totals into the results panel
    fn show_results(settlement: &Settlement, ledger: &Ledger) {
        let Some(document) = document() else {
            return;
        };

        let fields = [
            ("winAmount", settlement.win),
            ("totalBet", ledger.total_wagered()),
            ("totalWin", ledger.total_won()),
            ("netLoss", ledger.net()),
        ];
        for (id, amount) in fields {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(&format_amount(amount)));
            }
        }

        if let Some(net) = element::<HtmlElement>(&document, "netLoss") {
            let color = if ledger.net() < 0.0 {
                NET_LOSS_COLOR
            } else {
                NET_GAIN_COLOR
            };
            let _ = net.style().set_property("color", color);
        }
    }

    /// Multiplier labels under the slots, if the page has a container for them
    fn update_slot_labels(session: &Session) {
        let Some(document) = document() else {
            return;
        };
        let Some(container) = document.get_element_by_id("slotLabels") else {
            return;
        };

        container.set_inner_html("");
        let board = session.board();
        let paytable = session.paytable();
        for slot in 0..board.slots {
            let Ok(label) = document.create_element("span") else {
                continue;
            };
            let (top_left, size) = slot_rect(board, slot);
            label.set_class_name(&format!("slot-label {}", paytable.tier(slot).as_str()));
            label.set_text_content(Some(&paytable.label(slot)));
            let _ = label.set_attribute(
                "style",
                &format!(
                    "left:{:.2}%;width:{:.2}%",
                    top_left.x / board.width * 100.0,
                    size.x / board.width * 100.0
                ),
            );
            let _ = container.append_child(&label);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Plinko Odds starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = element(&document, "plinkoCanvas").ok_or("no plinkoCanvas")?;

        let settings = Settings::load();
        // Stored copy always holds a complete, valid config to edit
        settings.save();
        let seed = js_sys::Date::now() as u64;
        let container_width = canvas
            .parent_element()
            .map(|parent| parent.client_width() as f32)
            .unwrap_or(0.0);
        let session = Session::new(settings, container_width, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Session initialized with seed: {}", seed);

        let (board_w, board_h) = (session.board().width, session.board().height);
        let app = Rc::new(RefCell::new(App {
            session,
            render_state: None,
            canvas: canvas.clone(),
            drop_button: element(&document, "dropBall"),
            bet_input: element(&document, "betAmount"),
            accumulator: 0.0,
            last_time: 0.0,
            active: false,
        }));

        // The ledger keeps working without a GPU; only the board stays blank
        match init_renderer(&canvas, (board_w, board_h)).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("WebGPU unavailable: {:?}", e),
        }

        setup_simulation_controls(&document, app.clone());
        setup_chatbot(&document);
        setup_resize(&window, app.clone());

        request_animation_frame(app);

        log::info!("Plinko Odds running!");
        Ok(())
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        board_size: (f32, f32),
    ) -> Result<RenderState, JsValue> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let width = (board_size.0.round() as u32).max(1);
        let height = (board_size.1.round() as u32).max(1);
        RenderState::new(surface, &adapter, width, height, board_size)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn setup_simulation_controls(document: &Document, app: Rc<RefCell<App>>) {
        // Start: hide the hero and reveal the board
        if let Some(btn) = document.get_element_by_id("startSimulation") {
            let app = app.clone();
            let document = document.clone();
            on_click(&btn, move |_event| {
                if let Some(hero) = document
                    .query_selector(".hero")
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    let _ = hero.style().set_property("display", "none");
                }
                if let Some(section) = document.get_element_by_id("simulationSection") {
                    let _ = section.class_list().add_1("active");
                }

                let mut app = app.borrow_mut();
                app.active = true;
                app.fit_canvas();
                log::info!("Simulation shown");
            });
        }

        if let Some(btn) = document.get_element_by_id("dropBall") {
            on_click(&btn, move |_event| {
                app.borrow_mut().drop_ball();
            });
        }
    }

    fn setup_chatbot(document: &Document) {
        let chat_window = document.get_element_by_id("chatbotWindow");

        if let (Some(toggle), Some(chat_window)) =
            (document.get_element_by_id("chatbotToggle"), chat_window.clone())
        {
            on_click(&toggle, move |_event| {
                let _ = chat_window.class_list().toggle("active");
            });
        }

        if let (Some(close), Some(chat_window)) =
            (document.get_element_by_id("chatbotClose"), chat_window)
        {
            on_click(&close, move |_event| {
                let _ = chat_window.class_list().remove_1("active");
            });
        }

        let Some(messages) = document.get_element_by_id("chatbotMessages") else {
            return;
        };
        let Ok(buttons) = document.query_selector_all(".option-btn") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(btn) = buttons.get(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            let key = btn.get_attribute("data-response").unwrap_or_default();
            let messages = messages.clone();
            let document = document.clone();
            on_click(&btn, move |_event| {
                let Some(reply) = advice::response_for(&key) else {
                    log::debug!("No reply for topic '{}'", key);
                    return;
                };
                if let Ok(message) = document.create_element("div") {
                    message.set_class_name("message bot-message");
                    message.set_text_content(Some(reply));
                    let _ = messages.append_child(&message);
                    messages.set_scroll_top(messages.scroll_height());
                }
            });
        }
    }

    fn setup_resize(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut app = app.borrow_mut();
            if app.active {
                app.fit_canvas();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut app = app.borrow_mut();

            let dt = if app.last_time > 0.0 {
                ((time - app.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            app.last_time = time;

            app.update(dt);
            app.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_app::run().await {
        log::error!("Plinko Odds failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use plinko_odds::sim::Board;
    use plinko_odds::stats::{binomial_return, binomial_slot_probabilities, house_edge, simulate};
    use plinko_odds::{Ledger, Settings, advice, format_amount, parse_wager};

    #[derive(Parser, Debug)]
    #[command(
        name = "plinko-odds",
        about = "Drop plinko balls headlessly and report how much the house keeps",
        version
    )]
    pub struct Args {
        /// Number of balls to drop
        #[arg(long, default_value_t = 1000)]
        drops: u32,

        /// Seed for the peg deflections (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Wager per drop, read the same way as the page's bet field
        #[arg(long, default_value = "1")]
        bet: String,

        /// Width of the element hosting the board, in pixels
        #[arg(long, default_value_t = 448.0)]
        width: f32,

        /// Also print the help message for a topic (probability, resources, questions)
        #[arg(long)]
        topic: Option<String>,
    }

    pub fn run(args: Args) -> Result<()> {
        let settings = Settings::load();
        let seed = match args.seed {
            Some(seed) => seed,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock is before the unix epoch")?
                .as_millis() as u64,
        };
        let wager = parse_wager(&args.bet);

        let histogram = simulate(&settings, args.width, args.drops, seed)
            .context("invalid board settings")?;
        let board = Board::from_container_width(&settings, args.width);
        let paytable = &settings.paytable();

        let mut ledger = Ledger::new();
        for (slot, &count) in histogram.counts().iter().enumerate() {
            for _ in 0..count {
                ledger.settle(slot, wager, paytable);
            }
        }

        println!(
            "Board {:.0}x{:.0}, {} rows, {} slots, seed {}",
            board.width, board.height, board.rows, board.slots, seed
        );
        println!(
            "{:>4}  {:>6}  {:>8}  {:>8}  {:>8}",
            "slot", "payout", "drops", "share", "ideal"
        );
        let ideal = binomial_slot_probabilities(paytable.len());
        for slot in 0..board.slots {
            println!(
                "{:>4}  {:>6}  {:>8}  {:>7.2}%  {:>7.2}%",
                slot,
                paytable.label(slot),
                histogram.count(slot),
                histogram.frequency(slot) * 100.0,
                ideal.get(slot).copied().unwrap_or(0.0) * 100.0
            );
        }

        println!();
        println!("Drops:        {}", ledger.drops());
        println!("Total bet:    {}", format_amount(ledger.total_wagered()));
        println!("Total won:    {}", format_amount(ledger.total_won()));
        println!("Net:          {}", format_amount(ledger.net()));

        if ledger.drops() > 0 {
            let observed = histogram.expected_multiplier(paytable);
            println!(
                "Observed return {:.2}% (house edge {:.2}%)",
                observed * 100.0,
                house_edge(observed) * 100.0
            );
        }
        let ideal_return = binomial_return(paytable);
        println!(
            "Binomial return {:.2}% (house edge {:.2}%)",
            ideal_return * 100.0,
            house_edge(ideal_return) * 100.0
        );

        if let Some(key) = args.topic {
            let Some(reply) = advice::response_for(&key) else {
                bail!("unknown topic '{}', expected probability, resources or questions", key);
            };
            println!();
            println!("{}", reply);
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Plinko Odds (native) starting...");
    cli::run(cli::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
