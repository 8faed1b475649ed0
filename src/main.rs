//! Wheelburst entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_art {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use glam::Vec2;
    use wheelburst::consts::*;
    use wheelburst::renderer::{RenderState, build_scene};
    use wheelburst::settings::Settings;
    use wheelburst::sim::{ArtState, FrameInput, apply_input, generate_layout, tick};

    /// Artwork instance holding all state
    struct Artwork {
        state: ArtState,
        render_state: Option<RenderState>,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: FrameInput,
    }

    impl Artwork {
        fn new(seed: u64, width: f32, height: f32) -> Self {
            Self {
                state: ArtState::new(seed, width, height),
                render_state: None,
                settings: Settings::load(),
                accumulator: 0.0,
                last_time: 0.0,
                input: FrameInput::default(),
            }
        }

        /// Throw away the artwork and lay out a fresh one (resize, density
        /// change, or the new-layout key)
        fn regenerate(&mut self, seed: u64, width: f32, height: f32) {
            self.state.reset(seed, width, height);
            generate_layout(&mut self.state, self.settings.density.target_wheels());
            self.accumulator = 0.0;
            self.input = FrameInput::default();
        }

        /// Consume latched input, then run simulation ticks
        fn update(&mut self, dt: f32) {
            // Input events are fully processed before the next tick begins
            let input = self.input;
            self.input = FrameInput::default();
            apply_input(&mut self.state, &input);

            let dt = dt.min(0.1);
            self.accumulator += dt;
            let mut steps = 0;
            while self.accumulator >= TICK_DT && steps < MAX_TICKS_PER_FRAME {
                tick(&mut self.state);
                self.accumulator -= TICK_DT;
                steps += 1;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state, &self.settings);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let logical = render_state.logical;
                        render_state.resize(render_state.size.0, render_state.size.1, logical);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Wheelburst starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Physical canvas size follows the device pixel ratio; the artwork
        // itself lives in CSS pixel coordinates
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let art = Rc::new(RefCell::new(Artwork::new(
            seed,
            client_w as f32,
            client_h as f32,
        )));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
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
            (client_w as f32, client_h as f32),
        )
        .await;

        {
            let mut a = art.borrow_mut();
            a.render_state = Some(render_state);
            let target = a.settings.density.target_wheels();
            generate_layout(&mut a.state, target);
        }

        setup_input_handlers(&canvas, art.clone());
        setup_resize_handler(&canvas, art.clone());

        request_animation_frame(art);

        log::info!("Wheelburst running (seed {})", seed);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, art: Rc<RefCell<Artwork>>) {
        // Mouse tap selects a wheel for dispersal
        {
            let art = art.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let point = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                art.borrow_mut().input.tap = Some(point);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch tap
        {
            let art = art.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    art.borrow_mut().input.tap = Some(Vec2::new(x, y));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: restore, new layout, connector toggle, density cycle
        {
            let art = art.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = art.borrow_mut();
                match event.key().as_str() {
                    "z" | "Z" | "Backspace" => a.input.restore = true,
                    "n" | "N" => {
                        let seed = js_sys::Date::now() as u64;
                        let (w, h) = (a.state.width, a.state.height);
                        a.regenerate(seed, w, h);
                        log::info!("New layout (seed {})", seed);
                    }
                    "c" | "C" => {
                        a.settings.show_connectors = !a.settings.show_connectors;
                        a.settings.save();
                    }
                    "d" | "D" => {
                        a.settings.density = a.settings.density.next();
                        a.settings.save();
                        let seed = js_sys::Date::now() as u64;
                        let (w, h) = (a.state.width, a.state.height);
                        a.regenerate(seed, w, h);
                        log::info!("Density: {}", a.settings.density.as_str());
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, art: Rc<RefCell<Artwork>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut a = art.borrow_mut();
            if let Some(ref mut rs) = a.render_state {
                rs.resize(width, height, (client_w as f32, client_h as f32));
            }
            // Viewport change is the full-teardown path: everything is
            // rebuilt against the new extent
            let seed = js_sys::Date::now() as u64;
            a.regenerate(seed, client_w as f32, client_h as f32);
            log::info!("Resized to {}x{}, artwork rebuilt", client_w, client_h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(art: Rc<RefCell<Artwork>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            art_loop(art, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn art_loop(art: Rc<RefCell<Artwork>>, time: f64) {
        {
            let mut a = art.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                TICK_DT
            };
            a.last_time = time;

            a.update(dt);
            a.render();
        }

        request_animation_frame(art);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_art::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use wheelburst::settings::Settings;
    use wheelburst::sim::{ArtState, disperse_at, generate_layout, restore_last, tick};

    env_logger::init();
    log::info!("Wheelburst (native) starting...");
    log::info!("Native mode has no window; run with `trunk serve` for the web version");

    // Headless smoke run: lay out, burst one color group, tick, restore
    let settings = Settings::load();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut state = ArtState::new(seed, 1280.0, 800.0);
    generate_layout(&mut state, settings.density.target_wheels());
    println!(
        "laid out {} wheels, {} links",
        state.elements.len(),
        state.connectors.len()
    );

    if let Some(pos) = state.elements.first().map(|e| e.pos) {
        disperse_at(&mut state, pos);
        println!(
            "dispersed {} wheels into {} particles",
            state.history.last().map(|b| b.len()).unwrap_or(0),
            state.particles.len()
        );
        for _ in 0..60 {
            tick(&mut state);
        }
        restore_last(&mut state);
        for _ in 0..600 {
            tick(&mut state);
            if state.particles.is_empty() {
                break;
            }
        }
        println!(
            "after restore: {} particles live, history depth {}",
            state.particles.len(),
            state.history.len()
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
