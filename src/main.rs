//! Goo Planet entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent};

    use goo_planet::engine::GameEngine;
    use goo_planet::renderer::{BlendMode, Vertex, hex_to_rgba};
    use goo_planet::scene::{ASSETS, FixedDemoScene};
    use goo_planet::{ConfigError, Settings};

    /// Game instance holding all state
    struct Game {
        engine: GameEngine,
        scene: FixedDemoScene,
        images: HashMap<usize, HtmlImageElement>,
        context: CanvasRenderingContext2d,
    }

    impl Game {
        /// Poll the engine and redraw when it ticked
        fn frame(&mut self, time: f64) {
            if self.engine.frame(time / 1000.0, &mut self.scene) {
                self.draw();
            }
        }

        fn draw(&self) {
            let ctx = &self.context;
            let renderer = &self.engine.renderer;
            let [r, g, b, _] = hex_to_rgba(renderer.background, 1.0);
            ctx.set_global_alpha(1.0);
            let _ = ctx.set_global_composite_operation("source-over");
            ctx.set_fill_style_str(&css_color([r, g, b, 1.0]));
            ctx.fill_rect(0.0, 0.0, renderer.width() as f64, renderer.height() as f64);

            let vertices = renderer.vertices();
            for batch in renderer.batches() {
                let _ = ctx.set_global_composite_operation(composite_operation(batch.blend));
                let slice = &vertices[batch.start..batch.start + batch.count];
                let image = batch.texture.index().and_then(|i| self.images.get(&i));
                match image {
                    Some(image) => {
                        for quad in slice.chunks_exact(6) {
                            draw_textured_quad(ctx, image, quad);
                        }
                    }
                    None => {
                        for triangle in slice.chunks_exact(3) {
                            fill_triangle(ctx, triangle);
                        }
                    }
                }
            }
            let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            ctx.set_global_alpha(1.0);
        }
    }

    fn css_color([r, g, b, a]: [f32; 4]) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            a
        )
    }

    fn composite_operation(blend: BlendMode) -> &'static str {
        match blend {
            BlendMode::Normal => "source-over",
            BlendMode::Add => "lighter",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
        }
    }

    fn fill_triangle(ctx: &CanvasRenderingContext2d, triangle: &[Vertex]) {
        let color = triangle[0].color;
        ctx.set_global_alpha(color[3] as f64);
        ctx.set_fill_style_str(&css_color([color[0], color[1], color[2], 1.0]));
        ctx.begin_path();
        ctx.move_to(triangle[0].position[0] as f64, triangle[0].position[1] as f64);
        ctx.line_to(triangle[1].position[0] as f64, triangle[1].position[1] as f64);
        ctx.line_to(triangle[2].position[0] as f64, triangle[2].position[1] as f64);
        ctx.close_path();
        ctx.fill();
    }

    /// Map the unit square onto the quad and draw the image into it
    fn draw_textured_quad(
        ctx: &CanvasRenderingContext2d,
        image: &HtmlImageElement,
        quad: &[Vertex],
    ) {
        let origin = Vec2::from(quad[0].position);
        let u = Vec2::from(quad[1].position) - origin;
        let v = Vec2::from(quad[5].position) - origin;
        ctx.set_global_alpha(quad[0].color[3] as f64);
        let _ = ctx.set_transform(
            u.x as f64,
            u.y as f64,
            v.x as f64,
            v.y as f64,
            origin.x as f64,
            origin.y as f64,
        );
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, 1.0, 1.0);
        let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    }

    fn window() -> Result<web_sys::Window, JsValue> {
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Goo Planet starting...");

        let document = window()?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let mut settings = Settings::load();
        settings.render.width = canvas.width();
        settings.render.height = canvas.height();

        let mut engine = GameEngine::new(&settings);
        let scene = FixedDemoScene::new(&mut engine, &settings)
            .map_err(|e: ConfigError| JsValue::from_str(&e.to_string()))?;
        engine.run();

        let game = Rc::new(RefCell::new(Game {
            engine,
            scene,
            images: HashMap::new(),
            context,
        }));

        load_images(game.clone())?;
        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);
        Ok(())
    }

    /// Fetch every queued texture and report it to the loader
    fn load_images(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for asset in ASSETS {
            let image = HtmlImageElement::new()?;
            let handle = game.borrow().engine.loader.get(asset.name);

            let onload = {
                let game = game.clone();
                let image = image.clone();
                Closure::<dyn FnMut()>::new(move || {
                    let mut g = game.borrow_mut();
                    g.engine.loader.resolve(
                        asset.name,
                        image.natural_width() as f32,
                        image.natural_height() as f32,
                    );
                    if let Some(index) = handle.index() {
                        g.images.insert(index, image.clone());
                    }
                })
            };
            image.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let onerror = {
                let game = game.clone();
                Closure::<dyn FnMut()>::new(move || {
                    game.borrow_mut().engine.loader.fail(asset.name);
                })
            };
            image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();

            image.set_src(asset.url);
        }
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let position =
            |event: &MouseEvent| Vec2::new(event.offset_x() as f32, event.offset_y() as f32);

        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().engine.pointer.moved(position(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().engine.pointer.down(position(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up / leave
        for name in ["mouseup", "mouseleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().engine.pointer.up();
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Ok(window) = window() else {
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
            if !g.engine.is_running() {
                return;
            }
            g.frame(time);
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Goo Planet (native) starting...");

    if let Err(e) = run_headless() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Run the demo scene without a window and log what the water does
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), goo_planet::ConfigError> {
    use goo_planet::Settings;
    use goo_planet::engine::GameEngine;
    use goo_planet::scene::{ASSETS, FixedDemoScene};

    const SECONDS: f64 = 10.0;
    const FRAME: f64 = 1.0 / 60.0;

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let settings = Settings::load_from(path.as_deref())?;

    let mut engine = GameEngine::new(&settings);
    let mut scene = FixedDemoScene::new(&mut engine, &settings)?;
    engine.run();
    // No images natively, the asset table sizes stand in for them
    for asset in ASSETS {
        engine.loader.resolve(asset.name, asset.width, asset.height);
    }

    let mut now = 0.0;
    while now < SECONDS {
        if engine.frame(now, &mut scene) && engine.frames() % 30 == 0 {
            let water = scene.water();
            log::info!(
                "t={:.1}s impacts={} wave energy={:.6} vertices={} batches={}",
                engine.time(),
                water.impacts(),
                water.field().kinetic_energy(),
                engine.renderer.vertices().len(),
                engine.renderer.batches().len(),
            );
        }
        now += FRAME;
    }

    log::info!(
        "{} ticks, {} KiB of vertices in the last frame",
        engine.frames(),
        engine.renderer.vertex_bytes().len() / 1024
    );
    engine.destroy();
    Ok(())
}
