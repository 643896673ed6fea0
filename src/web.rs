// Browser front-end: draws particles on a 2d canvas, keeps the canvas sized to the
// window and schedules frames with requestAnimationFrame.

use crate::color::Color;
use crate::config::SimConfig;
use crate::error::Error;
use crate::simulation::Simulation;
use crate::surface::{Surface, Viewport};
use crate::utils;
use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, Window};

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logger();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

fn to_js_error(err: Error) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<CanvasSurface, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(CanvasSurface { context })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    #[allow(deprecated)]
    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: Color, stroke: Color) {
        self.context.begin_path();
        // arc only fails for a negative radius, which Particle::new rules out
        if self.context.arc(x, y, radius, 0.0, PI * 2.0).is_err() {
            return;
        }
        self.context.set_fill_style(&JsValue::from_str(&fill.to_css()));
        self.context.fill();
        self.context.set_stroke_style(&JsValue::from_str(&stroke.to_css()));
        self.context.stroke();
    }
}

// Viewport backed by the canvas element itself. A window resize listener keeps the
// canvas as big as the window, and width/height are read fresh every frame.
pub struct CanvasHost {
    canvas: HtmlCanvasElement,
    on_resize: Closure<dyn FnMut()>,
}

impl CanvasHost {
    pub fn new(canvas: HtmlCanvasElement) -> Result<CanvasHost, JsValue> {
        fit_to_window(&canvas)?;
        let resized = canvas.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            if let Err(err) = fit_to_window(&resized) {
                log::warn!("failed to resize canvas: {:?}", err);
            }
        }) as Box<dyn FnMut()>);
        window()?.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        Ok(CanvasHost { canvas, on_resize })
    }
}

impl Viewport for CanvasHost {
    fn viewport_size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }
}

impl Drop for CanvasHost {
    fn drop(&mut self) {
        if let Ok(window) = window() {
            if let Err(err) = window
                .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove resize listener: {:?}", err);
            }
        }
    }
}

fn fit_to_window(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let window = window()?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    Ok(())
}

#[wasm_bindgen]
pub struct ParticleCanvas {
    simulation: Simulation,
    surface: CanvasSurface,
    host: CanvasHost,
}

#[wasm_bindgen]
impl ParticleCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<ParticleCanvas, JsValue> {
        ParticleCanvas::build(canvas, SimConfig::default())
    }

    /// Same as `new`, with settings parsed from a JSON object string.
    pub fn with_config(canvas: HtmlCanvasElement, json: &str) -> Result<ParticleCanvas, JsValue> {
        let config = SimConfig::from_json(json).map_err(to_js_error)?;
        ParticleCanvas::build(canvas, config)
    }

    pub fn start(&mut self, particle_count: u32) -> Result<(), JsValue> {
        let (width, height) = self.host.viewport_size();
        self.simulation
            .start(particle_count as usize, width, height)
            .map_err(to_js_error)
    }

    /// Clears the canvas and advances the simulation by one frame.
    /// Returns false once stopped.
    pub fn frame(&mut self) -> bool {
        let _timer = Timer::new("ParticleCanvas::frame");
        self.simulation.frame(&self.host, &mut self.surface).is_some()
    }

    pub fn stop(&mut self) {
        self.simulation.stop();
    }

    pub fn is_running(&self) -> bool {
        self.simulation.is_running()
    }

    pub fn len(&self) -> usize {
        self.simulation.particles().map_or(0, |p| p.len())
    }
}

impl ParticleCanvas {
    fn build(canvas: HtmlCanvasElement, config: SimConfig) -> Result<ParticleCanvas, JsValue> {
        let surface = CanvasSurface::new(&canvas)?;
        let host = CanvasHost::new(canvas)?;
        Ok(ParticleCanvas {
            simulation: Simulation::new(config),
            surface,
            host,
        })
    }
}

struct LoopState {
    canvas: RefCell<ParticleCanvas>,
    frame_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

fn schedule(state: &LoopState) -> Result<(), JsValue> {
    let callback = state.callback.borrow();
    if let Some(callback) = callback.as_ref() {
        let id = window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
        state.frame_id.set(Some(id));
    }
    Ok(())
}

/// Runs a ParticleCanvas off requestAnimationFrame, one tick per display refresh,
/// until `stop` is called.
#[wasm_bindgen]
pub struct AnimationLoop {
    state: Rc<LoopState>,
}

#[wasm_bindgen]
impl AnimationLoop {
    pub fn start(canvas: HtmlCanvasElement, particle_count: u32) -> Result<AnimationLoop, JsValue> {
        let mut particle_canvas = ParticleCanvas::new(canvas)?;
        particle_canvas.start(particle_count)?;
        let state = Rc::new(LoopState {
            canvas: RefCell::new(particle_canvas),
            frame_id: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak = Rc::downgrade(&state);
        let callback = Closure::wrap(Box::new(move || {
            let state = match weak.upgrade() {
                Some(state) => state,
                None => return,
            };
            state.frame_id.set(None);
            if !state.canvas.borrow_mut().frame() {
                return;
            }
            if let Err(err) = schedule(&state) {
                log::error!("failed to schedule next frame: {:?}", err);
            }
        }) as Box<dyn FnMut()>);
        *state.callback.borrow_mut() = Some(callback);
        schedule(&state)?;

        Ok(AnimationLoop { state })
    }

    /// Cancels the pending frame and stops the simulation. Safe to call more than once.
    pub fn stop(&self) {
        self.state.canvas.borrow_mut().stop();
        if let Some(id) = self.state.frame_id.take() {
            if let Ok(window) = window() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    log::warn!("failed to cancel animation frame {}: {:?}", id, err);
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.canvas.borrow().is_running()
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
        self.state.callback.borrow_mut().take();
    }
}
